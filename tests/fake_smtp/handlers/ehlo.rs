//! EHLO / HELO handlers.
//!
//! EHLO answers with a multi-line 250 reply: the first line names the
//! server, every further line advertises one extension.

use crate::fake_smtp::io::write_line;
use tokio::io::{AsyncRead, AsyncWrite, BufReader};

/// Handle EHLO. Advertises `AUTH PLAIN` and `8BITMIME`.
pub async fn handle_ehlo<S: AsyncRead + AsyncWrite + Unpin>(stream: &mut BufReader<S>) -> bool {
    write_line(stream, "250-localhost greets you\r\n250-AUTH PLAIN\r\n250 8BITMIME\r\n")
        .await
        .is_ok()
}

/// Handle HELO.
pub async fn handle_helo<S: AsyncRead + AsyncWrite + Unpin>(stream: &mut BufReader<S>) -> bool {
    write_line(stream, "250 localhost\r\n").await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ehlo_lists_auth_plain() {
        let (client, server) = tokio::io::duplex(1024);
        let mut stream = BufReader::new(server);
        assert!(handle_ehlo(&mut stream).await);
        drop(stream);

        let mut buf = String::new();
        tokio::io::AsyncReadExt::read_to_string(&mut BufReader::new(client), &mut buf)
            .await
            .unwrap();
        assert!(buf.starts_with("250-"));
        assert!(buf.contains("250-AUTH PLAIN\r\n"));
        assert!(buf.ends_with("250 8BITMIME\r\n"));
    }
}
