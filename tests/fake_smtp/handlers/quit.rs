//! QUIT handler.

use crate::fake_smtp::io::write_line;
use tokio::io::{AsyncRead, AsyncWrite, BufReader};

/// Handle QUIT. `broken` makes the server answer with a 421 instead
/// of the expected 221, as a misbehaving server might after DATA.
pub async fn handle_quit<S: AsyncRead + AsyncWrite + Unpin>(broken: bool, stream: &mut BufReader<S>) {
    let reply = if broken {
        "421 4.3.0 Something went wrong\r\n"
    } else {
        "221 2.0.0 Bye\r\n"
    };
    let _ = write_line(stream, reply).await;
}
