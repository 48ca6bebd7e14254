//! DATA handler.
//!
//! After the 354 intermediate reply the client streams the message,
//! ending with a line holding a single `.`. Lines the client
//! dot-stuffed lose their leading `.` again here.

use crate::fake_smtp::io::write_line;
use crate::fake_smtp::transcript::SessionLog;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader};

/// Handle DATA: read the payload, record it, then acknowledge.
pub async fn handle_data<S: AsyncRead + AsyncWrite + Unpin>(
    log: &SessionLog,
    stream: &mut BufReader<S>,
) -> bool {
    if log.get().rcpt_to.is_empty() {
        return write_line(stream, "503 5.5.1 No valid recipients\r\n")
            .await
            .is_ok();
    }
    if write_line(stream, "354 End data with <CR><LF>.<CR><LF>\r\n")
        .await
        .is_err()
    {
        return false;
    }

    let mut message = String::new();
    loop {
        let mut line = String::new();
        match stream.read_line(&mut line).await {
            Ok(0) | Err(_) => return false,
            Ok(_) => {}
        }
        if line == ".\r\n" {
            break;
        }
        let line = line.strip_prefix('.').unwrap_or(&line);
        message.push_str(line);
    }

    log.update(|t| t.messages.push(message));
    write_line(stream, "250 2.0.0 OK queued\r\n").await.is_ok()
}
