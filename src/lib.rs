//! SMTP submission client
//!
//! Sends a single message to an SMTP server: the fields are
//! validated, the HTML body is sanitized, and the message is
//! submitted over plain TCP or implicit TLS (verified against a CA
//! bundle you supply) with MAIL FROM, RCPT TO, DATA and QUIT.
//!
//! ```no_run
//! use vertmailer::{Mail, MailServer};
//!
//! # async fn run() -> vertmailer::Result<()> {
//! let server = MailServer::new("smtp.example.com", 465, "user", "secret")
//!     .with_tls("/etc/ssl/certs/example-ca.pem");
//! let mail = Mail::new("me@example.com", ["you@example.com"], "Hi", "<p>Hello</p>");
//! vertmailer::send(mail, server).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod connection;
mod error;
mod mail;
mod mailer;
mod sanitizer;
mod validator;

pub use config::{AuthMode, MailServer};
pub use connection::load_ca_cert;
pub use error::{Error, Result, SmtpError, Step, TransportError, ValidationError};
pub use mail::Mail;
pub use mailer::{Mailer, MailerService, send};
pub use sanitizer::{sanitize_html, sanitize_mail};
pub use validator::{is_valid_address, validate_mail};
