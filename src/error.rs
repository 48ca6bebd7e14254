//! Error types for vertmailer

use std::fmt;
use thiserror::Error;

/// Failure reported by the SMTP protocol client.
pub use mail_send::Error as SmtpError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("authentication error: {0}")]
    Auth(#[source] SmtpError),

    #[error("failed to {step}: {source}")]
    Protocol {
        step: Step,
        #[source]
        source: SmtpError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the message may have been delivered despite the error.
    ///
    /// A QUIT failure happens after the server already acknowledged
    /// the end of DATA, so the caller cannot tell from this error
    /// alone whether a retry would send a duplicate.
    #[must_use]
    pub const fn is_ambiguous_delivery(&self) -> bool {
        matches!(
            self,
            Self::Protocol {
                step: Step::Quit,
                ..
            }
        )
    }

    /// The protocol step that failed, if the error came from one.
    #[must_use]
    pub const fn step(&self) -> Option<Step> {
        match self {
            Self::Protocol { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Rejection reasons found before any network work starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid sender email address")]
    InvalidSender,

    #[error("at least one recipient is required")]
    NoRecipients,

    #[error("invalid recipient email address")]
    InvalidRecipient,

    #[error("subject cannot be empty")]
    EmptySubject,

    #[error("body cannot be empty")]
    EmptyBody,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to load CA certificate: {0}")]
    CaCert(String),

    #[error("failed to dial SMTP server: {0}")]
    Dial(#[source] std::io::Error),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("failed to create SMTP client: {0}")]
    Client(#[source] SmtpError),
}

/// A step of the submission sequence after authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    MailFrom,
    RcptTo,
    Data,
    Write,
    Close,
    Quit,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MailFrom => "set mail sender",
            Self::RcptTo => "set recipient",
            Self::Data => "open DATA",
            Self::Write => "write message",
            Self::Close => "close DATA",
            Self::Quit => "quit SMTP session",
        })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
