//! Outgoing message fields and their wire rendering

use serde::{Deserialize, Serialize};

/// A single outgoing message.
///
/// `to` is the envelope recipient list. Only the first entry is shown
/// in the rendered `To:` header, but every entry receives the message.
///
/// # Examples
///
/// ```
/// use vertmailer::Mail;
///
/// let mail = Mail::new("a@example.com", ["b@example.com"], "Hi", "Hello");
/// assert_eq!(
///     mail.to_wire(),
///     "From: a@example.com\r\nTo: b@example.com\r\nSubject: Hi\r\n\r\nHello"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl Mail {
    pub fn new<I, S>(
        from: impl Into<String>,
        to: I,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            from: from.into(),
            to: to.into_iter().map(Into::into).collect(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Header fields in rendering order.
    fn headers(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            Some(("From", self.from.as_str())),
            self.to.first().map(|to| ("To", to.as_str())),
            Some(("Subject", self.subject.as_str())),
        ]
        .into_iter()
        .flatten()
    }

    /// Render the DATA payload: CRLF-terminated headers, a blank
    /// line, then the body with its line endings normalized to CRLF.
    #[must_use]
    pub fn to_wire(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 128);
        for (key, value) in self.headers() {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push_str("\r\n");
        }
        out.push_str("\r\n");
        for (i, line) in self.body.split('\n').enumerate() {
            if i > 0 {
                out.push_str("\r\n");
            }
            out.push_str(line.strip_suffix('\r').unwrap_or(line));
        }
        out
    }
}
