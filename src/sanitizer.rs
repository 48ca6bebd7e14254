//! Sanitization of validated mail
//!
//! The subject is folded onto one line; it is never rendered as markup. The
//! body goes through an `ammonia` allowlist so it is safe to deliver
//! as an HTML part while keeping ordinary formatting.

use crate::mail::Mail;
use ammonia::Builder;

/// Strip scripts, event handlers and unsafe URLs from `html`.
///
/// Formatting tags (`p`, `h1`..`h6`, `em`, `strong`, lists, tables,
/// links and so on) survive. Links are marked `nofollow`.
///
/// ```
/// let clean = vertmailer::sanitize_html("<script>alert(1)</script><p>hi</p>");
/// assert_eq!(clean, "<p>hi</p>");
/// ```
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .clean(html)
        .to_string()
}

/// Trim `subject` and join its lines with single spaces, so it can
/// only ever fill one header line.
fn fold_subject(subject: &str) -> String {
    subject
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Produce the sanitized copy of `mail` that gets formatted and sent.
///
/// Expects a message that already passed
/// [`validate_mail`](crate::validate_mail).
#[must_use]
pub fn sanitize_mail(mail: Mail) -> Mail {
    Mail {
        subject: fold_subject(&mail.subject),
        body: sanitize_html(&mail.body),
        ..mail
    }
}
