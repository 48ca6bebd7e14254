//! Input validation for outgoing mail
//!
//! Runs before sanitization and before any network I/O. The first
//! failing rule rejects the whole message.

use crate::error::ValidationError;
use crate::mail::Mail;
use regex::Regex;
use std::sync::LazyLock;

const MIN_ADDRESS_LEN: usize = 6;
const MAX_ADDRESS_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

static LOCAL_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("local part pattern compiles")
});

static DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
        .expect("domain pattern compiles")
});

/// Check whether `address` is a plain `local@domain` mailbox.
///
/// Display names, comments, quoted local parts and address literals
/// are rejected, as is any whitespace.
///
/// ```
/// use vertmailer::is_valid_address;
///
/// assert!(is_valid_address("user@example.com"));
/// assert!(!is_valid_address("invalid-email"));
/// ```
#[must_use]
pub fn is_valid_address(address: &str) -> bool {
    if !(MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&address.len()) {
        return false;
    }
    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };
    local.len() <= MAX_LOCAL_LEN && LOCAL_PART.is_match(local) && DOMAIN.is_match(domain)
}

/// Validate every field of `mail`.
///
/// # Errors
///
/// Returns the first rule that fails, checked in the order sender,
/// recipients, subject, body.
pub fn validate_mail(mail: &Mail) -> Result<(), ValidationError> {
    if !is_valid_address(&mail.from) {
        return Err(ValidationError::InvalidSender);
    }

    if mail.to.is_empty() {
        return Err(ValidationError::NoRecipients);
    }
    if !mail.to.iter().all(|to| is_valid_address(to)) {
        return Err(ValidationError::InvalidRecipient);
    }

    if mail.subject.trim().is_empty() {
        return Err(ValidationError::EmptySubject);
    }

    if mail.body.trim().is_empty() {
        return Err(ValidationError::EmptyBody);
    }

    Ok(())
}
