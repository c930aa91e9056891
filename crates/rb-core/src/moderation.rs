//! # Moderation Gate
//!
//! Decides whether a destructive request may proceed, and names the
//! domain-level answers a caller gets back. These answers travel as plain text
//! with a success status, so their wording is part of the public contract.

use std::fmt;

/// Result of a report, delete, or redact request that did not fail in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationOutcome {
    Reported,
    Success,
    IncorrectPassword,
    ThreadNotFound,
    ReplyNotFound,
}

impl ModerationOutcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::Reported => "reported",
            Self::Success => "success",
            Self::IncorrectPassword => "incorrect password",
            Self::ThreadNotFound => "Thread does not exist",
            Self::ReplyNotFound => "Reply does not exist",
        }
    }
}

impl fmt::Display for ModerationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Checks a supplied delete password against the stored one.
///
/// `stored` is the result of a password lookup; `None` means the row does not
/// exist and yields `missing`. Comparison is exact and case-sensitive.
pub fn authorize(
    stored: Option<&str>,
    supplied: &str,
    missing: ModerationOutcome,
) -> Result<(), ModerationOutcome> {
    match stored {
        None => Err(missing),
        Some(password) if password == supplied => Ok(()),
        Some(_) => Err(ModerationOutcome::IncorrectPassword),
    }
}
