//! # AppError
//!
//! Failures that abort a request. Domain negatives such as a wrong password
//! are not errors; see [`crate::moderation::ModerationOutcome`].

use thiserror::Error;

/// The primary error type for all rb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Underlying read/write failure (I/O, constraint violation). Never retried.
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),

    /// Malformed input (e.g. missing text, non-numeric thread id on create)
    #[error("validation error: {0}")]
    Validation(String),

    /// The request deadline elapsed before storage answered
    #[error("request timed out")]
    Timeout,
}

/// A specialized Result type for Rusty-Board logic.
pub type Result<T> = std::result::Result<T, AppError>;
