//! # Services
//!
//! Orchestration between the API layer and a [`crate::BoardRepo`]. Storage
//! calls are issued sequentially unless noted; every entity leaves through a
//! sanitized view.

mod replies;
mod threads;

pub use replies::ReplyService;
pub use threads::ThreadService;

use crate::error::{AppError, Result};

/// Rejects blank required input before it reaches storage.
fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}
