//! Errors raised by the feedback/correction loop.

use super::error_code::{self, VeritasErrorCode};

/// Internal failures and programmer errors of the feedback loop.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    /// The referenced feedback entry does not exist.
    #[error("feedback not found: {0}")]
    NotFound(String),

    /// The feedback store lock was poisoned by a panicking writer.
    #[error("feedback store lock poisoned: {0}")]
    LockPoisoned(String),

    /// Durable archive write failed.
    #[error("feedback archive failed for {id}: {reason}")]
    ArchiveFailed { id: String, reason: String },
}

impl VeritasErrorCode for FeedbackError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => error_code::FEEDBACK_NOT_FOUND,
            Self::LockPoisoned(_) => error_code::LOCK_POISONED,
            Self::ArchiveFailed { .. } => error_code::FEEDBACK_ERROR,
        }
    }
}
