//! Errors raised by the foundation facts store.

use super::error_code::{self, VeritasErrorCode};

/// Internal failures of the foundation facts store.
///
/// Malformed payloads and permission denials are reported as outcomes, not
/// through this type.
#[derive(Debug, thiserror::Error)]
pub enum FactsError {
    /// The fact table lock was poisoned by a panicking writer.
    #[error("fact table lock poisoned: {0}")]
    LockPoisoned(String),

    /// An import document could not be parsed.
    #[error("invalid fact import document: {0}")]
    InvalidImport(String),

    /// The fact table could not be serialized for export.
    #[error("fact export failed: {0}")]
    ExportFailed(String),
}

impl VeritasErrorCode for FactsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned(_) => error_code::LOCK_POISONED,
            _ => error_code::FACTS_ERROR,
        }
    }
}
