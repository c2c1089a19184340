//! Errors raised by the validity checker and fallacy catalogue.

use super::error_code::{self, VeritasErrorCode};

/// Internal failures of the validation subsystem.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A fallacy definition carries a pattern that does not compile.
    #[error("invalid pattern for fallacy {fallacy_id}: {message}")]
    InvalidPattern { fallacy_id: String, message: String },

    /// Two catalogue entries share the same id.
    #[error("duplicate fallacy definition: {0}")]
    DuplicateFallacy(String),

    /// A fallacy definition is out of range (severity outside [0, 1], no patterns).
    #[error("invalid fallacy definition {fallacy_id}: {message}")]
    InvalidDefinition { fallacy_id: String, message: String },

    /// A statement could not be fingerprinted for caching.
    #[error("statement fingerprint failed: {0}")]
    FingerprintFailed(String),
}

impl VeritasErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
