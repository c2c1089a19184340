use super::error_code::{self, VeritasErrorCode};
use super::{ConfigError, FactsError, FeedbackError, ValidationError};

/// Top-level error type for Veritas.
#[derive(Debug, thiserror::Error)]
pub enum VeritasError {
    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("facts error: {0}")]
    FactsError(#[from] FactsError),

    #[error("validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("feedback error: {0}")]
    FeedbackError(#[from] FeedbackError),

    /// A collaborator (permission checker, audit sink, source oracle,
    /// archive) failed. Callers degrade rather than abort on this.
    #[error("collaborator {collaborator} failed: {reason}")]
    CollaboratorFailed { collaborator: String, reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl VeritasError {
    /// Shorthand for a collaborator failure.
    pub fn collaborator(collaborator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CollaboratorFailed {
            collaborator: collaborator.into(),
            reason: reason.into(),
        }
    }
}

impl VeritasErrorCode for VeritasError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigError(e) => e.error_code(),
            Self::FactsError(e) => e.error_code(),
            Self::ValidationError(e) => e.error_code(),
            Self::FeedbackError(e) => e.error_code(),
            Self::CollaboratorFailed { .. } => error_code::COLLABORATOR_ERROR,
            Self::SerializationError(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}

/// Convenience alias used throughout Veritas.
pub type VeritasResult<T> = Result<T, VeritasError>;
