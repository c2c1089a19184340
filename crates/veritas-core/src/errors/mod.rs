//! Error handling for Veritas.
//! One error enum per subsystem, `thiserror` only, aggregated into [`VeritasError`].
//!
//! Expected outcomes (denials, rejected payloads, contradictions, fallacies)
//! are not errors; they travel as [`crate::models::Outcome`] and
//! [`crate::models::ValidationResult`]. `Err` is reserved for programmer
//! errors and internal failures.

pub mod config_error;
pub mod error_code;
pub mod facts_error;
pub mod feedback_error;
pub mod validation_error;
pub mod veritas_error;

pub use config_error::ConfigError;
pub use error_code::VeritasErrorCode;
pub use facts_error::FactsError;
pub use feedback_error::FeedbackError;
pub use validation_error::ValidationError;
pub use veritas_error::{VeritasError, VeritasResult};
