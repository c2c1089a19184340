//! VeritasErrorCode trait for the UI/host boundary.

/// Every error enum implements this to provide a structured error code
/// string for hosts that surface failures to a user interface.
pub trait VeritasErrorCode {
    /// Returns the error code string (e.g., "FACTS_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const FACTS_ERROR: &str = "FACTS_ERROR";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const FEEDBACK_ERROR: &str = "FEEDBACK_ERROR";
pub const FEEDBACK_NOT_FOUND: &str = "FEEDBACK_NOT_FOUND";
pub const COLLABORATOR_ERROR: &str = "COLLABORATOR_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const LOCK_POISONED: &str = "LOCK_POISONED";
