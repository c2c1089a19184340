//! Expected results of gated operations.

use serde::{Deserialize, Serialize};

use super::access::Permission;

/// Result of a permission-gated operation.
///
/// Denials and rejected payloads are expected outcomes, not errors, and
/// are always audit-logged before they reach the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum Outcome<T> {
    Completed(T),
    Denied { permission: Permission, reason: String },
    Rejected { field: String, reason: String },
}

impl<T> Outcome<T> {
    pub fn denied(permission: Permission, reason: impl Into<String>) -> Self {
        Self::Denied {
            permission,
            reason: reason.into(),
        }
    }

    pub fn rejected(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// The completed value, if any.
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_completed(&self) -> Option<&T> {
        match self {
            Self::Completed(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Completed(v) => Outcome::Completed(f(v)),
            Self::Denied { permission, reason } => Outcome::Denied { permission, reason },
            Self::Rejected { field, reason } => Outcome::Rejected { field, reason },
        }
    }

    /// Short label used in audit records and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed(_) => "completed",
            Self::Denied { .. } => "denied",
            Self::Rejected { .. } => "rejected",
        }
    }
}
