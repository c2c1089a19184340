use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operation an audit record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    FactAdded,
    FactUpdated,
    FactRemoved,
    FactsImported,
    StatementValidated,
    ConsistencyValidated,
    InferenceValidated,
    ConflictResolved,
    ConfidenceScored,
    FeedbackSubmitted,
    FeedbackVerified,
    FeedbackApplied,
    FeedbackRejected,
    FeedbackViewed,
    FeedbackPurged,
}

/// How the audited operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Completed,
    Denied,
    Rejected,
    Failed,
}

/// An audit log entry recording a gated operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub actor: String,
    pub outcome: AuditOutcome,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        action: AuditAction,
        actor: impl Into<String>,
        outcome: AuditOutcome,
        details: serde_json::Value,
    ) -> Self {
        Self {
            action,
            actor: actor.into(),
            outcome,
            details,
            timestamp: Utc::now(),
        }
    }
}
