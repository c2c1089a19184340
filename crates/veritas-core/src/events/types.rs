//! Event payloads published between engines.

use serde::{Deserialize, Serialize};

use crate::models::{FeedbackCategory, Resolution, ValidationStatus};

/// Subscription topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    FoundationFactChanged,
    ConflictResolved,
    StatementValidated,
    FeedbackSubmitted,
    FeedbackVerified,
    CorrectionApplied,
}

impl Topic {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FoundationFactChanged => "foundation_fact.changed",
            Self::ConflictResolved => "conflict.resolved",
            Self::StatementValidated => "statement.validated",
            Self::FeedbackSubmitted => "feedback.submitted",
            Self::FeedbackVerified => "feedback.verified",
            Self::CorrectionApplied => "correction.applied",
        }
    }
}

/// Kind of foundation-fact mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactChange {
    Added,
    Updated,
    Removed,
    Imported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    FoundationFactChanged {
        fact_id: String,
        change: FactChange,
        revision: u64,
    },
    ConflictResolved {
        key: String,
        resolution: Resolution,
        confidence: f64,
    },
    StatementValidated {
        key: String,
        status: ValidationStatus,
        confidence: f64,
        fact_id: Option<String>,
        fallacy_id: Option<String>,
    },
    FeedbackSubmitted {
        id: String,
        step_id: String,
        category: FeedbackCategory,
        auto_applied: bool,
    },
    FeedbackVerified {
        id: String,
        verified: bool,
    },
    CorrectionApplied {
        id: String,
        step_id: String,
        category: FeedbackCategory,
    },
}

impl DomainEvent {
    pub fn topic(&self) -> Topic {
        match self {
            Self::FoundationFactChanged { .. } => Topic::FoundationFactChanged,
            Self::ConflictResolved { .. } => Topic::ConflictResolved,
            Self::StatementValidated { .. } => Topic::StatementValidated,
            Self::FeedbackSubmitted { .. } => Topic::FeedbackSubmitted,
            Self::FeedbackVerified { .. } => Topic::FeedbackVerified,
            Self::CorrectionApplied { .. } => Topic::CorrectionApplied,
        }
    }
}
