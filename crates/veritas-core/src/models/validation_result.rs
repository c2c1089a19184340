use serde::{Deserialize, Serialize};
use std::fmt;

use super::fallacy::FallacyDetection;
use super::foundation_fact::FoundationFact;

/// Verdict of a validity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    Valid,
    ContradictsFoundation,
    LogicallyInconsistent,
    Fallacious,
    Uncertain,
}

impl ValidationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::ContradictsFoundation => "CONTRADICTS_FOUNDATION",
            Self::LogicallyInconsistent => "LOGICALLY_INCONSISTENT",
            Self::Fallacious => "FALLACIOUS",
            Self::Uncertain => "UNCERTAIN",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side a conflict resolution kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    KeepExisting,
    AcceptProposed,
}

/// Auditable decision between a foundation value and a proposed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictResolution {
    pub key: String,
    pub resolution: Resolution,
    pub resolved_value: serde_json::Value,
    pub confidence: f64,
    pub policy: String,
    pub explanation: String,
}

/// Pairwise relation between two statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalRelation {
    Equivalent,
    Contradictory,
    Independent,
    Implication,
}

/// Supporting detail attached to a [`ValidationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationDetails {
    /// Nothing contradicted the statement. `fact_id` names an agreeing fact.
    Consistent {
        fact_id: Option<String>,
        note: Option<String>,
    },
    /// The statement disagrees with a foundation fact.
    FoundationContradiction {
        fact: FoundationFact,
        proposed: serde_json::Value,
        resolution: Option<ConflictResolution>,
    },
    /// A foundation disagreement was resolved in favour of the statement.
    ResolvedConflict {
        fact_id: String,
        resolution: ConflictResolution,
    },
    /// One or more fallacies were detected; the first is the deciding one.
    Fallacy { detections: Vec<FallacyDetection> },
    /// The statement (or statement set) contradicts itself.
    Inconsistency {
        reason: String,
        keys: Vec<String>,
        relation_confidence: Option<f64>,
    },
    /// A factor could not be computed and was replaced by a neutral default.
    Degraded { component: String, reason: String },
}

/// Verdict plus confidence and detail for one validity check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub key: String,
    pub status: ValidationStatus,
    pub confidence: f64,
    pub details: ValidationDetails,
}

impl ValidationResult {
    pub fn new(
        key: impl Into<String>,
        status: ValidationStatus,
        confidence: f64,
        details: ValidationDetails,
    ) -> Self {
        Self {
            key: key.into(),
            status,
            confidence: confidence.clamp(0.0, 1.0),
            details,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == ValidationStatus::Valid
    }

    /// Id of the fallacy that decided a FALLACIOUS verdict.
    pub fn fallacy_id(&self) -> Option<&str> {
        match &self.details {
            ValidationDetails::Fallacy { detections } => {
                detections.first().map(|d| d.fallacy_id.as_str())
            }
            _ => None,
        }
    }

    /// Id of the foundation fact involved in the verdict, if any.
    pub fn fact_id(&self) -> Option<&str> {
        match &self.details {
            ValidationDetails::Consistent { fact_id, .. } => fact_id.as_deref(),
            ValidationDetails::FoundationContradiction { fact, .. } => Some(fact.id.as_str()),
            ValidationDetails::ResolvedConflict { fact_id, .. } => Some(fact_id.as_str()),
            _ => None,
        }
    }
}

/// Inference rule that licensed a conclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceRule {
    ModusPonens,
    ModusTollens,
    HypotheticalSyllogism,
    DisjunctiveSyllogism,
    Restatement,
}

/// Result of checking whether a conclusion follows from premises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    pub valid: bool,
    pub confidence: f64,
    pub rule: Option<InferenceRule>,
    /// Why the inference was rejected (`non_sequitur`, `invalid_premise`,
    /// `inconsistent_premises`).
    pub reason: Option<String>,
    /// The premise verdict that blocked the inference, if any.
    pub blocking: Option<ValidationResult>,
}

impl InferenceResult {
    pub fn valid(rule: InferenceRule, confidence: f64) -> Self {
        Self {
            valid: true,
            confidence: confidence.clamp(0.0, 1.0),
            rule: Some(rule),
            reason: None,
            blocking: None,
        }
    }

    pub fn invalid(reason: impl Into<String>, blocking: Option<ValidationResult>) -> Self {
        Self {
            valid: false,
            confidence: 0.0,
            rule: None,
            reason: Some(reason.into()),
            blocking,
        }
    }
}
