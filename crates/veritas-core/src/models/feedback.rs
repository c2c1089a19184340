use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Kind of correction a feedback entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FeedbackCategory {
    FactualError,
    LogicalFallacy,
    MissingContext,
    OutdatedInfo,
    BiasConcern,
    Clarification,
    AlternativeView,
    Other,
}

impl FeedbackCategory {
    pub const ALL: [FeedbackCategory; 8] = [
        Self::FactualError,
        Self::LogicalFallacy,
        Self::MissingContext,
        Self::OutdatedInfo,
        Self::BiasConcern,
        Self::Clarification,
        Self::AlternativeView,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FactualError => "factual_error",
            Self::LogicalFallacy => "logical_fallacy",
            Self::MissingContext => "missing_context",
            Self::OutdatedInfo => "outdated_info",
            Self::BiasConcern => "bias_concern",
            Self::Clarification => "clarification",
            Self::AlternativeView => "alternative_view",
            Self::Other => "other",
        }
    }

    /// Impact assumed when the submitter does not state one.
    pub fn default_impact(self) -> ImpactLevel {
        match self {
            Self::FactualError | Self::LogicalFallacy => ImpactLevel::High,
            Self::MissingContext | Self::OutdatedInfo | Self::BiasConcern => ImpactLevel::Medium,
            Self::Clarification | Self::AlternativeView | Self::Other => ImpactLevel::Low,
        }
    }
}

impl fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| format!("unknown feedback category: {s}"))
    }
}

/// How much a correction matters to downstream reasoning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ImpactLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl ImpactLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for ImpactLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(format!("unknown impact level: {other}")),
        }
    }
}

/// Lifecycle position of a feedback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FeedbackStatus {
    PendingVerification,
    Verified,
    Applied,
    Rejected,
}

/// Who produced a feedback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FeedbackOrigin {
    User,
    /// Auto-logged from a validation outcome.
    System,
}

/// A correction against a reasoning step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeedbackEntry {
    pub id: String,
    pub step_id: String,
    pub correction: String,
    pub user_id: Option<String>,
    pub category: FeedbackCategory,
    pub impact_level: ImpactLevel,
    pub confidence: f64,
    pub source_url: Option<String>,
    pub source_reliability: Option<f64>,
    pub verified: bool,
    pub applied: bool,
    pub auto_applied: bool,
    pub status: FeedbackStatus,
    pub origin: FeedbackOrigin,
    pub verified_by: Option<String>,
    pub verification_note: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
    pub applied_at: Option<DateTime<Utc>>,
}

/// A correction that has been applied to a reasoning step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppliedCorrection {
    pub feedback_id: String,
    pub step_id: String,
    pub correction: String,
    pub category: FeedbackCategory,
    pub confidence: f64,
    pub applied_at: DateTime<Utc>,
}

impl AppliedCorrection {
    pub fn from_entry(entry: &FeedbackEntry, applied_at: DateTime<Utc>) -> Self {
        Self {
            feedback_id: entry.id.clone(),
            step_id: entry.step_id.clone(),
            correction: entry.correction.clone(),
            category: entry.category,
            confidence: entry.confidence,
            applied_at,
        }
    }
}
