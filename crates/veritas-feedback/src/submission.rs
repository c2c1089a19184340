//! Request and receipt types for the feedback loop.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use veritas_core::models::{FeedbackCategory, FeedbackEntry, FeedbackOrigin, FeedbackStatus};

/// Raw feedback as a caller submits it. Category and impact arrive as
/// strings and are parsed during intake.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackSubmission {
    pub step_id: String,
    pub correction: String,
    pub category: Option<String>,
    pub impact_level: Option<String>,
    pub confidence: Option<f64>,
    pub source_url: Option<String>,
    /// Honoured only when the submitter also holds `verify_feedback`.
    pub verified: bool,
}

impl FeedbackSubmission {
    pub fn new(step_id: impl Into<String>, correction: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            correction: correction.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact_level = Some(impact.into());
        self
    }

    pub fn with_source(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn pre_verified(mut self) -> Self {
        self.verified = true;
        self
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReceipt {
    pub entry: FeedbackEntry,
    pub auto_applied: bool,
}

/// Result of an explicit apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyReceipt {
    pub entry: FeedbackEntry,
    /// False when the entry had already been applied.
    pub newly_applied: bool,
}

/// A verifier's decision on an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationRequest {
    pub id: String,
    /// Recorded as `verified_by`; falls back to the caller's id.
    pub user_id: Option<String>,
    pub verified: bool,
    pub note: Option<String>,
}

impl VerificationRequest {
    pub fn approve(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            verified: true,
            ..Self::default()
        }
    }

    pub fn decline(id: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            verified: false,
            note: Some(note.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReceipt {
    pub entry: FeedbackEntry,
    pub auto_applied: bool,
}

/// Something an entry's correction was found to contradict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorrectionConflict {
    FoundationFact {
        fact_id: String,
        statement: String,
        source: String,
        fact_confidence: f64,
        relation_confidence: f64,
    },
    AppliedCorrection {
        feedback_id: String,
        correction: String,
        relation_confidence: f64,
    },
}

/// Result of [`crate::FeedbackLoop::check_for_conflicts`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub feedback_id: String,
    pub step_id: String,
    pub conflicts: Vec<CorrectionConflict>,
}

impl ConflictReport {
    pub fn is_clear(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Listing filter. Unset fields match everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackFilter {
    pub user_id: Option<String>,
    pub step_id: Option<String>,
    pub status: Option<FeedbackStatus>,
    pub category: Option<FeedbackCategory>,
    pub origin: Option<FeedbackOrigin>,
    pub limit: usize,
}

impl Default for FeedbackFilter {
    fn default() -> Self {
        Self {
            user_id: None,
            step_id: None,
            status: None,
            category: None,
            origin: None,
            limit: 100,
        }
    }
}

impl FeedbackFilter {
    pub fn matches(&self, entry: &FeedbackEntry) -> bool {
        self.user_id
            .as_ref()
            .map_or(true, |u| entry.user_id.as_ref() == Some(u))
            && self.step_id.as_ref().map_or(true, |s| &entry.step_id == s)
            && self.status.map_or(true, |s| entry.status == s)
            && self.category.map_or(true, |c| entry.category == c)
            && self.origin.map_or(true, |o| entry.origin == o)
    }
}

/// Aggregate counts over the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStatistics {
    pub total: usize,
    pub pending: usize,
    pub verified: usize,
    pub applied: usize,
    pub rejected: usize,
    pub auto_applied: usize,
    pub system: usize,
    pub by_category: BTreeMap<FeedbackCategory, usize>,
    pub average_confidence: f64,
}

/// Outcome counts of a batch apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchApplySummary {
    pub applied: usize,
    pub skipped: usize,
    pub failed: usize,
}
