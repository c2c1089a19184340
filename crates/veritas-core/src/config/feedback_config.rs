use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::FeedbackCategory;

/// Feedback loop configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub auto_apply_threshold: f64,
    pub require_verification: bool,
    /// Categories accepted at submission. Empty means all.
    pub enabled_categories: Vec<FeedbackCategory>,
    /// Categories that always wait for an explicit apply.
    pub non_auto_apply_categories: Vec<FeedbackCategory>,
    pub allow_anonymous_feedback: bool,
    /// Bound on the in-memory store; the oldest entry is evicted first.
    pub max_entries: usize,
    /// Confidence bonus for submissions carrying a user id.
    pub authenticated_bonus: f64,
    /// Record system feedback for foundation contradictions and fallacies.
    pub auto_log_validation_feedback: bool,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            auto_apply_threshold: defaults::DEFAULT_AUTO_APPLY_THRESHOLD,
            require_verification: defaults::DEFAULT_REQUIRE_VERIFICATION,
            enabled_categories: Vec::new(),
            non_auto_apply_categories: vec![
                FeedbackCategory::BiasConcern,
                FeedbackCategory::AlternativeView,
            ],
            allow_anonymous_feedback: defaults::DEFAULT_ALLOW_ANONYMOUS_FEEDBACK,
            max_entries: defaults::DEFAULT_MAX_FEEDBACK_ENTRIES,
            authenticated_bonus: defaults::DEFAULT_AUTHENTICATED_BONUS,
            auto_log_validation_feedback: defaults::DEFAULT_AUTO_LOG_VALIDATION_FEEDBACK,
        }
    }
}

impl FeedbackConfig {
    /// Whether submissions in `category` are accepted.
    pub fn accepts(&self, category: FeedbackCategory) -> bool {
        self.enabled_categories.is_empty() || self.enabled_categories.contains(&category)
    }
}
