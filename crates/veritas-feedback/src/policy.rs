//! Confidence enrichment and the auto-apply rule.

use veritas_core::config::FeedbackConfig;
use veritas_core::models::{FeedbackEntry, FeedbackOrigin, FeedbackStatus};

/// Confidence of a submission after enrichment.
///
/// ```text
/// base = submitted                              (no source reliability)
///      = (submitted + reliability) / 2          (reliability known)
/// conf = clamp(base + bonus·[authenticated], 0, 1)
/// ```
pub fn enrich_confidence(
    submitted: f64,
    source_reliability: Option<f64>,
    authenticated: bool,
    bonus: f64,
) -> f64 {
    let base = match source_reliability {
        Some(reliability) => (submitted + reliability) / 2.0,
        None => submitted,
    };
    let bonus = if authenticated { bonus } else { 0.0 };
    (base + bonus).clamp(0.0, 1.0)
}

/// Whether `entry` is applied without an explicit `apply_feedback`.
///
/// Confidence must reach the threshold, verification must be present when
/// policy requires it, and the category must not be reserved for manual
/// application. System-logged entries never auto-apply.
pub fn auto_apply_eligible(config: &FeedbackConfig, entry: &FeedbackEntry) -> bool {
    entry.origin == FeedbackOrigin::User
        && !entry.applied
        && entry.status != FeedbackStatus::Rejected
        && entry.confidence >= config.auto_apply_threshold
        && (!config.require_verification || entry.verified)
        && !config.non_auto_apply_categories.contains(&entry.category)
}
