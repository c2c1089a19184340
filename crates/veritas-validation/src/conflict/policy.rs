use chrono::{DateTime, Utc};
use serde_json::Value;

use veritas_core::models::Resolution;

/// A foundation value and a proposed value that disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub key: String,
    pub existing: Value,
    pub existing_confidence: f64,
    pub existing_verified_at: DateTime<Utc>,
    pub proposed: Value,
    pub proposed_confidence: Option<f64>,
    pub proposed_observed_at: Option<DateTime<Utc>>,
}

/// Decides which side of a [`Conflict`] wins.
pub trait ResolutionPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    /// The winner, the confidence in the resolved value, and a short
    /// human-readable explanation.
    fn decide(&self, conflict: &Conflict) -> (Resolution, f64, String);
}

/// The proposed value wins only if it is at least as confident as the
/// existing one and was observed after the existing value was verified.
/// Ties and missing metadata keep the existing value.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecencyConfidencePolicy;

impl ResolutionPolicy for RecencyConfidencePolicy {
    fn name(&self) -> &'static str {
        "recency_confidence"
    }

    fn decide(&self, conflict: &Conflict) -> (Resolution, f64, String) {
        let proposed_confidence = conflict.proposed_confidence.unwrap_or(0.0);
        let newer = conflict
            .proposed_observed_at
            .is_some_and(|at| at > conflict.existing_verified_at);
        let at_least_as_confident = proposed_confidence >= conflict.existing_confidence;

        if newer && at_least_as_confident {
            (
                Resolution::AcceptProposed,
                proposed_confidence,
                format!(
                    "proposed value observed after last verification with confidence {proposed_confidence:.2} >= {:.2}",
                    conflict.existing_confidence
                ),
            )
        } else {
            let why = if newer {
                "proposed value is less confident than the foundation value"
            } else {
                "proposed value is not newer than the verified foundation value"
            };
            (Resolution::KeepExisting, conflict.existing_confidence, why.to_string())
        }
    }
}
