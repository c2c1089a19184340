use serde::{Deserialize, Serialize};

use super::defaults;

/// Confidence scorer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Calibrated confidence a conclusion needs to meet the threshold.
    pub minimum_confidence_threshold: f64,
    /// Sources scoring below this contribute nothing to source reliability.
    pub minimum_source_credibility: f64,
    /// Sigmoid steepness (alpha).
    pub calibration_steepness: f64,
    /// Sigmoid midpoint (beta).
    pub calibration_midpoint: f64,
    pub max_fallacy_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            minimum_confidence_threshold: defaults::DEFAULT_MINIMUM_CONFIDENCE_THRESHOLD,
            minimum_source_credibility: defaults::DEFAULT_MINIMUM_SOURCE_CREDIBILITY,
            calibration_steepness: defaults::DEFAULT_CALIBRATION_STEEPNESS,
            calibration_midpoint: defaults::DEFAULT_CALIBRATION_MIDPOINT,
            max_fallacy_penalty: defaults::DEFAULT_MAX_FALLACY_PENALTY,
        }
    }
}
