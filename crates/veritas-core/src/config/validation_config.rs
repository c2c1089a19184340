use serde::{Deserialize, Serialize};

use super::defaults;

/// Validity checker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Report every foundation disagreement without consulting conflict resolution.
    pub strict_foundation_enforcement: bool,
    /// Contradictory pairs at or below this relation confidence are tolerated.
    pub max_contradiction_level: f64,
    /// Fallacy detections at or above this confidence make a statement FALLACIOUS.
    pub fallacy_confidence_threshold: f64,
    pub cache_enabled: bool,
    pub cache_capacity: u64,
    pub cache_ttl_secs: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict_foundation_enforcement: defaults::DEFAULT_STRICT_FOUNDATION_ENFORCEMENT,
            max_contradiction_level: defaults::DEFAULT_MAX_CONTRADICTION_LEVEL,
            fallacy_confidence_threshold: defaults::DEFAULT_FALLACY_CONFIDENCE_THRESHOLD,
            cache_enabled: defaults::DEFAULT_VALIDATION_CACHE_ENABLED,
            cache_capacity: defaults::DEFAULT_VALIDATION_CACHE_CAPACITY,
            cache_ttl_secs: defaults::DEFAULT_VALIDATION_CACHE_TTL_SECS,
        }
    }
}
