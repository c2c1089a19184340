use serde::{Deserialize, Serialize};

use super::defaults;

/// Logging and audit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `tracing-subscriber` filter directive used when `VERITAS_LOG` is unset.
    pub log_filter: String,
    pub log_json: bool,
    /// Entries retained by the in-memory audit log.
    pub audit_capacity: usize,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: defaults::DEFAULT_LOG_FILTER.to_string(),
            log_json: defaults::DEFAULT_LOG_JSON,
            audit_capacity: defaults::DEFAULT_AUDIT_CAPACITY,
        }
    }
}
