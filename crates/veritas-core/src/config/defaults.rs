//! Default values for every configuration option.
//! Single source of truth; config structs reference these constants.

// Validation
pub const DEFAULT_STRICT_FOUNDATION_ENFORCEMENT: bool = false;
pub const DEFAULT_MAX_CONTRADICTION_LEVEL: f64 = 0.0;
pub const DEFAULT_FALLACY_CONFIDENCE_THRESHOLD: f64 = 0.6;
pub const DEFAULT_VALIDATION_CACHE_ENABLED: bool = true;
pub const DEFAULT_VALIDATION_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_VALIDATION_CACHE_TTL_SECS: u64 = 3_600;

// Scoring
pub const DEFAULT_MINIMUM_CONFIDENCE_THRESHOLD: f64 = 0.6;
pub const DEFAULT_MINIMUM_SOURCE_CREDIBILITY: f64 = 0.0;
pub const DEFAULT_CALIBRATION_STEEPNESS: f64 = 10.0;
pub const DEFAULT_CALIBRATION_MIDPOINT: f64 = 0.5;
pub const DEFAULT_MAX_FALLACY_PENALTY: f64 = 0.8;

// Feedback
pub const DEFAULT_AUTO_APPLY_THRESHOLD: f64 = 0.85;
pub const DEFAULT_REQUIRE_VERIFICATION: bool = true;
pub const DEFAULT_ALLOW_ANONYMOUS_FEEDBACK: bool = true;
pub const DEFAULT_MAX_FEEDBACK_ENTRIES: usize = 1_000;
pub const DEFAULT_AUTHENTICATED_BONUS: f64 = 0.05;
pub const DEFAULT_AUTO_LOG_VALIDATION_FEEDBACK: bool = true;

// Observability
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;
pub const DEFAULT_AUDIT_CAPACITY: usize = 10_000;
