/// Veritas version string.
pub const VERITAS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Named confidence level for axiomatic foundation facts.
pub const CONFIDENCE_AXIOMATIC: f64 = 1.0;

/// Named confidence level for near-certain foundation facts.
pub const CONFIDENCE_NEAR_CERTAIN: f64 = 0.99;

/// Named confidence level for established foundation facts.
pub const CONFIDENCE_ESTABLISHED: f64 = 0.95;

/// Lowest confidence a foundation fact may carry.
pub const CONFIDENCE_RELIABLE: f64 = 0.9;

/// Confidence reported when a factor degrades to its neutral default.
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

/// Confidence assumed for feedback submitted without one.
pub const DEFAULT_FEEDBACK_CONFIDENCE: f64 = 0.5;

/// Actor id used for entries the engine records on its own behalf.
pub const SYSTEM_ACTOR_ID: &str = "veritas-system";

/// Consent scope checked before storing user feedback.
pub const CONSENT_SCOPE_FEEDBACK: &str = "feedback";

/// Minimum keyword length retained by keyword extraction.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Words dropped by keyword extraction.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "in", "on", "at", "by", "for", "with", "about", "and", "or",
    "of", "to", "that", "this", "be", "was", "were", "not", "from", "its", "it",
];
