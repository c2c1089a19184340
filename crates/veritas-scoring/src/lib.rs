//! # veritas-scoring
//!
//! Calibrated confidence for a conclusion and the reasoning behind it.
//!
//! ```text
//! raw        = (0.35·evidence + 0.35·reasoning + 0.2·source) × (1 − penalty)
//! calibrated = sigmoid(α(raw − β)) + domain adjustment, clamped to [0, 1]
//! ```

pub mod calibration;
pub mod factors;
pub mod input;
pub mod scorer;

pub use input::{
    Evidence, EvidenceKind, ReasoningPath, ReasoningStep, ScoringContext, Source, SourceKind,
};
pub use scorer::ConfidenceScorer;
