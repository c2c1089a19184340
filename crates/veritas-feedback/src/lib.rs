//! # veritas-feedback
//!
//! Corrections against reasoning steps: intake, enrichment, verification
//! and (auto-)application.
//!
//! ```text
//! submitted → (auto-applied | pending_verification) → verified → (applied | rejected)
//! ```

pub mod archive;
pub mod categorizer;
pub mod engine;
pub mod policy;
mod store;
pub mod submission;

pub use archive::JsonDirArchive;
pub use engine::FeedbackLoop;
pub use submission::{
    ApplyReceipt, BatchApplySummary, ConflictReport, CorrectionConflict, FeedbackFilter,
    FeedbackReceipt, FeedbackStatistics, FeedbackSubmission, VerificationReceipt,
    VerificationRequest,
};
