pub mod access;
pub mod audit_entry;
pub mod confidence_assessment;
pub mod fallacy;
pub mod feedback;
pub mod foundation_fact;
pub mod outcome;
pub mod statement;
pub mod validation_result;

pub use access::{Actor, Permission};
pub use audit_entry::{AuditAction, AuditEntry, AuditOutcome};
pub use confidence_assessment::{ConfidenceAssessment, ConfidenceFactors, Domain};
pub use fallacy::{FallacyCategory, FallacyDefinition, FallacyDetection};
pub use feedback::{
    AppliedCorrection, FeedbackCategory, FeedbackEntry, FeedbackOrigin, FeedbackStatus,
    ImpactLevel,
};
pub use foundation_fact::{FactCategory, FoundationFact};
pub use outcome::Outcome;
pub use statement::Statement;
pub use validation_result::{
    ConflictResolution, InferenceResult, InferenceRule, LogicalRelation, Resolution,
    ValidationDetails, ValidationResult, ValidationStatus,
};
