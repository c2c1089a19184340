//! # veritas-validation
//!
//! Decides whether a statement, a statement set, or an inference may be
//! trusted:
//! - table-driven fallacy catalogue with structural checks for formal fallacies,
//! - foundation-fact contradiction with pluggable conflict resolution,
//! - internal consistency and pairwise statement relations,
//! - modus ponens / tollens, hypothetical and disjunctive syllogism,
//! - a revision-guarded verdict cache invalidated wholesale on fact changes.

pub mod cache;
pub mod checker;
pub mod conflict;
pub mod consistency;
pub mod fallacy;
pub mod inference;

pub use cache::{CacheStats, ValidationCache};
pub use checker::{ValidationOptions, ValidityChecker};
pub use conflict::{Conflict, ConflictResolver, RecencyConfidencePolicy, ResolutionPolicy};
pub use consistency::{compare_statements, compare_text};
pub use fallacy::FallacyCatalogue;
