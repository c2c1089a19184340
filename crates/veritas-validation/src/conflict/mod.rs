//! Conflict resolution between foundation values and proposed values.

mod policy;
mod resolver;

pub use policy::{Conflict, RecencyConfidencePolicy, ResolutionPolicy};
pub use resolver::ConflictResolver;
