//! # veritas-facts
//!
//! The foundation facts store: axiomatic or near-axiomatic facts keyed by a
//! stable id, indexed by category and keyword. Reads are lock-protected and
//! synchronous. Mutations run through the permission gate, are audited, bump
//! the store revision, and publish `FoundationFactChanged`.

pub mod contradiction;
pub mod defaults;
pub mod payload;
pub mod store;
mod table;
pub mod transfer;

pub use contradiction::{ContradictionInfo, FactComparison};
pub use payload::{FactPayload, FactUpdate};
pub use store::FoundationFactsStore;
pub use transfer::{FactExport, ImportSummary};
