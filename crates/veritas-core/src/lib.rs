//! # veritas-core
//!
//! Foundation crate for the Veritas truth validation and correction engine.
//! Holds the data model, error taxonomy, configuration, collaborator traits,
//! the permission gate, and the in-process event dispatcher shared by every
//! engine crate.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod gate;
pub mod models;
pub mod text;
pub mod traits;

pub use config::VeritasConfig;
pub use errors::{VeritasError, VeritasResult};
pub use events::{DomainEvent, EventDispatcher, Topic};
pub use gate::AccessGate;
pub use models::*;
