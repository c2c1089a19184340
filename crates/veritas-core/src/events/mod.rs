//! Domain events and the in-process dispatcher.

pub mod dispatcher;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use types::{DomainEvent, FactChange, Topic};
