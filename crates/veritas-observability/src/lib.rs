//! # veritas-observability
//!
//! Structured tracing setup, named log events for engine activity, and the
//! audit sinks the access gate writes to.

pub mod audit;
pub mod event_log;
pub mod tracing_setup;

pub use audit::{AuditQuery, CompositeAuditSink, MemoryAuditLog, TracingAuditSink};
pub use event_log::EventLogger;
