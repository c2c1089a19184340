//! # veritas-runtime
//!
//! One engine instance owning every Veritas component. The host supplies a
//! permission checker and, optionally, an audit sink, a source oracle and a
//! feedback archive directory; the runtime builds the gate and the event
//! dispatcher, wires the subscriptions between engines and exposes the
//! public operations.

pub mod options;
pub mod runtime;

pub use options::RuntimeOptions;
pub use runtime::VeritasRuntime;
