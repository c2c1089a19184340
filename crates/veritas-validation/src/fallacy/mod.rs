//! Fallacy catalogue: static definitions compiled once into regexes.

pub mod catalogue;
pub mod detector;
mod structural;

pub use catalogue::builtin_definitions;
pub use detector::FallacyCatalogue;
