//! The four sub-scores behind a confidence assessment.

pub mod evidence;
pub mod penalty;
pub mod reasoning;
pub mod source;
