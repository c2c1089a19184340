//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a foundation-fact mutation.
pub fn fact_changed(fact_id: &str, change: &str, revision: u64) {
    tracing::info!(
        event = "fact_changed",
        fact_id = %fact_id,
        change = %change,
        revision = revision,
        "foundation fact changed"
    );
}

/// Log a validation verdict that passed.
pub fn statement_validated(key: &str, status: &str, confidence: f64) {
    tracing::info!(
        event = "statement_validated",
        key = %key,
        status = %status,
        confidence = confidence,
        "statement validated"
    );
}

/// Log a statement contradicting a foundation fact.
pub fn contradiction_detected(key: &str, fact_id: Option<&str>, confidence: f64) {
    tracing::warn!(
        event = "contradiction_detected",
        key = %key,
        fact_id = ?fact_id,
        confidence = confidence,
        "contradiction detected"
    );
}

/// Log a fallacious statement.
pub fn fallacy_detected(key: &str, fallacy_id: Option<&str>, confidence: f64) {
    tracing::warn!(
        event = "fallacy_detected",
        key = %key,
        fallacy_id = ?fallacy_id,
        confidence = confidence,
        "fallacy detected"
    );
}

/// Log an internally inconsistent or undecidable statement.
pub fn statement_unresolved(key: &str, status: &str, confidence: f64) {
    tracing::warn!(
        event = "statement_unresolved",
        key = %key,
        status = %status,
        confidence = confidence,
        "statement not validated"
    );
}

/// Log a conflict resolution decision.
pub fn conflict_resolved(key: &str, resolution: &str, confidence: f64) {
    tracing::info!(
        event = "conflict_resolved",
        key = %key,
        resolution = %resolution,
        confidence = confidence,
        "conflict resolved"
    );
}

/// Log a feedback submission.
pub fn feedback_submitted(id: &str, step_id: &str, category: &str, auto_applied: bool) {
    tracing::info!(
        event = "feedback_submitted",
        id = %id,
        step_id = %step_id,
        category = %category,
        auto_applied = auto_applied,
        "feedback submitted"
    );
}

/// Log a verification decision.
pub fn feedback_verified(id: &str, verified: bool) {
    tracing::info!(
        event = "feedback_verified",
        id = %id,
        verified = verified,
        "feedback verified"
    );
}

/// Log a correction being applied to a reasoning step.
pub fn correction_applied(id: &str, step_id: &str, category: &str) {
    tracing::info!(
        event = "correction_applied",
        id = %id,
        step_id = %step_id,
        category = %category,
        "correction applied"
    );
}
