use veritas_core::errors::*;

#[test]
fn feedback_not_found_carries_id() {
    let err: VeritasError = FeedbackError::NotFound("fb-42".into()).into();
    assert!(err.to_string().contains("fb-42"));
    assert_eq!(err.error_code(), "FEEDBACK_NOT_FOUND");
}

#[test]
fn invalid_pattern_carries_fallacy_id() {
    let err = ValidationError::InvalidPattern {
        fallacy_id: "ad_hominem".into(),
        message: "unclosed group".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("ad_hominem"));
    assert!(msg.contains("unclosed group"));
}

#[test]
fn collaborator_failure_formats_both_parts() {
    let err = VeritasError::collaborator("source_validator", "timeout");
    let msg = err.to_string();
    assert!(msg.contains("source_validator"));
    assert!(msg.contains("timeout"));
    assert_eq!(err.boundary_string(), format!("[COLLABORATOR_ERROR] {msg}"));
}

#[test]
fn config_error_converts_into_top_level() {
    let err: VeritasError = ConfigError::ValidationFailed {
        field: "feedback.max_entries".into(),
        message: "must be greater than 0".into(),
    }
    .into();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
    assert!(err.to_string().contains("feedback.max_entries"));
}

#[test]
fn lock_poisoning_has_dedicated_code() {
    let err: VeritasError = FactsError::LockPoisoned("writer panicked".into()).into();
    assert_eq!(err.error_code(), "LOCK_POISONED");
}
