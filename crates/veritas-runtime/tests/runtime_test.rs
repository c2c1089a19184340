use std::sync::Arc;

use serde_json::{json, Value};
use test_fixtures::*;
use veritas_core::events::Topic;
use veritas_core::models::{
    AuditAction, AuditOutcome, FeedbackCategory, FeedbackOrigin, FeedbackStatus, InferenceRule,
    Permission, ValidationStatus,
};
use veritas_core::traits::IPermissionChecker;
use veritas_feedback::{CorrectionConflict, FeedbackFilter, FeedbackSubmission, VerificationRequest};
use veritas_observability::AuditQuery;
use veritas_runtime::{RuntimeOptions, VeritasRuntime};
use veritas_scoring::{Evidence, EvidenceKind, ReasoningPath, ReasoningStep, ScoringContext};

fn runtime() -> VeritasRuntime {
    VeritasRuntime::new(Arc::new(AllowAll), RuntimeOptions::default()).unwrap()
}

fn runtime_with(permissions: Arc<dyn IPermissionChecker>, opts: RuntimeOptions) -> VeritasRuntime {
    VeritasRuntime::new(permissions, opts).unwrap()
}

async fn system_feedback(rt: &VeritasRuntime, category: FeedbackCategory) -> Vec<veritas_core::models::FeedbackEntry> {
    let filter = FeedbackFilter {
        origin: Some(FeedbackOrigin::System),
        category: Some(category),
        ..FeedbackFilter::default()
    };
    rt.feedback
        .list_feedback(&user("admin"), &filter)
        .await
        .unwrap()
        .completed()
        .unwrap()
}

// ─── Scenarios ───

#[tokio::test]
async fn matching_constant_is_valid() {
    let rt = runtime();
    let v = rt
        .validate_statement(&user("alice"), statement("speed_of_light", json!("299792458")))
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert_eq!(v.status, ValidationStatus::Valid);
    assert_eq!(v.confidence, 1.0);
    assert_eq!(rt.audit_log().count(AuditAction::StatementValidated, AuditOutcome::Completed), 1);
}

#[tokio::test]
async fn contradicted_constant_is_flagged_and_logged_as_system_feedback() {
    let rt = runtime();
    let v = rt
        .validate_statement(&user("alice"), statement("speed_of_light", json!("300000000")))
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert_eq!(v.status, ValidationStatus::ContradictsFoundation);
    assert_eq!(v.fact_id(), Some("speed_of_light"));

    let logged = system_feedback(&rt, FeedbackCategory::FactualError).await;
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].step_id, "speed_of_light");
    assert!(!logged[0].applied);

    // A repeat verdict does not log a second open entry.
    rt.validate_statement(&user("alice"), statement("speed_of_light", json!("300000000")))
        .await
        .unwrap();
    assert_eq!(system_feedback(&rt, FeedbackCategory::FactualError).await.len(), 1);
}

#[tokio::test]
async fn ad_hominem_is_fallacious() {
    let rt = runtime();
    let v = rt
        .validate_statement(
            &user("alice"),
            statement("remark", json!("Don't listen to her; she's not qualified.")),
        )
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert_eq!(v.status, ValidationStatus::Fallacious);
    assert_eq!(v.fallacy_id(), Some("ad_hominem"));
    assert!(v.confidence >= 0.6);
    assert_eq!(system_feedback(&rt, FeedbackCategory::LogicalFallacy).await.len(), 1);
}

#[tokio::test]
async fn clarification_auto_applies_but_bias_concern_waits() {
    let rt = runtime_with(
        Arc::new(AllowAll),
        RuntimeOptions::default().with_config_toml("[feedback]\nrequire_verification = false\n"),
    );
    let clarification = rt
        .handle_feedback(
            &user("alice"),
            FeedbackSubmission::new("step-1", "the unit is metres per second")
                .with_category("clarification")
                .with_confidence(0.9),
        )
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert!(clarification.auto_applied);
    assert_eq!(clarification.entry.status, FeedbackStatus::Applied);

    let bias = rt
        .handle_feedback(
            &user("alice"),
            FeedbackSubmission::new("step-1", "this framing favours one side")
                .with_category("bias_concern")
                .with_confidence(0.9),
        )
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert!(!bias.auto_applied);

    let corrections = rt.feedback.check_for_applicable_corrections("step-1").unwrap();
    assert_eq!(corrections.len(), 1);
    assert_eq!(corrections[0].feedback_id, clarification.entry.id);
}

fn implication(a: &str, c: &str) -> Value {
    json!({ "antecedent": a, "consequent": c })
}

#[tokio::test]
async fn modus_ponens_holds_with_full_confidence() {
    let rt = runtime();
    let result = rt
        .validate_inference(
            &user("alice"),
            vec![
                statement("rain", json!(true)),
                statement("implication", implication("rain", "wet")),
            ],
            statement("wet", json!(true)),
        )
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert!(result.valid);
    assert_eq!(result.rule, Some(InferenceRule::ModusPonens));
    assert_eq!(result.confidence, 1.0);
}

// ─── Wiring ───

#[tokio::test]
async fn feedback_conflicts_are_checked_against_the_shared_facts() {
    let rt = runtime();
    let receipt = rt
        .handle_feedback(
            &user("alice"),
            FeedbackSubmission::new("step-9", "every proposition is not either true or false"),
        )
        .await
        .unwrap()
        .completed()
        .unwrap();
    let report = rt
        .check_for_conflicts(&user("vera"), &receipt.entry.id)
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert!(matches!(
        report.conflicts.as_slice(),
        [CorrectionConflict::FoundationFact { fact_id, .. }] if fact_id == "law_of_excluded_middle"
    ));
}

#[tokio::test]
async fn default_policy_needs_verification_before_auto_apply() {
    let rt = runtime();
    let receipt = rt
        .handle_feedback(
            &user("alice"),
            FeedbackSubmission::new("step-2", "typo in the constant name")
                .with_category("clarification")
                .with_confidence(0.95),
        )
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert!(!receipt.auto_applied);

    let verified = rt
        .verify_feedback(&user("vera"), VerificationRequest::approve(&receipt.entry.id))
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert!(verified.auto_applied);
    assert_eq!(verified.entry.status, FeedbackStatus::Applied);

    let again = rt
        .apply_feedback(&user("vera"), &receipt.entry.id)
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert!(!again.newly_applied);
}

#[tokio::test]
async fn scoring_runs_through_the_shared_gate() {
    let rt = runtime();
    let path = ReasoningPath {
        evidence: vec![Evidence::new(EvidenceKind::Empirical, "measured").with_relevance(0.9).with_consistency(0.9); 3],
        steps: vec![ReasoningStep::new("the measurement is direct").rated(0.9)],
        ..ReasoningPath::default()
    };
    let assessment = rt
        .score_confidence(&user("alice"), "Light is fast", &path, &ScoringContext::default())
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert!((0.0..=1.0).contains(&assessment.calibrated_confidence));
    assert_eq!(rt.audit_log().count(AuditAction::ConfidenceScored, AuditOutcome::Completed), 1);
}

#[tokio::test]
async fn denials_reach_every_audit_sink() {
    let extra = Arc::new(RecordingAuditSink::new());
    let permissions = PermissionTable::new().grant("alice", &[Permission::ValidateStatements]);
    let rt = runtime_with(Arc::new(permissions), RuntimeOptions::default().with_audit(extra.clone()));

    let outcome = rt
        .validate_statement(&user("eve"), statement("speed_of_light", json!("1")))
        .await
        .unwrap();
    assert!(outcome.is_denied());
    assert!(rt
        .validate_statement(&user("alice"), statement("speed_of_light", json!("299792458")))
        .await
        .unwrap()
        .is_completed());

    let denied = rt
        .audit_log()
        .query(&AuditQuery::action(AuditAction::StatementValidated).with_outcome(AuditOutcome::Denied));
    assert_eq!(denied.len(), 1);
    assert_eq!(denied[0].actor, "eve");
    assert_eq!(extra.count(AuditAction::StatementValidated, AuditOutcome::Denied), 1);
    assert_eq!(extra.count(AuditAction::StatementValidated, AuditOutcome::Completed), 1);
}

#[tokio::test]
async fn subscribers_see_validation_events() {
    let rt = runtime();
    let bus = rt.events();
    let recorder = EventRecorder::attach(bus.as_ref(), &[Topic::StatementValidated]);
    rt.validate_statement(&user("alice"), statement("speed_of_light", json!("299792458")))
        .await
        .unwrap();
    assert_eq!(recorder.count(Topic::StatementValidated), 1);
    assert!(rt.published_events() >= 1);
}

#[tokio::test]
async fn archived_feedback_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let rt = VeritasRuntime::open(
            Arc::new(AllowAll),
            RuntimeOptions::default().with_archive_dir(dir.path()),
        )
        .await
        .unwrap();
        rt.handle_feedback(&user("alice"), FeedbackSubmission::new("step-3", "missing a citation"))
            .await
            .unwrap()
            .completed()
            .unwrap()
            .entry
            .id
    };

    let rt = VeritasRuntime::open(Arc::new(AllowAll), RuntimeOptions::default().with_archive_dir(dir.path()))
        .await
        .unwrap();
    let restored = rt
        .feedback
        .get_feedback(&user("admin"), &id)
        .await
        .unwrap()
        .completed()
        .unwrap()
        .unwrap();
    assert_eq!(restored.step_id, "step-3");
    assert_eq!(restored.user_id.as_deref(), Some("alice"));
}

#[test]
fn invalid_configuration_is_refused() {
    let result = VeritasRuntime::new(
        Arc::new(AllowAll),
        RuntimeOptions::default().with_config_toml("[feedback]\nauto_apply_threshold = 1.5\n"),
    );
    assert!(result.is_err());
}

#[test]
fn explicit_fact_seed_replaces_defaults() {
    let rt = runtime_with(Arc::new(AllowAll), RuntimeOptions::default().with_facts(Vec::new()));
    assert!(rt.facts.is_empty().unwrap());
    assert!(!runtime().facts.is_empty().unwrap());
}

#[tokio::test]
async fn strict_configuration_reaches_the_checker() {
    let mut config = veritas_core::VeritasConfig::default();
    config.validation.strict_foundation_enforcement = true;
    let rt = runtime_with(Arc::new(AllowAll), RuntimeOptions::default().with_config(config));
    assert!(rt.checker.config().strict_foundation_enforcement);

    let outcome = rt
        .validate_statement(
            &user("alice").with_token("session-1"),
            statement("speed_of_light", json!("300000000")),
        )
        .await
        .unwrap();
    let verdict = outcome.as_completed().unwrap();
    assert_eq!(verdict.status, ValidationStatus::ContradictsFoundation);
    assert!(rt.resolver.history("speed_of_light").is_empty());
    assert!(!rt.resolver.policy_name().is_empty());
    rt.resolver.clear_history();
}
