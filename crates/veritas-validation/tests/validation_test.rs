use std::sync::Arc;

use chrono::{Duration, Utc};
use proptest::prelude::*;
use serde_json::{json, Value};
use test_fixtures::*;
use veritas_core::config::ValidationConfig;
use veritas_core::events::{DomainEvent, Topic};
use veritas_core::models::{
    AuditAction, AuditOutcome, InferenceRule, LogicalRelation, Outcome, Resolution, Statement,
    ValidationDetails, ValidationStatus,
};
use veritas_core::traits::{IEventBus, IPermissionChecker};
use veritas_facts::{FactPayload, FactUpdate, FoundationFactsStore};
use veritas_validation::{
    compare_statements, ConflictResolver, FallacyCatalogue, ValidationOptions, ValidityChecker,
};

struct Harness {
    checker: ValidityChecker,
    facts: Arc<FoundationFactsStore>,
    audit: Arc<RecordingAuditSink>,
    recorder: Arc<EventRecorder>,
}

fn harness_with(config: ValidationConfig, permissions: Arc<dyn IPermissionChecker>) -> Harness {
    let (gate, audit) = gate_with(permissions);
    let bus = event_bus();
    let recorder = EventRecorder::attach(
        bus.as_ref(),
        &[Topic::StatementValidated, Topic::ConflictResolved],
    );
    let bus: Arc<dyn IEventBus> = bus;
    let facts = Arc::new(FoundationFactsStore::with_default_facts(gate.clone(), bus.clone()));
    let resolver = Arc::new(ConflictResolver::new(gate.clone(), bus.clone()));
    let catalogue = Arc::new(FallacyCatalogue::builtin().unwrap());
    let checker = ValidityChecker::new(config, facts.clone(), catalogue, resolver, gate, bus);
    Harness {
        checker,
        facts,
        audit,
        recorder,
    }
}

fn harness() -> Harness {
    harness_with(ValidationConfig::default(), Arc::new(AllowAll))
}

async fn verdict(h: &Harness, s: Statement) -> veritas_core::models::ValidationResult {
    h.checker
        .validate_statement(&user("alice"), s, &ValidationOptions::default())
        .await
        .unwrap()
        .completed()
        .unwrap()
}

// ─── Single statements ───

#[tokio::test]
async fn matching_foundation_fact_is_valid() {
    let h = harness();
    let v = verdict(&h, statement("speed_of_light", json!("299792458"))).await;
    assert_eq!(v.status, ValidationStatus::Valid);
    assert_eq!(v.confidence, 1.0);
    assert_eq!(v.fact_id(), Some("speed_of_light"));
}

#[tokio::test]
async fn different_value_contradicts_foundation() {
    let h = harness();
    let v = verdict(&h, statement("speed_of_light", json!("300000000"))).await;
    assert_eq!(v.status, ValidationStatus::ContradictsFoundation);
    assert_eq!(v.fact_id(), Some("speed_of_light"));
    match &v.details {
        ValidationDetails::FoundationContradiction { resolution: Some(r), .. } => {
            assert_eq!(r.resolution, Resolution::KeepExisting);
            assert_eq!(r.resolved_value, json!("299792458"));
        }
        other => panic!("unexpected details: {other:?}"),
    }
    assert_eq!(h.recorder.count(Topic::ConflictResolved), 1);
    assert_eq!(h.checker.resolver().history("speed_of_light").len(), 1);
}

#[tokio::test]
async fn strict_enforcement_skips_resolution() {
    let h = harness();
    let v = h
        .checker
        .validate_statement(
            &user("alice"),
            statement("speed_of_light", json!("300000000")),
            &ValidationOptions::strict(),
        )
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert_eq!(v.status, ValidationStatus::ContradictsFoundation);
    assert!(matches!(
        v.details,
        ValidationDetails::FoundationContradiction { resolution: None, .. }
    ));
    assert_eq!(v.confidence, 1.0);
    assert_eq!(h.recorder.count(Topic::ConflictResolved), 0);
}

#[tokio::test]
async fn newer_confident_claim_wins_resolution() {
    let h = harness();
    let claim = statement("spatial_dimensions", json!(4))
        .with_confidence(1.0)
        .observed_at(Utc::now() + Duration::minutes(1));
    let v = verdict(&h, claim).await;
    assert_eq!(v.status, ValidationStatus::Valid);
    assert!(matches!(v.details, ValidationDetails::ResolvedConflict { .. }));
    assert_eq!(v.fact_id(), Some("spatial_dimensions"));
}

#[tokio::test]
async fn ad_hominem_is_fallacious() {
    let h = harness();
    let v = verdict(&h, statement("remark", json!("Don't listen to her; she's not qualified."))).await;
    assert_eq!(v.status, ValidationStatus::Fallacious);
    assert_eq!(v.fallacy_id(), Some("ad_hominem"));
    assert!(v.confidence >= 0.6);

    let detections = h.checker.detect_fallacies("Don't listen to her; she's not qualified.");
    assert_eq!(detections[0].fallacy_id, "ad_hominem");
    assert!(!detections[0].remediation.is_empty());
}

#[tokio::test]
async fn self_contradiction_is_inconsistent() {
    let h = harness();
    let v = verdict(&h, statement("door", json!("The door is open and the door is not open"))).await;
    assert_eq!(v.status, ValidationStatus::LogicallyInconsistent);
}

#[tokio::test]
async fn tautology_is_valid_with_note() {
    let h = harness();
    let v = verdict(&h, statement("identity", json!("A is A"))).await;
    assert_eq!(v.status, ValidationStatus::Valid);
    assert!(matches!(
        v.details,
        ValidationDetails::Consistent { note: Some(ref n), .. } if n == "tautology"
    ));
}

#[tokio::test]
async fn empty_key_is_rejected_and_audited() {
    let h = harness();
    let out = h
        .checker
        .validate_statement(&user("alice"), statement("  ", json!(1)), &ValidationOptions::default())
        .await
        .unwrap();
    assert!(matches!(out, Outcome::Rejected { ref field, .. } if field == "key"));
    assert_eq!(h.audit.count(AuditAction::StatementValidated, AuditOutcome::Rejected), 1);
}

#[tokio::test]
async fn denied_validation_is_silent() {
    let h = harness_with(ValidationConfig::default(), Arc::new(DenyAll));
    let out = h
        .checker
        .validate_statement(&user("eve"), statement("speed_of_light", json!("1")), &ValidationOptions::default())
        .await
        .unwrap();
    assert!(out.is_denied());
    assert_eq!(h.audit.count(AuditAction::StatementValidated, AuditOutcome::Denied), 1);
    assert_eq!(h.recorder.count(Topic::StatementValidated), 0);
}

#[tokio::test]
async fn every_verdict_is_announced() {
    let h = harness();
    verdict(&h, statement("pi", json!("3.14159265358979"))).await;
    match &h.recorder.events()[..] {
        [DomainEvent::StatementValidated { key, status, .. }] => {
            assert_eq!(key, "pi");
            assert_ne!(*status, ValidationStatus::Uncertain);
        }
        other => panic!("unexpected events: {other:?}"),
    }
    assert_eq!(h.audit.count(AuditAction::StatementValidated, AuditOutcome::Completed), 1);
}

// ─── Cache ───

#[tokio::test]
async fn repeated_validation_is_idempotent_and_cached() {
    let h = harness();
    let first = verdict(&h, statement("water_is_wet", json!(true))).await;
    let second = verdict(&h, statement("water_is_wet", json!(true))).await;
    assert_eq!(first, second);
    let stats = h.checker.cache_stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(h.recorder.count(Topic::StatementValidated), 2);
}

#[tokio::test]
async fn fact_mutation_invalidates_cached_verdicts() {
    let h = harness();
    let claim = || statement("water_boiling_point", json!(90));
    assert_eq!(verdict(&h, claim()).await.status, ValidationStatus::Valid);

    let added = h
        .facts
        .add(
            &user("admin"),
            FactPayload {
                id: "water_boiling_point".into(),
                value: json!(100),
                category: "chemistry".into(),
                confidence: 0.99,
                description: "Water boils at 100 degrees Celsius at sea level".into(),
                source: "IUPAC".into(),
            },
        )
        .await
        .unwrap();
    assert!(added.is_completed());

    assert_eq!(
        verdict(&h, claim()).await.status,
        ValidationStatus::ContradictsFoundation
    );
    assert!(h.checker.cache_stats().invalidations >= 1);
}

#[tokio::test]
async fn uncached_option_bypasses_cache() {
    let h = harness();
    for _ in 0..2 {
        h.checker
            .validate_statement(&user("alice"), statement("pi", json!("3.14159265358979")), &ValidationOptions::uncached())
            .await
            .unwrap();
    }
    let stats = h.checker.cache_stats();
    assert_eq!(stats.hits + stats.misses, 0);
}

// ─── Statement sets ───

#[tokio::test]
async fn contradictory_pair_is_inconsistent() {
    let h = harness();
    let v = h
        .checker
        .validate_consistency(
            &user("alice"),
            vec![statement("raining", json!(true)), statement("not_raining", json!(true))],
            &ValidationOptions::default(),
        )
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert_eq!(v.status, ValidationStatus::LogicallyInconsistent);
    match v.details {
        ValidationDetails::Inconsistency { keys, relation_confidence, .. } => {
            assert_eq!(keys, vec!["raining".to_string(), "not_raining".to_string()]);
            assert_eq!(relation_confidence, Some(1.0));
        }
        other => panic!("unexpected details: {other:?}"),
    }
    assert_eq!(h.audit.count(AuditAction::ConsistencyValidated, AuditOutcome::Completed), 1);
}

#[tokio::test]
async fn tolerated_contradiction_level_passes() {
    let config = ValidationConfig {
        max_contradiction_level: 1.0,
        ..ValidationConfig::default()
    };
    let h = harness_with(config, Arc::new(AllowAll));
    let v = h
        .checker
        .validate_consistency(
            &user("alice"),
            vec![statement("raining", json!(true)), statement("not_raining", json!(true))],
            &ValidationOptions::default(),
        )
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert_eq!(v.status, ValidationStatus::Valid);
    assert_eq!(v.key, "raining,not_raining");
}

#[tokio::test]
async fn consistency_short_circuits_on_foundation_contradiction() {
    let h = harness();
    let v = h
        .checker
        .validate_consistency(
            &user("alice"),
            vec![
                statement("pi", json!("3.14159265358979")),
                statement("speed_of_light", json!("300000000")),
            ],
            &ValidationOptions::default(),
        )
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert_eq!(v.status, ValidationStatus::ContradictsFoundation);
    assert_eq!(v.key, "speed_of_light");
}

#[tokio::test]
async fn empty_statement_set_is_rejected() {
    let h = harness();
    let out = h
        .checker
        .validate_consistency(&user("alice"), Vec::new(), &ValidationOptions::default())
        .await
        .unwrap();
    assert!(matches!(out, Outcome::Rejected { ref field, .. } if field == "statements"));
}

// ─── Inference ───

fn implication(a: &str, c: &str) -> Value {
    json!({ "antecedent": a, "consequent": c })
}

async fn infer(h: &Harness, premises: Vec<Statement>, conclusion: Statement) -> veritas_core::models::InferenceResult {
    h.checker
        .validate_inference(&user("alice"), premises, conclusion, &ValidationOptions::default())
        .await
        .unwrap()
        .completed()
        .unwrap()
}

#[tokio::test]
async fn modus_ponens_is_valid_at_full_confidence() {
    let h = harness();
    let result = infer(
        &h,
        vec![
            statement("rain", json!(true)),
            statement("implication", implication("rain", "wet")),
        ],
        statement("wet", json!(true)),
    )
    .await;
    assert!(result.valid);
    assert_eq!(result.rule, Some(InferenceRule::ModusPonens));
    assert_eq!(result.confidence, 1.0);
    assert_eq!(h.audit.count(AuditAction::InferenceValidated, AuditOutcome::Completed), 1);
}

#[tokio::test]
async fn affirming_the_consequent_is_a_non_sequitur() {
    let h = harness();
    let result = infer(
        &h,
        vec![
            statement("wet", json!(true)),
            statement("implication", implication("rain", "wet")),
        ],
        statement("rain", json!(true)),
    )
    .await;
    assert!(!result.valid);
    assert_eq!(result.reason.as_deref(), Some("non_sequitur"));
}

#[tokio::test]
async fn invalid_premise_blocks_inference() {
    let h = harness();
    let result = infer(
        &h,
        vec![statement("speed_of_light", json!("300000000"))],
        statement("speed_of_light", json!("300000000")),
    )
    .await;
    assert_eq!(result.reason.as_deref(), Some("invalid_premise"));
    assert_eq!(
        result.blocking.map(|b| b.status),
        Some(ValidationStatus::ContradictsFoundation)
    );
}

#[tokio::test]
async fn inconsistent_premises_block_inference() {
    let h = harness();
    let result = infer(
        &h,
        vec![statement("rain", json!(true)), statement("not_rain", json!(true))],
        statement("wet", json!(true)),
    )
    .await;
    assert_eq!(result.reason.as_deref(), Some("inconsistent_premises"));
}

#[tokio::test]
async fn hypothetical_syllogism_over_rules_sharing_a_key() {
    let h = harness();
    let result = infer(
        &h,
        vec![
            statement("implication", implication("rain", "wet")),
            statement("implication", implication("wet", "slippery")),
        ],
        statement("implication", implication("rain", "slippery")),
    )
    .await;
    assert!(result.valid, "{result:?}");
    assert_eq!(result.rule, Some(InferenceRule::HypotheticalSyllogism));
}

#[tokio::test]
async fn unrelated_rule_does_not_spoil_modus_ponens() {
    let h = harness();
    let result = infer(
        &h,
        vec![
            statement("rain", json!(true)),
            statement("implication", implication("rain", "wet")),
            statement("implication", implication("sun", "dry")),
        ],
        statement("wet", json!(true)),
    )
    .await;
    assert!(result.valid, "{result:?}");
    assert_eq!(result.rule, Some(InferenceRule::ModusPonens));
}

#[tokio::test]
async fn disjunctive_syllogism_alongside_a_rule() {
    let h = harness();
    let result = infer(
        &h,
        vec![
            statement("implication", json!({ "disjuncts": ["tea", "coffee"] })),
            statement("implication", implication("coffee", "awake")),
            statement("tea", json!(false)),
        ],
        statement("coffee", json!(true)),
    )
    .await;
    assert!(result.valid, "{result:?}");
    assert_eq!(result.rule, Some(InferenceRule::DisjunctiveSyllogism));
}

#[tokio::test]
async fn rule_contradicted_by_its_consequent_blocks_inference() {
    let h = harness();
    let result = infer(
        &h,
        vec![
            statement("rain", json!(true)),
            statement("implication", implication("rain", "wet")),
            statement("wet", json!(false)),
        ],
        statement("slippery", json!(true)),
    )
    .await;
    assert_eq!(result.reason.as_deref(), Some("inconsistent_premises"));
    match result.blocking.map(|b| b.details) {
        Some(ValidationDetails::Inconsistency { reason, keys, .. }) => {
            assert_eq!(reason, "conflicting_implication");
            assert_eq!(keys, vec!["rain", "implication", "wet"]);
        }
        other => panic!("unexpected blocking verdict: {other:?}"),
    }
}

#[tokio::test]
async fn distinct_rules_are_consistent() {
    let h = harness();
    let v = h
        .checker
        .validate_consistency(
            &user("alice"),
            vec![
                statement("implication", implication("rain", "wet")),
                statement("implication", implication("wet", "slippery")),
            ],
            &ValidationOptions::default(),
        )
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert_eq!(v.status, ValidationStatus::Valid);
}

#[tokio::test]
async fn conclusion_contradicting_foundation_is_invalid() {
    let h = harness();
    let result = infer(
        &h,
        vec![
            statement("flat", json!(true)),
            statement("implication", implication("flat", "water_is_wet")),
        ],
        statement("water_is_wet", json!(false)),
    )
    .await;
    assert_eq!(result.reason.as_deref(), Some("conclusion_contradicts_foundation"));
}

#[tokio::test]
async fn empty_premises_are_rejected() {
    let h = harness();
    let out = h
        .checker
        .validate_inference(&user("alice"), Vec::new(), statement("wet", json!(true)), &ValidationOptions::default())
        .await
        .unwrap();
    assert!(matches!(out, Outcome::Rejected { ref field, .. } if field == "premises"));
}

// ─── Properties ───

fn any_statement() -> impl Strategy<Value = Statement> {
    let key = prop::sample::select(vec!["rain", "not_rain", "wet", "claim"]);
    let value = prop_oneof![
        any::<bool>().prop_map(Value::from),
        (0i64..3).prop_map(Value::from),
        prop::sample::select(vec![
            "it rains",
            "it does not rain",
            "the ground is wet",
            "all cats are mammals",
            "some cats are mammals",
        ])
        .prop_map(Value::from),
    ];
    (key, value).prop_map(|(k, v)| Statement::new(k, v))
}

proptest! {
    #[test]
    fn contradiction_is_symmetric(a in any_statement(), b in any_statement()) {
        let ab = compare_statements(&a, &b).0 == LogicalRelation::Contradictory;
        let ba = compare_statements(&b, &a).0 == LogicalRelation::Contradictory;
        prop_assert_eq!(ab, ba);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn validation_is_idempotent(s in any_statement()) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let h = harness();
        let first = runtime.block_on(verdict(&h, s.clone()));
        let second = runtime.block_on(verdict(&h, s));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn updated_fact_is_never_served_from_a_stale_verdict(n in 0u32..1_000_000) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let h = harness();
        let claim = || statement("speed_of_light", json!("299792458"));

        let before = runtime.block_on(verdict(&h, claim()));
        prop_assert_eq!(before.status, ValidationStatus::Valid);
        let cached = runtime.block_on(verdict(&h, claim()));
        prop_assert_eq!(cached.status, ValidationStatus::Valid);
        prop_assert_eq!(h.checker.cache_stats().hits, 1);

        let changes = FactUpdate { value: Some(json!(n.to_string())), ..FactUpdate::default() };
        let updated = runtime
            .block_on(h.facts.update(&user("admin"), "speed_of_light", changes))
            .unwrap();
        prop_assert!(updated.is_completed());

        let after = runtime.block_on(verdict(&h, claim()));
        prop_assert_eq!(after.status, ValidationStatus::ContradictsFoundation);
    }
}
