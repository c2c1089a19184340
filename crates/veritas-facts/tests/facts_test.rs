use std::sync::Arc;

use proptest::prelude::*;
use serde_json::{json, Value};
use test_fixtures::*;
use veritas_core::events::{DomainEvent, FactChange, Topic};
use veritas_core::models::{
    AuditAction, AuditOutcome, FactCategory, FoundationFact, Outcome, Permission,
};
use veritas_core::traits::IEventBus;
use veritas_facts::{FactPayload, FactUpdate, FoundationFactsStore};

fn store() -> (FoundationFactsStore, Arc<RecordingAuditSink>, Arc<EventRecorder>) {
    let (gate, audit) = open_gate();
    let bus = event_bus();
    let recorder = EventRecorder::attach(bus.as_ref(), &[Topic::FoundationFactChanged]);
    let bus: Arc<dyn IEventBus> = bus;
    (FoundationFactsStore::with_default_facts(gate, bus), audit, recorder)
}

fn boiling_point() -> FactPayload {
    FactPayload {
        id: "water_boiling_point".into(),
        value: json!(100),
        category: "chemistry".into(),
        confidence: 0.99,
        description: "Water boils at 100 degrees Celsius at sea level".into(),
        source: "IUPAC".into(),
    }
}

// ─── Reads ───

#[test]
fn default_store_knows_speed_of_light() {
    let (store, _, _) = store();
    let fact = store.get("speed_of_light").unwrap().unwrap();
    assert_eq!(fact.value, json!("299792458"));
    assert_eq!(fact.category, FactCategory::Physics);
    assert_eq!(fact.confidence, 1.0);
}

#[test]
fn get_by_category_returns_only_that_category() {
    let (store, _, _) = store();
    let logic = store.get_by_category(FactCategory::Logic).unwrap();
    assert!(!logic.is_empty());
    assert!(logic.iter().all(|f| f.category == FactCategory::Logic));
}

#[test]
fn search_matches_description_case_insensitively() {
    let (store, _, _) = store();
    let hits = store.search("VACUUM").unwrap();
    assert!(hits.iter().any(|f| f.id == "speed_of_light"));
    assert!(store.search("   ").unwrap().is_empty());
}

#[test]
fn keyword_search_match_all_narrows() {
    let (store, _, _) = store();
    let any = store.search_by_keywords(&["water", "light"], false).unwrap();
    let all = store.search_by_keywords(&["water", "light"], true).unwrap();
    assert!(any.len() >= 2);
    assert!(all.is_empty());
    let both = store.search_by_keywords(&["speed", "light"], true).unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].id, "speed_of_light");
}

#[test]
fn confidence_search_respects_bounds() {
    let (store, _, _) = store();
    let reliable = store.search_by_confidence(0.9, 0.9).unwrap();
    assert!(!reliable.is_empty());
    assert!(reliable.iter().all(|f| f.confidence == 0.9));
}

#[test]
fn check_contradiction_detects_mismatch_only() {
    let (store, _, _) = store();
    assert!(store
        .check_contradiction("speed_of_light", &json!("299792458"))
        .unwrap()
        .is_none());
    assert!(store
        .check_contradiction("speed_of_light", &json!(299792458))
        .unwrap()
        .is_none());
    let info = store
        .check_contradiction("speed_of_light", &json!("300000000"))
        .unwrap()
        .unwrap();
    assert_eq!(info.fact.id, "speed_of_light");
    assert!(store
        .check_contradiction("no_such_fact", &json!("anything"))
        .unwrap()
        .is_none());
}

#[test]
fn source_search_is_exact_but_case_insensitive() {
    let (store, _, _) = store();
    let hits = store.search_by_source("Classical Logic").unwrap();
    let ids: Vec<&str> = hits.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["law_of_excluded_middle", "law_of_identity", "law_of_non_contradiction"]);
    assert!(store.search_by_source("classical").unwrap().is_empty());
    assert!(store.search_by_source(" ").unwrap().is_empty());
}

fn seeded_with(value: Value) -> FoundationFactsStore {
    let (gate, _) = open_gate();
    let bus: Arc<dyn IEventBus> = event_bus();
    let fact = FoundationFact::new("claim", value, FactCategory::Logic, 1.0, "a seeded claim", "test");
    FoundationFactsStore::with_facts(gate, bus, vec![fact])
}

fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        (0i64..50).prop_map(Value::from),
        (0i64..50).prop_map(|n| Value::from(n.to_string())),
        "[a-c ]{0,6}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn contradiction_is_symmetric(a in any_value(), b in any_value()) {
        let ab = seeded_with(a.clone()).check_contradiction("claim", &b).unwrap().is_some();
        let ba = seeded_with(b).check_contradiction("claim", &a).unwrap().is_some();
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn a_fact_never_contradicts_itself(a in any_value()) {
        prop_assert!(seeded_with(a.clone()).check_contradiction("claim", &a).unwrap().is_none());
    }
}

// ─── Mutations ───

#[tokio::test]
async fn add_publishes_change_and_bumps_revision() {
    let (store, audit, recorder) = store();
    let before = store.revision();
    let out = store.add(&user("admin"), boiling_point()).await.unwrap();
    assert!(out.is_completed());
    assert_eq!(store.revision(), before + 1);
    assert!(store.get("water_boiling_point").unwrap().is_some());
    assert_eq!(audit.count(AuditAction::FactAdded, AuditOutcome::Completed), 1);
    match &recorder.events()[..] {
        [DomainEvent::FoundationFactChanged { fact_id, change, revision }] => {
            assert_eq!(fact_id, "water_boiling_point");
            assert_eq!(*change, FactChange::Added);
            assert_eq!(*revision, before + 1);
        }
        other => panic!("unexpected events: {other:?}"),
    }
}

#[tokio::test]
async fn denied_add_is_structured_audited_and_silent() {
    let (gate, audit) = gate_with(Arc::new(DenyAll));
    let bus = event_bus();
    let recorder = EventRecorder::attach(bus.as_ref(), &[Topic::FoundationFactChanged]);
    let store = FoundationFactsStore::with_default_facts(gate, bus);

    let out = store.add(&user("mallory"), boiling_point()).await.unwrap();
    match out {
        Outcome::Denied { permission, .. } => {
            assert_eq!(permission, Permission::ModifyFoundationFacts)
        }
        other => panic!("expected denial, got {other:?}"),
    }
    assert!(store.get("water_boiling_point").unwrap().is_none());
    assert_eq!(audit.count(AuditAction::FactAdded, AuditOutcome::Denied), 1);
    assert_eq!(recorder.count(Topic::FoundationFactChanged), 0);
    assert_eq!(store.revision(), 0);
}

#[tokio::test]
async fn malformed_payload_is_rejected_with_field() {
    let (store, audit, recorder) = store();
    let mut payload = boiling_point();
    payload.category = "alchemy".into();
    let out = store.add(&user("admin"), payload).await.unwrap();
    match out {
        Outcome::Rejected { field, .. } => assert_eq!(field, "category"),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(audit.count(AuditAction::FactAdded, AuditOutcome::Rejected), 1);
    assert_eq!(recorder.count(Topic::FoundationFactChanged), 0);
}

#[tokio::test]
async fn duplicate_id_is_rejected() {
    let (store, _, _) = store();
    let mut payload = boiling_point();
    payload.id = "speed_of_light".into();
    let out = store.add(&user("admin"), payload).await.unwrap();
    assert!(matches!(out, Outcome::Rejected { ref field, .. } if field == "id"));
    assert_eq!(
        store.get("speed_of_light").unwrap().unwrap().value,
        json!("299792458")
    );
}

#[tokio::test]
async fn update_changes_value_and_refreshes_verification() {
    let (store, _, recorder) = store();
    let before = store.get("spatial_dimensions").unwrap().unwrap();
    let changes = FactUpdate {
        confidence: Some(0.99),
        description: Some("Number of large-scale spatial dimensions".into()),
        ..FactUpdate::default()
    };
    let out = store.update(&user("admin"), "spatial_dimensions", changes).await.unwrap();
    let updated = out.completed().unwrap();
    assert_eq!(updated.confidence, 0.99);
    assert!(updated.updated_at >= before.updated_at);
    assert!(updated.keywords.contains(&"large".to_string()));
    assert_eq!(recorder.count(Topic::FoundationFactChanged), 1);
}

#[tokio::test]
async fn update_unknown_fact_is_rejected() {
    let (store, _, _) = store();
    let changes = FactUpdate {
        value: Some(json!(1)),
        ..FactUpdate::default()
    };
    let out = store.update(&user("admin"), "unicorns", changes).await.unwrap();
    assert!(out.is_rejected());
}

#[tokio::test]
async fn remove_deletes_and_unindexes() {
    let (store, _, recorder) = store();
    let out = store.remove(&user("admin"), "water_is_wet").await.unwrap();
    assert!(out.is_completed());
    assert!(store.get("water_is_wet").unwrap().is_none());
    assert!(store
        .search_by_keywords(&["wets"], false)
        .unwrap()
        .iter()
        .all(|f| f.id != "water_is_wet"));
    assert_eq!(recorder.count(Topic::FoundationFactChanged), 1);
    assert!(store.remove(&user("admin"), "water_is_wet").await.unwrap().is_rejected());
}

// ─── Export / import ───

#[tokio::test]
async fn export_then_import_into_empty_store() {
    let (source, _, _) = store();
    let document = source.export_json().unwrap();

    let (gate, _) = open_gate();
    let target = FoundationFactsStore::new(gate, event_bus());
    let summary = target
        .import_json(&user("admin"), &document, false)
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert_eq!(summary.imported, source.len().unwrap());
    assert_eq!(target.get("pi").unwrap(), source.get("pi").unwrap());
}

#[tokio::test]
async fn import_without_overwrite_skips_existing() {
    let (store, _, recorder) = store();
    let document = store.export_json().unwrap();
    let summary = store
        .import_json(&user("admin"), &document, false)
        .await
        .unwrap()
        .completed()
        .unwrap();
    assert_eq!(summary.imported, 0);
    assert_eq!(summary.skipped.len(), store.len().unwrap());
    assert_eq!(recorder.count(Topic::FoundationFactChanged), 0);
}

#[tokio::test]
async fn import_of_garbage_is_rejected() {
    let (store, _, _) = store();
    let out = store.import_json(&user("admin"), "{not json", true).await.unwrap();
    assert!(matches!(out, Outcome::Rejected { ref field, .. } if field == "document"));
}
