use std::sync::Arc;

use dashmap::DashMap;
use serde_json::json;
use tracing::info;

use veritas_core::events::DomainEvent;
use veritas_core::models::{
    Actor, AuditAction, AuditOutcome, ConflictResolution, FoundationFact, Resolution, Statement,
};
use veritas_core::traits::{IEventBus, IEventHandler};
use veritas_core::AccessGate;

use super::policy::{Conflict, RecencyConfidencePolicy, ResolutionPolicy};

/// Applies a [`ResolutionPolicy`] to foundation conflicts, keeping a
/// per-key history that is dropped whenever the underlying fact changes.
pub struct ConflictResolver {
    policy: Box<dyn ResolutionPolicy>,
    history: DashMap<String, Vec<ConflictResolution>>,
    gate: AccessGate,
    events: Arc<dyn IEventBus>,
}

impl ConflictResolver {
    pub fn new(gate: AccessGate, events: Arc<dyn IEventBus>) -> Self {
        Self::with_policy(Box::new(RecencyConfidencePolicy), gate, events)
    }

    pub fn with_policy(
        policy: Box<dyn ResolutionPolicy>,
        gate: AccessGate,
        events: Arc<dyn IEventBus>,
    ) -> Self {
        Self {
            policy,
            history: DashMap::new(),
            gate,
            events,
        }
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Decide between `fact` and the disagreeing `statement`. The decision is
    /// audited as a system action and published as `ConflictResolved`.
    pub fn resolve(&self, fact: &FoundationFact, statement: &Statement) -> ConflictResolution {
        let conflict = Conflict {
            key: statement.key.clone(),
            existing: fact.value.clone(),
            existing_confidence: fact.confidence,
            existing_verified_at: fact.verified_at(),
            proposed: statement.value.clone(),
            proposed_confidence: statement.confidence,
            proposed_observed_at: statement.observed_at,
        };
        let (resolution, confidence, explanation) = self.policy.decide(&conflict);
        let resolved_value = match resolution {
            Resolution::KeepExisting => conflict.existing,
            Resolution::AcceptProposed => conflict.proposed,
        };
        let decision = ConflictResolution {
            key: conflict.key,
            resolution,
            resolved_value,
            confidence: confidence.clamp(0.0, 1.0),
            policy: self.policy.name().to_string(),
            explanation,
        };

        info!(
            key = %decision.key,
            resolution = ?decision.resolution,
            confidence = decision.confidence,
            policy = %decision.policy,
            "foundation conflict resolved"
        );
        self.gate.audit(
            AuditAction::ConflictResolved,
            &Actor::system(),
            AuditOutcome::Completed,
            json!({
                "key": decision.key,
                "fact_id": fact.id,
                "resolution": decision.resolution,
                "confidence": decision.confidence,
                "policy": decision.policy,
            }),
        );
        self.history
            .entry(decision.key.clone())
            .or_default()
            .push(decision.clone());
        self.events.publish(DomainEvent::ConflictResolved {
            key: decision.key.clone(),
            resolution: decision.resolution,
            confidence: decision.confidence,
        });
        decision
    }

    /// Past decisions for `key`, oldest first.
    pub fn history(&self, key: &str) -> Vec<ConflictResolution> {
        self.history
            .get(key)
            .map(|entries| entries.value().clone())
            .unwrap_or_default()
    }

    pub fn clear_history(&self) {
        self.history.clear();
    }
}

impl IEventHandler for ConflictResolver {
    fn on_event(&self, event: &DomainEvent) {
        if let DomainEvent::FoundationFactChanged { fact_id, .. } = event {
            if fact_id == "*" {
                self.history.clear();
            } else {
                self.history.remove(fact_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, Utc};
    use serde_json::json;
    use test_fixtures::{event_bus, open_gate, RecordingAuditSink};
    use veritas_core::events::{EventDispatcher, FactChange, Topic};
    use veritas_core::models::FactCategory;

    fn resolver() -> (ConflictResolver, Arc<RecordingAuditSink>, Arc<EventDispatcher>) {
        let (gate, audit) = open_gate();
        let bus = event_bus();
        (ConflictResolver::new(gate, bus.clone()), audit, bus)
    }

    fn fact() -> FoundationFact {
        FoundationFact::new(
            "speed_of_light",
            json!("299792458"),
            FactCategory::Physics,
            1.0,
            "Speed of light in vacuum",
            "SI",
        )
    }

    #[test]
    fn keeps_foundation_and_records_history() {
        let (resolver, log, bus) = resolver();
        let decision = resolver.resolve(&fact(), &Statement::new("speed_of_light", json!("300000000")));
        assert_eq!(decision.resolution, Resolution::KeepExisting);
        assert_eq!(decision.resolved_value, json!("299792458"));
        assert_eq!(resolver.history("speed_of_light").len(), 1);
        assert_eq!(log.count(AuditAction::ConflictResolved, AuditOutcome::Completed), 1);
        assert_eq!(log.entries()[0].actor, veritas_core::constants::SYSTEM_ACTOR_ID);
        assert_eq!(bus.published_count(), 1);
    }

    #[test]
    fn newer_confident_claim_is_accepted() {
        let (resolver, _, _) = resolver();
        let statement = Statement::new("speed_of_light", json!("300000000"))
            .with_confidence(1.0)
            .observed_at(Utc::now() + Duration::seconds(5));
        let decision = resolver.resolve(&fact(), &statement);
        assert_eq!(decision.resolution, Resolution::AcceptProposed);
        assert_eq!(decision.resolved_value, json!("300000000"));
    }

    #[test]
    fn fact_change_drops_history() {
        let (resolver, _, _) = resolver();
        let resolver = Arc::new(resolver);
        let bus = EventDispatcher::new();
        bus.subscribe(Topic::FoundationFactChanged, resolver.clone());
        resolver.resolve(&fact(), &Statement::new("speed_of_light", json!("1")));
        bus.publish(DomainEvent::FoundationFactChanged {
            fact_id: "speed_of_light".into(),
            change: FactChange::Updated,
            revision: 1,
        });
        assert!(resolver.history("speed_of_light").is_empty());
    }
}
