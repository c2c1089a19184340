//! Bridges domain events onto the named tracing events.

use veritas_core::events::{DomainEvent, FactChange, Topic};
use veritas_core::models::{Resolution, ValidationStatus};
use veritas_core::traits::{IEventBus, IEventHandler};

use crate::tracing_setup::events;

/// Logs every domain event it receives as a structured tracing event.
#[derive(Debug, Default)]
pub struct EventLogger;

impl EventLogger {
    pub const TOPICS: [Topic; 6] = [
        Topic::FoundationFactChanged,
        Topic::ConflictResolved,
        Topic::StatementValidated,
        Topic::FeedbackSubmitted,
        Topic::FeedbackVerified,
        Topic::CorrectionApplied,
    ];

    /// Subscribe a logger to every topic on `bus`.
    pub fn attach(bus: &dyn IEventBus) -> std::sync::Arc<Self> {
        let logger = std::sync::Arc::new(Self);
        for topic in Self::TOPICS {
            bus.subscribe(topic, logger.clone());
        }
        logger
    }
}

fn change_label(change: FactChange) -> &'static str {
    match change {
        FactChange::Added => "added",
        FactChange::Updated => "updated",
        FactChange::Removed => "removed",
        FactChange::Imported => "imported",
    }
}

fn resolution_label(resolution: Resolution) -> &'static str {
    match resolution {
        Resolution::KeepExisting => "keep_existing",
        Resolution::AcceptProposed => "accept_proposed",
    }
}

impl IEventHandler for EventLogger {
    fn on_event(&self, event: &DomainEvent) {
        match event {
            DomainEvent::FoundationFactChanged {
                fact_id,
                change,
                revision,
            } => events::fact_changed(fact_id, change_label(*change), *revision),
            DomainEvent::ConflictResolved {
                key,
                resolution,
                confidence,
            } => events::conflict_resolved(key, resolution_label(*resolution), *confidence),
            DomainEvent::StatementValidated {
                key,
                status,
                confidence,
                fact_id,
                fallacy_id,
            } => match status {
                ValidationStatus::Valid => {
                    events::statement_validated(key, status.as_str(), *confidence)
                }
                ValidationStatus::ContradictsFoundation => {
                    events::contradiction_detected(key, fact_id.as_deref(), *confidence)
                }
                ValidationStatus::Fallacious => {
                    events::fallacy_detected(key, fallacy_id.as_deref(), *confidence)
                }
                ValidationStatus::LogicallyInconsistent | ValidationStatus::Uncertain => {
                    events::statement_unresolved(key, status.as_str(), *confidence)
                }
            },
            DomainEvent::FeedbackSubmitted {
                id,
                step_id,
                category,
                auto_applied,
            } => events::feedback_submitted(id, step_id, category.as_str(), *auto_applied),
            DomainEvent::FeedbackVerified { id, verified } => events::feedback_verified(id, *verified),
            DomainEvent::CorrectionApplied {
                id,
                step_id,
                category,
            } => events::correction_applied(id, step_id, category.as_str()),
        }
    }
}
