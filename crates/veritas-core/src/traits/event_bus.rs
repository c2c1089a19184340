use std::sync::Arc;

use crate::events::{DomainEvent, Topic};

/// Receives published domain events. Called synchronously on the
/// publisher's thread; must not block.
pub trait IEventHandler: Send + Sync {
    fn on_event(&self, event: &DomainEvent);
}

/// Topic-based publish/subscribe bus.
pub trait IEventBus: Send + Sync {
    fn publish(&self, event: DomainEvent);
    fn subscribe(&self, topic: Topic, handler: Arc<dyn IEventHandler>);
}
