//! EventDispatcher: synchronous topic dispatch.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use super::types::{DomainEvent, Topic};
use crate::traits::{IEventBus, IEventHandler};

/// Synchronous event dispatcher keyed by topic.
///
/// Handlers run on the publisher's thread before `publish` returns, so a
/// subscriber (e.g. a cache invalidator) has observed the event by the time
/// the publishing mutation completes. A panicking handler is caught and does
/// not prevent later handlers from receiving the event.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: RwLock<HashMap<Topic, Vec<Arc<dyn IEventHandler>>>>,
    published: AtomicU64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handlers registered for `topic`.
    pub fn handler_count(&self, topic: Topic) -> usize {
        let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
        handlers.get(&topic).map_or(0, Vec::len)
    }

    /// Total events published since construction.
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

impl IEventBus for EventDispatcher {
    fn publish(&self, event: DomainEvent) {
        self.published.fetch_add(1, Ordering::Relaxed);
        let topic = event.topic();
        let targets: Vec<Arc<dyn IEventHandler>> = {
            let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
            handlers.get(&topic).cloned().unwrap_or_default()
        };
        for handler in targets {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler.on_event(&event);
            }));
            if result.is_err() {
                tracing::error!(
                    event = "event_handler_panicked",
                    topic = %topic.as_str(),
                    "event handler panicked"
                );
            }
        }
    }

    fn subscribe(&self, topic: Topic, handler: Arc<dyn IEventHandler>) {
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        handlers.entry(topic).or_default().push(handler);
    }
}
