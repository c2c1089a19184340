//! Revision-guarded verdict cache using moka.
//!
//! Entries are keyed by statement fingerprint plus the strictness flag.
//! Any foundation change invalidates the whole cache; a verdict computed
//! against an older revision is never stored.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use tracing::debug;

use veritas_core::config::ValidationConfig;
use veritas_core::events::DomainEvent;
use veritas_core::models::{Statement, ValidationResult};
use veritas_core::traits::IEventHandler;

/// Cache key for `statement` validated with the given strictness.
pub fn cache_key(statement: &Statement, strict: bool) -> String {
    format!("{}:{}", statement.fingerprint(), u8::from(strict))
}

/// Proof of which cache state a miss observed. Required to store a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    revision: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Hit(ValidationResult),
    Miss(Ticket),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
    pub invalidations: u64,
}

pub struct ValidationCache {
    cache: Cache<String, ValidationResult>,
    enabled: bool,
    generation: AtomicU64,
    revision: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    invalidations: AtomicU64,
}

impl ValidationCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self::build(capacity, ttl, true)
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::build(1, Duration::from_secs(1), false)
    }

    pub fn from_config(config: &ValidationConfig) -> Self {
        if config.cache_enabled {
            Self::new(config.cache_capacity, Duration::from_secs(config.cache_ttl_secs))
        } else {
            Self::disabled()
        }
    }

    fn build(capacity: u64, ttl: Duration, enabled: bool) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self {
            cache,
            enabled,
            generation: AtomicU64::new(0),
            revision: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Look up `key` as of foundation revision `store_revision`. Observing a
    /// newer revision than the cache has seen clears the cache first.
    pub fn lookup(&self, key: &str, store_revision: u64) -> Lookup {
        let previous = self.revision.fetch_max(store_revision, Ordering::SeqCst);
        if previous < store_revision {
            debug!(previous, store_revision, "foundation revision advanced, clearing verdict cache");
            self.invalidate();
        }
        let ticket = Ticket {
            generation: self.generation.load(Ordering::SeqCst),
            revision: store_revision,
        };
        if !self.enabled {
            return Lookup::Miss(ticket);
        }
        match self.cache.get(key) {
            Some(hit) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Lookup::Hit(hit)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Lookup::Miss(ticket)
            }
        }
    }

    /// Store a verdict computed after the miss that issued `ticket`. Dropped
    /// if the foundation moved on since then.
    pub fn store(&self, key: String, verdict: ValidationResult, ticket: Ticket, store_revision: u64) {
        if !self.enabled
            || ticket.revision != store_revision
            || self.revision.load(Ordering::SeqCst) != ticket.revision
            || self.generation.load(Ordering::SeqCst) != ticket.generation
        {
            return;
        }
        self.cache.insert(key.clone(), verdict);
        // An invalidation that raced the insert may have missed it.
        if self.generation.load(Ordering::SeqCst) != ticket.generation {
            self.cache.invalidate(&key);
        }
    }

    /// Drop every cached verdict.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.invalidations.fetch_add(1, Ordering::Relaxed);
        self.cache.invalidate_all();
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }
}

impl IEventHandler for ValidationCache {
    fn on_event(&self, event: &DomainEvent) {
        match event {
            DomainEvent::FoundationFactChanged { revision, .. } => {
                self.revision.fetch_max(*revision, Ordering::SeqCst);
                self.invalidate();
            }
            DomainEvent::ConflictResolved { .. } => self.invalidate(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use veritas_core::events::FactChange;
    use veritas_core::models::{ValidationDetails, ValidationStatus};

    fn verdict() -> ValidationResult {
        ValidationResult::new(
            "k",
            ValidationStatus::Valid,
            1.0,
            ValidationDetails::Consistent { fact_id: None, note: None },
        )
    }

    fn cache() -> ValidationCache {
        ValidationCache::new(100, Duration::from_secs(60))
    }

    fn miss(lookup: Lookup) -> Ticket {
        match lookup {
            Lookup::Miss(ticket) => ticket,
            Lookup::Hit(_) => panic!("expected a miss"),
        }
    }

    #[test]
    fn stores_and_hits_at_same_revision() {
        let cache = cache();
        let ticket = miss(cache.lookup("k", 0));
        cache.store("k".into(), verdict(), ticket, 0);
        assert!(matches!(cache.lookup("k", 0), Lookup::Hit(_)));
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }

    #[test]
    fn newer_revision_clears_cache() {
        let cache = cache();
        let ticket = miss(cache.lookup("k", 0));
        cache.store("k".into(), verdict(), ticket, 0);
        assert!(matches!(cache.lookup("k", 1), Lookup::Miss(_)));
    }

    #[test]
    fn verdict_from_stale_revision_is_not_stored() {
        let cache = cache();
        let ticket = miss(cache.lookup("k", 0));
        cache.on_event(&DomainEvent::FoundationFactChanged {
            fact_id: "x".into(),
            change: FactChange::Updated,
            revision: 1,
        });
        cache.store("k".into(), verdict(), ticket, 1);
        cache.store("k".into(), verdict(), ticket, 0);
        assert!(matches!(cache.lookup("k", 1), Lookup::Miss(_)));
    }

    #[test]
    fn disabled_cache_never_hits() {
        let cache = ValidationCache::disabled();
        let ticket = miss(cache.lookup("k", 0));
        cache.store("k".into(), verdict(), ticket, 0);
        assert!(matches!(cache.lookup("k", 0), Lookup::Miss(_)));
    }

    #[test]
    fn key_distinguishes_strictness() {
        let s = Statement::new("k", json!(1));
        assert_ne!(cache_key(&s, true), cache_key(&s, false));
    }
}
