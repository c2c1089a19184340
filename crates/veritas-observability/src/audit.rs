//! Audit sinks: a bounded in-memory log, a tracing sink, and a fan-out.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use veritas_core::errors::{VeritasError, VeritasResult};
use veritas_core::models::{AuditAction, AuditEntry, AuditOutcome};
use veritas_core::traits::IAuditSink;

/// Selects audit entries. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditQuery {
    pub action: Option<AuditAction>,
    pub actor: Option<String>,
    pub outcome: Option<AuditOutcome>,
    pub since: Option<DateTime<Utc>>,
    /// Keep only the newest `limit` matches.
    pub limit: Option<usize>,
}

impl AuditQuery {
    pub fn action(action: AuditAction) -> Self {
        Self {
            action: Some(action),
            ..Self::default()
        }
    }

    pub fn with_outcome(mut self, outcome: AuditOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn by_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    fn matches(&self, entry: &AuditEntry) -> bool {
        self.action.map_or(true, |a| entry.action == a)
            && self.actor.as_deref().map_or(true, |a| entry.actor == a)
            && self.outcome.map_or(true, |o| entry.outcome == o)
            && self.since.map_or(true, |t| entry.timestamp >= t)
    }
}

/// Append-only audit log holding the most recent `capacity` entries.
#[derive(Debug)]
pub struct MemoryAuditLog {
    entries: Mutex<VecDeque<AuditEntry>>,
    capacity: usize,
    dropped: AtomicU64,
}

impl MemoryAuditLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
            dropped: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |e| e.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries evicted because the log was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Matching entries, oldest first. With a limit, the newest `limit`
    /// matches are kept.
    pub fn query(&self, query: &AuditQuery) -> Vec<AuditEntry> {
        let Ok(entries) = self.entries.lock() else {
            return Vec::new();
        };
        let matching: Vec<AuditEntry> = entries.iter().filter(|e| query.matches(e)).cloned().collect();
        match query.limit {
            Some(limit) if matching.len() > limit => matching[matching.len() - limit..].to_vec(),
            _ => matching,
        }
    }

    pub fn count(&self, action: AuditAction, outcome: AuditOutcome) -> usize {
        self.query(&AuditQuery::action(action).with_outcome(outcome)).len()
    }
}

impl IAuditSink for MemoryAuditLog {
    fn record(&self, entry: AuditEntry) -> VeritasResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| VeritasError::collaborator("audit_log", e.to_string()))?;
        while entries.len() >= self.capacity {
            entries.pop_front();
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        entries.push_back(entry);
        Ok(())
    }
}

/// Emits every audit entry as a tracing event; denials and failures at
/// `warn`.
#[derive(Debug, Default)]
pub struct TracingAuditSink;

impl IAuditSink for TracingAuditSink {
    fn record(&self, entry: AuditEntry) -> VeritasResult<()> {
        match entry.outcome {
            AuditOutcome::Completed | AuditOutcome::Rejected => tracing::info!(
                event = "audit",
                action = ?entry.action,
                actor = %entry.actor,
                outcome = ?entry.outcome,
                details = %entry.details,
                "audit"
            ),
            AuditOutcome::Denied | AuditOutcome::Failed => tracing::warn!(
                event = "audit",
                action = ?entry.action,
                actor = %entry.actor,
                outcome = ?entry.outcome,
                details = %entry.details,
                "audit"
            ),
        }
        Ok(())
    }
}

/// Writes each entry to every inner sink. Reports the first failure after
/// trying all of them.
pub struct CompositeAuditSink {
    sinks: Vec<Arc<dyn IAuditSink>>,
}

impl CompositeAuditSink {
    pub fn new(sinks: Vec<Arc<dyn IAuditSink>>) -> Self {
        Self { sinks }
    }
}

impl IAuditSink for CompositeAuditSink {
    fn record(&self, entry: AuditEntry) -> VeritasResult<()> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.record(entry.clone()) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
