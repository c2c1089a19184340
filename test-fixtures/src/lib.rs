//! Collaborator doubles and builders shared by the Veritas test suites.
//!
//! Permission checkers, audit sinks, event recorders and source oracles with
//! fixed or failing behaviour, so each crate's tests can drive the gate and
//! the degradation paths without a real host.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use veritas_core::errors::{VeritasError, VeritasResult};
use veritas_core::events::{DomainEvent, EventDispatcher, Topic};
use veritas_core::models::{Actor, AuditAction, AuditEntry, AuditOutcome, Permission, Statement};
use veritas_core::traits::{
    IAuditSink, IEventBus, IEventHandler, IPermissionChecker, ISourceValidator, SourceAssessment,
};
use veritas_core::AccessGate;

// ─── Permission checkers ───

/// Grants every permission and consent.
pub struct AllowAll;

#[async_trait]
impl IPermissionChecker for AllowAll {
    async fn check_permission(&self, _actor: &Actor, _permission: Permission) -> VeritasResult<bool> {
        Ok(true)
    }
}

/// Denies every permission.
pub struct DenyAll;

#[async_trait]
impl IPermissionChecker for DenyAll {
    async fn check_permission(&self, _actor: &Actor, _permission: Permission) -> VeritasResult<bool> {
        Ok(false)
    }
}

/// Always errors, as an unreachable permission service would.
pub struct FailingPermissions;

#[async_trait]
impl IPermissionChecker for FailingPermissions {
    async fn check_permission(&self, _actor: &Actor, _permission: Permission) -> VeritasResult<bool> {
        Err(VeritasError::collaborator("permissions", "service unavailable"))
    }
}

/// Per-user grant table. Anonymous callers are looked up as `"anonymous"`.
#[derive(Default)]
pub struct PermissionTable {
    grants: Mutex<HashMap<String, HashSet<Permission>>>,
    no_consent: Mutex<HashSet<String>>,
}

impl PermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(self, user: &str, permissions: &[Permission]) -> Self {
        self.grants
            .lock()
            .unwrap()
            .entry(user.to_string())
            .or_default()
            .extend(permissions.iter().copied());
        self
    }

    pub fn grant_all(self, user: &str) -> Self {
        self.grant(user, &Permission::ALL)
    }

    pub fn withhold_consent(self, user: &str) -> Self {
        self.no_consent.lock().unwrap().insert(user.to_string());
        self
    }
}

#[async_trait]
impl IPermissionChecker for PermissionTable {
    async fn check_permission(&self, actor: &Actor, permission: Permission) -> VeritasResult<bool> {
        if actor.system {
            return Ok(true);
        }
        let grants = self.grants.lock().unwrap();
        Ok(grants
            .get(actor.audit_id())
            .is_some_and(|set| set.contains(&permission)))
    }

    async fn check_consent(&self, actor: &Actor, _scope: &str) -> VeritasResult<bool> {
        Ok(!self.no_consent.lock().unwrap().contains(actor.audit_id()))
    }
}

// ─── Audit sinks ───

/// Keeps every audit entry for inspection.
#[derive(Default)]
pub struct RecordingAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl RecordingAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, action: AuditAction, outcome: AuditOutcome) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.action == action && e.outcome == outcome)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IAuditSink for RecordingAuditSink {
    fn record(&self, entry: AuditEntry) -> VeritasResult<()> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

/// Rejects every write.
pub struct FailingAuditSink;

impl IAuditSink for FailingAuditSink {
    fn record(&self, _entry: AuditEntry) -> VeritasResult<()> {
        Err(VeritasError::collaborator("audit", "disk full"))
    }
}

// ─── Events ───

/// Records every event delivered to it.
#[derive(Default)]
pub struct EventRecorder {
    events: Mutex<Vec<DomainEvent>>,
}

impl EventRecorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Subscribe a new recorder to `topics` on `bus`.
    pub fn attach(bus: &dyn IEventBus, topics: &[Topic]) -> Arc<Self> {
        let recorder = Self::new();
        for topic in topics {
            bus.subscribe(*topic, recorder.clone());
        }
        recorder
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, topic: Topic) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.topic() == topic)
            .count()
    }
}

impl IEventHandler for EventRecorder {
    fn on_event(&self, event: &DomainEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ─── Source oracles ───

/// Scores every URL the same.
pub struct FixedSourceValidator(pub f64);

#[async_trait]
impl ISourceValidator for FixedSourceValidator {
    async fn validate_source(&self, _url: &str) -> VeritasResult<SourceAssessment> {
        Ok(SourceAssessment {
            score: self.0,
            category: Some("fixed".to_string()),
        })
    }
}

/// Scores by exact URL; unknown URLs error.
#[derive(Default)]
pub struct MapSourceValidator {
    scores: HashMap<String, f64>,
}

impl MapSourceValidator {
    pub fn with(mut self, url: &str, score: f64) -> Self {
        self.scores.insert(url.to_string(), score);
        self
    }
}

#[async_trait]
impl ISourceValidator for MapSourceValidator {
    async fn validate_source(&self, url: &str) -> VeritasResult<SourceAssessment> {
        self.scores
            .get(url)
            .map(|score| SourceAssessment {
                score: *score,
                category: None,
            })
            .ok_or_else(|| VeritasError::collaborator("source_validator", format!("unknown source {url}")))
    }
}

/// Always errors, as a timed-out oracle would.
pub struct FailingSourceValidator;

#[async_trait]
impl ISourceValidator for FailingSourceValidator {
    async fn validate_source(&self, _url: &str) -> VeritasResult<SourceAssessment> {
        Err(VeritasError::collaborator("source_validator", "timeout"))
    }
}

// ─── Builders ───

/// A gate over `checker` with a recording audit sink.
pub fn gate_with(checker: Arc<dyn IPermissionChecker>) -> (AccessGate, Arc<RecordingAuditSink>) {
    let audit = Arc::new(RecordingAuditSink::new());
    (AccessGate::new(checker, audit.clone()), audit)
}

/// A gate that allows everything, with a recording audit sink.
pub fn open_gate() -> (AccessGate, Arc<RecordingAuditSink>) {
    gate_with(Arc::new(AllowAll))
}

/// A fresh in-process event bus.
pub fn event_bus() -> Arc<EventDispatcher> {
    Arc::new(EventDispatcher::new())
}

pub fn statement(key: &str, value: serde_json::Value) -> Statement {
    Statement::new(key, value)
}

pub fn user(id: &str) -> Actor {
    Actor::user(id)
}
