//! FeedbackLoop: gated intake, verification and application of corrections.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use veritas_core::config::FeedbackConfig;
use veritas_core::constants::{CONSENT_SCOPE_FEEDBACK, DEFAULT_FEEDBACK_CONFIDENCE};
use veritas_core::errors::{FeedbackError, VeritasResult};
use veritas_core::events::DomainEvent;
use veritas_core::models::{
    Actor, AppliedCorrection, AuditAction, AuditOutcome, FeedbackCategory, FeedbackEntry,
    FeedbackOrigin, FeedbackStatus, ImpactLevel, LogicalRelation, Outcome, Permission,
    ValidationStatus,
};
use veritas_core::traits::{IEventBus, IEventHandler, IFeedbackArchive, ISourceValidator};
use veritas_core::AccessGate;
use veritas_facts::FoundationFactsStore;
use veritas_validation::compare_text;

use crate::categorizer;
use crate::policy::{auto_apply_eligible, enrich_confidence};
use crate::store::{ApplyState, FeedbackStore};
use crate::submission::{
    ApplyReceipt, BatchApplySummary, ConflictReport, CorrectionConflict, FeedbackFilter,
    FeedbackReceipt, FeedbackStatistics, FeedbackSubmission, VerificationReceipt,
    VerificationRequest,
};

/// The feedback/correction loop.
///
/// Entries live in a bounded in-memory store guarded by a mutex that is
/// never held across an `.await`. `applied` is set by check-and-set under
/// that lock, and `CorrectionApplied` is published only by the caller that
/// won, after the lock is released.
pub struct FeedbackLoop {
    config: FeedbackConfig,
    store: Mutex<FeedbackStore>,
    source_validator: Option<Arc<dyn ISourceValidator>>,
    archive: Option<Arc<dyn IFeedbackArchive>>,
    facts: Option<Arc<FoundationFactsStore>>,
    gate: AccessGate,
    events: Arc<dyn IEventBus>,
}

impl FeedbackLoop {
    pub fn new(config: FeedbackConfig, gate: AccessGate, events: Arc<dyn IEventBus>) -> Self {
        let store = FeedbackStore::new(config.max_entries);
        Self {
            config,
            store: Mutex::new(store),
            source_validator: None,
            archive: None,
            facts: None,
            gate,
            events,
        }
    }

    /// Score submitted source URLs with `validator`.
    pub fn with_source_validator(mut self, validator: Arc<dyn ISourceValidator>) -> Self {
        self.source_validator = Some(validator);
        self
    }

    /// Mirror every state change to `archive`, best-effort.
    pub fn with_archive(mut self, archive: Arc<dyn IFeedbackArchive>) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Check corrections against `facts` in [`Self::check_for_conflicts`].
    pub fn with_facts(mut self, facts: Arc<FoundationFactsStore>) -> Self {
        self.facts = Some(facts);
        self
    }

    pub fn config(&self) -> &FeedbackConfig {
        &self.config
    }

    /// Load previously archived entries. Not a gated operation; returns the
    /// number of entries now held.
    pub fn restore(&self, entries: Vec<FeedbackEntry>) -> VeritasResult<usize> {
        let mut store = self.lock()?;
        for entry in entries {
            store.insert(entry);
        }
        Ok(store.len())
    }

    // ─── Intake ───

    /// Accept a correction. Requires `submit_feedback`; anonymous callers
    /// additionally need `allow_anonymous_feedback`, and every caller needs
    /// consent to the feedback scope.
    pub async fn handle_feedback(
        &self,
        actor: &Actor,
        submission: FeedbackSubmission,
    ) -> VeritasResult<Outcome<FeedbackReceipt>> {
        let details = json!({
            "step_id": submission.step_id,
            "category": submission.category,
        });
        self.gate
            .run_described(
                actor,
                Permission::SubmitFeedback,
                AuditAction::FeedbackSubmitted,
                details,
                move || async move { self.intake(actor, submission).await },
                |r: &FeedbackReceipt| {
                    json!({
                        "id": r.entry.id,
                        "category": r.entry.category,
                        "confidence": r.entry.confidence,
                        "auto_applied": r.auto_applied,
                    })
                },
            )
            .await
    }

    async fn intake(
        &self,
        actor: &Actor,
        submission: FeedbackSubmission,
    ) -> VeritasResult<Outcome<FeedbackReceipt>> {
        if actor.is_anonymous() && !self.config.allow_anonymous_feedback {
            return Ok(Outcome::denied(
                Permission::SubmitFeedback,
                "anonymous feedback is disabled",
            ));
        }
        if !actor.system && !self.gate.has_consent(actor, CONSENT_SCOPE_FEEDBACK).await {
            return Ok(Outcome::denied(
                Permission::SubmitFeedback,
                format!("{} has not consented to feedback storage", actor.audit_id()),
            ));
        }

        let step_id = submission.step_id.trim();
        if step_id.is_empty() {
            return Ok(Outcome::rejected("step_id", "must not be empty"));
        }
        let correction = submission.correction.trim();
        if correction.is_empty() {
            return Ok(Outcome::rejected("correction", "must not be empty"));
        }

        let category = match submission.category.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match raw.parse::<FeedbackCategory>() {
                Ok(category) => category,
                Err(reason) => return Ok(Outcome::rejected("category", reason)),
            },
            _ => categorizer::categorize(correction),
        };
        if !self.config.accepts(category) {
            return Ok(Outcome::rejected(
                "category",
                format!("{category} feedback is not enabled"),
            ));
        }

        let impact_level = match submission.impact_level.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match raw.parse::<ImpactLevel>() {
                Ok(level) => level,
                Err(reason) => return Ok(Outcome::rejected("impact_level", reason)),
            },
            _ => category.default_impact(),
        };

        let submitted = submission.confidence.unwrap_or(DEFAULT_FEEDBACK_CONFIDENCE);
        if !submitted.is_finite() || !(0.0..=1.0).contains(&submitted) {
            return Ok(Outcome::rejected("confidence", "must be between 0.0 and 1.0"));
        }

        let source_url = submission
            .source_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string);
        let source_reliability = match &source_url {
            Some(url) => self.source_reliability(url).await,
            None => None,
        };

        let confidence = enrich_confidence(
            submitted,
            source_reliability,
            !actor.is_anonymous(),
            self.config.authenticated_bonus,
        );

        let verified = submission.verified && self.may_preverify(actor).await;

        let now = Utc::now();
        let mut entry = FeedbackEntry {
            id: Uuid::new_v4().to_string(),
            step_id: step_id.to_string(),
            correction: correction.to_string(),
            user_id: actor.user_id.clone(),
            category,
            impact_level,
            confidence,
            source_url,
            source_reliability,
            verified,
            applied: false,
            auto_applied: false,
            status: if verified {
                FeedbackStatus::Verified
            } else {
                FeedbackStatus::PendingVerification
            },
            origin: FeedbackOrigin::User,
            verified_by: verified.then(|| actor.audit_id().to_string()),
            verification_note: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
            verified_at: verified.then_some(now),
            applied_at: None,
        };

        let eligible = auto_apply_eligible(&self.config, &entry);
        let state = {
            let mut store = self.lock()?;
            for old in store.insert(entry.clone()) {
                debug!(id = %old.id, "feedback store full; evicted oldest entry");
            }
            if eligible {
                store.apply(&entry.id, self.config.require_verification, true, now)
            } else {
                None
            }
        };

        let auto_applied = matches!(state, Some(ApplyState::Applied(_)));
        if let Some(ApplyState::Applied(applied)) = state {
            entry = applied;
        }

        info!(
            id = %entry.id,
            step_id = %entry.step_id,
            category = %entry.category,
            confidence = entry.confidence,
            auto_applied,
            "feedback submitted"
        );
        self.persist(&entry).await;
        self.events.publish(DomainEvent::FeedbackSubmitted {
            id: entry.id.clone(),
            step_id: entry.step_id.clone(),
            category: entry.category,
            auto_applied,
        });
        if auto_applied {
            self.announce_applied(&entry);
        }

        Ok(Outcome::Completed(FeedbackReceipt {
            entry,
            auto_applied,
        }))
    }

    async fn source_reliability(&self, url: &str) -> Option<f64> {
        let oracle = self.source_validator.as_ref()?;
        match oracle.validate_source(url).await {
            Ok(assessment) if assessment.score.is_finite() => Some(assessment.score.clamp(0.0, 1.0)),
            Ok(_) => None,
            Err(e) => {
                warn!(
                    event = "degradation_triggered",
                    component = "source_validator",
                    failure = %e,
                    fallback = "submitted confidence only",
                    url = %url,
                    "source validation failed"
                );
                None
            }
        }
    }

    async fn may_preverify(&self, actor: &Actor) -> bool {
        if self.gate.allows(actor, Permission::VerifyFeedback).await {
            return true;
        }
        warn!(
            actor = %actor.audit_id(),
            "pre-verified flag ignored; submitter lacks verify_feedback"
        );
        false
    }

    // ─── Application ───

    /// Apply a correction. Requires `apply_feedback`.
    ///
    /// Unknown ids are a caller error. Applying twice is idempotent and
    /// notifies only once.
    pub async fn apply_feedback(
        &self,
        actor: &Actor,
        id: &str,
    ) -> VeritasResult<Outcome<ApplyReceipt>> {
        self.gate
            .run_described(
                actor,
                Permission::ApplyFeedback,
                AuditAction::FeedbackApplied,
                json!({ "id": id }),
                move || async move { self.apply_inner(id).await },
                |r: &ApplyReceipt| json!({ "newly_applied": r.newly_applied }),
            )
            .await
    }

    async fn apply_inner(&self, id: &str) -> VeritasResult<Outcome<ApplyReceipt>> {
        let state = self
            .lock()?
            .apply(id, self.config.require_verification, false, Utc::now())
            .ok_or_else(|| FeedbackError::NotFound(id.to_string()))?;
        match state {
            ApplyState::Applied(entry) => {
                info!(id = %entry.id, step_id = %entry.step_id, "feedback applied");
                self.persist(&entry).await;
                self.announce_applied(&entry);
                Ok(Outcome::Completed(ApplyReceipt {
                    entry,
                    newly_applied: true,
                }))
            }
            ApplyState::AlreadyApplied(entry) => {
                debug!(id = %entry.id, "feedback already applied");
                Ok(Outcome::Completed(ApplyReceipt {
                    entry,
                    newly_applied: false,
                }))
            }
            ApplyState::Ineligible { field, reason } => Ok(Outcome::rejected(field, reason)),
        }
    }

    /// Apply every open entry, optionally only those from `user_id`.
    /// Requires `apply_feedback`.
    ///
    /// Applied, rejected and non-matching entries are skipped; entries that
    /// still await required verification count as failed.
    pub async fn batch_apply(
        &self,
        actor: &Actor,
        user_id: Option<&str>,
    ) -> VeritasResult<Outcome<BatchApplySummary>> {
        self.gate
            .run_described(
                actor,
                Permission::ApplyFeedback,
                AuditAction::FeedbackApplied,
                json!({ "batch": true, "user_id": user_id }),
                move || async move { self.batch_inner(user_id).await },
                |s: &BatchApplySummary| {
                    json!({ "applied": s.applied, "skipped": s.skipped, "failed": s.failed })
                },
            )
            .await
    }

    async fn batch_inner(&self, user_id: Option<&str>) -> VeritasResult<Outcome<BatchApplySummary>> {
        let ids = self.lock()?.ids();
        let mut summary = BatchApplySummary::default();
        for id in ids {
            let state = {
                let mut store = self.lock()?;
                let open = store.get(&id).is_some_and(|e| {
                    !e.applied
                        && e.status != FeedbackStatus::Rejected
                        && user_id.map_or(true, |u| e.user_id.as_deref() == Some(u))
                });
                if open {
                    store.apply(&id, self.config.require_verification, false, Utc::now())
                } else {
                    None
                }
            };
            match state {
                Some(ApplyState::Applied(entry)) => {
                    summary.applied += 1;
                    self.persist(&entry).await;
                    self.announce_applied(&entry);
                }
                Some(ApplyState::Ineligible { .. }) => summary.failed += 1,
                Some(ApplyState::AlreadyApplied(_)) | None => summary.skipped += 1,
            }
        }
        info!(
            applied = summary.applied,
            skipped = summary.skipped,
            failed = summary.failed,
            "batch apply finished"
        );
        Ok(Outcome::Completed(summary))
    }

    /// Corrections applied against `step_id`, oldest first.
    pub fn check_for_applicable_corrections(
        &self,
        step_id: &str,
    ) -> VeritasResult<Vec<AppliedCorrection>> {
        Ok(self.lock()?.applied_for(step_id))
    }

    // ─── Verification ───

    /// Record a verifier's decision. Requires `verify_feedback`.
    ///
    /// Declining rejects the entry. Approving an entry that then meets the
    /// auto-apply rule applies it.
    pub async fn verify_feedback(
        &self,
        actor: &Actor,
        request: VerificationRequest,
    ) -> VeritasResult<Outcome<VerificationReceipt>> {
        let details = json!({ "id": request.id, "verified": request.verified });
        self.gate
            .run_described(
                actor,
                Permission::VerifyFeedback,
                AuditAction::FeedbackVerified,
                details,
                move || async move { self.verify_inner(actor, request).await },
                |r: &VerificationReceipt| json!({ "auto_applied": r.auto_applied }),
            )
            .await
    }

    async fn verify_inner(
        &self,
        actor: &Actor,
        request: VerificationRequest,
    ) -> VeritasResult<Outcome<VerificationReceipt>> {
        if request.id.trim().is_empty() {
            return Ok(Outcome::rejected("id", "must not be empty"));
        }
        let verifier = request
            .user_id
            .clone()
            .or_else(|| actor.user_id.clone());

        let entry = {
            let mut store = self.lock()?;
            let entry = store
                .get_mut(&request.id)
                .ok_or_else(|| FeedbackError::NotFound(request.id.clone()))?;
            if entry.applied {
                if !request.verified {
                    return Ok(Outcome::rejected("status", "applied feedback cannot be declined"));
                }
                return Ok(Outcome::Completed(VerificationReceipt {
                    entry: entry.clone(),
                    auto_applied: false,
                }));
            }
            let now = Utc::now();
            entry.verified = request.verified;
            entry.verified_by = verifier;
            entry.verification_note = request.note.clone();
            entry.verified_at = Some(now);
            entry.updated_at = now;
            if request.verified {
                entry.status = FeedbackStatus::Verified;
                entry.rejection_reason = None;
            } else {
                entry.status = FeedbackStatus::Rejected;
                entry.rejection_reason =
                    Some(request.note.clone().unwrap_or_else(|| "failed verification".to_string()));
            }
            entry.clone()
        };

        info!(id = %entry.id, verified = entry.verified, "feedback verification recorded");
        self.persist(&entry).await;
        self.events.publish(DomainEvent::FeedbackVerified {
            id: entry.id.clone(),
            verified: entry.verified,
        });

        if !auto_apply_eligible(&self.config, &entry) {
            return Ok(Outcome::Completed(VerificationReceipt {
                entry,
                auto_applied: false,
            }));
        }
        let state = self
            .lock()?
            .apply(&entry.id, self.config.require_verification, true, Utc::now());
        match state {
            Some(ApplyState::Applied(applied)) => {
                info!(id = %applied.id, step_id = %applied.step_id, "verified feedback auto-applied");
                self.persist(&applied).await;
                self.announce_applied(&applied);
                Ok(Outcome::Completed(VerificationReceipt {
                    entry: applied,
                    auto_applied: true,
                }))
            }
            Some(ApplyState::AlreadyApplied(current)) => Ok(Outcome::Completed(VerificationReceipt {
                entry: current,
                auto_applied: false,
            })),
            _ => Ok(Outcome::Completed(VerificationReceipt {
                entry,
                auto_applied: false,
            })),
        }
    }

    /// Reject an entry outright. Requires `verify_feedback`. Applied entries
    /// cannot be rejected.
    pub async fn reject_feedback(
        &self,
        actor: &Actor,
        id: &str,
        reason: &str,
    ) -> VeritasResult<Outcome<FeedbackEntry>> {
        self.gate
            .run(
                actor,
                Permission::VerifyFeedback,
                AuditAction::FeedbackRejected,
                json!({ "id": id, "reason": reason }),
                move || async move { self.reject_inner(actor, id, reason).await },
            )
            .await
    }

    async fn reject_inner(
        &self,
        actor: &Actor,
        id: &str,
        reason: &str,
    ) -> VeritasResult<Outcome<FeedbackEntry>> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Ok(Outcome::rejected("reason", "must not be empty"));
        }
        let entry = {
            let mut store = self.lock()?;
            let entry = store
                .get_mut(id)
                .ok_or_else(|| FeedbackError::NotFound(id.to_string()))?;
            if entry.applied {
                return Ok(Outcome::rejected("status", "applied feedback cannot be rejected"));
            }
            let now = Utc::now();
            entry.status = FeedbackStatus::Rejected;
            entry.verified = false;
            entry.verified_by = actor.user_id.clone();
            entry.rejection_reason = Some(reason.to_string());
            entry.updated_at = now;
            entry.clone()
        };
        info!(id = %entry.id, reason = %reason, "feedback rejected");
        self.persist(&entry).await;
        self.events.publish(DomainEvent::FeedbackVerified {
            id: entry.id.clone(),
            verified: false,
        });
        Ok(Outcome::Completed(entry))
    }

    // ─── Read paths ───

    /// One entry by id. Requires `view_feedback`.
    pub async fn get_feedback(
        &self,
        actor: &Actor,
        id: &str,
    ) -> VeritasResult<Outcome<Option<FeedbackEntry>>> {
        self.gate
            .run(
                actor,
                Permission::ViewFeedback,
                AuditAction::FeedbackViewed,
                json!({ "id": id }),
                move || async move { self.read_with(|store| store.get(id).cloned()) },
            )
            .await
    }

    /// Entries matching `filter`, oldest first. Requires `view_feedback`.
    pub async fn list_feedback(
        &self,
        actor: &Actor,
        filter: &FeedbackFilter,
    ) -> VeritasResult<Outcome<Vec<FeedbackEntry>>> {
        let details = json!({ "filter": filter });
        self.gate
            .run_described(
                actor,
                Permission::ViewFeedback,
                AuditAction::FeedbackViewed,
                details,
                move || async move { self.read_with(|store| store.list(filter)) },
                |entries: &Vec<FeedbackEntry>| json!({ "returned": entries.len() }),
            )
            .await
    }

    /// Aggregate counts. Requires `view_feedback`.
    pub async fn statistics(&self, actor: &Actor) -> VeritasResult<Outcome<FeedbackStatistics>> {
        self.gate
            .run(
                actor,
                Permission::ViewFeedback,
                AuditAction::FeedbackViewed,
                json!({ "statistics": true }),
                move || async move { self.read_with(FeedbackStore::statistics) },
            )
            .await
    }

    /// Foundation facts and other applied corrections on the same step that
    /// the entry's correction contradicts. Requires `view_feedback`.
    ///
    /// Facts are only consulted when the loop was built
    /// [`with_facts`](Self::with_facts). An unknown id is a caller error.
    pub async fn check_for_conflicts(
        &self,
        actor: &Actor,
        id: &str,
    ) -> VeritasResult<Outcome<ConflictReport>> {
        self.gate
            .run_described(
                actor,
                Permission::ViewFeedback,
                AuditAction::FeedbackViewed,
                json!({ "id": id, "conflicts": true }),
                move || async move { self.conflicts_inner(id) },
                |r: &ConflictReport| json!({ "conflicts": r.conflicts.len() }),
            )
            .await
    }

    fn conflicts_inner(&self, id: &str) -> VeritasResult<Outcome<ConflictReport>> {
        let (entry, applied) = {
            let store = self.lock()?;
            let entry = store
                .get(id)
                .cloned()
                .ok_or_else(|| FeedbackError::NotFound(id.to_string()))?;
            let applied = store.applied_for(&entry.step_id);
            (entry, applied)
        };

        let mut conflicts = Vec::new();
        if let Some(facts) = &self.facts {
            for fact in facts.all()? {
                let mut statements = vec![fact.description.as_str()];
                if let Value::String(value) = &fact.value {
                    statements.push(value.as_str());
                }
                let strongest = statements
                    .iter()
                    .filter_map(|s| contradiction(&entry.correction, s))
                    .reduce(f64::max);
                if let Some(relation_confidence) = strongest {
                    conflicts.push(CorrectionConflict::FoundationFact {
                        statement: fact.description.clone(),
                        fact_id: fact.id,
                        source: fact.source,
                        fact_confidence: fact.confidence,
                        relation_confidence,
                    });
                }
            }
        }
        for other in applied.into_iter().filter(|c| c.feedback_id != entry.id) {
            if let Some(relation_confidence) = contradiction(&entry.correction, &other.correction) {
                conflicts.push(CorrectionConflict::AppliedCorrection {
                    feedback_id: other.feedback_id,
                    correction: other.correction,
                    relation_confidence,
                });
            }
        }

        if !conflicts.is_empty() {
            warn!(
                id = %entry.id,
                step_id = %entry.step_id,
                conflicts = conflicts.len(),
                "correction conflicts with existing knowledge"
            );
        }
        Ok(Outcome::Completed(ConflictReport {
            feedback_id: entry.id,
            step_id: entry.step_id,
            conflicts,
        }))
    }

    /// Drop every entry and applied correction. Requires `purge_feedback`.
    /// The archive is left untouched.
    pub async fn purge(&self, actor: &Actor) -> VeritasResult<Outcome<usize>> {
        self.gate
            .run_described(
                actor,
                Permission::PurgeFeedback,
                AuditAction::FeedbackPurged,
                serde_json::Value::Null,
                move || async move { self.purge_inner(actor) },
                |removed: &usize| json!({ "removed": removed }),
            )
            .await
    }

    fn purge_inner(&self, actor: &Actor) -> VeritasResult<Outcome<usize>> {
        let removed = self.lock()?.purge();
        warn!(actor = %actor.audit_id(), removed, "feedback store purged");
        Ok(Outcome::Completed(removed))
    }

    fn read_with<R>(&self, read: impl FnOnce(&FeedbackStore) -> R) -> VeritasResult<Outcome<R>> {
        let store = self.lock()?;
        Ok(Outcome::Completed(read(&*store)))
    }

    // ─── Validation hook ───

    /// Log system feedback for a negative validation verdict.
    ///
    /// Foundation contradictions become `factual_error` entries and
    /// fallacies `logical_fallacy` entries. An open system entry for the
    /// same statement and category suppresses duplicates. Does nothing when
    /// `auto_log_validation_feedback` is off.
    pub fn record_validation_outcome(&self, event: &DomainEvent) {
        if !self.config.auto_log_validation_feedback {
            return;
        }
        let DomainEvent::StatementValidated {
            key,
            status,
            confidence,
            fact_id,
            fallacy_id,
        } = event
        else {
            return;
        };
        let (category, correction) = match status {
            ValidationStatus::ContradictsFoundation => (
                FeedbackCategory::FactualError,
                format!(
                    "\"{key}\" contradicts foundation fact {}",
                    fact_id.as_deref().unwrap_or("(unknown)")
                ),
            ),
            ValidationStatus::Fallacious => (
                FeedbackCategory::LogicalFallacy,
                format!(
                    "\"{key}\" relies on the {} fallacy",
                    fallacy_id.as_deref().unwrap_or("(unknown)")
                ),
            ),
            _ => return,
        };
        if !self.config.accepts(category) {
            return;
        }

        let now = Utc::now();
        let entry = FeedbackEntry {
            id: Uuid::new_v4().to_string(),
            step_id: key.clone(),
            correction,
            user_id: None,
            category,
            impact_level: category.default_impact(),
            confidence: if confidence.is_finite() {
                confidence.clamp(0.0, 1.0)
            } else {
                DEFAULT_FEEDBACK_CONFIDENCE
            },
            source_url: None,
            source_reliability: None,
            verified: false,
            applied: false,
            auto_applied: false,
            status: FeedbackStatus::PendingVerification,
            origin: FeedbackOrigin::System,
            verified_by: None,
            verification_note: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
            verified_at: None,
            applied_at: None,
        };

        let inserted = match self.lock() {
            Ok(mut store) => {
                let duplicate = FeedbackFilter {
                    step_id: Some(key.clone()),
                    category: Some(category),
                    origin: Some(FeedbackOrigin::System),
                    status: Some(FeedbackStatus::PendingVerification),
                    ..FeedbackFilter::default()
                };
                if store.list(&duplicate).is_empty() {
                    store.insert(entry.clone());
                    true
                } else {
                    false
                }
            }
            Err(e) => {
                warn!(
                    event = "degradation_triggered",
                    component = "feedback_store",
                    failure = %e,
                    fallback = "validation feedback dropped",
                    "could not record validation feedback"
                );
                false
            }
        };
        if !inserted {
            return;
        }

        debug!(id = %entry.id, key = %key, category = %category, "validation feedback logged");
        self.gate.audit(
            AuditAction::FeedbackSubmitted,
            &Actor::system(),
            AuditOutcome::Completed,
            json!({ "id": entry.id, "step_id": key, "category": category, "origin": "system" }),
        );
        self.spawn_persist(entry.clone());
        self.events.publish(DomainEvent::FeedbackSubmitted {
            id: entry.id,
            step_id: entry.step_id,
            category,
            auto_applied: false,
        });
    }

    // ─── Helpers ───

    fn announce_applied(&self, entry: &FeedbackEntry) {
        self.events.publish(DomainEvent::CorrectionApplied {
            id: entry.id.clone(),
            step_id: entry.step_id.clone(),
            category: entry.category,
        });
    }

    async fn persist(&self, entry: &FeedbackEntry) {
        let Some(archive) = &self.archive else {
            return;
        };
        if let Err(e) = archive.persist(entry).await {
            error!(
                event = "degradation_triggered",
                component = "feedback_archive",
                id = %entry.id,
                failure = %e,
                fallback = "in-memory store only",
                "feedback archive write failed"
            );
        }
    }

    /// Archive from a synchronous context. Skipped outside a tokio runtime.
    fn spawn_persist(&self, entry: FeedbackEntry) {
        let Some(archive) = self.archive.clone() else {
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!(id = %entry.id, "no runtime; validation feedback not archived");
            return;
        };
        handle.spawn(async move {
            if let Err(e) = archive.persist(&entry).await {
                error!(
                    event = "degradation_triggered",
                    component = "feedback_archive",
                    id = %entry.id,
                    failure = %e,
                    fallback = "in-memory store only",
                    "feedback archive write failed"
                );
            }
        });
    }

    fn lock(&self) -> Result<MutexGuard<'_, FeedbackStore>, FeedbackError> {
        self.store
            .lock()
            .map_err(|e| FeedbackError::LockPoisoned(e.to_string()))
    }
}

fn contradiction(correction: &str, other: &str) -> Option<f64> {
    match compare_text(correction, other) {
        (LogicalRelation::Contradictory, confidence) => Some(confidence),
        _ => None,
    }
}

impl IEventHandler for FeedbackLoop {
    fn on_event(&self, event: &DomainEvent) {
        self.record_validation_outcome(event);
    }
}
