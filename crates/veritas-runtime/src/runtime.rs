//! VeritasRuntime: owns all engines and the wiring between them.

use std::sync::Arc;

use tracing::info;

use veritas_core::constants::VERITAS_VERSION;
use veritas_core::errors::VeritasResult;
use veritas_core::events::{EventDispatcher, Topic};
use veritas_core::models::{
    Actor, ConfidenceAssessment, InferenceResult, Outcome, Statement, ValidationResult,
};
use veritas_core::traits::{IAuditSink, IEventBus, IPermissionChecker};
use veritas_core::{AccessGate, VeritasConfig};
use veritas_facts::FoundationFactsStore;
use veritas_feedback::{
    ApplyReceipt, ConflictReport, FeedbackLoop, FeedbackReceipt, FeedbackSubmission,
    JsonDirArchive, VerificationReceipt, VerificationRequest,
};
use veritas_observability::{
    tracing_setup, CompositeAuditSink, EventLogger, MemoryAuditLog, TracingAuditSink,
};
use veritas_scoring::{ConfidenceScorer, ReasoningPath, ScoringContext};
use veritas_validation::{ConflictResolver, FallacyCatalogue, ValidationOptions, ValidityChecker};

use crate::options::RuntimeOptions;

/// The central runtime owning all Veritas engines.
///
/// Every engine shares one gate (and so one permission checker and audit
/// trail) and one event dispatcher.
pub struct VeritasRuntime {
    pub facts: Arc<FoundationFactsStore>,
    pub catalogue: Arc<FallacyCatalogue>,
    pub resolver: Arc<ConflictResolver>,
    pub checker: ValidityChecker,
    pub scorer: ConfidenceScorer,
    pub feedback: Arc<FeedbackLoop>,
    pub config: VeritasConfig,
    events: Arc<EventDispatcher>,
    audit_log: Arc<MemoryAuditLog>,
    archive: Option<JsonDirArchive>,
}

impl VeritasRuntime {
    /// Build and wire the engines. Does not read the feedback archive; use
    /// [`VeritasRuntime::open`] to restore archived feedback.
    pub fn new(permissions: Arc<dyn IPermissionChecker>, opts: RuntimeOptions) -> VeritasResult<Self> {
        let config = match (opts.config, opts.config_toml.as_deref()) {
            (Some(config), _) => {
                config.validate()?;
                config
            }
            (None, Some(toml_str)) => VeritasConfig::from_toml(toml_str)?,
            (None, None) => VeritasConfig::default(),
        };

        if opts.init_tracing {
            tracing_setup::init_from_config(&config.observability);
        }

        // Audit: bounded in-memory log, tracing, then the host's sink.
        let audit_log = Arc::new(MemoryAuditLog::new(config.observability.audit_capacity));
        let mut sinks: Vec<Arc<dyn IAuditSink>> =
            vec![audit_log.clone(), Arc::new(TracingAuditSink)];
        sinks.extend(opts.audit);
        let gate = AccessGate::new(permissions, Arc::new(CompositeAuditSink::new(sinks)));

        let events = Arc::new(EventDispatcher::new());
        let bus: Arc<dyn IEventBus> = events.clone();

        // Facts
        let facts = Arc::new(match opts.facts {
            Some(seed) => FoundationFactsStore::with_facts(gate.clone(), bus.clone(), seed),
            None => FoundationFactsStore::with_default_facts(gate.clone(), bus.clone()),
        });

        // Validation
        let catalogue = Arc::new(FallacyCatalogue::builtin()?);
        let resolver = Arc::new(ConflictResolver::new(gate.clone(), bus.clone()));
        let checker = ValidityChecker::new(
            config.validation.clone(),
            facts.clone(),
            catalogue.clone(),
            resolver.clone(),
            gate.clone(),
            bus.clone(),
        );

        // Scoring
        let mut scorer = ConfidenceScorer::new(config.scoring.clone(), catalogue.clone(), gate.clone());
        if let Some(validator) = &opts.source_validator {
            scorer = scorer.with_source_validator(validator.clone());
        }

        // Feedback
        let archive = opts.archive_dir.map(JsonDirArchive::new);
        let mut feedback =
            FeedbackLoop::new(config.feedback.clone(), gate, bus.clone()).with_facts(facts.clone());
        if let Some(validator) = opts.source_validator {
            feedback = feedback.with_source_validator(validator);
        }
        if let Some(archive) = &archive {
            feedback = feedback.with_archive(Arc::new(archive.clone()));
        }
        let feedback = Arc::new(feedback);
        bus.subscribe(Topic::StatementValidated, feedback.clone());

        EventLogger::attach(bus.as_ref());

        info!(
            version = VERITAS_VERSION,
            facts = facts.len()?,
            fallacies = catalogue.len(),
            archive = archive.is_some(),
            "veritas runtime initialized"
        );

        Ok(Self {
            facts,
            catalogue,
            resolver,
            checker,
            scorer,
            feedback,
            config,
            events,
            audit_log,
            archive,
        })
    }

    /// Build the runtime and restore any archived feedback.
    pub async fn open(
        permissions: Arc<dyn IPermissionChecker>,
        opts: RuntimeOptions,
    ) -> VeritasResult<Self> {
        let runtime = Self::new(permissions, opts)?;
        if let Some(archive) = &runtime.archive {
            let restored = runtime.feedback.restore(archive.load_all().await?)?;
            info!(restored, dir = %archive.dir().display(), "feedback archive restored");
        }
        Ok(runtime)
    }

    /// Audit entries recorded by this runtime.
    pub fn audit_log(&self) -> &MemoryAuditLog {
        &self.audit_log
    }

    pub fn events(&self) -> Arc<dyn IEventBus> {
        self.events.clone()
    }

    pub fn published_events(&self) -> u64 {
        self.events.published_count()
    }

    pub async fn validate_statement(
        &self,
        actor: &Actor,
        statement: Statement,
    ) -> VeritasResult<Outcome<ValidationResult>> {
        self.checker
            .validate_statement(actor, statement, &ValidationOptions::default())
            .await
    }

    pub async fn validate_consistency(
        &self,
        actor: &Actor,
        statements: Vec<Statement>,
    ) -> VeritasResult<Outcome<ValidationResult>> {
        self.checker
            .validate_consistency(actor, statements, &ValidationOptions::default())
            .await
    }

    pub async fn validate_inference(
        &self,
        actor: &Actor,
        premises: Vec<Statement>,
        conclusion: Statement,
    ) -> VeritasResult<Outcome<InferenceResult>> {
        self.checker
            .validate_inference(actor, premises, conclusion, &ValidationOptions::default())
            .await
    }

    pub async fn score_confidence(
        &self,
        actor: &Actor,
        conclusion: &str,
        path: &ReasoningPath,
        context: &ScoringContext,
    ) -> VeritasResult<Outcome<ConfidenceAssessment>> {
        self.scorer.score_confidence(actor, conclusion, path, context).await
    }

    pub async fn handle_feedback(
        &self,
        actor: &Actor,
        submission: FeedbackSubmission,
    ) -> VeritasResult<Outcome<FeedbackReceipt>> {
        self.feedback.handle_feedback(actor, submission).await
    }

    pub async fn apply_feedback(&self, actor: &Actor, id: &str) -> VeritasResult<Outcome<ApplyReceipt>> {
        self.feedback.apply_feedback(actor, id).await
    }

    pub async fn verify_feedback(
        &self,
        actor: &Actor,
        request: VerificationRequest,
    ) -> VeritasResult<Outcome<VerificationReceipt>> {
        self.feedback.verify_feedback(actor, request).await
    }

    pub async fn check_for_conflicts(&self, actor: &Actor, id: &str) -> VeritasResult<Outcome<ConflictReport>> {
        self.feedback.check_for_conflicts(actor, id).await
    }
}
