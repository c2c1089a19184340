//! ValidityChecker: statement, consistency and inference verdicts.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use veritas_core::config::ValidationConfig;
use veritas_core::errors::VeritasResult;
use veritas_core::events::{DomainEvent, Topic};
use veritas_core::models::{
    Actor, AuditAction, FallacyDetection, InferenceResult, LogicalRelation, Outcome, Permission,
    Resolution, Statement, ValidationDetails, ValidationResult, ValidationStatus,
};
use veritas_core::text::canonical_value;
use veritas_core::traits::IEventBus;
use veritas_core::AccessGate;
use veritas_facts::{FactComparison, FoundationFactsStore};

use crate::cache::{cache_key, CacheStats, Lookup, ValidationCache};
use crate::conflict::ConflictResolver;
use crate::consistency::{self, compare_statements};
use crate::fallacy::FallacyCatalogue;
use crate::inference;

const INCONSISTENCY_CONFIDENCE: f64 = 0.9;

/// Per-call overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOptions {
    /// Consult and fill the verdict cache.
    pub use_cache: bool,
    /// Overrides `ValidationConfig::strict_foundation_enforcement`.
    pub strict_foundation_enforcement: Option<bool>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            strict_foundation_enforcement: None,
        }
    }
}

impl ValidationOptions {
    pub fn strict() -> Self {
        Self {
            strict_foundation_enforcement: Some(true),
            ..Self::default()
        }
    }

    pub fn uncached() -> Self {
        Self {
            use_cache: false,
            ..Self::default()
        }
    }
}

/// Decides whether statements, statement sets and inferences hold up
/// against the foundation facts, the fallacy catalogue and basic logic.
pub struct ValidityChecker {
    config: ValidationConfig,
    facts: Arc<FoundationFactsStore>,
    catalogue: Arc<FallacyCatalogue>,
    resolver: Arc<ConflictResolver>,
    cache: Arc<ValidationCache>,
    gate: AccessGate,
    events: Arc<dyn IEventBus>,
}

impl ValidityChecker {
    /// Build a checker and subscribe its cache and resolver to fact changes.
    pub fn new(
        config: ValidationConfig,
        facts: Arc<FoundationFactsStore>,
        catalogue: Arc<FallacyCatalogue>,
        resolver: Arc<ConflictResolver>,
        gate: AccessGate,
        events: Arc<dyn IEventBus>,
    ) -> Self {
        let cache = Arc::new(ValidationCache::from_config(&config));
        events.subscribe(Topic::FoundationFactChanged, cache.clone());
        events.subscribe(Topic::ConflictResolved, cache.clone());
        events.subscribe(Topic::FoundationFactChanged, resolver.clone());
        Self {
            config,
            facts,
            catalogue,
            resolver,
            cache,
            gate,
            events,
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn resolver(&self) -> &ConflictResolver {
        &self.resolver
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Validate one statement. Requires `validate_statements`.
    pub async fn validate_statement(
        &self,
        actor: &Actor,
        statement: Statement,
        options: &ValidationOptions,
    ) -> VeritasResult<Outcome<ValidationResult>> {
        let details = json!({ "key": statement.key });
        self.gate
            .run_described(
                actor,
                Permission::ValidateStatements,
                AuditAction::StatementValidated,
                details,
                move || async move {
                    if statement.key.trim().is_empty() {
                        return Ok(Outcome::rejected("key", "must not be empty"));
                    }
                    Ok(Outcome::Completed(self.evaluate(&statement, options)))
                },
                describe_verdict,
            )
            .await
    }

    /// Validate a set of statements individually and then pairwise.
    /// Requires `validate_statements`.
    pub async fn validate_consistency(
        &self,
        actor: &Actor,
        statements: Vec<Statement>,
        options: &ValidationOptions,
    ) -> VeritasResult<Outcome<ValidationResult>> {
        let keys: Vec<&str> = statements.iter().map(|s| s.key.as_str()).collect();
        let details = json!({ "keys": keys });
        self.gate
            .run_described(
                actor,
                Permission::ValidateStatements,
                AuditAction::ConsistencyValidated,
                details,
                move || async move {
                    if statements.is_empty() {
                        return Ok(Outcome::rejected("statements", "must not be empty"));
                    }
                    Ok(Outcome::Completed(self.evaluate_set(&statements, options)))
                },
                describe_verdict,
            )
            .await
    }

    /// Check that `conclusion` follows from `premises`. Requires
    /// `validate_statements`.
    pub async fn validate_inference(
        &self,
        actor: &Actor,
        premises: Vec<Statement>,
        conclusion: Statement,
        options: &ValidationOptions,
    ) -> VeritasResult<Outcome<InferenceResult>> {
        let details = json!({
            "premises": premises.iter().map(|p| p.key.as_str()).collect::<Vec<_>>(),
            "conclusion": conclusion.key,
        });
        self.gate
            .run_described(
                actor,
                Permission::ValidateStatements,
                AuditAction::InferenceValidated,
                details,
                move || async move {
                    if premises.is_empty() {
                        return Ok(Outcome::rejected("premises", "must not be empty"));
                    }
                    Ok(Outcome::Completed(self.infer(&premises, &conclusion, options)))
                },
                |r: &InferenceResult| json!({ "valid": r.valid, "rule": r.rule, "reason": r.reason }),
            )
            .await
    }

    /// Pairwise relation between two statements.
    pub fn compare_statements(&self, a: &Statement, b: &Statement) -> (LogicalRelation, f64) {
        compare_statements(a, b)
    }

    /// Fallacies found in `text`, most confident first.
    pub fn detect_fallacies(&self, text: &str) -> Vec<FallacyDetection> {
        self.catalogue.detect(text)
    }

    fn evaluate(&self, statement: &Statement, options: &ValidationOptions) -> ValidationResult {
        let strict = options
            .strict_foundation_enforcement
            .unwrap_or(self.config.strict_foundation_enforcement);
        let key = cache_key(statement, strict);

        let ticket = if options.use_cache && self.cache.is_enabled() {
            match self.cache.lookup(&key, self.facts.revision()) {
                Lookup::Hit(verdict) => {
                    debug!(key = %statement.key, status = %verdict.status, "verdict cache hit");
                    self.announce(&verdict);
                    return verdict;
                }
                Lookup::Miss(ticket) => Some(ticket),
            }
        } else {
            None
        };

        let (verdict, cacheable) = self.compute(statement, strict);
        if let (Some(ticket), true) = (ticket, cacheable) {
            self.cache
                .store(key, verdict.clone(), ticket, self.facts.revision());
        }
        self.announce(&verdict);
        verdict
    }

    /// The verdict, and whether it depends only on the statement's key and
    /// value (and so may be cached).
    fn compute(&self, statement: &Statement, strict: bool) -> (ValidationResult, bool) {
        let key = statement.key.as_str();

        if let Some(text) = statement.text() {
            let detections = self.catalogue.detect(text);
            if let Some(top) = detections.first() {
                if top.confidence >= self.config.fallacy_confidence_threshold {
                    warn!(
                        event = "fallacy_detected",
                        key = %key,
                        fallacy_id = %top.fallacy_id,
                        confidence = top.confidence,
                        "statement is fallacious"
                    );
                    let confidence = top.confidence;
                    return (
                        ValidationResult::new(
                            key,
                            ValidationStatus::Fallacious,
                            confidence,
                            ValidationDetails::Fallacy { detections },
                        ),
                        true,
                    );
                }
            }
        }

        let agreeing = match self.facts.compare(key, &statement.value) {
            Err(e) => {
                warn!(
                    event = "degradation_triggered",
                    component = "foundation_facts",
                    failure = %e,
                    fallback = "uncertain verdict",
                    "foundation check failed"
                );
                return (
                    ValidationResult::new(
                        key,
                        ValidationStatus::Uncertain,
                        veritas_core::constants::NEUTRAL_CONFIDENCE,
                        ValidationDetails::Degraded {
                            component: "foundation_facts".to_string(),
                            reason: e.to_string(),
                        },
                    ),
                    false,
                );
            }
            Ok(FactComparison::Contradicts(info)) => {
                warn!(
                    event = "foundation_contradiction",
                    key = %key,
                    expected = %info.expected,
                    proposed = %info.proposed,
                    strict,
                    "statement contradicts foundation fact"
                );
                if strict {
                    let confidence = info.fact.confidence;
                    return (
                        ValidationResult::new(
                            key,
                            ValidationStatus::ContradictsFoundation,
                            confidence,
                            ValidationDetails::FoundationContradiction {
                                fact: info.fact,
                                proposed: statement.value.clone(),
                                resolution: None,
                            },
                        ),
                        true,
                    );
                }
                // Resolution reads confidence and observation time, which the
                // cache key does not cover.
                let resolution = self.resolver.resolve(&info.fact, statement);
                let accepted = resolution.resolution == Resolution::AcceptProposed
                    && canonical_value(&resolution.resolved_value)
                        == canonical_value(&statement.value);
                let confidence = resolution.confidence;
                let verdict = if accepted {
                    ValidationResult::new(
                        key,
                        ValidationStatus::Valid,
                        confidence,
                        ValidationDetails::ResolvedConflict {
                            fact_id: info.fact.id,
                            resolution,
                        },
                    )
                } else {
                    ValidationResult::new(
                        key,
                        ValidationStatus::ContradictsFoundation,
                        confidence,
                        ValidationDetails::FoundationContradiction {
                            fact: info.fact,
                            proposed: statement.value.clone(),
                            resolution: Some(resolution),
                        },
                    )
                };
                return (verdict, false);
            }
            Ok(FactComparison::Agrees(fact)) => Some(fact.id),
            Ok(FactComparison::Unknown) => None,
        };

        if let Some(text) = statement.text() {
            if let Some(reason) = consistency::self_contradiction(text) {
                return (
                    ValidationResult::new(
                        key,
                        ValidationStatus::LogicallyInconsistent,
                        INCONSISTENCY_CONFIDENCE,
                        ValidationDetails::Inconsistency {
                            reason,
                            keys: vec![key.to_string()],
                            relation_confidence: None,
                        },
                    ),
                    true,
                );
            }
            if consistency::is_tautology(text) {
                return (
                    ValidationResult::new(
                        key,
                        ValidationStatus::Valid,
                        1.0,
                        ValidationDetails::Consistent {
                            fact_id: agreeing,
                            note: Some("tautology".to_string()),
                        },
                    ),
                    true,
                );
            }
        }

        (
            ValidationResult::new(
                key,
                ValidationStatus::Valid,
                1.0,
                ValidationDetails::Consistent {
                    fact_id: agreeing,
                    note: None,
                },
            ),
            true,
        )
    }

    fn evaluate_set(&self, statements: &[Statement], options: &ValidationOptions) -> ValidationResult {
        let mut confidence: f64 = 1.0;
        for statement in statements {
            let verdict = self.evaluate(statement, options);
            if !verdict.is_valid() {
                return verdict;
            }
            confidence = confidence.min(verdict.confidence);
        }
        if let Some(inconsistent) = self.contradictory_pair(statements) {
            return inconsistent;
        }
        let key = statements
            .iter()
            .map(|s| s.key.as_str())
            .collect::<Vec<_>>()
            .join(",");
        ValidationResult::new(
            key,
            ValidationStatus::Valid,
            confidence,
            ValidationDetails::Consistent {
                fact_id: None,
                note: Some(format!("{} statements mutually consistent", statements.len())),
            },
        )
    }

    /// First pair whose contradiction exceeds `max_contradiction_level`.
    fn contradictory_pair(&self, statements: &[Statement]) -> Option<ValidationResult> {
        for (i, a) in statements.iter().enumerate() {
            for b in &statements[i + 1..] {
                let (relation, confidence) = compare_statements(a, b);
                if relation == LogicalRelation::Contradictory
                    && confidence > self.config.max_contradiction_level
                {
                    warn!(
                        event = "inconsistent_statements",
                        first = %a.key,
                        second = %b.key,
                        confidence,
                        "contradictory statement pair"
                    );
                    return Some(ValidationResult::new(
                        format!("{},{}", a.key, b.key),
                        ValidationStatus::LogicallyInconsistent,
                        confidence,
                        ValidationDetails::Inconsistency {
                            reason: "contradictory_pair".to_string(),
                            keys: vec![a.key.clone(), b.key.clone()],
                            relation_confidence: Some(confidence),
                        },
                    ));
                }
            }
        }
        let keys = inference::conflicting_premises(statements)?;
        if 1.0 <= self.config.max_contradiction_level {
            return None;
        }
        warn!(
            event = "inconsistent_statements",
            keys = %keys.join(","),
            "statements entail a literal and its negation"
        );
        Some(ValidationResult::new(
            keys.join(","),
            ValidationStatus::LogicallyInconsistent,
            1.0,
            ValidationDetails::Inconsistency {
                reason: "conflicting_implication".to_string(),
                keys,
                relation_confidence: Some(1.0),
            },
        ))
    }

    fn infer(
        &self,
        premises: &[Statement],
        conclusion: &Statement,
        options: &ValidationOptions,
    ) -> InferenceResult {
        let mut confidence: f64 = 1.0;
        for premise in premises {
            let verdict = self.evaluate(premise, options);
            if !verdict.is_valid() {
                return InferenceResult::invalid("invalid_premise", Some(verdict));
            }
            confidence = confidence.min(verdict.confidence);
        }
        if let Some(inconsistent) = self.contradictory_pair(premises) {
            return InferenceResult::invalid("inconsistent_premises", Some(inconsistent));
        }

        match self.facts.compare(&conclusion.key, &conclusion.value) {
            Ok(FactComparison::Contradicts(info)) => {
                let verdict = ValidationResult::new(
                    conclusion.key.clone(),
                    ValidationStatus::ContradictsFoundation,
                    info.fact.confidence,
                    ValidationDetails::FoundationContradiction {
                        fact: info.fact,
                        proposed: conclusion.value.clone(),
                        resolution: None,
                    },
                );
                return InferenceResult::invalid("conclusion_contradicts_foundation", Some(verdict));
            }
            Ok(_) => {}
            Err(e) => warn!(
                event = "degradation_triggered",
                component = "foundation_facts",
                failure = %e,
                fallback = "conclusion not checked against foundation",
                "foundation check failed"
            ),
        }

        match inference::derive(premises, conclusion) {
            Some(rule) => {
                debug!(conclusion = %conclusion.key, ?rule, confidence, "inference licensed");
                InferenceResult::valid(rule, confidence)
            }
            None => InferenceResult::invalid("non_sequitur", None),
        }
    }

    fn announce(&self, verdict: &ValidationResult) {
        self.events.publish(DomainEvent::StatementValidated {
            key: verdict.key.clone(),
            status: verdict.status,
            confidence: verdict.confidence,
            fact_id: verdict.fact_id().map(str::to_string),
            fallacy_id: verdict.fallacy_id().map(str::to_string),
        });
    }
}

fn describe_verdict(verdict: &ValidationResult) -> serde_json::Value {
    json!({ "status": verdict.status, "confidence": verdict.confidence })
}
