//! ConfidenceScorer: gated entry point combining the four factors.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use veritas_core::config::ScoringConfig;
use veritas_core::constants::NEUTRAL_CONFIDENCE;
use veritas_core::errors::VeritasResult;
use veritas_core::models::{
    Actor, AuditAction, ConfidenceAssessment, ConfidenceFactors, FallacyDetection, Outcome,
    Permission,
};
use veritas_core::traits::ISourceValidator;
use veritas_core::AccessGate;
use veritas_validation::FallacyCatalogue;

use crate::calibration;
use crate::factors;
use crate::input::{ReasoningPath, ScoringContext};

const EVIDENCE_WEIGHT: f64 = 0.35;
const REASONING_WEIGHT: f64 = 0.35;
const SOURCE_WEIGHT: f64 = 0.2;

pub struct ConfidenceScorer {
    config: ScoringConfig,
    catalogue: Arc<FallacyCatalogue>,
    source_validator: Option<Arc<dyn ISourceValidator>>,
    gate: AccessGate,
}

impl ConfidenceScorer {
    pub fn new(config: ScoringConfig, catalogue: Arc<FallacyCatalogue>, gate: AccessGate) -> Self {
        Self {
            config,
            catalogue,
            source_validator: None,
            gate,
        }
    }

    /// Consult `validator` for sources that carry a URL but no explicit
    /// reliability.
    pub fn with_source_validator(mut self, validator: Arc<dyn ISourceValidator>) -> Self {
        self.source_validator = Some(validator);
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score `conclusion` given the reasoning behind it. Requires
    /// `score_confidence`.
    pub async fn score_confidence(
        &self,
        actor: &Actor,
        conclusion: &str,
        path: &ReasoningPath,
        context: &ScoringContext,
    ) -> VeritasResult<Outcome<ConfidenceAssessment>> {
        let details = json!({
            "domain": context.domain,
            "evidence": path.evidence.len(),
            "steps": path.steps.len(),
            "sources": path.sources.len(),
        });
        self.gate
            .run_described(
                actor,
                Permission::ScoreConfidence,
                AuditAction::ConfidenceScored,
                details,
                || async move {
                    if conclusion.trim().is_empty() {
                        return Ok(Outcome::rejected("conclusion", "must not be empty"));
                    }
                    let threshold = context
                        .threshold
                        .unwrap_or(self.config.minimum_confidence_threshold);
                    if !(0.0..=1.0).contains(&threshold) {
                        return Ok(Outcome::rejected("threshold", "must be between 0.0 and 1.0"));
                    }
                    Ok(Outcome::Completed(
                        self.assess(conclusion, path, context, threshold).await,
                    ))
                },
                |a: &ConfidenceAssessment| {
                    json!({
                        "calibrated_confidence": a.calibrated_confidence,
                        "meets_threshold": a.meets_threshold,
                    })
                },
            )
            .await
    }

    async fn assess(
        &self,
        conclusion: &str,
        path: &ReasoningPath,
        context: &ScoringContext,
        threshold: f64,
    ) -> ConfidenceAssessment {
        let mut explanation = Vec::new();
        for field in path.non_finite_inputs() {
            explanation.push(format!("{field} was not a finite number; treated as neutral"));
        }

        let evidence_strength = factors::evidence::calculate(&path.evidence);
        let reasoning_quality = factors::reasoning::calculate(&path.steps);
        let source_reliability = factors::source::calculate(
            &path.sources,
            self.config.minimum_source_credibility,
            self.source_validator.as_deref(),
            &mut explanation,
        )
        .await;

        let detected_fallacies = self.detect(conclusion, path);
        let fallacy_penalty = factors::penalty::calculate(
            &detected_fallacies,
            &self.catalogue,
            self.config.max_fallacy_penalty,
        );

        let factors = ConfidenceFactors {
            evidence_strength,
            reasoning_quality,
            source_reliability,
            fallacy_penalty,
        };
        explanation.push(format!(
            "evidence strength {evidence_strength:.2} from {} item(s)",
            path.evidence.len()
        ));
        explanation.push(format!(
            "reasoning quality {reasoning_quality:.2} over {} step(s)",
            path.steps.len()
        ));
        explanation.push(format!(
            "source reliability {source_reliability:.2} from {} source(s)",
            path.sources.len()
        ));
        if !detected_fallacies.is_empty() {
            let ids: Vec<&str> = detected_fallacies.iter().map(|d| d.fallacy_id.as_str()).collect();
            explanation.push(format!(
                "fallacy penalty {fallacy_penalty:.2} for {}",
                ids.join(", ")
            ));
        }

        let mut raw = (EVIDENCE_WEIGHT * evidence_strength
            + REASONING_WEIGHT * reasoning_quality
            + SOURCE_WEIGHT * source_reliability)
            * (1.0 - fallacy_penalty);
        if !raw.is_finite() {
            warn!(
                event = "degradation_triggered",
                component = "confidence_scorer",
                fallback = "neutral confidence",
                "raw confidence was not finite"
            );
            explanation.push("raw confidence was not finite; used neutral 0.50".to_string());
            raw = NEUTRAL_CONFIDENCE;
        }
        let raw_confidence = raw.clamp(0.0, 1.0);

        let calibrated_confidence = calibration::calibrate(
            raw_confidence,
            self.config.calibration_steepness,
            self.config.calibration_midpoint,
            context.domain,
        );
        if context.domain.adjustment() != 0.0 {
            explanation.push(format!(
                "{} domain adjustment {:+.2}",
                context.domain,
                context.domain.adjustment()
            ));
        }
        let uncertainty_range = calibration::uncertainty_range(calibrated_confidence, &factors);
        let meets_threshold = calibrated_confidence >= threshold;
        explanation.push(format!(
            "calibrated {calibrated_confidence:.2} {} threshold {threshold:.2}",
            if meets_threshold { "meets" } else { "is below" }
        ));

        info!(
            raw_confidence,
            calibrated_confidence,
            domain = %context.domain,
            meets_threshold,
            fallacies = detected_fallacies.len(),
            "confidence scored"
        );

        ConfidenceAssessment {
            conclusion: conclusion.to_string(),
            raw_confidence,
            calibrated_confidence,
            uncertainty_range,
            factors,
            detected_fallacies,
            domain: context.domain,
            threshold,
            meets_threshold,
            explanation,
        }
    }

    fn detect(&self, conclusion: &str, path: &ReasoningPath) -> Vec<FallacyDetection> {
        let mut found = self.catalogue.detect(conclusion);
        for step in &path.steps {
            found.extend(self.catalogue.detect(&step.description));
        }
        found
    }
}
