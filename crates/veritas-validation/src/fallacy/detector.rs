//! Compiled fallacy catalogue and detection.

use std::cmp::Ordering;
use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use veritas_core::errors::{ValidationError, VeritasResult};
use veritas_core::models::{FallacyDefinition, FallacyDetection};
use veritas_core::text::normalize_sentence;

use super::catalogue::builtin_definitions;
use super::structural;

const STRUCTURAL_CONFIDENCE: f64 = 0.87;
const NON_SEQUITUR_CONFIDENCE: f64 = 0.6;

struct CompiledFallacy {
    definition: FallacyDefinition,
    patterns: Vec<Regex>,
}

impl CompiledFallacy {
    fn compile(definition: FallacyDefinition) -> VeritasResult<Self> {
        if definition.id.trim().is_empty() {
            return Err(ValidationError::InvalidDefinition {
                fallacy_id: definition.id,
                message: "id must not be empty".to_string(),
            }
            .into());
        }
        if !(0.0..=1.0).contains(&definition.severity) {
            return Err(ValidationError::InvalidDefinition {
                fallacy_id: definition.id,
                message: format!("severity {} outside [0, 1]", definition.severity),
            }
            .into());
        }
        let patterns = definition
            .patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| ValidationError::InvalidPattern {
                        fallacy_id: definition.id.clone(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            definition,
            patterns,
        })
    }

    /// Pattern matches in already-normalized text.
    fn scan(&self, normalized: &str) -> Vec<FallacyDetection> {
        let mut spans: Vec<&str> = Vec::new();
        let mut matched_patterns = 0usize;
        for pattern in &self.patterns {
            let before = spans.len();
            spans.extend(pattern.find_iter(normalized).map(|m| m.as_str()));
            if spans.len() > before {
                matched_patterns += 1;
            }
        }
        if spans.is_empty() {
            return Vec::new();
        }
        if !self.definition.can_repeat {
            spans.truncate(1);
        }
        let mut seen = HashSet::new();
        spans
            .into_iter()
            .filter(|span| seen.insert(*span))
            .map(|span| self.detection(span, match_confidence(self.definition.severity, matched_patterns, span.len())))
            .collect()
    }

    fn detection(&self, evidence: &str, confidence: f64) -> FallacyDetection {
        let d = &self.definition;
        FallacyDetection {
            fallacy_id: d.id.clone(),
            name: d.name.clone(),
            category: d.category,
            severity: d.severity,
            confidence,
            evidence: evidence.to_string(),
            explanation: d.explanation.clone(),
            remediation: d.remediation.clone(),
        }
    }
}

/// Severity-weighted confidence, with a bonus for corroborating patterns
/// and for longer evidence.
fn match_confidence(severity: f64, matched_patterns: usize, evidence_len: usize) -> f64 {
    let corroboration = (matched_patterns.saturating_sub(1) as f64 * 0.1).min(0.2);
    let length = (evidence_len as f64 / 200.0).min(0.1);
    (0.5 + 0.3 * severity + corroboration + length).min(0.99)
}

/// Fallacy definitions with their patterns compiled.
///
/// Immutable once built; share it behind an `Arc`.
pub struct FallacyCatalogue {
    entries: Vec<CompiledFallacy>,
}

impl FallacyCatalogue {
    /// Compile `definitions`. Fails on duplicate ids, bad patterns, or
    /// out-of-range severities.
    pub fn new(definitions: Vec<FallacyDefinition>) -> VeritasResult<Self> {
        let mut catalogue = Self {
            entries: Vec::with_capacity(definitions.len()),
        };
        for definition in definitions {
            catalogue.push(definition)?;
        }
        Ok(catalogue)
    }

    /// The built-in catalogue.
    pub fn builtin() -> VeritasResult<Self> {
        Self::new(builtin_definitions())
    }

    /// Extend the catalogue with one more definition.
    pub fn with_definition(mut self, definition: FallacyDefinition) -> VeritasResult<Self> {
        self.push(definition)?;
        Ok(self)
    }

    fn push(&mut self, definition: FallacyDefinition) -> VeritasResult<()> {
        if self.get(&definition.id).is_some() {
            return Err(ValidationError::DuplicateFallacy(definition.id).into());
        }
        self.entries.push(CompiledFallacy::compile(definition)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &FallacyDefinition> {
        self.entries.iter().map(|e| &e.definition)
    }

    pub fn get(&self, id: &str) -> Option<&FallacyDefinition> {
        self.entry(id).map(|e| &e.definition)
    }

    fn entry(&self, id: &str) -> Option<&CompiledFallacy> {
        self.entries.iter().find(|e| e.definition.id == id)
    }

    /// Detect fallacies in `text`, most confident first.
    pub fn detect(&self, text: &str) -> Vec<FallacyDetection> {
        let normalized = normalize_sentence(text);
        let mut found: Vec<FallacyDetection> = Vec::new();
        if !normalized.is_empty() {
            for entry in &self.entries {
                found.extend(entry.scan(&normalized));
            }
        }
        for (id, evidence) in structural::conditional_fallacies(text) {
            if let Some(entry) = self.entry(id) {
                found.push(entry.detection(&evidence, STRUCTURAL_CONFIDENCE));
            }
        }
        sort_by_confidence(&mut found);
        found
    }

    /// Detect fallacies in a premises-to-conclusion chain, including
    /// conclusions that do not follow at all.
    pub fn analyze_reasoning_chain(
        &self,
        premises: &[String],
        conclusion: &str,
    ) -> Vec<FallacyDetection> {
        let mut argument = premises.join(". ");
        if !conclusion.trim().is_empty() {
            argument.push_str(". Therefore ");
            argument.push_str(conclusion);
        }
        let mut found = self.detect(&argument);
        if structural::is_non_sequitur(premises, conclusion) {
            if let Some(entry) = self.entry(structural::NON_SEQUITUR) {
                found.push(entry.detection(conclusion, NON_SEQUITUR_CONFIDENCE));
                sort_by_confidence(&mut found);
            }
        }
        found
    }
}

fn sort_by_confidence(found: &mut [FallacyDetection]) {
    found.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.fallacy_id.cmp(&b.fallacy_id))
    });
}
