//! What a caller hands the scorer: evidence, reasoning steps, sources.

use serde::{Deserialize, Serialize};

use veritas_core::constants::NEUTRAL_CONFIDENCE;
use veritas_core::models::Domain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    Empirical,
    Logical,
    Expert,
    Anecdotal,
    Opinion,
    #[default]
    Other,
}

impl EvidenceKind {
    /// Intrinsic quality of this kind of evidence.
    pub fn quality(self) -> f64 {
        match self {
            Self::Empirical => 0.9,
            Self::Logical => 0.8,
            Self::Expert => 0.7,
            Self::Anecdotal => 0.4,
            Self::Opinion => 0.3,
            Self::Other => 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Evidence {
    pub kind: EvidenceKind,
    pub description: String,
    pub relevance: Option<f64>,
    pub consistency: Option<f64>,
}

impl Evidence {
    pub fn new(kind: EvidenceKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            relevance: None,
            consistency: None,
        }
    }

    pub fn with_relevance(mut self, relevance: f64) -> Self {
        self.relevance = Some(relevance);
        self
    }

    pub fn with_consistency(mut self, consistency: f64) -> Self {
        self.consistency = Some(consistency);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReasoningStep {
    pub description: String,
    pub validity: Option<f64>,
    pub completeness: Option<f64>,
    pub clarity: Option<f64>,
    pub complexity: Option<f64>,
}

impl ReasoningStep {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set validity, completeness and clarity to the same score.
    pub fn rated(mut self, score: f64) -> Self {
        self.validity = Some(score);
        self.completeness = Some(score);
        self.clarity = Some(score);
        self
    }

    pub fn with_complexity(mut self, complexity: f64) -> Self {
        self.complexity = Some(complexity);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    PeerReviewed,
    Academic,
    Government,
    Encyclopedia,
    News,
    ExpertBlog,
    Blog,
    SocialMedia,
    #[default]
    Unknown,
}

impl SourceKind {
    /// Baseline reliability of this kind of source.
    pub fn reliability(self) -> f64 {
        match self {
            Self::PeerReviewed => 0.9,
            Self::Academic => 0.85,
            Self::Government => 0.8,
            Self::Encyclopedia => 0.75,
            Self::News => 0.6,
            Self::ExpertBlog => 0.5,
            Self::Blog => 0.4,
            Self::SocialMedia => 0.3,
            Self::Unknown => 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Source {
    pub kind: SourceKind,
    pub url: Option<String>,
    /// Explicit reliability; overrides both the kind and the source oracle.
    pub reliability: Option<f64>,
}

impl Source {
    pub fn of_kind(kind: SourceKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn url(kind: SourceKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: Some(url.into()),
            reliability: None,
        }
    }

    pub fn with_reliability(mut self, reliability: f64) -> Self {
        self.reliability = Some(reliability);
        self
    }
}

/// Everything offered in support of a conclusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReasoningPath {
    pub evidence: Vec<Evidence>,
    pub steps: Vec<ReasoningStep>,
    pub sources: Vec<Source>,
}

impl ReasoningPath {
    /// Names of numeric inputs that are present but not finite.
    pub fn non_finite_inputs(&self) -> Vec<String> {
        let mut bad = Vec::new();
        let mut check = |name: String, value: Option<f64>| {
            if value.is_some_and(|v| !v.is_finite()) {
                bad.push(name);
            }
        };
        for (i, e) in self.evidence.iter().enumerate() {
            check(format!("evidence[{i}].relevance"), e.relevance);
            check(format!("evidence[{i}].consistency"), e.consistency);
        }
        for (i, s) in self.steps.iter().enumerate() {
            check(format!("steps[{i}].validity"), s.validity);
            check(format!("steps[{i}].completeness"), s.completeness);
            check(format!("steps[{i}].clarity"), s.clarity);
            check(format!("steps[{i}].complexity"), s.complexity);
        }
        for (i, s) in self.sources.iter().enumerate() {
            check(format!("sources[{i}].reliability"), s.reliability);
        }
        bad
    }
}

/// Per-call scoring context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringContext {
    pub domain: Domain,
    /// Overrides the configured minimum confidence threshold.
    pub threshold: Option<f64>,
}

impl ScoringContext {
    pub fn in_domain(domain: Domain) -> Self {
        Self {
            domain,
            threshold: None,
        }
    }
}

/// A sub-score in [0, 1]; absent or non-finite values read as neutral.
pub(crate) fn unit_or_neutral(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => NEUTRAL_CONFIDENCE,
    }
}
