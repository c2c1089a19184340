use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::text;

/// Knowledge domain a foundation fact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactCategory {
    Mathematics,
    Physics,
    Logic,
    Time,
    Space,
    Identity,
    Causality,
    Ethics,
    Epistemology,
    Computation,
    Biology,
    Chemistry,
    Language,
    Probability,
    Economics,
}

impl FactCategory {
    pub const ALL: [FactCategory; 15] = [
        Self::Mathematics,
        Self::Physics,
        Self::Logic,
        Self::Time,
        Self::Space,
        Self::Identity,
        Self::Causality,
        Self::Ethics,
        Self::Epistemology,
        Self::Computation,
        Self::Biology,
        Self::Chemistry,
        Self::Language,
        Self::Probability,
        Self::Economics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mathematics => "mathematics",
            Self::Physics => "physics",
            Self::Logic => "logic",
            Self::Time => "time",
            Self::Space => "space",
            Self::Identity => "identity",
            Self::Causality => "causality",
            Self::Ethics => "ethics",
            Self::Epistemology => "epistemology",
            Self::Computation => "computation",
            Self::Biology => "biology",
            Self::Chemistry => "chemistry",
            Self::Language => "language",
            Self::Probability => "probability",
            Self::Economics => "economics",
        }
    }
}

impl fmt::Display for FactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| format!("unknown fact category: {s}"))
    }
}

/// An axiomatic or near-axiomatic fact the engine treats as ground truth.
///
/// Only the permission-gated mutation path of the facts store creates or
/// changes these; inference never overwrites one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationFact {
    pub id: String,
    pub value: serde_json::Value,
    pub category: FactCategory,
    pub confidence: f64,
    pub description: String,
    pub source: String,
    pub last_verified: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl FoundationFact {
    /// Build a fact stamped now, deriving its search keywords.
    pub fn new(
        id: impl Into<String>,
        value: serde_json::Value,
        category: FactCategory,
        confidence: f64,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        let mut fact = Self {
            id: id.into(),
            value,
            category,
            confidence,
            description: description.into(),
            source: source.into(),
            last_verified: Some(now),
            created_at: now,
            updated_at: now,
            keywords: Vec::new(),
        };
        fact.refresh_keywords();
        fact
    }

    /// Recompute keywords from id and description.
    pub fn refresh_keywords(&mut self) {
        let source = format!("{} {}", self.id.replace('_', " "), self.description);
        self.keywords = text::extract_keywords(&source);
    }

    /// Normalized string form of the value, used for contradiction checks.
    pub fn normalized_value(&self) -> String {
        text::canonical_value(&self.value)
    }

    /// When the fact was last confirmed, falling back to its last update.
    pub fn verified_at(&self) -> DateTime<Utc> {
        self.last_verified.unwrap_or(self.updated_at)
    }
}
