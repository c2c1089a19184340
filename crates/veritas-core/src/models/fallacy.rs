use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Family a fallacy belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FallacyCategory {
    Formal,
    Relevance,
    Presumption,
    Ambiguity,
    Statistical,
    Causal,
}

impl fmt::Display for FallacyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Formal => "formal",
            Self::Relevance => "relevance",
            Self::Presumption => "presumption",
            Self::Ambiguity => "ambiguity",
            Self::Statistical => "statistical",
            Self::Causal => "causal",
        };
        f.write_str(s)
    }
}

/// A catalogue entry: patterns plus the metadata surfaced to users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallacyDefinition {
    pub id: String,
    pub name: String,
    pub category: FallacyCategory,
    /// Case-insensitive regular expressions matched against normalized text.
    pub patterns: Vec<String>,
    pub description: String,
    pub explanation: String,
    pub remediation: String,
    /// Weight in [0, 1]; drives detection confidence and scoring penalties.
    pub severity: f64,
    pub example: String,
    /// Whether several occurrences in one text are reported separately.
    pub can_repeat: bool,
}

/// One fallacy found in a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FallacyDetection {
    pub fallacy_id: String,
    pub name: String,
    pub category: FallacyCategory,
    pub severity: f64,
    pub confidence: f64,
    /// The text span that matched.
    pub evidence: String,
    pub explanation: String,
    pub remediation: String,
}
