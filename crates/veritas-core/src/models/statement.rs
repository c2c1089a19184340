use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::text;

/// A candidate statement submitted for validation.
///
/// `value` may be a string, number, bool, or an object. Implications are
/// objects with `antecedent` and `consequent`; disjunctions are objects with
/// a `disjuncts` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub key: String,
    pub value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// When the claim was observed; consumed by conflict resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

impl Statement {
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
            category: None,
            confidence: None,
            source: None,
            observed_at: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn observed_at(mut self, at: DateTime<Utc>) -> Self {
        self.observed_at = Some(at);
        self
    }

    /// Free text carried by the statement, if its value is a string.
    pub fn text(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Cache fingerprint over `(key, serialized value)`.
    pub fn fingerprint(&self) -> String {
        text::fingerprint(&self.key, &self.value)
    }

    /// Normalized string form of the value.
    pub fn normalized_value(&self) -> String {
        text::canonical_value(&self.value)
    }
}
