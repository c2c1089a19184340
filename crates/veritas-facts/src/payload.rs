//! Mutation payloads and their field checks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use veritas_core::constants::{CONFIDENCE_AXIOMATIC, CONFIDENCE_RELIABLE};
use veritas_core::models::{FactCategory, FoundationFact};

/// Fields supplied when adding a fact. `category` arrives as text and is
/// checked against the category set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactPayload {
    pub id: String,
    pub value: Value,
    pub category: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    pub description: String,
    pub source: String,
}

fn default_confidence() -> f64 {
    CONFIDENCE_AXIOMATIC
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactUpdate {
    pub value: Option<Value>,
    pub category: Option<String>,
    pub confidence: Option<f64>,
    pub description: Option<String>,
    pub source: Option<String>,
}

/// A field that failed its check.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRejection {
    pub field: &'static str,
    pub reason: String,
}

impl FieldRejection {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

pub(crate) fn check_required(field: &'static str, value: &str) -> Result<(), FieldRejection> {
    if value.trim().is_empty() {
        return Err(FieldRejection::new(field, "is required"));
    }
    Ok(())
}

pub(crate) fn check_value(value: &Value) -> Result<(), FieldRejection> {
    match value {
        Value::Null => Err(FieldRejection::new("value", "is required")),
        Value::String(s) if s.trim().is_empty() => {
            Err(FieldRejection::new("value", "must not be empty"))
        }
        _ => Ok(()),
    }
}

pub(crate) fn check_confidence(confidence: f64) -> Result<(), FieldRejection> {
    if !(CONFIDENCE_RELIABLE..=CONFIDENCE_AXIOMATIC).contains(&confidence) {
        return Err(FieldRejection::new(
            "confidence",
            format!("must be between {CONFIDENCE_RELIABLE} and {CONFIDENCE_AXIOMATIC}, got {confidence}"),
        ));
    }
    Ok(())
}

pub(crate) fn parse_category(category: &str) -> Result<FactCategory, FieldRejection> {
    category
        .parse::<FactCategory>()
        .map_err(|e| FieldRejection::new("category", e))
}

impl FactPayload {
    /// Check every field and build the fact.
    pub fn into_fact(self) -> Result<FoundationFact, FieldRejection> {
        check_required("id", &self.id)?;
        check_value(&self.value)?;
        let category = parse_category(&self.category)?;
        check_confidence(self.confidence)?;
        check_required("description", &self.description)?;
        check_required("source", &self.source)?;
        Ok(FoundationFact::new(
            self.id.trim(),
            self.value,
            category,
            self.confidence,
            self.description,
            self.source,
        ))
    }
}

impl FactUpdate {
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
            && self.category.is_none()
            && self.confidence.is_none()
            && self.description.is_none()
            && self.source.is_none()
    }

    /// Check the supplied fields and apply them to a copy of `fact`.
    pub fn apply_to(&self, fact: &FoundationFact) -> Result<FoundationFact, FieldRejection> {
        if self.is_empty() {
            return Err(FieldRejection::new("update", "no fields to change"));
        }
        let mut updated = fact.clone();
        if let Some(value) = &self.value {
            check_value(value)?;
            updated.value = value.clone();
        }
        if let Some(category) = &self.category {
            updated.category = parse_category(category)?;
        }
        if let Some(confidence) = self.confidence {
            check_confidence(confidence)?;
            updated.confidence = confidence;
        }
        if let Some(description) = &self.description {
            check_required("description", description)?;
            updated.description = description.clone();
        }
        if let Some(source) = &self.source {
            check_required("source", source)?;
            updated.source = source.clone();
        }
        let now = chrono::Utc::now();
        updated.updated_at = now;
        updated.last_verified = Some(now);
        updated.refresh_keywords();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> FactPayload {
        FactPayload {
            id: "boiling_point_of_water".into(),
            value: json!(100),
            category: "chemistry".into(),
            confidence: 0.99,
            description: "Water boils at 100 C at sea level".into(),
            source: "IUPAC".into(),
        }
    }

    #[test]
    fn valid_payload_builds_fact() {
        let fact = payload().into_fact().unwrap();
        assert_eq!(fact.category, FactCategory::Chemistry);
        assert_eq!(fact.confidence, 0.99);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut p = payload();
        p.category = "alchemy".into();
        assert_eq!(p.into_fact().unwrap_err().field, "category");
    }

    #[test]
    fn confidence_below_reliable_is_rejected() {
        let mut p = payload();
        p.confidence = 0.5;
        assert_eq!(p.into_fact().unwrap_err().field, "confidence");
    }

    #[test]
    fn missing_fields_are_rejected_by_name() {
        let mut p = payload();
        p.source = "  ".into();
        assert_eq!(p.into_fact().unwrap_err().field, "source");
        let mut p = payload();
        p.value = Value::Null;
        assert_eq!(p.into_fact().unwrap_err().field, "value");
    }

    #[test]
    fn empty_update_is_rejected() {
        let fact = payload().into_fact().unwrap();
        assert_eq!(FactUpdate::default().apply_to(&fact).unwrap_err().field, "update");
    }
}
