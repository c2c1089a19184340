//! Comparing a proposed value against the stored foundation value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use veritas_core::models::FoundationFact;
use veritas_core::text;

/// A proposed value that disagrees with a foundation fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContradictionInfo {
    pub fact: FoundationFact,
    /// Normalized stored value.
    pub expected: String,
    /// Normalized proposed value.
    pub proposed: String,
}

/// How a proposed `(key, value)` relates to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum FactComparison {
    /// No fact is keyed by the statement key.
    Unknown,
    Agrees(FoundationFact),
    Contradicts(ContradictionInfo),
}

impl FactComparison {
    pub fn contradiction(self) -> Option<ContradictionInfo> {
        match self {
            Self::Contradicts(info) => Some(info),
            _ => None,
        }
    }
}

/// Compare by normalized string equality.
pub fn compare(fact: Option<&FoundationFact>, value: &Value) -> FactComparison {
    let Some(fact) = fact else {
        return FactComparison::Unknown;
    };
    let expected = fact.normalized_value();
    let proposed = text::canonical_value(value);
    if expected == proposed {
        FactComparison::Agrees(fact.clone())
    } else {
        FactComparison::Contradicts(ContradictionInfo {
            fact: fact.clone(),
            expected,
            proposed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use veritas_core::models::FactCategory;

    fn light() -> FoundationFact {
        FoundationFact::new(
            "speed_of_light",
            json!("299792458"),
            FactCategory::Physics,
            1.0,
            "Speed of light in vacuum",
            "SI",
        )
    }

    #[test]
    fn numeric_and_string_forms_agree() {
        let fact = light();
        assert!(matches!(compare(Some(&fact), &json!(299792458)), FactComparison::Agrees(_)));
        assert!(matches!(compare(Some(&fact), &json!(" 299792458 ")), FactComparison::Agrees(_)));
    }

    #[test]
    fn different_value_contradicts() {
        let fact = light();
        let info = compare(Some(&fact), &json!("300000000")).contradiction().unwrap();
        assert_eq!(info.expected, "299792458");
        assert_eq!(info.proposed, "300000000");
    }

    #[test]
    fn unknown_key_is_not_a_contradiction() {
        assert_eq!(compare(None, &json!("x")), FactComparison::Unknown);
    }
}
