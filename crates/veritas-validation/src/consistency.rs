//! Internal consistency of one statement and relations between two.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use veritas_core::models::{LogicalRelation, Statement};
use veritas_core::text::{canonical_value, extract_keywords, normalize_sentence};

static BOTH_TRUE_AND_FALSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(both true and false|true and false at the same time|is and is not)\b").unwrap()
});

static CLAUSE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:,|;|\band\b|\bbut\b|\byet\b|\bwhile\b)\s*").unwrap());

static SELF_IDENTITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\w+) is (\w+)$").unwrap());

static EITHER_OR_NOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^either (.+) or not (.+)$").unwrap());

const NEGATORS: &[&str] = &["not", "no", "never", "cannot"];
const AUXILIARIES: &[&str] = &["do", "does", "did"];

/// Number of negation markers in a normalized sentence.
fn negation_count(words: &[&str]) -> usize {
    words.iter().filter(|w| NEGATORS.contains(*w)).count()
}

/// Words that carry meaning once negators and do-support are dropped,
/// with a crude plural/third-person `s` stripped.
fn core_words(words: &[&str]) -> Vec<String> {
    words
        .iter()
        .copied()
        .filter(|w| (!AUXILIARIES.contains(w) && !NEGATORS.contains(w)) || *w == "cannot")
        .map(|w| {
            if w == "cannot" {
                "can".to_string()
            } else if w.len() > 3 && w.ends_with('s') && !w.ends_with("ss") {
                w[..w.len() - 1].to_string()
            } else {
                w.to_string()
            }
        })
        .collect()
}

/// Whether two sentences say the same thing with opposite polarity.
pub fn is_negation(a: &str, b: &str) -> bool {
    let a = normalize_sentence(a);
    let b = normalize_sentence(b);
    let wa: Vec<&str> = a.split_whitespace().collect();
    let wb: Vec<&str> = b.split_whitespace().collect();
    if wa.is_empty() || wb.is_empty() {
        return false;
    }
    let polarity_differs = negation_count(&wa) % 2 != negation_count(&wb) % 2;
    polarity_differs && core_words(&wa) == core_words(&wb)
}

/// Why a single sentence contradicts itself, if it does.
pub fn self_contradiction(text: &str) -> Option<String> {
    let normalized = normalize_sentence(text);
    if BOTH_TRUE_AND_FALSE.is_match(&normalized) {
        return Some("non_contradiction_violation".to_string());
    }
    let clauses: Vec<&str> = CLAUSE_SPLIT
        .split(&normalized)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    for (i, first) in clauses.iter().enumerate() {
        for second in &clauses[i + 1..] {
            if is_negation(first, second) {
                return Some(format!("self_contradiction: \"{first}\" vs \"{second}\""));
            }
            // "the door is open and not open"
            if let Some(rest) = second.strip_prefix("not ") {
                if first.ends_with(&format!(" {rest}")) && !first.ends_with(&format!("not {rest}")) {
                    return Some(format!("self_contradiction: \"{first}\" vs \"{second}\""));
                }
            }
        }
    }
    None
}

/// Whether a sentence is true by form alone ("a is a", "either p or not p").
pub fn is_tautology(text: &str) -> bool {
    let normalized = normalize_sentence(text);
    if let Some(caps) = SELF_IDENTITY.captures(&normalized) {
        return caps[1] == caps[2];
    }
    if let Some(caps) = EITHER_OR_NOT.captures(&normalized) {
        return caps[1] == caps[2];
    }
    false
}

/// Relation between two free-text sentences, with heuristic confidence.
pub fn compare_text(a: &str, b: &str) -> (LogicalRelation, f64) {
    let na = normalize_sentence(a);
    let nb = normalize_sentence(b);
    if na == nb {
        return (LogicalRelation::Equivalent, 1.0);
    }
    if is_negation(&na, &nb) {
        return (LogicalRelation::Contradictory, 0.9);
    }
    if entails(&na, &nb) || entails(&nb, &na) {
        return (LogicalRelation::Implication, 0.9);
    }
    let ka: HashSet<String> = extract_keywords(&na).into_iter().collect();
    let kb: HashSet<String> = extract_keywords(&nb).into_iter().collect();
    if !ka.is_empty() && !kb.is_empty() && (ka.is_subset(&kb) || kb.is_subset(&ka)) {
        return (LogicalRelation::Implication, 0.6);
    }
    (LogicalRelation::Independent, 0.6)
}

/// "all x ..." entails "some x ..."; "p and q" entails "p".
fn entails(premise: &str, conclusion: &str) -> bool {
    if let (Some(rest_p), Some(rest_c)) =
        (premise.strip_prefix("all "), conclusion.strip_prefix("some "))
    {
        if rest_p == rest_c {
            return true;
        }
    }
    premise.contains(" and ")
        && premise
            .split(" and ")
            .any(|part| part.trim() == conclusion.trim())
}

/// Pairwise relation between two statements, with confidence in [0, 1].
///
/// `Contradictory` is symmetric in its arguments.
pub fn compare_statements(a: &Statement, b: &Statement) -> (LogicalRelation, f64) {
    // Rules and disjunctions are related by content, never by key. Whether
    // they clash with asserted atoms is a set-level question.
    match (is_compound(&a.value), is_compound(&b.value)) {
        (true, true) => {
            return if canonical_value(&a.value) == canonical_value(&b.value) {
                (LogicalRelation::Equivalent, 1.0)
            } else {
                (LogicalRelation::Independent, 0.6)
            };
        }
        (true, false) | (false, true) => {
            return if mentions_as_antecedent(a, &b.key) || mentions_as_antecedent(b, &a.key) {
                (LogicalRelation::Implication, 0.9)
            } else {
                (LogicalRelation::Independent, 0.6)
            };
        }
        (false, false) => {}
    }

    if a.key == b.key {
        if canonical_value(&a.value) == canonical_value(&b.value) {
            return (LogicalRelation::Equivalent, 1.0);
        }
        return match (&a.value, &b.value) {
            (Value::String(x), Value::String(y)) => match compare_text(x, y) {
                (LogicalRelation::Equivalent, c) => (LogicalRelation::Equivalent, c),
                (LogicalRelation::Contradictory, c) => (LogicalRelation::Contradictory, c),
                // One key cannot hold two different claims.
                _ => (LogicalRelation::Contradictory, 0.8),
            },
            _ => (LogicalRelation::Contradictory, 1.0),
        };
    }

    if negated_keys(&a.key, &b.key) {
        if let (Value::Bool(x), Value::Bool(y)) = (&a.value, &b.value) {
            return if x == y {
                (LogicalRelation::Contradictory, 1.0)
            } else {
                (LogicalRelation::Equivalent, 1.0)
            };
        }
    }

    if mentions_as_antecedent(a, &b.key) || mentions_as_antecedent(b, &a.key) {
        return (LogicalRelation::Implication, 0.9);
    }

    match (&a.value, &b.value) {
        (Value::String(x), Value::String(y)) => compare_text(x, y),
        _ => (LogicalRelation::Independent, 0.6),
    }
}

/// Implication (`antecedent`/`consequent`) or disjunction (`disjuncts`).
fn is_compound(value: &Value) -> bool {
    value.get("disjuncts").is_some_and(Value::is_array)
        || (value.get("antecedent").is_some_and(Value::is_string)
            && value.get("consequent").is_some_and(Value::is_string))
}

fn negated_keys(a: &str, b: &str) -> bool {
    a.strip_prefix("not_") == Some(b) || b.strip_prefix("not_") == Some(a)
}

fn mentions_as_antecedent(statement: &Statement, key: &str) -> bool {
    statement
        .value
        .get("antecedent")
        .and_then(Value::as_str)
        .is_some_and(|antecedent| antecedent.trim() == key)
}
