//! Structural checks for formal fallacies that patterns cannot express.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use veritas_core::text::{extract_keywords, normalize_sentence};

use crate::consistency::is_negation;

static CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^if (.+?)(?:\s*,\s*then\s+|\s*,\s*|\s+then\s+)(.+)$").unwrap()
});

static CONCLUSION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:therefore|so|thus|hence)\s*,?\s+(.+)$").unwrap());

static SENTENCE_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.;\n]+").unwrap());

pub(crate) const AFFIRMING_CONSEQUENT: &str = "affirming_consequent";
pub(crate) const DENYING_ANTECEDENT: &str = "denying_antecedent";
pub(crate) const NON_SEQUITUR: &str = "non_sequitur";

/// Crude stemming so "rains", "rained" and "rain" compare equal.
fn stem(word: &str) -> &str {
    for suffix in ["ed", "es", "s"] {
        if word.len() > suffix.len() + 2 {
            if let Some(stripped) = word.strip_suffix(suffix) {
                return stripped;
            }
        }
    }
    word
}

fn loosely_equal(a: &str, b: &str) -> bool {
    let a = normalize_sentence(a);
    let b = normalize_sentence(b);
    let sa: Vec<&str> = a.split_whitespace().map(stem).collect();
    let sb: Vec<&str> = b.split_whitespace().map(stem).collect();
    !sa.is_empty() && sa == sb
}

/// Find "if A then B. <minor>. therefore <conclusion>" arguments that
/// affirm the consequent or deny the antecedent. Returns `(fallacy_id,
/// evidence)` pairs.
pub(crate) fn conditional_fallacies(text: &str) -> Vec<(&'static str, String)> {
    let lowered = text.to_lowercase();
    let sentences: Vec<&str> = SENTENCE_SPLIT
        .split(&lowered)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut found = Vec::new();
    for window in sentences.windows(3) {
        let [major, minor, conclusion] = window else {
            continue;
        };
        let Some(caps) = CONDITIONAL.captures(major) else {
            continue;
        };
        let Some(concl) = CONCLUSION_MARKER.captures(conclusion) else {
            continue;
        };
        let (antecedent, consequent) = (&caps[1], &caps[2]);
        let concl = &concl[1];
        let evidence = format!("{major}. {minor}. {conclusion}");

        if loosely_equal(minor, consequent) && loosely_equal(concl, antecedent) {
            found.push((AFFIRMING_CONSEQUENT, evidence));
        } else if is_negation(minor, antecedent) && is_negation(concl, consequent) {
            found.push((DENYING_ANTECEDENT, evidence));
        }
    }
    found
}

/// Whether `conclusion` shares too little vocabulary with its premises to
/// follow from them.
pub(crate) fn is_non_sequitur(premises: &[String], conclusion: &str) -> bool {
    let significant = |s: &str| -> HashSet<String> {
        extract_keywords(s)
            .into_iter()
            .filter(|w| w.len() >= 4)
            .collect()
    };
    let concluded = significant(conclusion);
    if concluded.len() <= 3 {
        return false;
    }
    let premised: HashSet<String> = premises.iter().flat_map(|p| significant(p)).collect();
    concluded.intersection(&premised).count() < 2
}
