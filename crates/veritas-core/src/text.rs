//! Text normalization shared by the facts store and the validity checker.

use crate::constants::{MIN_KEYWORD_LEN, STOP_WORDS};

const CONTRACTIONS: &[(&str, &str)] = &[
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("can't", "cannot"),
    ("won't", "will not"),
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("didn't", "did not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("shouldn't", "should not"),
    ("wouldn't", "would not"),
    ("couldn't", "could not"),
    ("it's", "it is"),
    ("she's", "she is"),
    ("he's", "he is"),
    ("they're", "they are"),
];

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical string form of a JSON value used for equality checks.
///
/// Strings are trimmed, lowercased and whitespace-collapsed. Everything else
/// uses its compact JSON text, so `"299792458"` and `299792458` agree.
pub fn canonical_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => collapse_whitespace(&s.to_lowercase()),
        other => other.to_string(),
    }
}

/// Normalize free text for logical comparison: lowercase, expand
/// contractions, drop punctuation, collapse whitespace.
pub fn normalize_sentence(s: &str) -> String {
    let mut out = s.to_lowercase().replace('’', "'");
    for (from, to) in CONTRACTIONS {
        out = out.replace(from, to);
    }
    let stripped: String = out
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() || c == '_' { c } else { ' ' })
        .collect();
    collapse_whitespace(&stripped)
}

/// Extract search keywords: lowercase alphanumeric words longer than two
/// characters that are not stop words, deduplicated in first-seen order.
pub fn extract_keywords(s: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in s
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= MIN_KEYWORD_LEN)
    {
        if STOP_WORDS.contains(&word) || out.iter().any(|w| w == word) {
            continue;
        }
        out.push(word.to_string());
    }
    out
}

/// blake3 fingerprint of `(key, serialized value)`.
pub fn fingerprint(key: &str, value: &serde_json::Value) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(key.as_bytes());
    hasher.update(&[0x1f]);
    hasher.update(value.to_string().as_bytes());
    hasher.finalize().to_hex().to_string()
}
