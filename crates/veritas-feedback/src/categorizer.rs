//! Keyword categorization for feedback submitted without a category.

use veritas_core::models::FeedbackCategory;

/// Categorize a correction from its text.
///
/// Checks run in priority order; the first group with a hit wins.
pub fn categorize(correction: &str) -> FeedbackCategory {
    let text = correction.to_lowercase();

    // Staleness beats plain factual error: "that figure is outdated" is both.
    if contains_any(
        &text,
        &[
            "outdated",
            "out of date",
            "no longer",
            "obsolete",
            "deprecated",
            "used to be",
            "as of",
            "superseded",
        ],
    ) {
        return FeedbackCategory::OutdatedInfo;
    }

    if contains_any(
        &text,
        &[
            "fallacy",
            "fallacious",
            "does not follow",
            "doesn't follow",
            "non sequitur",
            "circular",
            "strawman",
            "straw man",
            "ad hominem",
            "false dilemma",
            "illogical",
        ],
    ) {
        return FeedbackCategory::LogicalFallacy;
    }

    if contains_any(
        &text,
        &[
            "incorrect",
            "wrong",
            "inaccurate",
            "not true",
            "false",
            "mistake",
            "actually",
            "in fact",
            "factually",
        ],
    ) {
        return FeedbackCategory::FactualError;
    }

    if contains_any(
        &text,
        &["bias", "one-sided", "one sided", "unfair", "prejudice", "slanted", "partisan"],
    ) {
        return FeedbackCategory::BiasConcern;
    }

    if contains_any(
        &text,
        &[
            "missing",
            "context",
            "omits",
            "omitted",
            "leaves out",
            "left out",
            "forgot",
            "incomplete",
            "also consider",
        ],
    ) {
        return FeedbackCategory::MissingContext;
    }

    if contains_any(
        &text,
        &[
            "another view",
            "alternative",
            "other perspective",
            "on the other hand",
            "some argue",
            "disagree",
            "instead",
        ],
    ) {
        return FeedbackCategory::AlternativeView;
    }

    if contains_any(
        &text,
        &["clarify", "clarification", "unclear", "confusing", "ambiguous", "rephrase", "meant"],
    ) {
        return FeedbackCategory::Clarification;
    }

    FeedbackCategory::Other
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}
