use std::sync::Arc;

use proptest::prelude::*;
use test_fixtures::*;
use veritas_core::config::ScoringConfig;
use veritas_core::models::Domain;
use veritas_scoring::{
    ConfidenceScorer, Evidence, EvidenceKind, ReasoningPath, ReasoningStep, ScoringContext, Source,
    SourceKind,
};
use veritas_validation::FallacyCatalogue;

fn evidence() -> impl Strategy<Value = Evidence> {
    (
        prop::sample::select(vec![
            EvidenceKind::Empirical,
            EvidenceKind::Logical,
            EvidenceKind::Expert,
            EvidenceKind::Anecdotal,
            EvidenceKind::Opinion,
            EvidenceKind::Other,
        ]),
        prop::option::of(-1.0f64..2.0),
        prop::option::of(-1.0f64..2.0),
    )
        .prop_map(|(kind, relevance, consistency)| Evidence {
            kind,
            description: "item".into(),
            relevance,
            consistency,
        })
}

fn step() -> impl Strategy<Value = ReasoningStep> {
    (
        prop::option::of(0.0f64..=1.0),
        prop::option::of(0.0f64..=1.0),
        prop::option::of(0.0f64..=1.0),
        prop::option::of(0.0f64..=1.0),
    )
        .prop_map(|(validity, completeness, clarity, complexity)| ReasoningStep {
            description: "step".into(),
            validity,
            completeness,
            clarity,
            complexity,
        })
}

fn source() -> impl Strategy<Value = Source> {
    (
        prop::sample::select(vec![
            SourceKind::PeerReviewed,
            SourceKind::News,
            SourceKind::Blog,
            SourceKind::Unknown,
        ]),
        prop::option::of(0.0f64..=1.0),
    )
        .prop_map(|(kind, reliability)| Source {
            kind,
            url: None,
            reliability,
        })
}

fn path() -> impl Strategy<Value = ReasoningPath> {
    (
        prop::collection::vec(evidence(), 0..8),
        prop::collection::vec(step(), 0..5),
        prop::collection::vec(source(), 0..4),
    )
        .prop_map(|(evidence, steps, sources)| ReasoningPath {
            evidence,
            steps,
            sources,
        })
}

fn domain() -> impl Strategy<Value = Domain> {
    prop::sample::select(vec![
        Domain::Scientific,
        Domain::Personal,
        Domain::Speculative,
        Domain::Ethical,
        Domain::General,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scores_stay_in_bounds_and_range_contains_value(path in path(), domain in domain()) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (gate, _) = open_gate();
        let scorer = ConfidenceScorer::new(
            ScoringConfig::default(),
            Arc::new(FallacyCatalogue::builtin().unwrap()),
            gate,
        );
        let a = runtime
            .block_on(scorer.score_confidence(&user("p"), "a conclusion", &path, &ScoringContext::in_domain(domain)))
            .unwrap()
            .completed()
            .unwrap();

        for v in [
            a.raw_confidence,
            a.calibrated_confidence,
            a.factors.evidence_strength,
            a.factors.reasoning_quality,
            a.factors.source_reliability,
            a.factors.fallacy_penalty,
        ] {
            prop_assert!((0.0..=1.0).contains(&v), "{v} out of range");
        }
        let (lo, hi) = a.uncertainty_range;
        prop_assert!(0.0 <= lo && lo <= a.calibrated_confidence);
        prop_assert!(a.calibrated_confidence <= hi && hi <= 1.0);
        prop_assert_eq!(a.meets_threshold, a.calibrated_confidence >= a.threshold);
    }
}
