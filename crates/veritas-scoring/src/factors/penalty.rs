use std::collections::HashSet;

use veritas_core::models::FallacyDetection;
use veritas_validation::FallacyCatalogue;

/// Fallacy penalty: sum of severities, counting a non-repeatable fallacy
/// once however often it was detected, capped at `cap`.
pub fn calculate(detections: &[FallacyDetection], catalogue: &FallacyCatalogue, cap: f64) -> f64 {
    let mut counted: HashSet<&str> = HashSet::new();
    let mut total = 0.0;
    for detection in detections {
        let repeatable = catalogue
            .get(&detection.fallacy_id)
            .is_some_and(|d| d.can_repeat);
        if repeatable || counted.insert(detection.fallacy_id.as_str()) {
            total += detection.severity;
        }
    }
    total.min(cap).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> FallacyCatalogue {
        FallacyCatalogue::builtin().unwrap()
    }

    #[test]
    fn non_repeatable_counts_once() {
        let c = catalogue();
        let mut found = c.detect("Don't listen to her; she's not qualified.");
        found.extend(c.detect("Don't listen to him, he is an idiot."));
        let severity = c.get("ad_hominem").unwrap().severity;
        assert!((calculate(&found, &c, 0.8) - severity).abs() < 1e-9);
    }

    #[test]
    fn penalty_is_capped() {
        let c = catalogue();
        let found = c.detect(
            "Don't listen to her, she is a liar. Everyone believes it, so it must be true. \
             Think of the children! It has always been done this way.",
        );
        assert_eq!(calculate(&found, &c, 0.8), 0.8);
    }

    #[test]
    fn no_fallacies_no_penalty() {
        assert_eq!(calculate(&[], &catalogue(), 0.8), 0.0);
    }
}
