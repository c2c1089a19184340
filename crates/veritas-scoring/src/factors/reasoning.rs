use crate::input::{unit_or_neutral, ReasoningStep};

/// Reasoning quality.
///
/// Formula: `0.4·validity + 0.2·completeness + 0.2·clarity + 0.2·(1 − avgComplexity/2)`,
/// each averaged over the steps. No steps score 0.
pub fn calculate(steps: &[ReasoningStep]) -> f64 {
    if steps.is_empty() {
        return 0.0;
    }
    let n = steps.len() as f64;
    let avg = |f: fn(&ReasoningStep) -> Option<f64>| {
        steps.iter().map(|s| unit_or_neutral(f(s))).sum::<f64>() / n
    };
    let validity = avg(|s| s.validity);
    let completeness = avg(|s| s.completeness);
    let clarity = avg(|s| s.clarity);
    let complexity_adj = 1.0 - avg(|s| s.complexity) / 2.0;

    (0.4 * validity + 0.2 * completeness + 0.2 * clarity + 0.2 * complexity_adj).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_steps_is_zero() {
        assert_eq!(calculate(&[]), 0.0);
    }

    #[test]
    fn defaults_are_neutral() {
        // 0.4·0.5 + 0.2·0.5 + 0.2·0.5 + 0.2·0.75
        let score = calculate(&[ReasoningStep::new("step")]);
        assert!((score - 0.55).abs() < 1e-9);
    }

    #[test]
    fn simple_steps_beat_complex_ones() {
        let simple = calculate(&[ReasoningStep::new("a").rated(0.9).with_complexity(0.0)]);
        let complex = calculate(&[ReasoningStep::new("a").rated(0.9).with_complexity(1.0)]);
        assert!(simple > complex);
    }
}
