//! Sigmoid calibration and uncertainty ranges.

use veritas_core::models::{ConfidenceFactors, Domain};

/// `1 / (1 + e^(−α(raw − β)))`.
pub fn sigmoid(raw: f64, steepness: f64, midpoint: f64) -> f64 {
    1.0 / (1.0 + (-steepness * (raw - midpoint)).exp())
}

/// Calibrated confidence: sigmoid plus the domain adjustment, clamped.
pub fn calibrate(raw: f64, steepness: f64, midpoint: f64, domain: Domain) -> f64 {
    (sigmoid(raw, steepness, midpoint) + domain.adjustment()).clamp(0.0, 1.0)
}

/// Interval around `calibrated` that widens with weak factors.
///
/// Width: `0.1 + 0.2·(1 − c) + 0.1·(1 − evidence) + 0.1·(1 − reasoning) + 0.2·penalty`,
/// halved when every factor is strong. Clamped to [0, 1]; always contains `c`.
pub fn uncertainty_range(calibrated: f64, factors: &ConfidenceFactors) -> (f64, f64) {
    let c = calibrated.clamp(0.0, 1.0);
    let mut width = 0.1
        + 0.2 * (1.0 - c)
        + 0.1 * (1.0 - factors.evidence_strength)
        + 0.1 * (1.0 - factors.reasoning_quality)
        + 0.2 * factors.fallacy_penalty;
    let strong = c >= 0.8
        && factors.evidence_strength >= 0.7
        && factors.reasoning_quality >= 0.7
        && factors.fallacy_penalty == 0.0;
    if strong {
        width /= 2.0;
    }
    let half = (width / 2.0).max(0.0);
    ((c - half).max(0.0), (c + half).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_maps_to_half() {
        assert!((sigmoid(0.5, 10.0, 0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn domain_shifts_down() {
        let general = calibrate(0.7, 10.0, 0.5, Domain::General);
        let speculative = calibrate(0.7, 10.0, 0.5, Domain::Speculative);
        assert!((general - speculative - 0.2).abs() < 1e-9);
    }

    #[test]
    fn strong_factors_narrow_the_range() {
        let strong = ConfidenceFactors {
            evidence_strength: 0.9,
            reasoning_quality: 0.9,
            source_reliability: 0.9,
            fallacy_penalty: 0.0,
        };
        let weak = ConfidenceFactors {
            fallacy_penalty: 0.1,
            ..strong
        };
        let (a, b) = uncertainty_range(0.9, &strong);
        let (c, d) = uncertainty_range(0.9, &weak);
        assert!(b - a < d - c);
    }
}
