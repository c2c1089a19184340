use tracing::warn;

use veritas_core::constants::NEUTRAL_CONFIDENCE;
use veritas_core::traits::ISourceValidator;

use crate::input::Source;

/// Reliability of one source: explicit value, else the oracle for URLs,
/// else the kind's baseline. Oracle failures fall back to the baseline.
async fn reliability_of(
    source: &Source,
    oracle: Option<&dyn ISourceValidator>,
    notes: &mut Vec<String>,
) -> f64 {
    if let Some(explicit) = source.reliability.filter(|r| r.is_finite()) {
        return explicit.clamp(0.0, 1.0);
    }
    let baseline = source.kind.reliability();
    let (Some(url), Some(oracle)) = (source.url.as_deref(), oracle) else {
        return baseline;
    };
    match oracle.validate_source(url).await {
        Ok(assessment) if assessment.score.is_finite() => assessment.score.clamp(0.0, 1.0),
        Ok(_) => {
            notes.push(format!("source oracle returned a non-finite score for {url}"));
            baseline
        }
        Err(e) => {
            warn!(
                event = "degradation_triggered",
                component = "source_validator",
                failure = %e,
                fallback = "source kind baseline",
                url = %url,
                "source validation failed"
            );
            notes.push(format!("source oracle unavailable for {url}; used {baseline:.2}"));
            baseline
        }
    }
}

/// Source reliability: average over sources, with sources below
/// `minimum_credibility` counting as 0. No sources score 0.5.
pub async fn calculate(
    sources: &[Source],
    minimum_credibility: f64,
    oracle: Option<&dyn ISourceValidator>,
    notes: &mut Vec<String>,
) -> f64 {
    if sources.is_empty() {
        return NEUTRAL_CONFIDENCE;
    }
    let mut total = 0.0;
    for source in sources {
        let score = reliability_of(source, oracle, notes).await;
        if score < minimum_credibility {
            notes.push(format!(
                "{:?} source below minimum credibility ({score:.2} < {minimum_credibility:.2})",
                source.kind
            ));
        } else {
            total += score;
        }
    }
    (total / sources.len() as f64).clamp(0.0, 1.0)
}
