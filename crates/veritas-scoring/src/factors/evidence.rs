use crate::input::{unit_or_neutral, Evidence};

/// Items beyond this count add nothing to quantity.
const SATURATION: usize = 5;

/// Evidence strength.
///
/// Formula: `0.2·quantity + 0.4·avgQuality + 0.2·avgRelevance + 0.2·avgConsistency`
/// where `quantity = min(n, 5) / 5`. No evidence scores 0.
pub fn calculate(evidence: &[Evidence]) -> f64 {
    if evidence.is_empty() {
        return 0.0;
    }
    let n = evidence.len() as f64;
    let quantity = evidence.len().min(SATURATION) as f64 / SATURATION as f64;
    let quality = evidence.iter().map(|e| e.kind.quality()).sum::<f64>() / n;
    let relevance = evidence.iter().map(|e| unit_or_neutral(e.relevance)).sum::<f64>() / n;
    let consistency = evidence.iter().map(|e| unit_or_neutral(e.consistency)).sum::<f64>() / n;

    (0.2 * quantity + 0.4 * quality + 0.2 * relevance + 0.2 * consistency).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::EvidenceKind;

    #[test]
    fn no_evidence_is_zero() {
        assert_eq!(calculate(&[]), 0.0);
    }

    #[test]
    fn single_empirical_item() {
        // 0.2·0.2 + 0.4·0.9 + 0.2·0.5 + 0.2·0.5
        let score = calculate(&[Evidence::new(EvidenceKind::Empirical, "measured")]);
        assert!((score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn quantity_saturates_at_five() {
        let five = vec![Evidence::new(EvidenceKind::Logical, "x"); 5];
        let ten = vec![Evidence::new(EvidenceKind::Logical, "x"); 10];
        assert_eq!(calculate(&five), calculate(&ten));
    }
}
