use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use super::fallacy::FallacyDetection;

/// Subject-matter domain of a conclusion; shifts calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Domain {
    Scientific,
    Personal,
    Speculative,
    Ethical,
    #[default]
    General,
}

impl Domain {
    /// Additive calibration adjustment for this domain.
    pub fn adjustment(self) -> f64 {
        match self {
            Self::Scientific => 0.0,
            Self::Personal => -0.1,
            Self::Speculative => -0.2,
            Self::Ethical => -0.15,
            Self::General => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scientific => "scientific",
            Self::Personal => "personal",
            Self::Speculative => "speculative",
            Self::Ethical => "ethical",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scientific" => Ok(Self::Scientific),
            "personal" => Ok(Self::Personal),
            "speculative" => Ok(Self::Speculative),
            "ethical" => Ok(Self::Ethical),
            "general" => Ok(Self::General),
            other => Err(format!("unknown domain: {other}")),
        }
    }
}

/// The four sub-scores behind an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default, TS)]
#[ts(export)]
pub struct ConfidenceFactors {
    pub evidence_strength: f64,
    pub reasoning_quality: f64,
    pub source_reliability: f64,
    pub fallacy_penalty: f64,
}

/// Calibrated confidence in a conclusion, with its full explanation trail.
///
/// Computed fresh on every call; never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConfidenceAssessment {
    pub conclusion: String,
    pub raw_confidence: f64,
    pub calibrated_confidence: f64,
    /// `[min, max]`, always containing `calibrated_confidence`.
    pub uncertainty_range: (f64, f64),
    pub factors: ConfidenceFactors,
    pub detected_fallacies: Vec<FallacyDetection>,
    pub domain: Domain,
    pub threshold: f64,
    pub meets_threshold: bool,
    pub explanation: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typescript_binding_includes_detected_fallacies() {
        let decl = ConfidenceAssessment::decl(&ts_rs::Config::default());
        assert!(decl.contains("detected_fallacies"), "{decl}");
        assert!(decl.contains("FallacyDetection"), "{decl}");
        assert!(FallacyDetection::decl(&ts_rs::Config::default()).contains("FallacyCategory"));
    }
}
