//! Top-level Veritas configuration with layered resolution.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{FeedbackConfig, ObservabilityConfig, ScoringConfig, ValidationConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`VERITAS_*`)
/// 2. Config file passed to [`VeritasConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VeritasConfig {
    pub validation: ValidationConfig,
    pub scoring: ScoringConfig,
    pub feedback: FeedbackConfig,
    pub observability: ObservabilityConfig,
}

impl VeritasConfig {
    /// Load configuration from an optional TOML file plus environment overrides,
    /// then validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    })?;
                toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
            }
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing and embedding).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `VERITAS_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var::<bool, _>(&lookup, "VERITAS_STRICT_FOUNDATION_ENFORCEMENT")? {
            self.validation.strict_foundation_enforcement = v;
        }
        if let Some(v) = parse_var::<f64, _>(&lookup, "VERITAS_MAX_CONTRADICTION_LEVEL")? {
            self.validation.max_contradiction_level = v;
        }
        if let Some(v) = parse_var::<f64, _>(&lookup, "VERITAS_MIN_CONFIDENCE_THRESHOLD")? {
            self.scoring.minimum_confidence_threshold = v;
        }
        if let Some(v) = parse_var::<f64, _>(&lookup, "VERITAS_MIN_SOURCE_CREDIBILITY")? {
            self.scoring.minimum_source_credibility = v;
        }
        if let Some(v) = parse_var::<f64, _>(&lookup, "VERITAS_AUTO_APPLY_THRESHOLD")? {
            self.feedback.auto_apply_threshold = v;
        }
        if let Some(v) = parse_var::<bool, _>(&lookup, "VERITAS_REQUIRE_VERIFICATION")? {
            self.feedback.require_verification = v;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit_fields = [
            (
                "validation.max_contradiction_level",
                self.validation.max_contradiction_level,
            ),
            (
                "validation.fallacy_confidence_threshold",
                self.validation.fallacy_confidence_threshold,
            ),
            (
                "scoring.minimum_confidence_threshold",
                self.scoring.minimum_confidence_threshold,
            ),
            (
                "scoring.minimum_source_credibility",
                self.scoring.minimum_source_credibility,
            ),
            ("scoring.calibration_midpoint", self.scoring.calibration_midpoint),
            ("scoring.max_fallacy_penalty", self.scoring.max_fallacy_penalty),
            ("feedback.auto_apply_threshold", self.feedback.auto_apply_threshold),
            ("feedback.authenticated_bonus", self.feedback.authenticated_bonus),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if !(self.scoring.calibration_steepness.is_finite()
            && self.scoring.calibration_steepness > 0.0)
        {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.calibration_steepness".to_string(),
                message: "must be a positive number".to_string(),
            });
        }
        if self.feedback.max_entries == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "feedback.max_entries".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.validation.cache_enabled && self.validation.cache_capacity == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "validation.cache_capacity".to_string(),
                message: "must be greater than 0 when the cache is enabled".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: name.to_string(),
                message: format!("cannot parse {raw:?}"),
            }),
    }
}
