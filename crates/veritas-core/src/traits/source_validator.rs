use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::VeritasResult;

/// Credibility verdict for an external source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAssessment {
    /// Reliability in [0, 1].
    pub score: f64,
    pub category: Option<String>,
}

/// Source-credibility oracle.
#[async_trait]
pub trait ISourceValidator: Send + Sync {
    async fn validate_source(&self, url: &str) -> VeritasResult<SourceAssessment>;
}
