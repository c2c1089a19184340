use std::path::PathBuf;
use std::sync::Arc;

use veritas_core::models::FoundationFact;
use veritas_core::traits::{IAuditSink, ISourceValidator};
use veritas_core::VeritasConfig;

/// Options for building a [`VeritasRuntime`](crate::VeritasRuntime).
#[derive(Default)]
pub struct RuntimeOptions {
    /// Explicit configuration. Wins over `config_toml`.
    pub config: Option<VeritasConfig>,
    /// TOML configuration string. If neither is set, uses defaults.
    pub config_toml: Option<String>,
    /// Directory for the JSON feedback archive. If None, feedback lives in
    /// memory only.
    pub archive_dir: Option<PathBuf>,
    /// Extra audit destination, written after the built-in audit log.
    pub audit: Option<Arc<dyn IAuditSink>>,
    pub source_validator: Option<Arc<dyn ISourceValidator>>,
    /// Seed facts replacing the curated defaults.
    pub facts: Option<Vec<FoundationFact>>,
    /// Install the global tracing subscriber from the observability config.
    pub init_tracing: bool,
}

impl RuntimeOptions {
    pub fn with_config(mut self, config: VeritasConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_config_toml(mut self, toml: impl Into<String>) -> Self {
        self.config_toml = Some(toml.into());
        self
    }

    pub fn with_archive_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.archive_dir = Some(dir.into());
        self
    }

    pub fn with_audit(mut self, audit: Arc<dyn IAuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn with_source_validator(mut self, validator: Arc<dyn ISourceValidator>) -> Self {
        self.source_validator = Some(validator);
        self
    }

    pub fn with_facts(mut self, facts: Vec<FoundationFact>) -> Self {
        self.facts = Some(facts);
        self
    }
}
