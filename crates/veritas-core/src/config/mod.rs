pub mod defaults;
pub mod feedback_config;
pub mod observability_config;
pub mod scoring_config;
pub mod validation_config;
pub mod veritas_config;

pub use feedback_config::FeedbackConfig;
pub use observability_config::ObservabilityConfig;
pub use scoring_config::ScoringConfig;
pub use validation_config::ValidationConfig;
pub use veritas_config::VeritasConfig;
