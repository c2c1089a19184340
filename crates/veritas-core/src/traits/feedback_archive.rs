use async_trait::async_trait;

use crate::errors::VeritasResult;
use crate::models::FeedbackEntry;

/// Durable persistence for feedback entries. Best-effort: the in-memory
/// store stays authoritative when this fails.
#[async_trait]
pub trait IFeedbackArchive: Send + Sync {
    async fn persist(&self, entry: &FeedbackEntry) -> VeritasResult<()>;
}
