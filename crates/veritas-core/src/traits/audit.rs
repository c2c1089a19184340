use crate::errors::VeritasResult;
use crate::models::AuditEntry;

/// Append-only audit log. Fire-and-forget: implementations must not block,
/// and callers log and ignore failures.
pub trait IAuditSink: Send + Sync {
    fn record(&self, entry: AuditEntry) -> VeritasResult<()>;
}
