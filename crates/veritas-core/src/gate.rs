//! Permission gate applied uniformly to every public operation.

use std::future::Future;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::errors::VeritasResult;
use crate::models::{Actor, AuditAction, AuditEntry, AuditOutcome, Outcome, Permission};
use crate::traits::{IAuditSink, IPermissionChecker};

/// Wraps an operation with a permission check and audit logging.
///
/// Denials and rejections come back as [`Outcome`] values and are always
/// audited. A failing permission collaborator is treated as a denial.
#[derive(Clone)]
pub struct AccessGate {
    checker: Arc<dyn IPermissionChecker>,
    audit: Arc<dyn IAuditSink>,
}

impl AccessGate {
    pub fn new(checker: Arc<dyn IPermissionChecker>, audit: Arc<dyn IAuditSink>) -> Self {
        Self { checker, audit }
    }

    /// Check `permission`, run `op` if granted, and audit how it ended.
    pub async fn run<T, F, Fut>(
        &self,
        actor: &Actor,
        permission: Permission,
        action: AuditAction,
        details: Value,
        op: F,
    ) -> VeritasResult<Outcome<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = VeritasResult<Outcome<T>>>,
    {
        self.run_described(actor, permission, action, details, op, |_| Value::Null)
            .await
    }

    /// Like [`run`](Self::run), merging `describe(&value)` into the audit
    /// details of a completed operation.
    pub async fn run_described<T, F, Fut, D>(
        &self,
        actor: &Actor,
        permission: Permission,
        action: AuditAction,
        details: Value,
        op: F,
        describe: D,
    ) -> VeritasResult<Outcome<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = VeritasResult<Outcome<T>>>,
        D: FnOnce(&T) -> Value,
    {
        if let Some(reason) = self.denial_reason(actor, permission).await {
            self.audit(
                action,
                actor,
                AuditOutcome::Denied,
                with_fields(details, json!({ "permission": permission.as_str(), "reason": reason })),
            );
            return Ok(Outcome::denied(permission, reason));
        }

        let result = op().await;
        match &result {
            Ok(Outcome::Completed(value)) => {
                let details = with_fields(details, describe(value));
                self.audit(action, actor, AuditOutcome::Completed, details);
            }
            Ok(Outcome::Rejected { field, reason }) => {
                self.audit(
                    action,
                    actor,
                    AuditOutcome::Rejected,
                    with_fields(details, json!({ "field": field, "reason": reason })),
                );
            }
            Ok(Outcome::Denied { permission, reason }) => {
                self.audit(
                    action,
                    actor,
                    AuditOutcome::Denied,
                    with_fields(
                        details,
                        json!({ "permission": permission.as_str(), "reason": reason }),
                    ),
                );
            }
            Err(e) => {
                self.audit(
                    action,
                    actor,
                    AuditOutcome::Failed,
                    with_fields(details, json!({ "error": e.to_string() })),
                );
            }
        }
        result
    }

    /// Whether `actor` holds `permission`, without auditing.
    pub async fn allows(&self, actor: &Actor, permission: Permission) -> bool {
        self.denial_reason(actor, permission).await.is_none()
    }

    /// Whether `actor` consented to `scope`. Collaborator failure counts as
    /// no consent.
    pub async fn has_consent(&self, actor: &Actor, scope: &str) -> bool {
        match self.checker.check_consent(actor, scope).await {
            Ok(granted) => granted,
            Err(e) => {
                tracing::warn!(
                    event = "degradation_triggered",
                    component = "permission_checker",
                    failure = %e,
                    fallback = "consent withheld",
                    "consent check failed"
                );
                false
            }
        }
    }

    /// Record an audit entry, logging and swallowing sink failures.
    pub fn audit(&self, action: AuditAction, actor: &Actor, outcome: AuditOutcome, details: Value) {
        let entry = AuditEntry::new(action, actor.audit_id(), outcome, details);
        if let Err(e) = self.audit.record(entry) {
            tracing::warn!(
                event = "degradation_triggered",
                component = "audit_sink",
                failure = %e,
                fallback = "audit entry dropped",
                "audit sink failed"
            );
        }
    }

    async fn denial_reason(&self, actor: &Actor, permission: Permission) -> Option<String> {
        match self.checker.check_permission(actor, permission).await {
            Ok(true) => None,
            Ok(false) => {
                tracing::warn!(
                    event = "permission_denied",
                    actor = %actor.audit_id(),
                    permission = %permission,
                    "permission denied"
                );
                Some(format!("{} lacks {}", actor.audit_id(), permission))
            }
            Err(e) => {
                tracing::warn!(
                    event = "degradation_triggered",
                    component = "permission_checker",
                    failure = %e,
                    fallback = "deny",
                    "permission check failed"
                );
                Some(format!("permission check failed: {e}"))
            }
        }
    }
}

/// Merge the fields of `extra` into `base` when both are objects.
fn with_fields(base: Value, extra: Value) -> Value {
    match (base, extra) {
        (Value::Object(mut b), Value::Object(e)) => {
            b.extend(e);
            Value::Object(b)
        }
        (Value::Null, e) => e,
        (b, _) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VeritasError;
    use std::sync::Mutex;

    struct Fixed(bool);

    #[async_trait::async_trait]
    impl IPermissionChecker for Fixed {
        async fn check_permission(&self, _a: &Actor, _p: Permission) -> VeritasResult<bool> {
            Ok(self.0)
        }
    }

    struct Broken;

    #[async_trait::async_trait]
    impl IPermissionChecker for Broken {
        async fn check_permission(&self, _a: &Actor, _p: Permission) -> VeritasResult<bool> {
            Err(VeritasError::collaborator("permissions", "unreachable"))
        }
    }

    #[derive(Default)]
    struct Log(Mutex<Vec<AuditEntry>>);

    impl IAuditSink for Log {
        fn record(&self, entry: AuditEntry) -> VeritasResult<()> {
            self.0.lock().unwrap().push(entry);
            Ok(())
        }
    }

    fn gate(checker: Arc<dyn IPermissionChecker>) -> (AccessGate, Arc<Log>) {
        let log = Arc::new(Log::default());
        (AccessGate::new(checker, log.clone()), log)
    }

    #[tokio::test]
    async fn denied_operation_never_runs_and_is_audited() {
        let (gate, log) = gate(Arc::new(Fixed(false)));
        let mut ran = false;
        let out: Outcome<()> = gate
            .run(&Actor::user("u1"), Permission::ApplyFeedback, AuditAction::FeedbackApplied, json!({}), || {
                ran = true;
                async { Ok(Outcome::Completed(())) }
            })
            .await
            .unwrap();
        assert!(out.is_denied());
        assert!(!ran);
        let entries = log.0.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].outcome, AuditOutcome::Denied);
        assert_eq!(entries[0].details["permission"], "apply_feedback");
    }

    #[tokio::test]
    async fn collaborator_failure_fails_closed() {
        let (gate, _log) = gate(Arc::new(Broken));
        let out: Outcome<()> = gate
            .run(&Actor::user("u1"), Permission::ViewFeedback, AuditAction::FeedbackViewed, Value::Null, || async {
                Ok(Outcome::Completed(()))
            })
            .await
            .unwrap();
        assert!(out.is_denied());
    }

    #[tokio::test]
    async fn rejection_is_audited_with_field() {
        let (gate, log) = gate(Arc::new(Fixed(true)));
        let out: Outcome<()> = gate
            .run(&Actor::anonymous(), Permission::SubmitFeedback, AuditAction::FeedbackSubmitted, json!({"step_id": "s"}), || async {
                Ok(Outcome::rejected("correction", "must not be empty"))
            })
            .await
            .unwrap();
        assert!(out.is_rejected());
        let entries = log.0.lock().unwrap();
        assert_eq!(entries[0].outcome, AuditOutcome::Rejected);
        assert_eq!(entries[0].details["field"], "correction");
        assert_eq!(entries[0].details["step_id"], "s");
        assert_eq!(entries[0].actor, "anonymous");
    }
}
