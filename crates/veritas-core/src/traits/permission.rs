use async_trait::async_trait;

use crate::errors::VeritasResult;
use crate::models::{Actor, Permission};

/// Role/permission collaborator. Its internals live outside this engine.
///
/// An `Err` is a collaborator failure; the gate treats it as a denial.
#[async_trait]
pub trait IPermissionChecker: Send + Sync {
    /// Whether `actor` holds `permission`.
    async fn check_permission(&self, actor: &Actor, permission: Permission) -> VeritasResult<bool>;

    /// Whether `actor` has consented to `scope` (e.g. storing feedback).
    async fn check_consent(&self, actor: &Actor, scope: &str) -> VeritasResult<bool> {
        let _ = (actor, scope);
        Ok(true)
    }
}
