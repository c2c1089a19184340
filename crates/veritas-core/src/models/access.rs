//! Caller identity and the permissions the engine gates on.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::SYSTEM_ACTOR_ID;

/// The caller of a gated operation.
///
/// `user_id` is absent for anonymous callers. `token` is the opaque
/// capability token handed to the permission collaborator; the engine never
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Actor {
    pub user_id: Option<String>,
    pub token: Option<String>,
    #[serde(default)]
    pub system: bool,
}

impl Actor {
    /// An authenticated user without a capability token.
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            token: None,
            system: false,
        }
    }

    /// An anonymous caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The engine acting on its own behalf (auto-logged feedback, cascades).
    pub fn system() -> Self {
        Self {
            user_id: Some(SYSTEM_ACTOR_ID.to_string()),
            token: None,
            system: true,
        }
    }

    /// Attach a capability token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }

    /// Identifier used in audit records.
    pub fn audit_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or("anonymous")
    }
}

/// Capabilities checked by the permission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ModifyFoundationFacts,
    ValidateStatements,
    ScoreConfidence,
    SubmitFeedback,
    VerifyFeedback,
    ApplyFeedback,
    ViewFeedback,
    PurgeFeedback,
}

impl Permission {
    pub const ALL: [Permission; 8] = [
        Self::ModifyFoundationFacts,
        Self::ValidateStatements,
        Self::ScoreConfidence,
        Self::SubmitFeedback,
        Self::VerifyFeedback,
        Self::ApplyFeedback,
        Self::ViewFeedback,
        Self::PurgeFeedback,
    ];

    /// The permission string handed to the permission collaborator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ModifyFoundationFacts => "modify_foundation_facts",
            Self::ValidateStatements => "validate_statements",
            Self::ScoreConfidence => "score_confidence",
            Self::SubmitFeedback => "submit_feedback",
            Self::VerifyFeedback => "verify_feedback",
            Self::ApplyFeedback => "apply_feedback",
            Self::ViewFeedback => "view_feedback",
            Self::PurgeFeedback => "purge_feedback",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
