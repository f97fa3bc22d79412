//! Account-related domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle action applied by a bulk request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkActionKind {
    /// Remove the account record.
    Delete,
    /// Active to blocked.
    Block,
    /// Blocked to active.
    Unblock,
}

impl BulkActionKind {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Block => "block",
            Self::Unblock => "unblock",
        }
    }

    /// Past participle used in human-readable skip reasons.
    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Delete => "deleted",
            Self::Block => "blocked",
            Self::Unblock => "unblocked",
        }
    }
}

impl std::fmt::Display for BulkActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events related to account operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccountEvent {
    /// A new account was registered.
    Registered {
        /// The account ID.
        account_id: Uuid,
        /// The account email.
        email: String,
    },
    /// An account signed in.
    Authenticated {
        /// The account ID.
        account_id: Uuid,
    },
    /// An admin changed profile fields.
    Updated {
        /// The account ID.
        account_id: Uuid,
        /// Fields that changed.
        changed_fields: Vec<String>,
    },
    /// An account was blocked.
    Blocked {
        /// The account ID.
        account_id: Uuid,
    },
    /// An account was unblocked.
    Unblocked {
        /// The account ID.
        account_id: Uuid,
    },
    /// An account was deleted.
    Deleted {
        /// The account ID.
        account_id: Uuid,
        /// The account email at deletion time.
        email: String,
    },
    /// A bulk request finished.
    BulkCompleted {
        /// The action applied.
        action: BulkActionKind,
        /// Targets the action was applied to.
        applied: usize,
        /// Targets skipped for any reason.
        skipped: usize,
    },
}

impl AccountEvent {
    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Registered { .. } => "registered",
            Self::Authenticated { .. } => "authenticated",
            Self::Updated { .. } => "updated",
            Self::Blocked { .. } => "blocked",
            Self::Unblocked { .. } => "unblocked",
            Self::Deleted { .. } => "deleted",
            Self::BulkCompleted { .. } => "bulk_completed",
        }
    }
}
