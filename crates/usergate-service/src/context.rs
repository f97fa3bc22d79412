//! The authenticated principal attached to a request.

use serde::{Deserialize, Serialize};

use usergate_core::types::AccountId;
use usergate_entity::{Account, AccountRole, AccountStatus};

/// Snapshot of the caller's account taken when the request was admitted.
///
/// Rebuilt on every request from the verified token and a fresh store
/// lookup, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The caller's account ID.
    pub account_id: AccountId,
    /// Role at admission time.
    pub role: AccountRole,
    /// Status at admission time.
    pub status: AccountStatus,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
}

impl Principal {
    /// Returns whether the caller is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the caller's account is blocked.
    pub fn is_blocked(&self) -> bool {
        self.status.is_blocked()
    }
}

impl From<&Account> for Principal {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            role: account.role,
            status: account.status,
            name: account.name.clone(),
            email: account.email.clone(),
        }
    }
}
