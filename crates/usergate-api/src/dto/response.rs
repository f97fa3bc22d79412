//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use usergate_core::types::AccountId;
use usergate_entity::Account;
use usergate_service::Principal;

/// Outward view of an account. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    /// Account ID.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Admin flag.
    pub is_admin: bool,
    /// Blocked flag.
    pub is_blocked: bool,
    /// Last sign-in.
    pub last_authenticated_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            is_admin: account.is_admin(),
            is_blocked: account.is_blocked(),
            last_authenticated_at: account.last_authenticated_at,
            created_at: account.created_at,
        }
    }
}

/// The authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalView {
    /// Account ID.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Admin flag.
    pub is_admin: bool,
    /// Blocked flag.
    pub is_blocked: bool,
}

impl From<&Principal> for PrincipalView {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.account_id,
            name: principal.name.clone(),
            email: principal.email.clone(),
            is_admin: principal.is_admin(),
            is_blocked: principal.is_blocked(),
        }
    }
}

/// Result of a single-target lifecycle call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleResponse {
    /// Human-readable message.
    pub message: String,
    /// Whether the stored state changed.
    pub changed: bool,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Credential store status.
    pub store: String,
}
