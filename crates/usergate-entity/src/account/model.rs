//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use usergate_core::types::AccountId;

use super::role::AccountRole;
use super::status::AccountStatus;

/// A stored account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Immutable identifier assigned at creation.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Login email, unique case-insensitively.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Privilege level.
    pub role: AccountRole,
    /// Lifecycle state.
    pub status: AccountStatus,
    /// Last successful sign-in.
    pub last_authenticated_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last written.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Check if this account has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if this account is blocked.
    pub fn is_blocked(&self) -> bool {
        self.status.is_blocked()
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: AccountRole,
    /// Initial sign-in timestamp, set when creation also signs the account in.
    pub last_authenticated_at: Option<DateTime<Utc>>,
}

/// Partial update applied by an admin. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountChanges {
    /// New display name.
    pub name: Option<String>,
    /// New login email.
    pub email: Option<String>,
    /// New role.
    pub role: Option<AccountRole>,
}

impl AccountChanges {
    /// Names of the fields that differ from `account`.
    pub fn changed_fields(&self, account: &Account) -> Vec<String> {
        let mut fields = Vec::new();
        if self.name.as_ref().is_some_and(|n| *n != account.name) {
            fields.push("name".to_string());
        }
        if self.email.as_ref().is_some_and(|e| *e != account.email) {
            fields.push("email".to_string());
        }
        if self.role.is_some_and(|r| r != account.role) {
            fields.push("role".to_string());
        }
        fields
    }

    /// Apply the changes in place.
    pub fn apply_to(&self, account: &mut Account) {
        if let Some(name) = &self.name {
            account.name = name.clone();
        }
        if let Some(email) = &self.email {
            account.email = email.clone();
        }
        if let Some(role) = self.role {
            account.role = role;
        }
    }
}
