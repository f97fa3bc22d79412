//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use usergate_core::error::AppError;
use usergate_core::events::BulkActionKind;
use usergate_core::types::AccountId;
use usergate_entity::{AccountChanges, AccountRole};

use crate::extractors::parse_account_id;

/// Run derive-based validation and map failures to a 400.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), AppError> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// Sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthenticateRequest {
    /// Login email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password; length policy is enforced by the session service.
    pub password: String,
}

/// Admin update of an account.
///
/// Absent `name` or `email` are left unchanged. The role always follows
/// `isAdmin`, so omitting it revokes admin.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    /// New display name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New login email.
    #[validate(email)]
    pub email: Option<String>,
    /// Grant or revoke admin; absent means revoke.
    pub is_admin: Option<bool>,
}

impl From<UpdateAccountRequest> for AccountChanges {
    fn from(req: UpdateAccountRequest) -> Self {
        AccountChanges {
            name: req.name.map(|n| n.trim().to_string()),
            email: req.email.map(|e| e.trim().to_string()),
            role: Some(AccountRole::from_admin_flag(req.is_admin.unwrap_or(false))),
        }
    }
}

/// Bulk lifecycle request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkRequest {
    /// Target account IDs as submitted.
    #[validate(length(min = 1, message = "At least one id is required"))]
    pub ids: Vec<String>,
    /// Action to apply.
    pub action: BulkActionKind,
}

impl BulkRequest {
    /// Split `ids` into parsed account ids and the ones that cannot name
    /// any account.
    pub fn partition_ids(&self) -> (Vec<AccountId>, Vec<String>) {
        let mut parsed = Vec::with_capacity(self.ids.len());
        let mut unresolved = Vec::new();
        for raw in &self.ids {
            match parse_account_id(raw) {
                Ok(id) => parsed.push(id),
                Err(_) => unresolved.push(raw.clone()),
            }
        }
        (parsed, unresolved)
    }
}
