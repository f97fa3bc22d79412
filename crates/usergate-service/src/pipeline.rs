//! Request admission: authenticate, then gate on account status and role.

use std::sync::Arc;

use tracing::warn;

use usergate_auth::TokenService;
use usergate_core::error::AppError;
use usergate_core::result::AppResult;
use usergate_database::CredentialStore;

use crate::context::Principal;

/// Operations exposed over HTTP, each with a fixed access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List every account.
    ListAccounts,
    /// Read one account.
    GetAccount,
    /// Change name, email, or role.
    UpdateAccount,
    /// Block one account.
    BlockAccount,
    /// Unblock one account.
    UnblockAccount,
    /// Delete one account.
    DeleteAccount,
    /// Apply delete, block, or unblock to many accounts.
    BulkAction,
    /// Describe the caller.
    CurrentPrincipal,
    /// End the session.
    Logout,
}

/// Which gates an operation passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Require a valid session token.
    pub authenticate: bool,
    /// Reject callers whose own account is blocked.
    pub blocked_check: bool,
    /// Reject non-admin callers.
    pub admin_check: bool,
}

impl Operation {
    /// The access policy for this operation.
    pub fn policy(self) -> AccessPolicy {
        let (authenticate, blocked_check, admin_check) = match self {
            Self::ListAccounts | Self::GetAccount | Self::UpdateAccount => (true, false, true),
            Self::BlockAccount | Self::UnblockAccount | Self::DeleteAccount | Self::BulkAction => {
                (true, true, true)
            }
            Self::CurrentPrincipal => (true, false, false),
            Self::Logout => (false, false, false),
        };
        AccessPolicy {
            authenticate,
            blocked_check,
            admin_check,
        }
    }
}

/// Short-circuiting admission chain run before every protected handler.
#[derive(Clone)]
pub struct AuthPipeline {
    tokens: Arc<TokenService>,
    store: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for AuthPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthPipeline").finish_non_exhaustive()
    }
}

impl AuthPipeline {
    /// Creates a new pipeline.
    pub fn new(tokens: Arc<TokenService>, store: Arc<dyn CredentialStore>) -> Self {
        Self { tokens, store }
    }

    /// Resolve the session token to a fresh principal.
    pub async fn authenticate(&self, token: Option<&str>) -> AppResult<Principal> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Err(AppError::unauthenticated("token missing"));
        };

        let account_id = self.tokens.verify(token).map_err(|failure| {
            warn!(reason = %failure, "Rejected session token");
            AppError::from(failure)
        })?;

        let account = self.store.find_by_id(account_id).await?.ok_or_else(|| {
            warn!(account_id = %account_id, "Session token for a missing account");
            AppError::unauthenticated("account no longer exists")
        })?;

        Ok(Principal::from(&account))
    }

    /// Apply the status and role gates for `operation`.
    ///
    /// The blocked check runs first, so a blocked admin is refused as
    /// blocked rather than let through the role gate.
    pub fn authorize(&self, principal: &Principal, operation: Operation) -> AppResult<()> {
        let policy = operation.policy();
        if policy.blocked_check && principal.is_blocked() {
            warn!(account_id = %principal.account_id, ?operation, "Blocked account refused");
            return Err(AppError::account_blocked());
        }
        if policy.admin_check && !principal.is_admin() {
            warn!(account_id = %principal.account_id, ?operation, "Non-admin refused");
            return Err(AppError::forbidden("not admin"));
        }
        Ok(())
    }

    /// Authenticate and authorize in one step.
    pub async fn admit(&self, token: Option<&str>, operation: Operation) -> AppResult<Principal> {
        let principal = self.authenticate(token).await?;
        self.authorize(&principal, operation)?;
        Ok(principal)
    }
}
