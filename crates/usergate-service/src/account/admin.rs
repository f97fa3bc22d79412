//! Read-side admin queries.

use std::sync::Arc;

use usergate_core::error::AppError;
use usergate_core::result::AppResult;
use usergate_core::types::AccountId;
use usergate_database::CredentialStore;
use usergate_entity::Account;

/// Lists and fetches accounts for admins.
#[derive(Clone)]
pub struct AdminAccountService {
    store: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for AdminAccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccountService").finish_non_exhaustive()
    }
}

impl AdminAccountService {
    /// Creates a new admin account service.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Every account, oldest first.
    pub async fn list_accounts(&self) -> AppResult<Vec<Account>> {
        self.store.list().await
    }

    /// A single account by ID.
    pub async fn get_account(&self, id: AccountId) -> AppResult<Account> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Store liveness probe.
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
