//! Durable account storage abstraction.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use usergate_core::config::{DatabaseBackend, DatabaseConfig};
use usergate_core::result::AppResult;
use usergate_core::types::AccountId;
use usergate_entity::{Account, NewAccount};

use crate::connection::DatabasePool;
use crate::migration::run_migrations;
use crate::repositories::{MemoryCredentialStore, PgCredentialStore};

/// Account persistence used by every service.
///
/// Each call is a single-record read or write; there are no multi-record
/// transactions. Email comparisons are case-insensitive and a duplicate
/// email on `create` or `update` fails with `Conflict`.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Find an account by primary key.
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// Find an account by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Insert a new active account.
    async fn create(&self, data: &NewAccount) -> AppResult<Account>;

    /// Overwrite the mutable fields of an existing account.
    ///
    /// Fails `NotFound` when the record no longer exists.
    async fn update(&self, account: &Account) -> AppResult<Account>;

    /// Remove an account. Returns `true` if a record was deleted.
    async fn delete(&self, id: AccountId) -> AppResult<bool>;

    /// All accounts, oldest first.
    async fn list(&self) -> AppResult<Vec<Account>>;

    /// Remove every account. Returns the number removed.
    async fn delete_all(&self) -> AppResult<u64>;

    /// Cheap liveness probe.
    async fn ping(&self) -> AppResult<()>;
}

/// Open the store selected by `config.backend`.
///
/// The PostgreSQL backend connects and applies pending migrations.
pub async fn open_store(config: &DatabaseConfig) -> AppResult<Arc<dyn CredentialStore>> {
    match config.backend {
        DatabaseBackend::Postgres => {
            let pool = DatabasePool::connect(config).await?;
            run_migrations(pool.pool()).await?;
            Ok(Arc::new(PgCredentialStore::new(pool.into_pool())))
        }
        DatabaseBackend::Memory => {
            info!("Using in-memory credential store; data is not persisted");
            Ok(Arc::new(MemoryCredentialStore::new()))
        }
    }
}
