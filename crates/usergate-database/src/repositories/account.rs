//! PostgreSQL credential store.

use async_trait::async_trait;
use sqlx::PgPool;

use usergate_core::error::{AppError, ErrorKind};
use usergate_core::result::AppResult;
use usergate_core::types::AccountId;
use usergate_entity::{Account, NewAccount};

use crate::store::CredentialStore;

/// Account repository backed by the `accounts` table.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    /// Create a new store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, context: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::conflict("An account with this email already exists")
        }
        _ => AppError::with_source(ErrorKind::Database, context, e),
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by id", e)
            })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
            })
    }

    async fn create(&self, data: &NewAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (name, email, password_hash, role, last_authenticated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(data.last_authenticated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create account"))
    }

    async fn update(&self, account: &Account) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET name = $2, email = $3, role = $4, status = $5, \
                                 last_authenticated_at = $6, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(account.role)
        .bind(account.status)
        .bind(account.last_authenticated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update account"))?
        .ok_or_else(|| AppError::not_found(format!("Account {} not found", account.id)))
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete account", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM accounts")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear accounts", e))?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
