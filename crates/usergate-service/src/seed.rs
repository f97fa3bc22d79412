//! Fixture accounts for local development.

use std::sync::Arc;

use tracing::info;

use usergate_auth::PasswordHasher;
use usergate_core::result::AppResult;
use usergate_database::CredentialStore;
use usergate_entity::{Account, AccountRole, NewAccount};

/// Password shared by every fixture account.
pub const FIXTURE_PASSWORD: &str = "123456789";

/// A fixture account definition.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    /// Display name.
    pub name: &'static str,
    /// Login email.
    pub email: &'static str,
    /// Role.
    pub role: AccountRole,
}

/// One admin and two standard accounts.
pub const FIXTURES: [Fixture; 3] = [
    Fixture {
        name: "Admin user",
        email: "admin@mail.com",
        role: AccountRole::Admin,
    },
    Fixture {
        name: "John Genji user",
        email: "johngenji@mail.com",
        role: AccountRole::Standard,
    },
    Fixture {
        name: "Ching Chang",
        email: "chingchang@mail.com",
        role: AccountRole::Standard,
    },
];

/// Loads and wipes fixture data.
#[derive(Clone)]
pub struct Seeder {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for Seeder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seeder").finish_non_exhaustive()
    }
}

impl Seeder {
    /// Creates a new seeder.
    pub fn new(store: Arc<dyn CredentialStore>, hasher: Arc<PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// Wipe every account, then insert the fixtures.
    pub async fn import(&self) -> AppResult<Vec<Account>> {
        let removed = self.store.delete_all().await?;
        let password_hash = self.hasher.hash_password(FIXTURE_PASSWORD)?;

        let mut created = Vec::with_capacity(FIXTURES.len());
        for fixture in FIXTURES {
            let account = self
                .store
                .create(&NewAccount {
                    name: fixture.name.to_string(),
                    email: fixture.email.to_string(),
                    password_hash: password_hash.clone(),
                    role: fixture.role,
                    last_authenticated_at: None,
                })
                .await?;
            created.push(account);
        }

        info!(removed, created = created.len(), "Fixture accounts imported");
        Ok(created)
    }

    /// Wipe every account. Returns how many were removed.
    pub async fn destroy(&self) -> AppResult<u64> {
        let removed = self.store.delete_all().await?;
        info!(removed, "All accounts destroyed");
        Ok(removed)
    }
}
