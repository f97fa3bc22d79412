//! Process-local credential store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use usergate_core::error::AppError;
use usergate_core::result::AppResult;
use usergate_core::types::AccountId;
use usergate_entity::{Account, AccountStatus, NewAccount};

use crate::store::CredentialStore;

/// Account store held in memory.
///
/// A secondary index maps lowercased emails to ids so uniqueness is
/// enforced atomically per email key.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    accounts: DashMap<AccountId, Account>,
    emails: DashMap<String, AccountId>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn email_key(email: &str) -> String {
        email.to_lowercase()
    }

    fn duplicate_email() -> AppError {
        AppError::conflict("An account with this email already exists")
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.accounts.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let Some(id) = self.emails.get(&Self::email_key(email)).map(|e| *e.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn create(&self, data: &NewAccount) -> AppResult<Account> {
        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            name: data.name.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            status: AccountStatus::Active,
            last_authenticated_at: data.last_authenticated_at,
            created_at: now,
            updated_at: now,
        };

        match self.emails.entry(Self::email_key(&data.email)) {
            Entry::Occupied(_) => return Err(Self::duplicate_email()),
            Entry::Vacant(slot) => {
                slot.insert(account.id);
            }
        }
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: &Account) -> AppResult<Account> {
        // Lock order is accounts then emails, matching `delete`.
        let mut stored = self
            .accounts
            .get_mut(&account.id)
            .ok_or_else(|| AppError::not_found(format!("Account {} not found", account.id)))?;

        let old_key = Self::email_key(&stored.email);
        let new_key = Self::email_key(&account.email);
        if old_key != new_key {
            match self.emails.entry(new_key) {
                Entry::Occupied(owner) if *owner.get() != account.id => {
                    return Err(Self::duplicate_email());
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    slot.insert(account.id);
                }
            }
            self.emails.remove_if(&old_key, |_, owner| *owner == account.id);
        }

        stored.name = account.name.clone();
        stored.email = account.email.clone();
        stored.role = account.role;
        stored.status = account.status;
        stored.last_authenticated_at = account.last_authenticated_at;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        match self.accounts.remove(&id) {
            Some((_, account)) => {
                self.emails
                    .remove_if(&Self::email_key(&account.email), |_, owner| *owner == id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by_key(|a| a.created_at);
        Ok(accounts)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let count = self.accounts.len() as u64;
        self.accounts.clear();
        self.emails.clear();
        Ok(count)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usergate_core::error::ErrorKind;
    use usergate_entity::AccountRole;

    fn new_account(name: &str, email: &str) -> NewAccount {
        NewAccount {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: AccountRole::Standard,
            last_authenticated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_case_insensitive() {
        let store = MemoryCredentialStore::new();
        let created = store
            .create(&new_account("John", "John@Mail.com"))
            .await
            .unwrap();
        assert_eq!(created.status, AccountStatus::Active);

        let found = store.find_by_email("john@mail.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryCredentialStore::new();
        store.create(&new_account("A", "a@mail.com")).await.unwrap();
        let err = store
            .create(&new_account("B", "A@MAIL.COM"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_moves_email_index() {
        let store = MemoryCredentialStore::new();
        let mut account = store.create(&new_account("A", "a@mail.com")).await.unwrap();
        account.email = "new@mail.com".to_string();
        store.update(&account).await.unwrap();

        assert!(store.find_by_email("a@mail.com").await.unwrap().is_none());
        assert!(store.find_by_email("new@mail.com").await.unwrap().is_some());
        store.create(&new_account("C", "a@mail.com")).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let store = MemoryCredentialStore::new();
        store.create(&new_account("A", "a@mail.com")).await.unwrap();
        let mut b = store.create(&new_account("B", "b@mail.com")).await.unwrap();
        b.email = "a@mail.com".to_string();
        let err = store.update(&b).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(store.find_by_email("b@mail.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryCredentialStore::new();
        let mut account = store.create(&new_account("A", "a@mail.com")).await.unwrap();
        store.delete(account.id).await.unwrap();
        account.name = "gone".to_string();
        let err = store.update(&account).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_of_deleted_account_leaves_email_free() {
        let store = MemoryCredentialStore::new();
        let mut account = store.create(&new_account("A", "a@mail.com")).await.unwrap();
        store.delete(account.id).await.unwrap();

        account.email = "moved@mail.com".to_string();
        let err = store.update(&account).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        assert!(store.find_by_email("moved@mail.com").await.unwrap().is_none());
        store.create(&new_account("B", "moved@mail.com")).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_frees_email() {
        let store = MemoryCredentialStore::new();
        let account = store.create(&new_account("A", "a@mail.com")).await.unwrap();
        assert!(store.delete(account.id).await.unwrap());
        assert!(!store.delete(account.id).await.unwrap());
        store.create(&new_account("A2", "a@mail.com")).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_all() {
        let store = MemoryCredentialStore::new();
        store.create(&new_account("A", "a@mail.com")).await.unwrap();
        store.create(&new_account("B", "b@mail.com")).await.unwrap();
        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert!(store.list().await.unwrap().is_empty());
    }
}
