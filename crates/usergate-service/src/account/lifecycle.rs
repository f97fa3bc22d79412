//! Guarded admin transitions on a single account.
//!
//! States are `Active` and `Blocked`; deletion removes the record and is
//! terminal. Every transition is one store write.

use std::sync::Arc;

use tracing::info;

use usergate_core::error::AppError;
use usergate_core::events::{AccountEvent, BulkActionKind};
use usergate_core::result::AppResult;
use usergate_core::types::AccountId;
use usergate_database::CredentialStore;
use usergate_entity::{Account, AccountChanges, AccountStatus};

use crate::context::Principal;
use crate::events::EventBus;

/// Result of a block or unblock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The state changed.
    Applied,
    /// The account was already in the requested state.
    NoOp,
}

impl TransitionOutcome {
    /// Whether the state changed.
    pub fn changed(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Applies block, unblock, delete and update to stored accounts.
#[derive(Clone)]
pub struct AccountLifecycle {
    store: Arc<dyn CredentialStore>,
    events: EventBus,
}

impl std::fmt::Debug for AccountLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountLifecycle").finish_non_exhaustive()
    }
}

impl AccountLifecycle {
    /// Creates a new lifecycle service.
    pub fn new(store: Arc<dyn CredentialStore>, events: EventBus) -> Self {
        Self { store, events }
    }

    async fn resolve(&self, id: AccountId) -> AppResult<Account> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Active to Blocked.
    pub async fn block(&self, caller: &Principal, target: AccountId) -> AppResult<TransitionOutcome> {
        let account = self.resolve(target).await?;
        self.set_status(caller.account_id, account, AccountStatus::Blocked)
            .await
    }

    /// Blocked to Active.
    pub async fn unblock(
        &self,
        caller: &Principal,
        target: AccountId,
    ) -> AppResult<TransitionOutcome> {
        let account = self.resolve(target).await?;
        self.set_status(caller.account_id, account, AccountStatus::Active)
            .await
    }

    /// Remove `target`. An admin can never delete their own account here.
    pub async fn delete(&self, caller: &Principal, target: AccountId) -> AppResult<Account> {
        if target == caller.account_id {
            return Err(AppError::self_deletion());
        }
        let account = self.resolve(target).await?;
        self.purge(caller.account_id, account).await
    }

    /// Change name, email, or role. No caller-versus-target restriction.
    pub async fn update(
        &self,
        caller: &Principal,
        target: AccountId,
        changes: AccountChanges,
    ) -> AppResult<Account> {
        let mut account = self.resolve(target).await?;

        if let Some(email) = &changes.email
            && let Some(owner) = self.store.find_by_email(email).await?
            && owner.id != account.id
        {
            return Err(AppError::conflict("Email is already in use"));
        }

        let changed_fields = changes.changed_fields(&account);
        changes.apply_to(&mut account);
        let updated = self.store.update(&account).await?;

        if !changed_fields.is_empty() {
            info!(
                admin_id = %caller.account_id,
                target_id = %target,
                fields = ?changed_fields,
                "Account updated by admin"
            );
            self.events.publish(
                Some(caller.account_id),
                AccountEvent::Updated {
                    account_id: target.into_uuid(),
                    changed_fields,
                },
            );
        }
        Ok(updated)
    }

    /// Apply a bulk action to an already-resolved account.
    ///
    /// Unlike [`AccountLifecycle::delete`] this does not refuse the caller's
    /// own account; the bulk path orders the caller last instead.
    pub async fn apply(
        &self,
        actor: AccountId,
        account: Account,
        action: BulkActionKind,
    ) -> AppResult<TransitionOutcome> {
        match action {
            BulkActionKind::Delete => {
                self.purge(actor, account).await?;
                Ok(TransitionOutcome::Applied)
            }
            BulkActionKind::Block => self.set_status(actor, account, AccountStatus::Blocked).await,
            BulkActionKind::Unblock => self.set_status(actor, account, AccountStatus::Active).await,
        }
    }

    async fn set_status(
        &self,
        actor: AccountId,
        mut account: Account,
        status: AccountStatus,
    ) -> AppResult<TransitionOutcome> {
        if account.status == status {
            return Ok(TransitionOutcome::NoOp);
        }
        account.status = status;
        self.store.update(&account).await?;

        info!(
            admin_id = %actor,
            target_id = %account.id,
            status = %status,
            "Account status changed"
        );
        let account_id = account.id.into_uuid();
        let event = match status {
            AccountStatus::Blocked => AccountEvent::Blocked { account_id },
            AccountStatus::Active => AccountEvent::Unblocked { account_id },
        };
        self.events.publish(Some(actor), event);
        Ok(TransitionOutcome::Applied)
    }

    async fn purge(&self, actor: AccountId, account: Account) -> AppResult<Account> {
        if !self.store.delete(account.id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(admin_id = %actor, target_id = %account.id, "Account deleted");
        self.events.publish(
            Some(actor),
            AccountEvent::Deleted {
                account_id: account.id.into_uuid(),
                email: account.email.clone(),
            },
        );
        Ok(account)
    }
}
