//! Sign-in, registration and sign-out.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use usergate_auth::{IssuedToken, PasswordHasher, PasswordValidator, TokenService};
use usergate_core::error::AppError;
use usergate_core::events::AccountEvent;
use usergate_core::result::AppResult;
use usergate_database::CredentialStore;
use usergate_entity::{Account, AccountRole, NewAccount};

use crate::events::EventBus;

/// An account that just signed in, with its new session token.
#[derive(Debug, Clone)]
pub struct SignedIn {
    /// The signed-in account.
    pub account: Account,
    /// Token to place in the session cookie.
    pub token: IssuedToken,
}

/// Credential checks and session token issuance.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn CredentialStore>,
    tokens: Arc<TokenService>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    events: EventBus,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService").finish_non_exhaustive()
    }
}

impl SessionService {
    /// Creates a new session service.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        tokens: Arc<TokenService>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        events: EventBus,
    ) -> Self {
        Self {
            store,
            tokens,
            hasher,
            validator,
            events,
        }
    }

    /// Check `email`/`password` and start a session.
    ///
    /// A blocked account with the correct password is refused with
    /// `Forbidden` and no token is issued.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<SignedIn> {
        let Some(mut account) = self.store.find_by_email(email).await? else {
            warn!(email = %email, "Sign-in for unknown email");
            return Err(AppError::invalid_credentials());
        };

        if !self
            .hasher
            .verify_password(password, &account.password_hash)?
        {
            warn!(account_id = %account.id, "Sign-in with wrong password");
            return Err(AppError::invalid_credentials());
        }

        if account.is_blocked() {
            warn!(account_id = %account.id, "Sign-in refused for blocked account");
            return Err(AppError::account_blocked());
        }

        account.last_authenticated_at = Some(Utc::now());
        let account = self.store.update(&account).await?;
        let token = self.tokens.issue(account.id)?;

        info!(account_id = %account.id, "Account signed in");
        self.events.publish(
            Some(account.id),
            AccountEvent::Authenticated {
                account_id: account.id.into_uuid(),
            },
        );
        Ok(SignedIn { account, token })
    }

    /// Create an active standard account and start its session.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<SignedIn> {
        self.validator.validate(password)?;

        if self.store.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("User already exists"));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let account = self
            .store
            .create(&NewAccount {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password_hash,
                role: AccountRole::Standard,
                last_authenticated_at: Some(Utc::now()),
            })
            .await?;
        let token = self.tokens.issue(account.id)?;

        info!(account_id = %account.id, "Account registered");
        self.events.publish(
            Some(account.id),
            AccountEvent::Registered {
                account_id: account.id.into_uuid(),
                email: account.email.clone(),
            },
        );
        Ok(SignedIn { account, token })
    }

    /// End a session. Always succeeds; revokes the token when enabled.
    pub fn logout(&self, token: Option<&str>) {
        if let Some(token) = token
            && self.tokens.revoke(token)
        {
            info!("Session token revoked at logout");
        }
    }
}
