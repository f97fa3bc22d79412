//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use usergate_auth::TokenService;
use usergate_core::config::AppConfig;
use usergate_database::CredentialStore;
use usergate_service::{
    AccountLifecycle, AdminAccountService, AuthPipeline, BulkActionReconciler, EventBus,
    SessionService,
};

use crate::cookies::SessionCookies;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Credential store (PostgreSQL or in-memory)
    pub store: Arc<dyn CredentialStore>,
    /// Domain event bus
    pub events: EventBus,
    /// Cancelled when the server begins shutting down
    pub shutdown: CancellationToken,

    // ── Auth ─────────────────────────────────────────────────
    /// Token issuance and verification
    pub tokens: Arc<TokenService>,
    /// Authenticate/authorize chain
    pub pipeline: Arc<AuthPipeline>,
    /// Session cookie builder
    pub cookies: Arc<SessionCookies>,

    // ── Services ─────────────────────────────────────────────
    /// Sign-in and registration
    pub sessions: Arc<SessionService>,
    /// Single-target lifecycle transitions
    pub lifecycle: Arc<AccountLifecycle>,
    /// Admin read queries
    pub admin: Arc<AdminAccountService>,
    /// Bulk lifecycle actions
    pub reconciler: Arc<BulkActionReconciler>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("backend", &self.config.database.backend)
            .field("cookies", &self.cookies)
            .finish_non_exhaustive()
    }
}
