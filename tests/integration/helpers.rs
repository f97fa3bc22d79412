//! Shared test helpers for integration tests.

use std::sync::{Arc, LazyLock};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use usergate_api::AppState;
use usergate_auth::PasswordHasher;
use usergate_core::config::AppConfig;
use usergate_database::{CredentialStore, MemoryCredentialStore};
use usergate_entity::{Account, AccountRole, AccountStatus, NewAccount};

/// Password used by every seeded test account.
pub const PASSWORD: &str = "123456789";

/// Hashing is slow; share one digest across all seeded accounts.
static PASSWORD_HASH: LazyLock<String> = LazyLock::new(|| {
    PasswordHasher::new()
        .hash_password(PASSWORD)
        .expect("Failed to hash test password")
});

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store backing the router, for direct inspection
    pub store: Arc<MemoryCredentialStore>,
    /// Shared application state
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new test application with `config`
    pub fn with_config(mut config: AppConfig) -> Self {
        config.auth.jwt_secret = "integration-test-secret".to_string();
        let store = Arc::new(MemoryCredentialStore::new());
        let state = usergate_api::build_state(config, store.clone());
        let router = usergate_api::build_app(state.clone());
        Self {
            router,
            store,
            state,
        }
    }

    /// Insert an active account with [`PASSWORD`]
    pub async fn create_account(&self, name: &str, email: &str, role: AccountRole) -> Account {
        self.store
            .create(&NewAccount {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: PASSWORD_HASH.clone(),
                role,
                last_authenticated_at: None,
            })
            .await
            .expect("Failed to create test account")
    }

    /// Flip an account to blocked directly in the store
    pub async fn block(&self, account: &Account) {
        let mut account = account.clone();
        account.status = AccountStatus::Blocked;
        self.store
            .update(&account)
            .await
            .expect("Failed to block test account");
    }

    /// Sign in and return the session token from the cookie
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/users/auth",
                Some(serde_json::json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response
            .session_cookie()
            .filter(|v| !v.is_empty())
            .expect("No session cookie set")
    }

    /// Make an HTTP request, sending `token` in the session cookie
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::COOKIE, format!("operation={token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let raw = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            raw,
            set_cookies,
        }
    }
}

/// Captured response
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Parsed JSON body, `Null` when not JSON
    pub body: Value,
    /// Body as text
    pub raw: String,
    /// Every `Set-Cookie` header value
    pub set_cookies: Vec<String>,
}

impl TestResponse {
    /// Value of the session cookie set by this response, if any
    pub fn session_cookie(&self) -> Option<String> {
        self.set_cookies.iter().find_map(|c| {
            let pair = c.split(';').next()?;
            pair.strip_prefix("operation=").map(str::to_string)
        })
    }

    /// Whether this response clears the session cookie
    pub fn clears_session(&self) -> bool {
        self.set_cookies
            .iter()
            .any(|c| c.starts_with("operation=;") && c.contains("1970"))
    }
}
