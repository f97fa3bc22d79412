//! Integration tests for sign-in, registration and sign-out.

use axum::http::StatusCode;
use serde_json::json;

use usergate_core::config::AppConfig;
use usergate_database::CredentialStore;
use usergate_entity::AccountRole;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_register_creates_standard_account_and_sets_cookie() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/users/register",
            Some(json!({
                "name": "John Genji",
                "email": "johngenji@mail.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["email"], "johngenji@mail.com");
    assert_eq!(response.body["isAdmin"], false);
    assert_eq!(response.body["isBlocked"], false);
    assert!(!response.body["lastAuthenticatedAt"].is_null());
    assert!(!response.raw.contains("password"));

    let cookie = response.set_cookies.first().expect("cookie set");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=2592000"));
    assert!(response.session_cookie().is_some_and(|v| !v.is_empty()));
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.create_account("Ching Chang", "chingchang@mail.com", AccountRole::Standard)
        .await;

    let response = app
        .request(
            "POST",
            "/api/users/register",
            Some(json!({
                "name": "Another",
                "email": "ChingChang@mail.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn test_register_short_password_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/users/register",
            Some(json!({ "name": "A", "email": "a@mail.com", "password": "123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_authenticate_success_updates_last_authenticated() {
    let app = TestApp::new();
    let account = app
        .create_account("John Genji user", "johngenji@mail.com", AccountRole::Standard)
        .await;
    assert!(account.last_authenticated_at.is_none());

    let token = app.login("johngenji@mail.com").await;
    assert!(!token.is_empty());

    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], account.id.to_string());
    assert_eq!(response.body["name"], "John Genji user");

    let stored = app.state.store.find_by_id(account.id).await.unwrap().unwrap();
    assert!(stored.last_authenticated_at.is_some());
}

#[tokio::test]
async fn test_authenticate_wrong_password() {
    let app = TestApp::new();
    app.create_account("A", "a@mail.com", AccountRole::Standard)
        .await;

    let response = app
        .request(
            "POST",
            "/api/users/auth",
            Some(json!({ "email": "a@mail.com", "password": "wrong-password" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "INVALID_CREDENTIALS");
    assert_eq!(response.body["forceLogout"], false);
    assert!(response.set_cookies.is_empty());
}

#[tokio::test]
async fn test_authenticate_unknown_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/users/auth",
            Some(json!({ "email": "nobody@mail.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_blocked_account_cannot_sign_in() {
    let app = TestApp::new();
    let account = app
        .create_account("A", "a@mail.com", AccountRole::Standard)
        .await;
    app.block(&account).await;

    let response = app
        .request(
            "POST",
            "/api/users/auth",
            Some(json!({ "email": "a@mail.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "account blocked");
    assert_eq!(response.body["forceLogout"], true);
    // only the clearing cookie, never a token
    assert!(response.clears_session());
    assert!(response.session_cookie().is_some_and(|v| v.is_empty()));
}

#[tokio::test]
async fn test_missing_token_forces_logout() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/users/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "token missing");
    assert_eq!(response.body["forceLogout"], true);
    assert!(response.clears_session());
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/users/me", None, Some("not.a.token"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "invalid token");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new();
    app.create_account("A", "a@mail.com", AccountRole::Standard)
        .await;
    let token = app.login("a@mail.com").await;

    let response = app
        .request("POST", "/api/users/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.clears_session());

    // without revocation the token itself stays valid until expiry
    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    // logout is public
    let response = app.request("POST", "/api/users/logout", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_revokes_token_when_enabled() {
    let mut config = AppConfig::default();
    config.auth.revoke_on_logout = true;
    let app = TestApp::with_config(config);
    app.create_account("A", "a@mail.com", AccountRole::Standard)
        .await;
    let token = app.login("a@mail.com").await;

    app.request("POST", "/api/users/logout", None, Some(&token))
        .await;

    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "invalid token");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"], "connected");
}
