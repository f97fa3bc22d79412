//! Integration tests for admin account management.

use axum::http::StatusCode;
use serde_json::json;

use usergate_core::types::AccountId;
use usergate_database::CredentialStore;
use usergate_entity::{AccountRole, AccountStatus};

use crate::helpers::TestApp;

async fn admin_app() -> (TestApp, usergate_entity::Account, String) {
    let app = TestApp::new();
    let admin = app
        .create_account("Admin user", "admin@mail.com", AccountRole::Admin)
        .await;
    let token = app.login("admin@mail.com").await;
    (app, admin, token)
}

#[tokio::test]
async fn test_list_by_non_admin_forbidden() {
    let app = TestApp::new();
    app.create_account("User", "user@mail.com", AccountRole::Standard)
        .await;
    let token = app.login("user@mail.com").await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "not admin");
    assert_eq!(response.body["forceLogout"], false);
    assert!(!response.clears_session());
}

#[tokio::test]
async fn test_list_never_exposes_password_hash() {
    let (app, _, token) = admin_app().await;
    app.create_account("John Genji user", "johngenji@mail.com", AccountRole::Standard)
        .await;
    app.create_account("Ching Chang", "chingchang@mail.com", AccountRole::Standard)
        .await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let accounts = response.body.as_array().expect("array body");
    assert_eq!(accounts.len(), 3);
    assert_eq!(accounts[0]["email"], "admin@mail.com");
    assert!(!response.raw.contains("password"));
    assert!(!response.raw.contains("argon2"));
}

#[tokio::test]
async fn test_get_account_and_not_found() {
    let (app, _, token) = admin_app().await;
    let user = app
        .create_account("User", "user@mail.com", AccountRole::Standard)
        .await;

    let response = app
        .request("GET", &format!("/api/users/{}", user.id), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "User");

    let response = app
        .request(
            "GET",
            &format!("/api/users/{}", AccountId::new()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/api/users/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "User not found");
}

#[tokio::test]
async fn test_update_account_fields_and_role() {
    let (app, _, token) = admin_app().await;
    let user = app
        .create_account("User", "user@mail.com", AccountRole::Standard)
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{}", user.id),
            Some(json!({ "name": "Renamed", "email": "renamed@mail.com", "isAdmin": true })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Renamed");
    assert_eq!(response.body["email"], "renamed@mail.com");
    assert_eq!(response.body["isAdmin"], true);

    let stored = app.store.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.role, AccountRole::Admin);
}

#[tokio::test]
async fn test_update_without_admin_flag_demotes() {
    let (app, _, token) = admin_app().await;
    let other = app
        .create_account("Other admin", "other@mail.com", AccountRole::Admin)
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{}", other.id),
            Some(json!({ "name": "Renamed" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["isAdmin"], false);

    let stored = app.store.find_by_id(other.id).await.unwrap().unwrap();
    assert_eq!(stored.role, AccountRole::Standard);
    assert_eq!(stored.name, "Renamed");
}

#[tokio::test]
async fn test_update_email_in_use_conflicts() {
    let (app, _, token) = admin_app().await;
    let user = app
        .create_account("User", "user@mail.com", AccountRole::Standard)
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{}", user.id),
            Some(json!({ "email": "admin@mail.com" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_block_unblock_round_trip() {
    let (app, _, token) = admin_app().await;
    let user = app
        .create_account("User", "user@mail.com", AccountRole::Standard)
        .await;
    let block = format!("/api/users/{}/block", user.id);
    let unblock = format!("/api/users/{}/unblock", user.id);

    let response = app.request("PUT", &block, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["changed"], true);

    let response = app.request("PUT", &block, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["changed"], false);

    let response = app.request("PUT", &unblock, None, Some(&token)).await;
    assert_eq!(response.body["changed"], true);
    let response = app.request("PUT", &unblock, None, Some(&token)).await;
    assert_eq!(response.body["changed"], false);

    let stored = app.store.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.status, AccountStatus::Active);
}

#[tokio::test]
async fn test_self_deletion_refused() {
    let (app, admin, token) = admin_app().await;

    let response = app
        .request("DELETE", &format!("/api/users/{}", admin.id), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "SELF_DELETION");
    assert!(app.store.find_by_id(admin.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_deleted_account_loses_access() {
    let (app, _, token) = admin_app().await;
    let user = app
        .create_account("User", "user@mail.com", AccountRole::Standard)
        .await;
    let user_token = app.login("user@mail.com").await;

    let response = app
        .request("DELETE", &format!("/api/users/{}", user.id), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["changed"], true);

    let response = app
        .request("GET", "/api/users/me", None, Some(&user_token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "account no longer exists");
    assert!(response.clears_session());

    // the email is free again
    let response = app
        .request(
            "POST",
            "/api/users/register",
            Some(json!({ "name": "User", "email": "user@mail.com", "password": "123456789" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_blocked_admin_refused_for_lifecycle_but_can_list() {
    let (app, admin, token) = admin_app().await;
    let user = app
        .create_account("User", "user@mail.com", AccountRole::Standard)
        .await;
    app.block(&admin).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{}/block", user.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "account blocked");
    assert_eq!(response.body["forceLogout"], true);
    assert!(response.clears_session());

    let stored = app.store.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.status, AccountStatus::Active);

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
}
