//! Integration tests for bulk lifecycle actions.

use axum::http::StatusCode;
use serde_json::json;

use usergate_core::types::AccountId;
use usergate_database::CredentialStore;
use usergate_entity::{AccountRole, AccountStatus};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_bulk_delete_protects_admins() {
    let app = TestApp::new();
    let caller = app
        .create_account("Admin user", "admin@mail.com", AccountRole::Admin)
        .await;
    let other_admin = app
        .create_account("Second admin", "second@mail.com", AccountRole::Admin)
        .await;
    let user1 = app
        .create_account("John Genji user", "johngenji@mail.com", AccountRole::Standard)
        .await;
    let user2 = app
        .create_account("Ching Chang", "chingchang@mail.com", AccountRole::Standard)
        .await;
    let token = app.login("admin@mail.com").await;

    let response = app
        .request(
            "POST",
            "/api/users/bulk",
            Some(json!({
                "ids": [caller.id, other_admin.id, user1.id, user2.id, user1.id],
                "action": "delete",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["appliedCount"], 2);
    assert_eq!(response.body["skippedCount"], 2);
    assert_eq!(response.body["policySkips"], 2);
    assert_eq!(response.body["callerSessionTerminated"], false);
    assert!(!response.clears_session());

    // the caller is processed last
    let skips = response.body["skips"].as_array().unwrap();
    assert_eq!(skips[0]["targetId"], other_admin.id.to_string());
    assert_eq!(skips[0]["kind"], "policy");
    assert_eq!(skips[0]["reason"], "Second admin is an admin and cannot be deleted");
    assert_eq!(skips[1]["targetId"], caller.id.to_string());

    assert!(app.store.find_by_id(user1.id).await.unwrap().is_none());
    assert!(app.store.find_by_id(user2.id).await.unwrap().is_none());
    assert!(app.store.find_by_id(caller.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_bulk_block_reports_noop_and_missing() {
    let app = TestApp::new();
    app.create_account("Admin user", "admin@mail.com", AccountRole::Admin)
        .await;
    let blocked = app
        .create_account("Blocked", "blocked@mail.com", AccountRole::Standard)
        .await;
    let active = app
        .create_account("Active", "active@mail.com", AccountRole::Standard)
        .await;
    app.block(&blocked).await;
    let token = app.login("admin@mail.com").await;
    let missing = AccountId::new();

    let response = app
        .request(
            "POST",
            "/api/users/bulk",
            Some(json!({
                "ids": [blocked.id, missing, active.id],
                "action": "block",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["appliedCount"], 1);
    assert_eq!(response.body["noopSkips"], 1);
    assert_eq!(response.body["errorSkips"], 1);

    let skips = response.body["skips"].as_array().unwrap();
    assert_eq!(skips[0]["reason"], "Blocked is already blocked");
    assert_eq!(skips[0]["kind"], "noop");
    assert_eq!(skips[1]["reason"], "not found");
    assert_eq!(skips[1]["kind"], "error");

    let stored = app.store.find_by_id(active.id).await.unwrap().unwrap();
    assert_eq!(stored.status, AccountStatus::Blocked);
}

#[tokio::test]
async fn test_bulk_malformed_id_is_error_skip() {
    let app = TestApp::new();
    app.create_account("Admin user", "admin@mail.com", AccountRole::Admin)
        .await;
    let active = app
        .create_account("Active", "active@mail.com", AccountRole::Standard)
        .await;
    let token = app.login("admin@mail.com").await;

    let response = app
        .request(
            "POST",
            "/api/users/bulk",
            Some(json!({
                "ids": [active.id, "64f1c0ffee"],
                "action": "block",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["appliedCount"], 1);
    assert_eq!(response.body["errorSkips"], 1);

    let skips = response.body["skips"].as_array().unwrap();
    assert_eq!(skips[0]["targetId"], "64f1c0ffee");
    assert_eq!(skips[0]["reason"], "not found");
    assert_eq!(skips[0]["kind"], "error");

    let stored = app.store.find_by_id(active.id).await.unwrap().unwrap();
    assert_eq!(stored.status, AccountStatus::Blocked);
}

#[tokio::test]
async fn test_bulk_all_skipped_still_ok() {
    let app = TestApp::new();
    let user = app
        .create_account("Active", "active@mail.com", AccountRole::Standard)
        .await;
    app.create_account("Admin user", "admin@mail.com", AccountRole::Admin)
        .await;
    let token = app.login("admin@mail.com").await;

    let response = app
        .request(
            "POST",
            "/api/users/bulk",
            Some(json!({ "ids": [user.id], "action": "unblock" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["appliedCount"], 0);
    assert_eq!(response.body["skips"][0]["reason"], "Active is already active");
}

#[tokio::test]
async fn test_bulk_rejects_unknown_action_and_empty_ids() {
    let app = TestApp::new();
    let user = app
        .create_account("User", "user@mail.com", AccountRole::Standard)
        .await;
    app.create_account("Admin user", "admin@mail.com", AccountRole::Admin)
        .await;
    let token = app.login("admin@mail.com").await;

    let response = app
        .request(
            "POST",
            "/api/users/bulk",
            Some(json!({ "ids": [user.id], "action": "promote" })),
            Some(&token),
        )
        .await;
    assert!(response.status.is_client_error());

    let response = app
        .request(
            "POST",
            "/api/users/bulk",
            Some(json!({ "ids": [], "action": "block" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bulk_by_non_admin_forbidden() {
    let app = TestApp::new();
    let other = app
        .create_account("Other", "other@mail.com", AccountRole::Standard)
        .await;
    app.create_account("User", "user@mail.com", AccountRole::Standard)
        .await;
    let token = app.login("user@mail.com").await;

    let response = app
        .request(
            "POST",
            "/api/users/bulk",
            Some(json!({ "ids": [other.id], "action": "delete" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.store.find_by_id(other.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_bulk_stops_after_shutdown() {
    let app = TestApp::new();
    let user = app
        .create_account("User", "user@mail.com", AccountRole::Standard)
        .await;
    app.create_account("Admin user", "admin@mail.com", AccountRole::Admin)
        .await;
    let token = app.login("admin@mail.com").await;
    app.state.shutdown.cancel();

    let response = app
        .request(
            "POST",
            "/api/users/bulk",
            Some(json!({ "ids": [user.id], "action": "block" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["skips"][0]["reason"], "cancelled");
    let stored = app.store.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.status, AccountStatus::Active);
}
