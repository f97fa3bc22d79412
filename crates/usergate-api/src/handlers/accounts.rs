//! Admin account handlers.

use axum::Json;
use axum::extract::{Path, State};

use usergate_core::error::AppError;
use usergate_entity::AccountChanges;
use usergate_service::{Operation, TransitionOutcome};

use crate::dto::request::{UpdateAccountRequest, validate_request};
use crate::dto::response::{AccountView, LifecycleResponse};
use crate::extractors::{AuthUser, parse_account_id};
use crate::state::AppState;

/// GET /api/users
pub async fn list_accounts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<AccountView>>, AppError> {
    state.pipeline.authorize(&auth, Operation::ListAccounts)?;
    let accounts = state.admin.list_accounts().await?;
    Ok(Json(accounts.iter().map(AccountView::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<AccountView>, AppError> {
    state.pipeline.authorize(&auth, Operation::GetAccount)?;
    let id = parse_account_id(&id)?;
    let account = state.admin.get_account(id).await?;
    Ok(Json(AccountView::from(&account)))
}

/// PUT /api/users/{id}
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<AccountView>, AppError> {
    state.pipeline.authorize(&auth, Operation::UpdateAccount)?;
    validate_request(&req)?;
    let id = parse_account_id(&id)?;
    let account = state
        .lifecycle
        .update(&auth, id, AccountChanges::from(req))
        .await?;
    Ok(Json(AccountView::from(&account)))
}

/// DELETE /api/users/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<LifecycleResponse>, AppError> {
    state.pipeline.authorize(&auth, Operation::DeleteAccount)?;
    let id = parse_account_id(&id)?;
    let account = state.lifecycle.delete(&auth, id).await?;
    Ok(Json(LifecycleResponse {
        message: format!("{} has been deleted", account.name),
        changed: true,
    }))
}

/// PUT /api/users/{id}/block
pub async fn block_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<LifecycleResponse>, AppError> {
    state.pipeline.authorize(&auth, Operation::BlockAccount)?;
    let id = parse_account_id(&id)?;
    let outcome = state.lifecycle.block(&auth, id).await?;
    Ok(Json(transition_response(outcome, "User blocked", "User is already blocked")))
}

/// PUT /api/users/{id}/unblock
pub async fn unblock_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<LifecycleResponse>, AppError> {
    state.pipeline.authorize(&auth, Operation::UnblockAccount)?;
    let id = parse_account_id(&id)?;
    let outcome = state.lifecycle.unblock(&auth, id).await?;
    Ok(Json(transition_response(outcome, "User unblocked", "User is already active")))
}

fn transition_response(outcome: TransitionOutcome, applied: &str, noop: &str) -> LifecycleResponse {
    let message = match outcome {
        TransitionOutcome::Applied => applied,
        TransitionOutcome::NoOp => noop,
    };
    LifecycleResponse {
        message: message.to_string(),
        changed: outcome.changed(),
    }
}
