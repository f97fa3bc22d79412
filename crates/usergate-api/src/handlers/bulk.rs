//! Bulk lifecycle handler.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use tracing::info;

use usergate_core::error::AppError;
use usergate_core::http::ForcedLogout;
use usergate_service::{BulkActionRequest, Operation};

use crate::dto::request::{BulkRequest, validate_request};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/users/bulk
///
/// Always 200 with the aggregated outcome, even when every target was
/// skipped. When the caller blocked or deleted their own account the
/// response also clears their session cookie.
pub async fn bulk_action(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<BulkRequest>,
) -> Result<Response, AppError> {
    state.pipeline.authorize(&auth, Operation::BulkAction)?;
    validate_request(&req)?;

    let (target_ids, unresolved_ids) = req.partition_ids();
    let request = BulkActionRequest {
        target_ids,
        unresolved_ids,
        action: req.action,
        caller_id: auth.account_id,
    };
    let outcome = state
        .reconciler
        .reconcile_until(&request, &state.shutdown)
        .await;

    info!(
        admin_id = %auth.account_id,
        action = %request.action,
        applied = outcome.applied_count,
        skipped = outcome.skipped_count,
        "Bulk action finished"
    );

    let terminated = outcome.caller_session_terminated;
    let mut response = Json(outcome).into_response();
    if terminated {
        response.extensions_mut().insert(ForcedLogout);
    }
    Ok(response)
}
