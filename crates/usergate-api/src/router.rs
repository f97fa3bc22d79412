//! Route definitions for the Usergate HTTP API.
//!
//! Account routes are mounted under `/api/users`; the liveness probe sits
//! at `/health`. The router receives `AppState` and passes it to all
//! handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api/users", user_routes())
        .route("/health", get(handlers::health::health))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session_cookie::clear_on_forced_logout,
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Session and admin account endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/auth", post(handlers::auth::authenticate))
        .route("/register", post(handlers::auth::register))
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::me))
        .route("/bulk", post(handlers::bulk::bulk_action))
        .route("/", get(handlers::accounts::list_accounts))
        .route(
            "/{id}",
            get(handlers::accounts::get_account)
                .put(handlers::accounts::update_account)
                .delete(handlers::accounts::delete_account),
        )
        .route("/{id}/block", put(handlers::accounts::block_account))
        .route("/{id}/unblock", put(handlers::accounts::unblock_account))
}
