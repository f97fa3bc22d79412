//! Application builder: wires services, router and state into an Axum app.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use usergate_auth::{PasswordHasher, PasswordValidator, TokenService};
use usergate_core::config::AppConfig;
use usergate_core::error::AppError;
use usergate_database::{CredentialStore, open_store};
use usergate_service::{
    AccountLifecycle, AdminAccountService, AuthPipeline, BulkActionReconciler, EventBus,
    SessionService,
};

use crate::cookies::SessionCookies;
use crate::router::build_router;
use crate::state::AppState;

/// Construct every service over `store` and bundle them into [`AppState`].
pub fn build_state(config: AppConfig, store: Arc<dyn CredentialStore>) -> AppState {
    let events = EventBus::default();

    let tokens = Arc::new(TokenService::new(&config.auth));
    let hasher = Arc::new(PasswordHasher::new());
    let validator = Arc::new(PasswordValidator::new(&config.auth));
    let cookies = Arc::new(SessionCookies::new(&config.session, tokens.ttl()));

    let pipeline = Arc::new(AuthPipeline::new(Arc::clone(&tokens), Arc::clone(&store)));
    let sessions = Arc::new(SessionService::new(
        Arc::clone(&store),
        Arc::clone(&tokens),
        hasher,
        validator,
        events.clone(),
    ));
    let lifecycle = Arc::new(AccountLifecycle::new(Arc::clone(&store), events.clone()));
    let admin = Arc::new(AdminAccountService::new(Arc::clone(&store)));
    let reconciler = Arc::new(BulkActionReconciler::new(
        Arc::clone(&store),
        Arc::clone(&lifecycle),
        events.clone(),
    ));

    AppState {
        config: Arc::new(config),
        store,
        events,
        shutdown: CancellationToken::new(),
        tokens,
        pipeline,
        cookies,
        sessions,
        lifecycle,
        admin,
        reconciler,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the Usergate server until `shutdown` fires or Ctrl+C is received.
pub async fn run_server(config: AppConfig, shutdown: CancellationToken) -> Result<(), AppError> {
    info!("Starting Usergate server...");

    let store = open_store(&config.database).await?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let mut state = build_state(config, store);
    state.shutdown = shutdown.clone();
    spawn_event_logger(&state.events, shutdown.clone());

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("Usergate server listening on {}", addr);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .into_future();

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = async {
            shutdown.cancelled().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed, dropping open connections");
        }
    }

    info!("Usergate server stopped");
    Ok(())
}

/// Log every domain event until shutdown.
fn spawn_event_logger(events: &EventBus, shutdown: CancellationToken) {
    let mut rx = events.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                received = rx.recv() => match received {
                    Ok(event) => info!(
                        event_id = %event.id,
                        event = event.payload.name(),
                        actor_id = ?event.actor_id,
                        "Domain event"
                    ),
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "Event logger lagged behind");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
        debug!("Event logger stopped");
    });
}

async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                shutdown.cancelled().await;
            }
        },
        _ = shutdown.cancelled() => {}
    }
    shutdown.cancel();
}
