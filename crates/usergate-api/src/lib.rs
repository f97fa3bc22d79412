//! # usergate-api
//!
//! HTTP API layer for Usergate built on Axum.
//!
//! Provides the `/api/users` endpoints, the session cookie adapter,
//! middleware (CORS, request logging, forced logout), extractors and DTOs.
//! Error responses come from `usergate_core::http`.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use cookies::SessionCookies;
pub use state::AppState;
