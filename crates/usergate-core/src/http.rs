//! HTTP mapping of `AppError`, enabled with the `axum` feature.
//!
//! Lives beside the error type so the `IntoResponse` impl is local to the
//! crate that owns `AppError`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Response extension marking that the client session must be cleared.
///
/// Picked up by the forced-logout middleware, which appends an expired
/// session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedLogout;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// The client must drop its session and return to sign-in.
    pub force_logout: bool,
}

/// HTTP status and error code for an error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
        ErrorKind::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
        ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::SelfDeletion => (StatusCode::FORBIDDEN, "SELF_DELETION"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = status_for(self.kind);

        let message = if status.is_server_error() {
            tracing::error!(kind = %self.kind, error = %self.message, "Internal server error");
            "Internal server error".to_string()
        } else {
            self.message
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
            force_logout: self.force_logout,
        };

        let mut response = (status, Json(body)).into_response();
        if self.force_logout {
            response.extensions_mut().insert(ForcedLogout);
        }
        response
    }
}
