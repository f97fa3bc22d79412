//! Clears the session cookie on forced-logout responses.

use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use usergate_core::http::ForcedLogout;

use crate::state::AppState;

/// Appends an expired session cookie to any response marked [`ForcedLogout`].
pub async fn clear_on_forced_logout(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    if response.extensions_mut().remove::<ForcedLogout>().is_some()
        && let Some(cookie) = state.cookies.expired_header()
    {
        debug!(status = response.status().as_u16(), "Clearing session cookie");
        response.headers_mut().append(SET_COOKIE, cookie);
    }

    response
}
