//! Session handlers: sign-in, registration, sign-out, current principal.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use usergate_core::error::AppError;
use usergate_service::Operation;

use crate::dto::request::{AuthenticateRequest, RegisterRequest, validate_request};
use crate::dto::response::{AccountView, MessageResponse, PrincipalView};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/users/auth
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<AuthenticateRequest>,
) -> Result<(CookieJar, Json<AccountView>), AppError> {
    validate_request(&req)?;
    let signed_in = state
        .sessions
        .authenticate(req.email.trim(), &req.password)
        .await?;

    let jar = jar.add(state.cookies.issue(signed_in.token.token));
    Ok((jar, Json(AccountView::from(&signed_in.account))))
}

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<AccountView>), AppError> {
    validate_request(&req)?;
    let signed_in = state
        .sessions
        .register(&req.name, &req.email, &req.password)
        .await?;

    let jar = jar.add(state.cookies.issue(signed_in.token.token));
    Ok((
        StatusCode::CREATED,
        jar,
        Json(AccountView::from(&signed_in.account)),
    ))
}

/// POST /api/users/logout
///
/// Public: clears the cookie whether or not the session is still valid.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let token = state.cookies.read(&jar);
    state.sessions.logout(token.as_deref());

    (
        jar.add(state.cookies.expired()),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<PrincipalView>, AppError> {
    state
        .pipeline
        .authorize(auth.principal(), Operation::CurrentPrincipal)?;
    Ok(Json(PrincipalView::from(auth.principal())))
}
