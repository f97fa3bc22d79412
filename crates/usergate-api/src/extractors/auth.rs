//! `AuthUser` extractor: reads the session cookie and resolves the principal.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use usergate_core::error::AppError;
use usergate_service::Principal;

use crate::state::AppState;

/// Authenticated caller available in handlers.
///
/// Only the authenticate step runs here; handlers apply the status and
/// role gates for their operation before touching any data.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    /// Returns the inner principal.
    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = state.cookies.read_headers(&parts.headers);
        let principal = state.pipeline.authenticate(token.as_deref()).await?;
        Ok(AuthUser(principal))
    }
}
