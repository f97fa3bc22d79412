//! Token verification failures.

use thiserror::Error;

use usergate_core::error::AppError;

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerificationFailure {
    /// The token is past its expiry.
    #[error("token expired")]
    Expired,
    /// Signature or structure did not validate.
    #[error("token malformed")]
    Malformed,
    /// Any other rejection, including revoked tokens.
    #[error("token rejected")]
    Unknown,
}

impl From<VerificationFailure> for AppError {
    fn from(_: VerificationFailure) -> Self {
        AppError::unauthenticated("invalid token")
    }
}

impl From<jsonwebtoken::errors::Error> for VerificationFailure {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidToken
            | ErrorKind::InvalidSignature
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Self::Malformed,
            _ => Self::Unknown,
        }
    }
}
