//! Typed path parameter helpers.

use usergate_core::error::AppError;
use usergate_core::types::AccountId;

/// Parses an account ID from a path segment.
///
/// An id that cannot name any account is reported the same way as an id
/// that names a missing one.
pub fn parse_account_id(s: &str) -> Result<AccountId, AppError> {
    s.parse()
        .map_err(|_| AppError::not_found("User not found"))
}
