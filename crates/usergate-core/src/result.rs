//! Convenience result type alias for Usergate.

use crate::error::AppError;

/// A specialized `Result` type for Usergate operations.
pub type AppResult<T> = Result<T, AppError>;
