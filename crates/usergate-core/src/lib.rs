//! # usergate-core
//!
//! Core crate for Usergate. Contains configuration schemas, typed
//! identifiers, account domain events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Usergate crates.

pub mod config;
pub mod error;
pub mod events;
#[cfg(feature = "axum")]
pub mod http;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
