//! Route handlers organized by domain.

pub mod accounts;
pub mod auth;
pub mod bulk;
pub mod health;
