//! # usergate-entity
//!
//! Domain entity models for Usergate. Database entities derive
//! `sqlx::FromRow` so both store implementations share one shape.

pub mod account;

pub use account::{Account, AccountChanges, AccountRole, AccountStatus, NewAccount};
