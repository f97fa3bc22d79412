//! # usergate-database
//!
//! The [`CredentialStore`] abstraction over durable account storage, its
//! PostgreSQL and in-memory implementations, connection management, and
//! the embedded migration runner.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::{MemoryCredentialStore, PgCredentialStore};
pub use store::{CredentialStore, open_store};
