//! Credential store implementations.

pub mod account;
pub mod memory;

pub use account::PgCredentialStore;
pub use memory::MemoryCredentialStore;
