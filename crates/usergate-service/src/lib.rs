//! # usergate-service
//!
//! Business logic for Usergate. Services follow constructor injection:
//! every dependency is handed in at construction time as an `Arc`.

pub mod account;
pub mod context;
pub mod events;
pub mod pipeline;
pub mod seed;
pub mod session;

pub use account::{
    AccountLifecycle, AdminAccountService, BulkActionOutcome, BulkActionReconciler,
    BulkActionRequest, SkipEntry, SkipKind, TransitionOutcome,
};
pub use context::Principal;
pub use events::EventBus;
pub use pipeline::{AccessPolicy, AuthPipeline, Operation};
pub use seed::Seeder;
pub use session::{SessionService, SignedIn};
