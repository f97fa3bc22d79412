//! Account administration: single-target lifecycle and bulk actions.

pub mod admin;
pub mod bulk;
pub mod lifecycle;

pub use admin::AdminAccountService;
pub use bulk::{BulkActionOutcome, BulkActionReconciler, BulkActionRequest, SkipEntry, SkipKind};
pub use lifecycle::{AccountLifecycle, TransitionOutcome};
