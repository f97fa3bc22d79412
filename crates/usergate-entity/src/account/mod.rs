//! Account domain entities.

pub mod model;
pub mod role;
pub mod status;

pub use model::{Account, AccountChanges, NewAccount};
pub use role::AccountRole;
pub use status::AccountStatus;
