//! # usergate-auth
//!
//! Token issuance and verification plus password handling for Usergate.
//!
//! ## Modules
//!
//! - `token`: signed session tokens, verification failures, and the
//!   optional logout revocation list
//! - `password`: Argon2id hashing and the registration password policy

pub mod password;
pub mod token;

pub use password::{PasswordHasher, PasswordValidator};
pub use token::{Claims, IssuedToken, TokenService, VerificationFailure};
