//! Signed session tokens.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod revocation;
pub mod service;

pub use claims::Claims;
pub use decoder::TokenDecoder;
pub use encoder::{IssuedToken, TokenEncoder};
pub use error::VerificationFailure;
pub use revocation::RevocationList;
pub use service::TokenService;
