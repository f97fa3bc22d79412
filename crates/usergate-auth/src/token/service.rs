//! Token issuance and verification facade.

use tracing::debug;

use usergate_core::config::AuthConfig;
use usergate_core::error::AppError;
use usergate_core::types::AccountId;

use super::claims::Claims;
use super::decoder::TokenDecoder;
use super::encoder::{IssuedToken, TokenEncoder};
use super::error::VerificationFailure;
use super::revocation::RevocationList;

const MAX_TTL_DAYS: i64 = 3650;

/// Issues and verifies session tokens.
///
/// Verification is a pure signature and expiry check unless revocation is
/// enabled, in which case tokens presented at logout are also rejected.
#[derive(Debug)]
pub struct TokenService {
    encoder: TokenEncoder,
    decoder: TokenDecoder,
    revocations: Option<RevocationList>,
}

impl TokenService {
    /// Build from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        let days = i64::try_from(config.token_ttl_days)
            .unwrap_or(MAX_TTL_DAYS)
            .min(MAX_TTL_DAYS);
        let ttl = chrono::Duration::days(days);
        Self {
            encoder: TokenEncoder::new(secret, ttl),
            decoder: TokenDecoder::new(secret),
            revocations: config.revoke_on_logout.then(RevocationList::new),
        }
    }

    /// Token lifetime, used for the cookie `Max-Age`.
    pub fn ttl(&self) -> chrono::Duration {
        self.encoder.ttl()
    }

    /// Sign a new token bound to `account_id`.
    pub fn issue(&self, account_id: AccountId) -> Result<IssuedToken, AppError> {
        self.encoder.issue(account_id)
    }

    /// Resolve a token to the account it was issued for.
    pub fn verify(&self, token: &str) -> Result<AccountId, VerificationFailure> {
        self.verify_claims(token).map(|claims| claims.account_id())
    }

    /// Validate a token and return its full claims.
    pub fn verify_claims(&self, token: &str) -> Result<Claims, VerificationFailure> {
        let claims = self.decoder.decode(token)?;
        if let Some(revocations) = &self.revocations
            && revocations.is_revoked(&claims.jti)
        {
            return Err(VerificationFailure::Unknown);
        }
        Ok(claims)
    }

    /// Revoke a token presented at logout.
    ///
    /// Returns `true` when the token was valid and is now revoked. A no-op
    /// when revocation is disabled or the token does not verify.
    pub fn revoke(&self, token: &str) -> bool {
        let Some(revocations) = &self.revocations else {
            return false;
        };
        match self.decoder.decode(token) {
            Ok(claims) => {
                revocations.revoke(claims.jti, claims.exp);
                debug!(jti = %claims.jti, account_id = %claims.sub, "Token revoked");
                true
            }
            Err(_) => false,
        }
    }

    /// Whether logout revocation is enabled.
    pub fn revocation_enabled(&self) -> bool {
        self.revocations.is_some()
    }
}
