//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use usergate_core::error::AppError;
use usergate_core::types::{AccountId, TokenId};

use super::claims::Claims;

/// A freshly signed session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWT.
    pub token: String,
    /// Token ID.
    pub jti: TokenId,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Creates signed HS256 session tokens.
#[derive(Clone)]
pub struct TokenEncoder {
    encoding_key: EncodingKey,
    ttl: chrono::Duration,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder").field("ttl", &self.ttl).finish()
    }
}

impl TokenEncoder {
    /// Creates a new encoder from a signing secret and lifetime.
    pub fn new(secret: &[u8], ttl: chrono::Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Token lifetime.
    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Signs a token for `account_id`.
    pub fn issue(&self, account_id: AccountId) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let exp = now + self.ttl;

        let claims = Claims {
            sub: account_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: TokenId::new(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok(IssuedToken {
            token,
            jti: claims.jti,
            expires_at: exp,
        })
    }
}
