//! JWT claims carried by a session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use usergate_core::types::{AccountId, TokenId};

/// JWT claims payload embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the account ID.
    pub sub: AccountId,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token ID, used by the revocation list.
    pub jti: TokenId,
}

impl Claims {
    /// Returns the account ID from the subject claim.
    pub fn account_id(&self) -> AccountId {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
