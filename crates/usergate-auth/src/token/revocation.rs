//! In-process list of tokens revoked at logout.

use chrono::Utc;
use dashmap::DashMap;

use usergate_core::types::TokenId;

/// Revoked token IDs mapped to their expiry (seconds since epoch).
///
/// Entries are dropped once the token would have expired anyway, so the
/// list never outgrows the set of live tokens.
#[derive(Debug, Default)]
pub struct RevocationList {
    entries: DashMap<TokenId, i64>,
}

impl RevocationList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `jti` as revoked until `exp`.
    pub fn revoke(&self, jti: TokenId, exp: i64) {
        self.purge_expired();
        self.entries.insert(jti, exp);
    }

    /// Whether `jti` was revoked.
    pub fn is_revoked(&self, jti: &TokenId) -> bool {
        self.entries.contains_key(jti)
    }

    /// Remove entries past their expiry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now().timestamp();
        let before = self.entries.len();
        self.entries.retain(|_, exp| *exp > now);
        before.saturating_sub(self.entries.len())
    }

    /// Number of tracked entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
