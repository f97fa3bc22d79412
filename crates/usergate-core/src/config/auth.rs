//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token lifetime in days.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_days: u64,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Remember tokens presented at logout and reject them until they expire.
    #[serde(default)]
    pub revoke_on_logout: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_days: default_token_ttl(),
            password_min_length: default_password_min(),
            revoke_on_logout: false,
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    30
}

fn default_password_min() -> usize {
    6
}
