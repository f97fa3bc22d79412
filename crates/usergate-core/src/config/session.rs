//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// How the session cookie is attached to cross-site requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    /// Never sent cross-site.
    #[default]
    Strict,
    /// Sent on top-level navigations.
    Lax,
    /// Always sent; requires `secure`.
    None,
}

/// Session cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the cookie `Secure` (HTTPS only).
    #[serde(default)]
    pub secure: bool,
    /// SameSite attribute.
    #[serde(default)]
    pub same_site: SameSitePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secure: false,
            same_site: SameSitePolicy::default(),
        }
    }
}

fn default_cookie_name() -> String {
    "operation".to_string()
}
