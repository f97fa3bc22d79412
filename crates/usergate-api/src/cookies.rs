//! Session cookie adapter: writes and clears the token cookie.

use axum::http::{HeaderMap, HeaderValue};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use usergate_core::config::{SameSitePolicy, SessionConfig};

/// Builds the session cookie from configuration.
///
/// The cookie is `HttpOnly`, scoped to `/`, and lives as long as the token
/// it carries. Clearing empties the value and sets the expiry to the epoch.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    name: String,
    secure: bool,
    same_site: SameSite,
    max_age: time::Duration,
}

impl SessionCookies {
    /// Build from session configuration and the token lifetime.
    pub fn new(config: &SessionConfig, token_ttl: chrono::Duration) -> Self {
        let same_site = match config.same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::Lax => SameSite::Lax,
            SameSitePolicy::None => SameSite::None,
        };
        Self {
            name: config.cookie_name.clone(),
            secure: config.secure,
            same_site,
            max_age: time::Duration::seconds(token_ttl.num_seconds()),
        }
    }

    /// Cookie name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cookie carrying a freshly issued token.
    pub fn issue(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.name.clone(), token))
            .http_only(true)
            .path("/")
            .same_site(self.same_site)
            .secure(self.secure)
            .max_age(self.max_age)
            .build()
    }

    /// Cookie that makes the browser drop the session.
    pub fn expired(&self) -> Cookie<'static> {
        Cookie::build((self.name.clone(), String::new()))
            .http_only(true)
            .path("/")
            .same_site(self.same_site)
            .secure(self.secure)
            .expires(time::OffsetDateTime::UNIX_EPOCH)
            .build()
    }

    /// Token from the request cookie jar, if present and non-empty.
    pub fn read(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Token from raw request headers.
    pub fn read_headers(&self, headers: &HeaderMap) -> Option<String> {
        self.read(&CookieJar::from_headers(headers))
    }

    /// `Set-Cookie` header value clearing the session.
    pub fn expired_header(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.expired().to_string()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookies(secure: bool) -> SessionCookies {
        SessionCookies::new(
            &SessionConfig {
                secure,
                ..SessionConfig::default()
            },
            chrono::Duration::days(30),
        )
    }

    #[test]
    fn test_issued_cookie_attributes() {
        let cookie = cookies(false).issue("abc".to_string());
        assert_eq!(cookie.name(), "operation");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(30)));
        assert_ne!(cookie.secure(), Some(true));
        assert_eq!(cookies(true).issue("x".to_string()).secure(), Some(true));
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let header = cookies(false).expired_header().unwrap();
        let text = header.to_str().unwrap();
        assert!(text.starts_with("operation=;"));
        assert!(text.contains("HttpOnly"));
        assert!(text.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn test_read_ignores_empty_value() {
        let cookies = cookies(false);
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("operation=; other=1"));
        assert_eq!(cookies.read_headers(&headers), None);

        headers.insert("cookie", HeaderValue::from_static("operation=tok"));
        assert_eq!(cookies.read_headers(&headers), Some("tok".to_string()));
    }
}
