//! Explicit session credential store.
//!
//! The backend authenticates the console with an HTTP-only session cookie.
//! Instead of relying on a cookie store hidden inside the HTTP client, the
//! cookies live in a [`Session`] value that is handed to every request, so
//! the credential a call uses is always visible at the call site.

use std::fmt;
use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use url::Url;

/// Cookie jar for one signed-in (or not yet signed-in) console user.
///
/// Cloning is cheap and clones share the same jar.
#[derive(Clone, Default)]
pub struct Session {
    jar: Arc<Jar>,
}

impl Session {
    /// An empty, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a session from a stored cookie value, e.g. one exported after a
    /// previous login.
    pub fn with_cookie(name: &str, value: &str, url: &Url) -> Self {
        let session = Self::new();
        session.insert(&format!("{name}={value}; Path=/"), url);
        session
    }

    /// Add a cookie in `Set-Cookie` syntax for `url`.
    pub fn insert(&self, cookie: &str, url: &Url) {
        self.jar.add_cookie_str(cookie, url);
    }

    /// `Cookie` header value to attach to a request for `url`.
    pub(crate) fn cookie_header(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.cookies(url)
    }

    /// Absorb `Set-Cookie` headers from a response for `url`.
    pub(crate) fn store<'a, I>(&self, set_cookies: I, url: &Url)
    where
        I: IntoIterator<Item = &'a HeaderValue>,
    {
        let mut headers = set_cookies.into_iter().peekable();
        if headers.peek().is_some() {
            self.jar.set_cookies(&mut headers, url);
        }
    }

    /// Current value of the named cookie for `url`.
    pub fn cookie_value(&self, name: &str, url: &Url) -> Option<String> {
        let header = self.cookie_header(url)?;
        let header = header.to_str().ok()?;
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }

    /// True when no cookie would be sent to `url`.
    pub fn is_empty_for(&self, url: &Url) -> bool {
        self.cookie_header(url).is_none()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
