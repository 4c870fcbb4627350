//! Console locations and login redirects.

use std::fmt;

use url::form_urlencoded;

/// Query parameter carrying the post-login return location.
pub const REDIRECT_PARAM: &str = "redirect";

/// A local console location: path plus optional query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Option<String>,
}

impl Location {
    /// Parse a local location such as `/requests?provider=openai`.
    ///
    /// Returns `None` for anything that could point off-site (absolute URLs,
    /// scheme-relative `//host` paths, backslash tricks).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if !raw.starts_with('/') || raw.starts_with("//") || raw.contains('\\') {
            return None;
        }
        if raw.contains("://") || raw.chars().any(char::is_control) {
            return None;
        }

        let raw = raw.split('#').next().unwrap_or(raw);
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query).filter(|q| !q.is_empty())),
            None => (raw, None),
        };
        Some(Self {
            path: path.to_string(),
            query: query.map(str::to_string),
        })
    }

    /// The console root.
    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            query: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.query {
            Some(query) => write!(f, "{}?{}", self.path, query),
            None => f.write_str(&self.path),
        }
    }
}

/// Where an unauthenticated visitor is sent, and where they return after
/// signing in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    login_path: String,
    return_to: Location,
}

impl LoginRedirect {
    pub fn new(login_path: impl Into<String>, return_to: Location) -> Self {
        Self {
            login_path: login_path.into(),
            return_to,
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn return_to(&self) -> &Location {
        &self.return_to
    }

    /// Full login location, e.g. `/login?redirect=%2Fbreakers`.
    pub fn href(&self) -> String {
        let encoded: String =
            form_urlencoded::byte_serialize(self.return_to.to_string().as_bytes()).collect();
        format!("{}?{}={}", self.login_path, REDIRECT_PARAM, encoded)
    }

    /// Read the return location from a login page query string.
    ///
    /// Missing or non-local targets fall back to the console root.
    pub fn return_target(login_query: &str) -> Location {
        form_urlencoded::parse(login_query.trim_start_matches('?').as_bytes())
            .find(|(key, _)| key == REDIRECT_PARAM)
            .and_then(|(_, value)| Location::parse(&value))
            .unwrap_or_else(Location::root)
    }
}
