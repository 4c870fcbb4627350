//! Request description and path resolution.
//!
//! # Responsibilities
//! - Describe one backend call (method, relative path, query, JSON body)
//! - Resolve relative paths against the configured base URL
//! - Generate a unique request ID per call for correlation
//!
//! # Design Decisions
//! - Only relative paths are accepted; the session never leaves the
//!   configured backend
//! - Bodies are serialized eagerly so encoding errors surface before any
//!   network activity

use reqwest::Method;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Unique identifier attached to every outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One call to the backend API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a query parameter only when a value is present.
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}

/// Resolve a relative API path against the base URL.
///
/// Any path prefix of the base URL is kept, so `https://host/gw` plus
/// `/api/auth/me` gives `https://host/gw/api/auth/me`. A query string in
/// `path` is carried over; the base URL's own query and fragment are not.
/// Absolute URLs are rejected; a query value may still contain one.
pub fn resolve(base: &Url, path: &str) -> ApiResult<Url> {
    let (path_part, query) = match path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path, None),
    };
    if path_part.contains("://") || path_part.starts_with("//") || path.contains('#') {
        return Err(ApiError::InvalidPath(path.to_string()));
    }

    let relative_path = path_part.trim_start_matches('/');
    let relative_query = query;

    let mut url = base.clone();
    let prefix = base.path().trim_end_matches('/');
    url.set_path(&format!("{prefix}/{relative_path}"));
    url.set_query(relative_query.filter(|q| !q.is_empty()));
    url.set_fragment(None);
    Ok(url)
}

/// Validate an identifier used as a single path segment.
pub fn segment(id: &str) -> ApiResult<&str> {
    let invalid = id.is_empty()
        || id == "."
        || id == ".."
        || id
            .chars()
            .any(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control());
    if invalid {
        Err(ApiError::InvalidPath(id.to_string()))
    } else {
        Ok(id)
    }
}
