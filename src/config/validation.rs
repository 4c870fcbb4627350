//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the base URL is an absolute http(s) URL
//! - Validate value ranges (timeouts > 0, poll interval > 0)
//! - Check auth endpoints and login path are local paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ConsoleConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

use crate::config::schema::ConsoleConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `api.base_url`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ConsoleConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.api.base_url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::new(
                "api.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(url) if url.cannot_be_a_base() || url.host().is_none() => {
            errors.push(ValidationError::new("api.base_url", "must include a host"));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::new("api.base_url", e.to_string())),
    }

    if config.api.connect_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "api.connect_timeout_secs",
            "must be greater than zero",
        ));
    }
    if config.api.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "api.request_timeout_secs",
            "must be greater than zero",
        ));
    }
    if config.polling.interval_secs == 0 {
        errors.push(ValidationError::new(
            "polling.interval_secs",
            "must be greater than zero",
        ));
    }

    let paths = [
        ("auth.probe_path", &config.auth.probe_path),
        ("auth.login_endpoint", &config.auth.login_endpoint),
        ("auth.logout_endpoint", &config.auth.logout_endpoint),
        ("auth.login_path", &config.auth.login_path),
    ];
    for (field, path) in paths {
        if !path.starts_with('/') || path.starts_with("//") {
            errors.push(ValidationError::new(field, "must be a local path starting with '/'"));
        }
    }

    if config.auth.session_cookie.is_empty()
        || config
            .auth
            .session_cookie
            .contains(|c: char| c == '=' || c == ';' || c.is_whitespace())
    {
        errors.push(ValidationError::new(
            "auth.session_cookie",
            "must be a non-empty cookie name",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
