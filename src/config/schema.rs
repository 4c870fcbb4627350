//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the console.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default backend address used when neither the config file nor the
/// environment supplies one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Root configuration for the console.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Backend API connection settings.
    pub api: ApiConfig,

    /// Session and login settings.
    pub auth: AuthConfig,

    /// Product branding strings shown in the console.
    pub branding: BrandingConfig,

    /// Dashboard refresh settings.
    pub polling: PollingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend API connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every relative API path is resolved against.
    pub base_url: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total request timeout in seconds.
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
            user_agent: concat!("gateway-console/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Session and login settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Identity probe used by the route guard.
    pub probe_path: String,

    /// Endpoint accepting email/password credentials.
    pub login_endpoint: String,

    /// Endpoint ending the server-side session.
    pub logout_endpoint: String,

    /// Console location unauthenticated visitors are sent to.
    pub login_path: String,

    /// Name of the session cookie issued by the backend.
    pub session_cookie: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            probe_path: "/api/auth/me".to_string(),
            login_endpoint: "/api/auth/login".to_string(),
            logout_endpoint: "/api/auth/logout".to_string(),
            login_path: "/login".to_string(),
            session_cookie: "session".to_string(),
        }
    }
}

/// Branding strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrandingConfig {
    pub product_name: String,
    pub tagline: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            product_name: "AI Gateway".to_string(),
            tagline: "Admin Console".to_string(),
        }
    }
}

/// Dashboard refresh settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Interval between refreshes of a watched page, in seconds.
    pub interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_secs: 10 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error), overridden by `RUST_LOG`.
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}
