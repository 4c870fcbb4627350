//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (GATEWAY_API_URL, branding)
//!     → validation.rs (semantic checks)
//!     → ConsoleConfig (validated, immutable)
//!     → handed to ApiClient / AuthApi / Poller at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow running with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, ConfigError};
pub use schema::{
    ApiConfig, AuthConfig, BrandingConfig, ConsoleConfig, ObservabilityConfig, PollingConfig,
};
