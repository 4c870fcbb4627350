//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ConsoleConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the backend base URL.
pub const ENV_API_URL: &str = "GATEWAY_API_URL";
/// Environment variable holding the product name.
pub const ENV_BRAND_NAME: &str = "GATEWAY_BRAND_NAME";
/// Environment variable holding the product tagline.
pub const ENV_BRAND_TAGLINE: &str = "GATEWAY_BRAND_TAGLINE";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ConsoleConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ConsoleConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the effective configuration: optional file, then environment
/// overrides, then validation.
pub fn load(path: Option<&Path>) -> Result<ConsoleConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ConsoleConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(
        base_url = %config.api.base_url,
        file = ?path,
        "Configuration loaded"
    );
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Empty values are ignored so an exported-but-blank variable does not wipe
/// out the file or default setting.
pub fn apply_env_overrides<F>(config: &mut ConsoleConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(ENV_API_URL) {
        config.api.base_url = url.trim().to_string();
    }
    if let Some(name) = non_empty(ENV_BRAND_NAME) {
        config.branding.product_name = name;
    }
    if let Some(tagline) = non_empty(ENV_BRAND_TAGLINE) {
        config.branding.tagline = tagline;
    }
}
