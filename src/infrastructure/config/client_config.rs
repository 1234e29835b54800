//! Client configuration loading.

use std::path::Path;

use thiserror::Error;

use crate::domain::config::ClientConfig;

/// Configuration loading error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parses a [`ClientConfig`] from TOML text.
///
/// # Errors
/// Returns an error when the text is not valid TOML for the config shape.
pub fn parse_client_config(text: &str) -> Result<ClientConfig, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Loads a [`ClientConfig`] from a TOML file.
///
/// # Errors
/// Returns an error when the file cannot be read or parsed.
pub fn load_client_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    parse_client_config(&text)
}
