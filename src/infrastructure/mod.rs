//! Infrastructure layer with adapters for the outside world.

/// Client configuration loading.
pub mod config;

pub use config::{ConfigError, load_client_config, parse_client_config};
