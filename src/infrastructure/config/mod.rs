//! Client configuration loading.

pub mod client_config;

pub use client_config::{ConfigError, load_client_config, parse_client_config};
