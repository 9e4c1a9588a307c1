//! Application configuration module.
//!
//! Layers the optional TOML config file, environment variables and CLI
//! flags into one immutable value handed to the gateway at startup.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, require_api_key, resolve_config_path};
