//! `AppConfig` struct, file location, TOML loading and environment overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tmdbgw_api::enrich::DEFAULT_IMAGE_BASE_URL;
use tmdbgw_api::tmdb::DEFAULT_BASE_URL;

/// Environment variable holding the TMDB bearer token.
const API_KEY_VAR: &str = "TMDB_API_KEY";

/// Environment variable overriding the listen port.
const PORT_VAR: &str = "PORT";

/// Environment variable locating the default config directory.
const HOME_VAR: &str = "HOME";

/// Directory under `~/.config` holding the default config file.
const APP_DIR: &str = "tmdbgw";

/// Config file name, looked up in `--dir` or `~/.config/tmdbgw`.
const CONFIG_FILE: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upstream TMDB configuration. The API key is deliberately absent and
/// only read from the environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// TMDB API v3 base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Image CDN base prepended to `poster_path`.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    String::from(DEFAULT_BASE_URL)
}

fn default_image_base_url() -> String {
    String::from(DEFAULT_IMAGE_BASE_URL)
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = lookup(PORT_VAR) {
            self.server.port = port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("{PORT_VAR} must be a valid port number, got {port:?}"))?;
        }
        Ok(())
    }
}

/// Locates the config file: `{dir}/config.toml` when `dir` is given,
/// otherwise `$HOME/.config/tmdbgw/config.toml` with `HOME` read through
/// `lookup`.
///
/// # Errors
///
/// Returns an error if `dir` is `None` and `HOME` is unset or empty.
pub fn resolve_config_path(
    dir: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir.join(CONFIG_FILE));
    }
    let home = lookup(HOME_VAR)
        .filter(|home| !home.is_empty())
        .with_context(|| format!("{HOME_VAR} environment variable is not set"))?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join(APP_DIR)
        .join(CONFIG_FILE))
}

/// Reads the TMDB bearer token through `lookup`.
///
/// # Errors
///
/// Returns an error if `TMDB_API_KEY` is unset or empty.
pub fn require_api_key(lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    let key = lookup(API_KEY_VAR)
        .with_context(|| format!("{API_KEY_VAR} environment variable is required"))?;
    if key.trim().is_empty() {
        bail!("{API_KEY_VAR} environment variable is required");
    }
    Ok(key)
}
