// SPDX-License-Identifier: Apache-2.0

//! Configuration management for orgwatch.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `ORGWATCH_`)
//! 2. Config file: `~/.config/orgwatch/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Point at a GitHub Enterprise instance
//! ORGWATCH_GITHUB__API_URL=https://ghe.example.com/api/v3 orgwatch scan
//!
//! # Watch several organizations without a config file
//! ORGWATCH_WATCH__ORGANIZATIONS=mozilla,rust-lang orgwatch scan
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::OrgWatchError;
use crate::github::DEFAULT_API_URL;

const ENV_PREFIX: &str = "ORGWATCH";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// Which organizations to watch.
    pub watch: WatchConfig,
    /// Where the last-check state lives.
    pub state: StateConfig,
}

/// GitHub API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API.
    pub api_url: String,
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout_seconds: 10,
        }
    }
}

/// Organizations to scan when none are given on the command line.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Organization logins, e.g. `["mozilla", "rust-lang"]`.
    pub organizations: Vec<String>,
}

/// State file settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Override for the state file location.
    pub path: Option<PathBuf>,
}

impl StateConfig {
    /// Returns the configured state file, or the default under [`data_dir`].
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(state_file_path)
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the orgwatch configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/orgwatch`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("orgwatch");
    }
    home_dir().join(".config").join("orgwatch")
}

/// Returns the orgwatch data directory.
///
/// Respects the `XDG_DATA_HOME` environment variable if set,
/// otherwise defaults to `~/.local/share/orgwatch`.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME")
        && !xdg_data.is_empty()
    {
        return PathBuf::from(xdg_data).join("orgwatch");
    }
    home_dir().join(".local").join("share").join("orgwatch")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the default path of the last-check state file.
#[must_use]
pub fn state_file_path() -> PathBuf {
    data_dir().join("state.json")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `ORGWATCH_` and double underscore
/// for nested keys (e.g., `ORGWATCH_GITHUB__API_URL`).
///
/// # Errors
///
/// Returns `OrgWatchError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, OrgWatchError> {
    load_config_from(&config_file_path(), None)
}

/// Load configuration from an explicit file, with an optional environment snapshot.
///
/// `env` replaces the process environment when given, which keeps tests
/// independent of the variables set on the machine running them.
pub fn load_config_from(
    path: &Path,
    env: Option<HashMap<String, String>>,
) -> Result<AppConfig, OrgWatchError> {
    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::from(path).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("watch.organizations")
                .try_parsing(true)
                .source(env),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
