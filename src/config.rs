//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. TOML file (`--config PATH`, or `config.toml` in the platform config dir)
//! 3. Environment variables prefixed with `DUPVIEW_` (e.g. `DUPVIEW_ENDPOINT`)
//! 4. Command-line flags (applied by the caller via [`Config::apply_cli`])
//!
//! # Example
//!
//! ```toml
//! endpoint = "http://scanner.local:8080/report"
//! theme = "dark"
//! ascii_borders = false
//! show_fetch_errors = true
//! timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::{Cli, ThemeArg};
use crate::report::DEFAULT_ENDPOINT;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "DUPVIEW_";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The layered configuration could not be extracted.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    /// An explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of the report endpoint.
    pub endpoint: String,
    /// Preferred TUI theme.
    pub theme: ThemeArg,
    /// Draw borders with plain ASCII characters.
    pub ascii_borders: bool,
    /// Title the table "Report unavailable" when the fetch failed, instead of
    /// showing an indistinguishable empty table.
    pub show_fetch_errors: bool,
    /// Request timeout in seconds. Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            theme: ThemeArg::Auto,
            ascii_borders: false,
            show_fetch_errors: false,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load the configuration from defaults, file, and environment.
    ///
    /// With `explicit_path` the file must exist; otherwise the default
    /// platform path is used only if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit file is missing or any layer
    /// holds invalid values.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match explicit_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => Self::default_path().filter(|p| p.exists()),
        };

        if let Some(ref path) = file {
            log::debug!("Loading config from {}", path.display());
        }

        let config: Config = Self::figment(file.as_deref())
            .extract()
            .map_err(Box::new)?;
        Ok(config)
    }

    /// Build the figment stack without extracting it.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref endpoint) = cli.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(theme) = cli.theme {
            self.theme = theme;
        }
        if cli.ascii {
            self.ascii_borders = true;
        }
        if cli.show_fetch_errors {
            self.show_fetch_errors = true;
        }
        if let Some(secs) = cli.timeout {
            self.timeout_secs = Some(secs);
        }
    }

    /// Request timeout as a duration.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Serialize the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Default platform-specific configuration file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupview", "dupview")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
