//! Typed configuration loaded from a YAML file.
//!
//! The file maps platforms to an extraction pattern and a nick → URL table:
//!
//! ```yaml
//! sqlite:
//!   db: score.db
//! platforms:
//!   rootme:
//!     regexp: '([0-9]+)\s*Points'
//!     delay: 2
//!     nicks:
//!       alice: https://example.org/alice
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

use crate::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct SqliteConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub db: PathBuf,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            db: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("score.db")
}

/// One scoring platform: a shared extraction pattern across its tracked nicks.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    /// Regular expression applied line by line to the fetched page.
    /// Capture group 1 must hold the numeric score.
    pub regexp: String,
    /// Seconds to wait between requests to this platform.
    #[serde(default)]
    pub delay: Option<u64>,
    /// Nick → profile URL.
    pub nicks: BTreeMap<String, String>,
}

impl PlatformConfig {
    /// Compile the platform's extraction pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the pattern does not compile.
    /// [`load_config`] already rejects such patterns, so this only fails for
    /// hand-built configs.
    pub fn pattern(&self) -> Result<Regex, ConfigError> {
        Regex::new(&self.regexp)
            .map_err(|e| ConfigError::Validation(format!("invalid regexp '{}': {e}", self.regexp)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sqlite: SqliteConfig,
    pub platforms: BTreeMap<String, PlatformConfig>,
}

/// Load and validate the configuration from a YAML file.
///
/// A missing or malformed file is a hard error; the collector must not run
/// with a half-loaded platform table.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: Config = serde_yaml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.platforms.is_empty() {
        return Err(ConfigError::Validation(
            "at least one platform must be configured".to_string(),
        ));
    }

    for (name, platform) in &config.platforms {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "platform name must be non-empty".to_string(),
            ));
        }

        let pattern = Regex::new(&platform.regexp).map_err(|e| {
            ConfigError::Validation(format!("platform '{name}' has invalid regexp: {e}"))
        })?;
        // captures_len counts the implicit whole-match group 0.
        if pattern.captures_len() < 2 {
            return Err(ConfigError::Validation(format!(
                "platform '{name}' regexp '{}' has no capture group for the score",
                platform.regexp
            )));
        }

        if platform.nicks.is_empty() {
            return Err(ConfigError::Validation(format!(
                "platform '{name}' has no nicks configured"
            )));
        }

        for (nick, url) in &platform.nicks {
            if nick.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "platform '{name}' has a nick with an empty name"
                )));
            }
            if url.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "nick '{nick}' on platform '{name}' has an empty URL"
                )));
            }
        }
    }

    Ok(())
}
