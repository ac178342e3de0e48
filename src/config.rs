//! Configuration types for Webvcr

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{Result, VcrError};

/// Default glob pattern matching every outbound request
pub const ROUTE_ALL: &str = "**/*";

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for storing/loading cassettes
    pub cassette_dir: PathBuf,
    /// Glob pattern for the interception route
    #[serde(default = "default_route_pattern")]
    pub route_pattern: String,
    /// Fail playback on a fingerprint miss instead of passing through
    /// to the live network
    #[serde(default)]
    pub strict_playback: bool,
}

fn default_route_pattern() -> String {
    ROUTE_ALL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cassette_dir: PathBuf::from("cassettes"),
            route_pattern: default_route_pattern(),
            strict_playback: false,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| VcrError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| VcrError::ConfigError(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// The cassette directory does not need to exist yet; it is created on
    /// first save.
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<()> {
        if self.cassette_dir.as_os_str().is_empty() {
            return Err(VcrError::ConfigError(
                "cassette_dir cannot be empty".to_string(),
            ));
        }

        if self.route_pattern.is_empty() {
            return Err(VcrError::ConfigError(
                "route_pattern cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
