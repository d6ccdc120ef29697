//! Configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {path}: {message}")]
    Io {
        /// Path of the config file.
        path: String,
        /// Underlying IO error.
        message: String,
    },

    /// The config file is not valid YAML for [`Config`]
    #[error("Invalid config: {0}")]
    Parse(String),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Release metadata file listing supported Kubernetes versions
    pub release_file: PathBuf,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            release_file: PathBuf::from("RELEASE"),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file, missing keys take defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
