//! Configuration handling for the catalog tool
//!
//! Configuration is stored in `~/.config/course-catalog/config.toml` (or the
//! platform equivalent). A missing file means defaults everywhere.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::loader::DuplicatePolicy;

/// Catalog file used when nothing else names one
pub const DEFAULT_CATALOG_FILE: &str = "CS 300 ABCU_Advising_Program_Input.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Catalog file loaded when `--catalog` and `CATALOG_FILE` are unset
    pub default_catalog: PathBuf,

    /// Handling of repeated course numbers while loading
    pub duplicates: DuplicatePolicy,

    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Print elapsed time after each command
    pub timings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_catalog: PathBuf::from(DEFAULT_CATALOG_FILE),
            duplicates: DuplicatePolicy::Allow,
            default_format: OutputFormat::Text,
            timings: false,
        }
    }
}

impl Config {
    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "catalog", "course-catalog")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file; a missing file yields defaults
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).context("Failed to parse config")
    }

    /// Parses configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serializes the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
