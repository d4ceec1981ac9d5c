//! Configuration file I/O operations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Config;

impl Config {
    /// Get the global config directory path (~/.starmap/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".starmap")
    }

    /// Get the global config file path (~/.starmap/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Project config path inside `dir`
    pub fn project_config_path(dir: &Path) -> PathBuf {
        dir.join(".starmap").join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration for a working directory
    ///
    /// Looks for `.starmap/config.toml` in `dir`, then the global config,
    /// then falls back to defaults.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let project_path = Self::project_config_path(dir);
        if project_path.exists() {
            return Self::from_file(&project_path);
        }

        let global_path = Self::global_config_path();
        if global_path.exists() {
            return Self::from_file(&global_path);
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }
}
