//! Configuration loader

use std::path::Path;

use coda_utils::{config_file, CodaError, Result};

use super::{AppConfig, DEFAULT_CONFIG_TOML};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from default location
    pub fn load() -> Result<AppConfig> {
        let path = config_file();
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            Ok(AppConfig::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<AppConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| CodaError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parse configuration from string
    pub fn parse(content: &str, path: &Path) -> Result<AppConfig> {
        toml::from_str(content).map_err(|e| CodaError::ConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Validate configuration
    pub fn validate(config: &AppConfig) -> Result<()> {
        // Validate quiet period bounds
        if config.detector.quiet_ms < 100 {
            return Err(CodaError::config("quiet_ms must be at least 100"));
        }
        if config.detector.quiet_ms > 600_000 {
            return Err(CodaError::config("quiet_ms must be at most 600000 (10min)"));
        }

        // Validate lookback window
        if config.extract.lookback_chars > 10_000 {
            return Err(CodaError::config("lookback_chars must be at most 10000"));
        }

        Ok(())
    }

    /// Load and validate
    pub fn load_and_validate() -> Result<AppConfig> {
        let config = Self::load()?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Write the default config file if none exists, returning its path
    pub fn write_default_if_missing() -> Result<std::path::PathBuf> {
        let path = config_file();
        if path.exists() {
            return Ok(path);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CodaError::FileWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(&path, DEFAULT_CONFIG_TOML.trim_start()).map_err(|e| {
            CodaError::FileWrite {
                path: path.clone(),
                source: e,
            }
        })?;

        Ok(path)
    }
}
