//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, RetryConfig, ShiftWindowConfig};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// validates them before use.
///
/// # Directory Structure
///
/// ```text
/// config/attendance/
/// ├── windows.yaml    # Shift window boundaries (pivot hour, buffers)
/// └── retry.yaml      # Device fetch retry policy
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/attendance").unwrap();
/// assert_eq!(loader.config().windows.day_pivot_hour, 12);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/attendance")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any configured hour or retry value fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let windows_path = path.join("windows.yaml");
        let windows = Self::load_yaml::<ShiftWindowConfig>(&windows_path)?;

        let retry_path = path.join("retry.yaml");
        let retry = Self::load_yaml::<RetryConfig>(&retry_path)?;

        let config = EngineConfig { windows, retry };
        config.validate()?;

        Ok(Self { config })
    }

    /// Builds a loader around an already-constructed configuration.
    ///
    /// Useful for tests and embedded deployments that do not read files.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the validated configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HourWindow;

    #[test]
    fn test_load_missing_directory_reports_not_found() {
        let error = ConfigLoader::load("/nonexistent/config/dir").unwrap_err();
        match error {
            EngineError::ConfigNotFound { path } => {
                assert!(path.contains("windows.yaml"));
            }
            other => panic!("expected ConfigNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_shipped_defaults() {
        let loader = ConfigLoader::load("./config/attendance").expect("shipped config loads");
        let config = loader.config();
        assert_eq!(config.windows.day_pivot_hour, 12);
        assert_eq!(config.windows.check_in_buffer, HourWindow { start: 12, end: 24 });
        assert_eq!(config.windows.check_out_buffer, HourWindow { start: 0, end: 12 });
        assert!(config.retry.max_attempts >= 1);
    }

    #[test]
    fn test_from_config_validates() {
        let mut config = EngineConfig::default();
        config.windows.day_pivot_hour = 99;
        assert!(ConfigLoader::from_config(config).is_err());
        assert!(ConfigLoader::from_config(EngineConfig::default()).is_ok());
    }
}
