//! Dashboard configuration
//!
//! Stored as pretty-printed JSON. Every key is optional; anything left out
//! takes its default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::source::TELEMETRY_PATH;

/// Name of the config file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

fn default_endpoint() -> String {
    format!("http://127.0.0.1:5000{}", TELEMETRY_PATH)
}

fn default_poll_interval_ms() -> u64 {
    2000
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Telemetry endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Refresh interval (ms)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Use the built-in simulator instead of the endpoint
    #[serde(default)]
    pub demo_mode: bool,
    /// Where log output goes; defaults to the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            poll_interval_ms: default_poll_interval_ms(),
            demo_mode: false,
            log_file: None,
        }
    }
}

impl DashboardConfig {
    /// Platform config directory for BatteryDash
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("BatteryDash"))
    }

    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Parse and validate a config document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path. The file must exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load from `path` if given, otherwise from the default location.
    ///
    /// A missing file at the default location is not an error; defaults are
    /// used instead.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(p) if p.exists() => Self::load(p),
            _ => Ok(Self::default()),
        }
    }

    /// Write to `path`, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if !self.demo_mode && self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint is empty".to_string()));
        }
        Ok(())
    }

    /// Refresh interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Resolved log file path
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("BatteryDash")
                .join("batterydash.log")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:5000/api/battery-data");
        assert_eq!(config.poll_interval(), Duration::from_millis(2000));
        assert!(!config.demo_mode);
        assert!(config.log_path().ends_with("batterydash.log"));
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config = DashboardConfig::from_json(r#"{"demo_mode": true}"#).unwrap();
        assert!(config.demo_mode);
        assert_eq!(config.poll_interval_ms, 2000);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = DashboardConfig::from_json(r#"{"poll_interval_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_endpoint_allowed_in_demo_mode() {
        assert!(DashboardConfig::from_json(r#"{"endpoint": "", "demo_mode": true}"#).is_ok());
        assert!(DashboardConfig::from_json(r#"{"endpoint": ""}"#).is_err());
    }
}
