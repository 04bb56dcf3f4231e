//! tip-api configuration module.
//!
//! ## Configuration Sources
//! ```text
//! 1. Environment variables (highest priority)
//!    TIPQR_BIND_ADDR, TIPQR_PORT, TIPQR_SEED_PATH, TIPQR_LOG
//! 2. TOML file named by TIPQR_CONFIG
//! 3. Default values (lowest priority)
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! bind_addr = "0.0.0.0"
//! port = 8080
//! seed_path = "apps/tip-api/seed.json"
//! log_filter = "info,tipqr=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// tip-api configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bind address (default: 0.0.0.0 for all interfaces).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// HTTP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file with venues, staff and QR codes to load at startup.
    /// Without it the service starts empty.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    /// Fallback tracing filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_filter() -> String {
    "info,tipqr=debug,tower_http=info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            bind_addr: default_bind_addr(),
            port: default_port(),
            seed_path: None,
            log_filter: default_log_filter(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from the optional TOML file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("TIPQR_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Apply `TIPQR_*` overrides through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("TIPQR_BIND_ADDR") {
            self.bind_addr = addr;
        }

        if let Some(port) = lookup("TIPQR_PORT") {
            self.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TIPQR_PORT".to_string()))?;
        }

        if let Some(path) = lookup("TIPQR_SEED_PATH") {
            self.seed_path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup("TIPQR_LOG") {
            self.log_filter = filter;
        }

        Ok(())
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read config file {path:?}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Failed to parse config file: {0}")]
    ParseFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ApiConfig::from_toml_str("port = 9000\n").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.log_filter, default_log_filter());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = ApiConfig::from_toml_str("port = 9000\nbind_addr = \"10.0.0.1\"\n").unwrap();
        let env: HashMap<&str, &str> = [("TIPQR_PORT", "7000"), ("TIPQR_SEED_PATH", "/tmp/seed.json")]
            .into_iter()
            .collect();

        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.bind_address(), "10.0.0.1:7000");
        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/seed.json")));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut config = ApiConfig::default();
        let err = config
            .apply_overrides(|key| (key == "TIPQR_PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref k) if k == "TIPQR_PORT"));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            ApiConfig::from_toml_str("port = \"not a number\""),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}
