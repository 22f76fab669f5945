//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::remote::ClientConfig;
use crate::storage;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub client: ClientSettings,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where the dashboard client finds the readings server
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Reading store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Write a JSON snapshot after every append
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("hydromonitor").to_string_lossy().to_string())
        .unwrap_or_else(|| "./hydromonitor_data".to_string())
}

fn default_persist() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            persist: default_persist(),
        }
    }
}

/// Dashboard defaults
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_past_days")]
    pub past_days: u32,
}

fn default_past_days() -> u32 {
    7
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            past_days: default_past_days(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load an explicit file, or fall back to the default locations
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("hydromonitor").join("config.toml")),
            Some(PathBuf::from("/etc/hydromonitor/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Settings for the reading store
    pub fn storage_config(&self) -> storage::StorageConfig {
        storage::StorageConfig {
            data_dir: PathBuf::from(&self.storage.data_dir),
            persist: self.storage.persist,
        }
    }

    /// Settings for the readings client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.client.base_url.clone(),
            request_timeout_ms: self.client.timeout_ms,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(host) = lookup("HYDRO_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("HYDRO_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Client overrides
        if let Some(url) = lookup("HYDRO_API_URL") {
            self.client.base_url = url;
        }

        // Storage overrides
        if let Some(data_dir) = lookup("HYDRO_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        // Logging overrides
        if let Some(level) = lookup("HYDRO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("HYDRO_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# HydroMonitor Configuration
#
# Environment variables override these settings:
# - HYDRO_API_HOST
# - HYDRO_API_PORT
# - HYDRO_API_URL
# - HYDRO_DATA_DIR
# - HYDRO_LOG_LEVEL
# - HYDRO_LOG_FORMAT

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 5000

# Allowed CORS origins (empty allows any origin)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

[client]
# Readings server used by the dashboard commands
base_url = "http://localhost:5000"

# Request timeout in milliseconds
timeout_ms = 10000

[storage]
# Directory for the readings snapshot
# (default: the platform data directory, e.g. ~/.local/share/hydromonitor;
# write an absolute path, "~" is not expanded)
# data_dir = "/var/lib/hydromonitor"

# Write readings.json after every accepted POST
persist = true

[dashboard]
# Trailing window for analytics, in days
past_days = 7

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/hydromonitor/hydromonitor.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.port, 5000);
        assert_eq!(config.client.base_url, "http://localhost:5000");
        assert_eq!(config.dashboard.past_days, 7);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.storage.persist);
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 5000);
        assert_eq!(config.client.timeout_ms, 10_000);
        assert!(config.api.cors_origins.is_empty());
        assert_eq!(config.storage.data_dir, Config::default().storage.data_dir);
        assert!(config.storage.persist);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nport = 8080\n\n[dashboard]\npast_days = 30\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.dashboard.past_days, 30);
        assert_eq!(config.client.base_url, "http://localhost:5000");
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();

        let missing = Config::load(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[api\nport = ").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("HYDRO_API_PORT", "6000"),
            ("HYDRO_API_URL", "http://pi.local:6000"),
            ("HYDRO_DATA_DIR", "/tmp/hydro"),
            ("HYDRO_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.port, 6000);
        assert_eq!(config.client.base_url, "http://pi.local:6000");
        assert_eq!(config.storage_config().data_dir, PathBuf::from("/tmp/hydro"));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_bad_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "HYDRO_API_PORT").then(|| "lots".to_string()));
        assert_eq!(config.api.port, 5000);
    }

    #[test]
    fn test_client_config() {
        let mut config = Config::default();
        config.client.timeout_ms = 250;
        let client = config.client_config();
        assert_eq!(client.request_timeout_ms, 250);
    }
}
