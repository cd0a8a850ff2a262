//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::analytics::InsightThresholds;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub insights: InsightThresholds,

    #[serde(default)]
    pub api: ApiConfig,

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

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10 MB
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_body_size: default_max_body_size(),
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

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` for development, `json` for production
    #[serde(default = "default_log_format")]
    pub format: String,
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

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
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

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("fiberfriends").join("config.toml")),
            Some(PathBuf::from("/etc/fiberfriends/config.toml")),
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

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Load an explicit file if given, otherwise search the default locations
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(host) = std::env::var("FIBERFRIENDS_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("FIBERFRIENDS_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Insight threshold overrides
        if let Ok(value) = std::env::var("FIBERFRIENDS_PATTERN_CONFIDENCE") {
            if let Ok(v) = value.parse() {
                self.insights.pattern_confidence = v;
            }
        }
        if let Ok(value) = std::env::var("FIBERFRIENDS_TREND_CONFIDENCE") {
            if let Ok(v) = value.parse() {
                self.insights.trend_confidence = v;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("FIBERFRIENDS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FIBERFRIENDS_LOG_FORMAT") {
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
    r#"# Fiber Friends Analytics Configuration
#
# Environment variables override these settings:
# - FIBERFRIENDS_API_HOST
# - FIBERFRIENDS_API_PORT
# - FIBERFRIENDS_PATTERN_CONFIDENCE
# - FIBERFRIENDS_TREND_CONFIDENCE
# - FIBERFRIENDS_LOG_LEVEL
# - FIBERFRIENDS_LOG_FORMAT

[insights]
# Cyclical patterns must exceed this confidence (percent) to be mentioned
pattern_confidence = 70.0

# Trends must exceed this confidence (percent) to be mentioned
trend_confidence = 60.0

# How many of the strongest triggers to mention
max_triggers = 3

# Symptom pairs must exceed this absolute correlation to be mentioned
correlation_strength = 0.5

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8086

# Allowed CORS origins (empty = any origin)
cors_origins = []

# Maximum request body size in bytes
max_body_size = 10485760

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
