//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::live::{Backoff, Endpoint, ReconnectPolicy};

/// Environment variable holding an explicit push endpoint
pub const WS_URL_ENV: &str = "PC_STATUS_WS_URL";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub connection: ConnectionConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Push connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Explicit endpoint; wins over everything else
    #[serde(default)]
    pub url: Option<String>,

    /// Origin the same-origin fallback is derived from
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Path of the push endpoint on that origin
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_ms: u64,

    #[serde(default = "default_max_reconnect_delay")]
    pub max_reconnect_delay_ms: u64,

    #[serde(default = "default_max_reconnect_attempts")]
    pub max_reconnect_attempts: u32,

    #[serde(default)]
    pub backoff: Backoff,
}

fn default_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_path() -> String {
    "/server".to_string()
}

fn default_reconnect_delay() -> u64 {
    2000 // 2 seconds
}

fn default_max_reconnect_delay() -> u64 {
    30_000 // 30 seconds
}

fn default_max_reconnect_attempts() -> u32 {
    10
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: None,
            origin: default_origin(),
            path: default_path(),
            reconnect_delay_ms: default_reconnect_delay(),
            max_reconnect_delay_ms: default_max_reconnect_delay(),
            max_reconnect_attempts: default_max_reconnect_attempts(),
            backoff: Backoff::default(),
        }
    }
}

impl ConnectionConfig {
    /// Reconnect policy described by this section
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy {
            delay: Duration::from_millis(self.reconnect_delay_ms),
            max_delay: Duration::from_millis(self.max_reconnect_delay_ms),
            max_attempts: self.max_reconnect_attempts,
            backoff: self.backoff,
        }
    }

    /// Endpoint description; `explicit` comes from the caller (e.g. `--url`)
    pub fn endpoint(&self, explicit: Option<&str>) -> Endpoint {
        Endpoint::new(&self.origin, &self.path)
            .explicit(explicit.map(str::to_string))
            .configured(self.url.clone())
    }
}

/// Chart rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    /// Width used when exporting charts outside a resizable container
    #[serde(default = "default_chart_width")]
    pub width: f64,

    #[serde(default = "default_chart_height")]
    pub height: f64,

    #[serde(default = "default_chart_padding")]
    pub padding: f64,
}

fn default_chart_width() -> f64 {
    800.0
}

fn default_chart_height() -> f64 {
    250.0
}

fn default_chart_padding() -> f64 {
    60.0
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            padding: default_chart_padding(),
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

    /// Load from default locations or environment
    #[cfg(feature = "native")]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("pc-status").join("config.toml")),
            Some(PathBuf::from("/etc/pc-status/config.toml")),
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

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Connection overrides
        if let Some(url) = lookup(WS_URL_ENV) {
            if crate::live::is_configured(&url) {
                self.connection.url = Some(url);
            }
        }
        if let Some(path) = lookup("PC_STATUS_WS_PATH") {
            self.connection.path = path;
        }
        if let Some(delay) = lookup("PC_STATUS_RECONNECT_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                self.connection.reconnect_delay_ms = ms;
            }
        }
        if let Some(attempts) = lookup("PC_STATUS_MAX_RECONNECT_ATTEMPTS") {
            if let Ok(n) = attempts.parse() {
                self.connection.max_reconnect_attempts = n;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("PC_STATUS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PC_STATUS_LOG_FORMAT") {
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
    r#"# PC Status Dashboard Configuration
#
# Environment variables override these settings:
# - PC_STATUS_WS_URL
# - PC_STATUS_WS_PATH
# - PC_STATUS_RECONNECT_DELAY_MS
# - PC_STATUS_MAX_RECONNECT_ATTEMPTS
# - PC_STATUS_LOG_LEVEL
# - PC_STATUS_LOG_FORMAT

[connection]
# Explicit push endpoint (ws:// or wss://). When unset, the endpoint is
# derived from `origin` and `path`.
# url = "ws://localhost:3000/server"

# Origin the endpoint is derived from (https origins use wss)
origin = "http://localhost:3000"

# Push endpoint path on that origin ("/server" or "/ws")
path = "/server"

# Delay before a reconnect attempt (ms)
reconnect_delay_ms = 2000

# Upper bound for exponential backoff (ms)
max_reconnect_delay_ms = 30000

# Reconnect attempts before giving up
max_reconnect_attempts = 10

# Backoff strategy: fixed or exponential
backoff = "fixed"

[chart]
# Width of exported charts (px)
width = 800

# Chart height (px)
height = 250

# Inset around the plot area (px)
padding = 60

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.connection.path, "/server");
        assert_eq!(config.connection.max_reconnect_attempts, 10);
        assert_eq!(config.connection.backoff, Backoff::Fixed);
        assert_eq!(config.chart.height, 250.0);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[connection]\nurl = \"ws://10.0.0.5:3000/ws\"\nbackoff = \"exponential\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.connection.url.as_deref(), Some("ws://10.0.0.5:3000/ws"));
        assert_eq!(config.connection.backoff, Backoff::Exponential);
        assert_eq!(config.connection.reconnect_delay_ms, 2000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[connection\nurl = ").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("PC_STATUS_WS_URL", "wss://status.example.com/server"),
            ("PC_STATUS_RECONNECT_DELAY_MS", "5000"),
            ("PC_STATUS_MAX_RECONNECT_ATTEMPTS", "not-a-number"),
            ("PC_STATUS_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(
            config.connection.url.as_deref(),
            Some("wss://status.example.com/server")
        );
        assert_eq!(config.connection.reconnect_delay_ms, 5000);
        assert_eq!(config.connection.max_reconnect_attempts, 10);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_placeholder_url_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == WS_URL_ENV).then(|| "undefined".to_string()));
        assert!(config.connection.url.is_none());
    }

    #[test]
    fn test_reconnect_policy_from_config() {
        let policy = ConnectionConfig::default().reconnect_policy();
        assert_eq!(policy.delay, Duration::from_millis(2000));
        assert_eq!(policy.max_attempts, 10);
    }
}
