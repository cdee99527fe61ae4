//! Configuration loading and constants.
//!
//! Builds the application configuration from built-in defaults, an optional TOML
//! file, and the `PORT` environment variable. `AppConfig` is the root configuration
//! struct and is passed explicitly into the router state at startup.

use const_format::formatcp;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// The export file is replaced wholesale by the classifier, so upstream caches
// must revalidate on every request.

pub const CACHE_CONTROL_NO_CACHE: &str = "no-cache";

// =============================================================================
// Query Defaults
// =============================================================================

/// Number of records returned when `limit` is absent or unusable
pub const DEFAULT_PROMPT_LIMIT: usize = 50;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// File name written by the classifier job
pub const EXPORT_FILE_NAME: &str = "categorized_prompts.json";

/// Export file location, relative to the working directory
pub const DEFAULT_EXPORT_PATH: &str = formatcp!("../backend/data/exports/{}", EXPORT_FILE_NAME);

/// Default listen address
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default listen port, overridden by `PORT`
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Environment variable selecting the listen port
pub const PORT_ENV_VAR: &str = "PORT";

/// Seconds to wait for in-flight requests on shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "prompt_export_api=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Export file location
    #[serde(default)]
    pub export: ExportConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Graceful shutdown drain window in seconds (default: 30)
    #[serde(default = "HttpServerConfig::default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_timeout_seconds: Self::default_shutdown_timeout(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_shutdown_timeout() -> u64 {
        DEFAULT_SHUTDOWN_TIMEOUT_SECS
    }
}

/// Where the classifier's export file lives
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "ExportConfig::default_path")]
    pub path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

impl ExportConfig {
    fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_EXPORT_PATH)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    /// True when structured JSON output is requested
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply a `PORT` value taken from the environment.
    pub fn apply_port_env(&mut self, value: Option<String>) -> Result<(), ConfigError> {
        let Some(raw) = value else {
            return Ok(());
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        self.http.port = trimmed
            .parse()
            .map_err(|_| ConfigError::Env(format!("{PORT_ENV_VAR}={raw:?} is not a valid port")))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "Unknown logging.format {:?}, expected \"text\" or \"json\"",
                self.logging.format
            )));
        }
        if self.export.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "export.path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid environment: {0}")]
    Env(String),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.http.shutdown_timeout_seconds, 30);
        assert_eq!(
            config.export.path,
            PathBuf::from("../backend/data/exports/categorized_prompts.json")
        );
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert_eq!(config.export.path, PathBuf::from(DEFAULT_EXPORT_PATH));
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml(
            r#"
            [http]
            port = 8080

            [export]
            path = "/var/lib/prompts/export.json"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.export.path, PathBuf::from("/var/lib/prompts/export.json"));
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let err = AppConfig::from_toml("[logging]\nformat = \"xml\"").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_empty_export_path() {
        let err = AppConfig::from_toml("[export]\npath = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_port_env_override() {
        let mut config = AppConfig::default();
        config.apply_port_env(Some("4321".to_string())).unwrap();
        assert_eq!(config.http.port, 4321);
    }

    #[test]
    fn test_port_env_absent_or_blank_keeps_port() {
        let mut config = AppConfig::default();
        config.apply_port_env(None).unwrap();
        config.apply_port_env(Some("  ".to_string())).unwrap();
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
    }

    #[test]
    fn test_port_env_invalid() {
        let mut config = AppConfig::default();
        let err = config.apply_port_env(Some("http".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::Env(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
