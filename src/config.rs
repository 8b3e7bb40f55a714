//! Configuration loading and constants.
//!
//! Loads the service configuration from an optional TOML file and applies
//! command-line and environment overrides on top. `AppConfig` is the root
//! configuration struct; every field has a default so an empty file (or no
//! file at all) yields a working server.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// Defaults
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default listen address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port, matching the embedded server the stub was scaffolded from
pub const DEFAULT_PORT: u16 = 8080;

/// Service name reported in the health payload
pub const DEFAULT_SERVICE_NAME: &str = "spring-boot";

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=info", env!("CARGO_CRATE_NAME"));

/// Environment variable the dev runner uses to hand out ports
pub const PORT_ENV_VAR: &str = "PORT";

// =============================================================================
// HTTP
// =============================================================================

/// Health responses must never be served from a cache
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

/// Response header carrying the per-request UUID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Seconds to wait for in-flight connections after a shutdown signal
pub const GRACEFUL_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Identity reported by the health endpoint
    #[serde(default)]
    pub service: ServiceConfig,
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
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Name returned in the `service` field of `/health`
    #[serde(default = "ServiceConfig::default_name")]
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
        }
    }
}

impl ServiceConfig {
    fn default_name() -> String {
        DEFAULT_SERVICE_NAME.to_string()
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Values that take precedence over the configuration file.
///
/// Each field is `None` when the corresponding source was not supplied.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    /// Port from the command line
    pub port: Option<u16>,
    /// Raw value of the `PORT` environment variable
    pub env_port: Option<String>,
    pub service_name: Option<String>,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path`, tolerating a missing file unless it was named explicitly.
    pub fn load_or_default<P: AsRef<Path>>(path: P, explicit: bool) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !explicit && !path.exists() {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides with precedence CLI > environment > file.
    pub fn apply_overrides(&mut self, overrides: Overrides) -> Result<(), ConfigError> {
        if let Some(host) = overrides.host {
            self.http.host = host;
        }

        if let Some(port) = overrides.port {
            self.http.port = port;
        } else if let Some(raw) = overrides.env_port.filter(|v| !v.trim().is_empty()) {
            // An empty PORT counts as unset
            self.http.port = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?;
        }

        if let Some(name) = overrides.service_name {
            self.service.name = name;
        }

        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.service.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "service.name must not be empty".to_string(),
            ));
        }
        if self.http.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "http.host must not be empty".to_string(),
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
    #[error("Invalid port value: {0:?}")]
    InvalidPort(String),
    #[error("Configuration error: {0}")]
    Validation(String),
}
