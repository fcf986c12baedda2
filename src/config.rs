//! Configuration module for aart.

use serde::Deserialize;
use std::path::Path;

use crate::{AartError, Result};

/// Environment variable holding the bind host (required).
pub const ENV_HOST: &str = "HOST";

/// Environment variable holding the bind port (required).
pub const ENV_PORT: &str = "PORT";

/// Environment variable overriding the worlds directory.
pub const ENV_WORLDS_DIRECTORY: &str = "WORLDS_DIRECTORY";

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// World storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding one subdirectory per world.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Maximum upload size in megabytes (0 = unlimited).
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_root_path() -> String {
    "./worlds".to_string()
}

fn default_max_upload_size() -> u64 {
    100
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

impl StorageConfig {
    /// Upload limit in bytes, or `None` when unlimited.
    pub fn max_upload_bytes(&self) -> Option<usize> {
        if self.max_upload_size_mb == 0 {
            None
        } else {
            Some((self.max_upload_size_mb as usize).saturating_mul(1024 * 1024))
        }
    }
}

/// Web layer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// CORS allowed origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Whether raw world files are served under `/files/worlds`.
    #[serde(default = "default_serve_files")]
    pub serve_files: bool,
}

fn default_serve_files() -> bool {
    true
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec![],
            serve_files: default_serve_files(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional path to a log file, written in addition to stdout.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Web configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(AartError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| AartError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides from the process environment.
    ///
    /// - `HOST`: bind host (required)
    /// - `PORT`: bind port (required, must parse as a port number)
    /// - `WORLDS_DIRECTORY`: storage root (optional)
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to resolve variable names.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(ENV_HOST)
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| AartError::Config(format!("{ENV_HOST} is not set")))?;

        let port = lookup(ENV_PORT)
            .ok_or_else(|| AartError::Config(format!("{ENV_PORT} is not set")))?;
        let port: u16 = port.trim().parse().map_err(|e| {
            AartError::Config(format!("{ENV_PORT} is not a valid port ('{port}'): {e}"))
        })?;

        self.server.host = host;
        self.server.port = port;

        if let Some(root) = lookup(ENV_WORLDS_DIRECTORY) {
            if !root.is_empty() {
                self.storage.root_path = root;
            }
        }

        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.storage.root_path.trim().is_empty() {
            return Err(AartError::Config(
                "storage.root_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
