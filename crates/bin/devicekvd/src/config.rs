//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `devicekvd.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::str::FromStr;

use devicekv_app::device_store::KeyScheme;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Key-value backend settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Which key-value store backs the device table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `SQLite` file or in-memory database through sqlx.
    #[default]
    Sqlite,
    /// Process-local map, lost on exit.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::Validation(format!(
                "unknown storage backend {other:?}"
            ))),
        }
    }
}

/// Key-value storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend implementation.
    pub backend: StorageBackend,
    /// `SQLite` connection URL or file path. Ignored by the memory backend.
    pub database_url: String,
    /// Key layout for device items.
    pub key_scheme: KeyScheme,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `devicekvd.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if an
    /// override or the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("devicekvd.toml")?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("DEVICEKV_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("DEVICEKV_PORT") {
            self.server.port = parse_port("DEVICEKV_PORT", &val)?;
        }
        if let Some(val) = lookup("DEVICEKV_BIND") {
            let Some((host, port)) = val.rsplit_once(':') else {
                return Err(ConfigError::Validation(format!(
                    "DEVICEKV_BIND must be host:port, got {val:?}"
                )));
            };
            self.server.port = parse_port("DEVICEKV_BIND", port)?;
            self.server.host = host.to_string();
        }
        if let Some(val) = lookup("DEVICEKV_STORAGE") {
            self.storage.backend = val.parse()?;
        }
        if let Some(val) = lookup("DEVICEKV_DATABASE_URL") {
            self.storage.database_url = val;
        }
        if let Some(val) = lookup("DEVICEKV_KEY_SCHEME") {
            self.storage.key_scheme = val
                .parse::<KeyScheme>()
                .map_err(|err| ConfigError::Validation(err.to_string()))?;
        }
        if let Some(val) = lookup("DEVICEKV_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.storage.database_url
    }
}

fn parse_port(variable: &str, value: &str) -> Result<u16, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{variable} has invalid port {value:?}")))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_url: "sqlite:devicekv.db?mode=rwc".to_string(),
            key_scheme: KeyScheme::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "devicekvd=info,devicekv=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
