//! Service configuration via `ticketmaster.toml`
//!
//! A single TOML file configures the HTTP listener, the document store and
//! logging. Every field has a default, so an empty file (or no file at all)
//! is a valid configuration. Environment variables are applied on top of the
//! file, and command-line flags on top of those.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "ticketmaster.toml";

/// Environment variable overriding `server.bind`.
pub const ENV_BIND: &str = "TICKETMASTER_BIND";
/// Environment variable overriding `storage.mode`.
pub const ENV_STORAGE_MODE: &str = "TICKETMASTER_STORAGE_MODE";
/// Environment variable overriding `storage.data_dir`.
pub const ENV_DATA_DIR: &str = "TICKETMASTER_DATA_DIR";
/// Environment variable overriding `logging.filter`.
pub const ENV_LOG: &str = "TICKETMASTER_LOG";

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("failed to access config file '{path}': {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("failed to parse config file '{path}': {reason}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// A value is syntactically valid but not allowed
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Where documents are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Process memory only; data is lost on exit
    Memory,
    /// Per-collection JSON snapshots under `data_dir`
    File,
}

/// Log line encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text
    Text,
    /// One JSON object per line
    Json,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Socket address to bind
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Document store settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// `"memory"` (default) or `"file"`
    #[serde(default = "default_storage_mode")]
    pub mode: String,
    /// Snapshot directory for `"file"` mode
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_storage_mode() -> String {
    "memory".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mode: default_storage_mode(),
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Parse the mode string into a `StorageMode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"memory"` or `"file"`.
    pub fn storage_mode(&self) -> Result<StorageMode, ConfigError> {
        match self.mode.as_str() {
            "memory" => Ok(StorageMode::Memory),
            "file" => Ok(StorageMode::File),
            other => Err(ConfigError::Invalid(format!(
                "storage mode '{}'. Expected \"memory\" or \"file\".",
                other
            ))),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// `"text"` (default) or `"json"`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Parse the format string into a `LogFormat`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"text"` or `"json"`.
    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        match self.format.as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Invalid(format!(
                "log format '{}'. Expected \"text\" or \"json\".",
                other
            ))),
        }
    }
}

/// Service configuration loaded from `ticketmaster.toml`.
///
/// # Example
///
/// ```toml
/// [server]
/// bind = "0.0.0.0:3000"
///
/// [storage]
/// mode = "file"
/// data_dir = "/var/lib/ticketmaster"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,
    /// Document store
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Ticketmaster service configuration

[server]
# Socket address for the HTTP listener
bind = "127.0.0.1:3000"

[storage]
# "memory" (default) = data lives in process memory and is lost on exit
# "file"             = one JSON snapshot per collection under data_dir
mode = "memory"
data_dir = "data"

[logging]
# tracing filter used when RUST_LOG is unset
filter = "info"
# "text" (default) or "json"
format = "text"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds an
    /// unknown storage mode or log format.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Check enumerated string settings eagerly.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storage.storage_mode()?;
        self.logging.log_format()?;
        Ok(())
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an override leaves the config invalid.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(std::env::vars())
    }

    /// Apply `TICKETMASTER_*` overrides from an arbitrary variable source.
    ///
    /// Unrelated variables are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if an override leaves the config invalid.
    pub fn apply_overrides<I, K, V>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            match key.as_ref() {
                ENV_BIND => self.server.bind = value.into(),
                ENV_STORAGE_MODE => self.storage.mode = value.into(),
                ENV_DATA_DIR => self.storage.data_dir = PathBuf::from(value.into()),
                ENV_LOG => self.logging.filter = value.into(),
                _ => {}
            }
        }
        self.validate()
    }
}
