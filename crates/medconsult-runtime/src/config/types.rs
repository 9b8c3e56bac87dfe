//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use super::default_config_dir;
use crate::store::default_store_path;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Default HTTP bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Main configuration structure.
///
/// This is the unified configuration after merging all layers.
///
/// # Example
///
/// ```
/// use medconsult_runtime::config::{MedConsultConfig, StorageBackend};
///
/// let config = MedConsultConfig::default();
/// assert!(!config.debug);
/// assert_eq!(config.server.bind, "127.0.0.1:8000");
/// assert_eq!(config.storage.backend, StorageBackend::Memory);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MedConsultConfig {
    /// Enable debug mode (verbose logging).
    pub debug: bool,

    /// HTTP server configuration.
    pub server: ServerConfig,

    /// Consultation storage configuration.
    pub storage: StorageConfig,

    /// Directory seed configuration.
    pub directory: DirectoryConfig,

    /// File logging configuration.
    pub logging: LoggingConfig,
}

impl MedConsultConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Merges another config into this one.
    ///
    /// Values from `other` override values in `self` only if they
    /// differ from the default.
    pub fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.debug != default.debug {
            self.debug = other.debug;
        }

        self.server.merge(&other.server);
        self.storage.merge(&other.storage);
        self.directory.merge(&other.directory);
        self.logging.merge(&other.logging);
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.into(),
        }
    }
}

impl ServerConfig {
    fn merge(&mut self, other: &Self) {
        if other.bind != DEFAULT_BIND {
            self.bind = other.bind.clone();
        }
    }
}

/// Consultation store backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Records live for the process lifetime.
    #[default]
    Memory,
    /// Records are persisted to a JSON snapshot.
    Json,
}

impl StorageBackend {
    /// Returns the config spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown storage backend '{input}': expected 'memory' or 'json'")]
pub struct ParseStorageBackendError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for StorageBackend {
    type Err = ParseStorageBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "json" => Ok(Self::Json),
            _ => Err(ParseStorageBackendError {
                input: s.to_string(),
            }),
        }
    }
}

/// Consultation storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend to use.
    pub backend: StorageBackend,

    /// Snapshot path for the `json` backend.
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    fn merge(&mut self, other: &Self) {
        if other.backend != StorageBackend::default() {
            self.backend = other.backend;
        }
        if other.path.is_some() {
            self.path = other.path.clone();
        }
    }

    /// Returns the snapshot path, falling back to
    /// `~/.medconsult/consultations.json`.
    #[must_use]
    pub fn path_or_default(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_store_path)
    }
}

/// Directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Seed file with principals, profiles and clinics.
    ///
    /// Without a seed the directory is empty and every request is
    /// unauthenticated.
    pub seed: Option<PathBuf>,
}

impl DirectoryConfig {
    fn merge(&mut self, other: &Self) {
        if other.seed.is_some() {
            self.seed = other.seed.clone();
        }
    }
}

/// File logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to `<file_path>/medconsult.log`.
    pub file: bool,

    /// Log directory. Defaults to `~/.medconsult/logs`.
    pub file_path: Option<PathBuf>,

    /// Level filter for the file log.
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: false,
            file_path: None,
            file_level: "debug".into(),
        }
    }
}

impl LoggingConfig {
    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.file != default.file {
            self.file = other.file;
        }
        if other.file_path.is_some() {
            self.file_path = other.file_path.clone();
        }
        if other.file_level != default.file_level {
            self.file_level = other.file_level.clone();
        }
    }

    /// Returns the log directory, falling back to `~/.medconsult/logs`.
    #[must_use]
    pub fn file_path_or_default(&self) -> PathBuf {
        self.file_path
            .clone()
            .unwrap_or_else(|| default_config_dir().join("logs"))
    }
}
