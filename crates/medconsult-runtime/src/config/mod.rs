//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! Configuration is loaded from multiple sources with priority-based merging:
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌──────────────────────────────────────────────┐
//! │  1. CLI arguments (ConfigResolver)           │  Per invocation
//! ├──────────────────────────────────────────────┤
//! │  2. Environment Variables (MEDCONSULT_*)     │  Runtime override
//! ├──────────────────────────────────────────────┤
//! │  3. Project Config (.medconsult/config.toml) │  Deployment-specific
//! ├──────────────────────────────────────────────┤
//! │  4. Global Config (~/.medconsult/config.toml)│  Host defaults
//! ├──────────────────────────────────────────────┤
//! │  5. Default Values (compile-time)            │  Fallback
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Directory Structure
//!
//! ```text
//! ~/.medconsult/                 # Global directory
//! ├── config.toml                # Global configuration
//! ├── consultations.json         # Default JSON store
//! └── logs/
//!     └── medconsult.log         # File log (logging.file = true)
//!
//! <project>/.medconsult/
//! └── config.toml                # Project configuration (overrides global)
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `MEDCONSULT_DEBUG` | `debug` | bool |
//! | `MEDCONSULT_BIND` | `server.bind` | String |
//! | `MEDCONSULT_STORAGE` | `storage.backend` | `memory` \| `json` |
//! | `MEDCONSULT_STORAGE_PATH` | `storage.path` | PathBuf |
//! | `MEDCONSULT_DIRECTORY_SEED` | `directory.seed` | PathBuf |
//!
//! # Example Configuration
//!
//! ```toml
//! debug = false
//!
//! [server]
//! bind = "127.0.0.1:8000"
//!
//! [storage]
//! backend = "json"
//! path = "~/.medconsult/consultations.json"
//!
//! [directory]
//! seed = "directory.toml"
//!
//! [logging]
//! file = true
//! file_path = "~/.medconsult/logs"
//! file_level = "debug"
//! ```

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::{ConfigResolver, NoOpResolver};
pub use types::{
    DirectoryConfig, LoggingConfig, MedConsultConfig, ParseStorageBackendError, ServerConfig,
    StorageBackend, StorageConfig,
};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".medconsult")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".medconsult";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
