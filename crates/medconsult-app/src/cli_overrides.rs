//! CLI configuration overrides.
//!
//! Implements [`ConfigResolver`] for CLI flag overrides.

use medconsult_runtime::config::{ConfigResolver, MedConsultConfig, StorageBackend};
use std::path::PathBuf;

/// CLI configuration overrides.
///
/// Applied as the highest priority layer after file/env config loading.
///
/// # Example
///
/// ```
/// use medconsult_app::{CliOverrides, ConfigResolver, MedConsultConfig};
///
/// let mut config = MedConsultConfig::default();
///
/// CliOverrides::new()
///     .debug(true)
///     .bind("0.0.0.0:9000")
///     .apply(&mut config);
///
/// assert!(config.debug);
/// assert_eq!(config.server.bind, "0.0.0.0:9000");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    debug: Option<bool>,
    bind: Option<String>,
    storage: Option<StorageBackend>,
    storage_path: Option<PathBuf>,
    directory_seed: Option<PathBuf>,
    log_file: Option<PathBuf>,
    log_level: Option<String>,
}

impl CliOverrides {
    /// Creates a new empty overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets debug mode override.
    #[must_use]
    pub fn debug(mut self, value: bool) -> Self {
        self.debug = Some(value);
        self
    }

    /// Sets bind address override.
    #[must_use]
    pub fn bind(mut self, addr: impl Into<String>) -> Self {
        self.bind = Some(addr.into());
        self
    }

    /// Sets storage backend override.
    #[must_use]
    pub fn storage(mut self, backend: StorageBackend) -> Self {
        self.storage = Some(backend);
        self
    }

    /// Sets JSON snapshot path override.
    #[must_use]
    pub fn storage_path(mut self, path: PathBuf) -> Self {
        self.storage_path = Some(path);
        self
    }

    /// Sets directory seed override.
    #[must_use]
    pub fn directory_seed(mut self, path: PathBuf) -> Self {
        self.directory_seed = Some(path);
        self
    }

    /// Enables file logging into `dir`.
    #[must_use]
    pub fn log_file(mut self, dir: PathBuf) -> Self {
        self.log_file = Some(dir);
        self
    }

    /// Sets the file log level override.
    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Sets debug mode override if Some.
    #[must_use]
    pub fn debug_opt(mut self, value: Option<bool>) -> Self {
        if let Some(v) = value {
            self.debug = Some(v);
        }
        self
    }

    /// Sets bind address override if Some.
    #[must_use]
    pub fn bind_opt(mut self, addr: Option<String>) -> Self {
        if let Some(a) = addr {
            self.bind = Some(a);
        }
        self
    }

    /// Sets storage backend override if Some.
    #[must_use]
    pub fn storage_opt(mut self, backend: Option<StorageBackend>) -> Self {
        if let Some(b) = backend {
            self.storage = Some(b);
        }
        self
    }

    /// Sets JSON snapshot path override if Some.
    #[must_use]
    pub fn storage_path_opt(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.storage_path = Some(p);
        }
        self
    }

    /// Sets directory seed override if Some.
    #[must_use]
    pub fn directory_seed_opt(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.directory_seed = Some(p);
        }
        self
    }

    /// Enables file logging if Some.
    #[must_use]
    pub fn log_file_opt(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(d) = dir {
            self.log_file = Some(d);
        }
        self
    }

    /// Sets the file log level override if Some.
    #[must_use]
    pub fn log_level_opt(mut self, level: Option<String>) -> Self {
        if let Some(l) = level {
            self.log_level = Some(l);
        }
        self
    }
}

impl ConfigResolver for CliOverrides {
    fn apply(&self, config: &mut MedConsultConfig) {
        if let Some(d) = self.debug {
            config.debug = d;
        }
        if let Some(ref b) = self.bind {
            config.server.bind = b.clone();
        }
        if let Some(s) = self.storage {
            config.storage.backend = s;
        }
        if let Some(ref p) = self.storage_path {
            config.storage.path = Some(p.clone());
        }
        if let Some(ref p) = self.directory_seed {
            config.directory.seed = Some(p.clone());
        }
        if let Some(ref d) = self.log_file {
            config.logging.file = true;
            config.logging.file_path = Some(d.clone());
        }
        if let Some(ref l) = self.log_level {
            config.logging.file_level = l.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_applies_nothing() {
        let mut config = MedConsultConfig::default();
        let original = config.clone();

        CliOverrides::new().apply(&mut config);

        assert_eq!(config, original);
    }

    #[test]
    fn storage_override() {
        let mut config = MedConsultConfig::default();

        CliOverrides::new()
            .storage(StorageBackend::Json)
            .storage_path(PathBuf::from("/srv/medconsult.json"))
            .apply(&mut config);

        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert_eq!(
            config.storage.path,
            Some(PathBuf::from("/srv/medconsult.json"))
        );
    }

    #[test]
    fn log_file_enables_file_logging() {
        let mut config = MedConsultConfig::default();
        assert!(!config.logging.file);

        CliOverrides::new()
            .log_file(PathBuf::from("/var/log/medconsult"))
            .log_level("trace")
            .apply(&mut config);

        assert!(config.logging.file);
        assert_eq!(
            config.logging.file_path,
            Some(PathBuf::from("/var/log/medconsult"))
        );
        assert_eq!(config.logging.file_level, "trace");
    }

    #[test]
    fn chained_overrides() {
        let mut config = MedConsultConfig::default();

        CliOverrides::new()
            .debug(true)
            .bind("127.0.0.1:0")
            .directory_seed(PathBuf::from("seed.toml"))
            .apply(&mut config);

        assert!(config.debug);
        assert_eq!(config.server.bind, "127.0.0.1:0");
        assert_eq!(config.directory.seed, Some(PathBuf::from("seed.toml")));
    }

    #[test]
    fn opt_methods_skip_none() {
        let mut config = MedConsultConfig::default();
        let original = config.clone();

        CliOverrides::new()
            .debug_opt(None)
            .bind_opt(None)
            .storage_opt(None)
            .storage_path_opt(None)
            .directory_seed_opt(None)
            .log_file_opt(None)
            .log_level_opt(None)
            .apply(&mut config);

        assert_eq!(config, original);
    }
}
