//! Builder for [`MedConsultApp`].

use super::{AppSummary, MedConsultApp};
use crate::AppError;
use medconsult_runtime::config::{ConfigLoader, ConfigResolver, MedConsultConfig, StorageBackend};
use medconsult_runtime::{
    ConsultationService, ConsultationStore, InMemoryConsultationStore, InMemoryDirectory,
    JsonFileStore,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Builder for [`MedConsultApp`].
///
/// Configuration comes from a [`ConfigLoader`] (files and env), unless an
/// explicit config is supplied, and is then finalized by the resolver.
pub struct MedConsultAppBuilder {
    /// Last configuration layer, usually CLI flags.
    resolver: Box<dyn ConfigResolver>,
    loader: ConfigLoader,
    /// Replaces loading entirely when set.
    config: Option<MedConsultConfig>,
}

impl MedConsultAppBuilder {
    /// Creates a new builder with the given resolver.
    #[must_use]
    pub fn new(resolver: impl ConfigResolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
            loader: ConfigLoader::new(),
            config: None,
        }
    }

    /// Sets the loader used for the file and env layers.
    #[must_use]
    pub fn with_loader(mut self, loader: ConfigLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Uses `config` instead of loading one. The resolver still applies.
    #[must_use]
    pub fn with_config(mut self, config: MedConsultConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Resolves the configuration only.
    ///
    /// # Errors
    ///
    /// [`AppError::Config`] if a config layer is invalid.
    pub fn resolve_config(&self) -> Result<MedConsultConfig, AppError> {
        let mut config = match &self.config {
            Some(config) => config.clone(),
            None => self.loader.load()?,
        };
        self.resolver.apply(&mut config);
        Ok(config)
    }

    /// Builds the application.
    ///
    /// Resolves configuration, loads the directory seed and opens the
    /// configured store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the config, the seed or the store cannot be
    /// loaded.
    pub fn build(self) -> Result<MedConsultApp, AppError> {
        let config = self.resolve_config()?;

        let directory = match &config.directory.seed {
            Some(path) => {
                let directory = InMemoryDirectory::load(path)?;
                info!(
                    path = %path.display(),
                    principals = directory.principal_count(),
                    "Loaded directory seed"
                );
                directory
            }
            None => {
                warn!("no directory seed configured, every request will be unauthenticated");
                InMemoryDirectory::new()
            }
        };

        let store: Arc<dyn ConsultationStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(InMemoryConsultationStore::new()),
            StorageBackend::Json => {
                let path = config.storage.path_or_default();
                let store = JsonFileStore::open(&path)?;
                info!(path = %store.path().display(), "Opened JSON store");
                Arc::new(store)
            }
        };

        let summary = AppSummary {
            principals: directory.principal_count(),
            doctors: directory.doctor_count(),
            patients: directory.patient_count(),
            clinics: directory.clinic_count(),
            consultations: store.len()?,
        };

        let service = ConsultationService::new(store, Arc::new(directory));

        Ok(MedConsultApp {
            config,
            service,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliOverrides;
    use medconsult_runtime::config::NoOpResolver;
    use tempfile::TempDir;

    const SEED: &str = r#"
[[principals]]
username = "admin"
role = "Admin"
token = "admin-token"

[[principals]]
username = "house"
first_name = "Gregory"
last_name = "House"
role = "Doctor"
token = "house-token"

[[doctors]]
id = 1
username = "house"
specialization = "Diagnostics"
"#;

    #[test]
    fn build_with_defaults() {
        let app = MedConsultApp::builder(NoOpResolver)
            .with_config(MedConsultConfig::default())
            .build()
            .expect("build");
        assert_eq!(app.summary(), AppSummary::default());
        assert_eq!(app.config(), &MedConsultConfig::default());
    }

    #[test]
    fn build_with_seed_and_json_store() {
        let temp = TempDir::new().expect("create temp dir");
        let seed = temp.path().join("directory.toml");
        std::fs::write(&seed, SEED).expect("write seed");

        let app = MedConsultApp::builder(
            CliOverrides::new()
                .directory_seed(seed)
                .storage(StorageBackend::Json)
                .storage_path(temp.path().join("store.json")),
        )
        .with_config(MedConsultConfig::default())
        .build()
        .expect("build");

        let summary = app.summary();
        assert_eq!(summary.principals, 2);
        assert_eq!(summary.doctors, 1);
        assert_eq!(summary.consultations, 0);
        assert!(temp.path().join("store.json").exists());
        assert!(app.service().directory().resolve_token("house-token").is_some());
    }

    #[test]
    fn missing_seed_fails() {
        let temp = TempDir::new().expect("create temp dir");
        let err = MedConsultApp::builder(
            CliOverrides::new().directory_seed(temp.path().join("missing.toml")),
        )
        .with_config(MedConsultConfig::default())
        .build()
        .expect_err("missing seed");
        assert!(matches!(err, AppError::Directory(_)));
    }

    #[test]
    fn loader_layers_feed_the_build() {
        let temp = TempDir::new().expect("create temp dir");
        let global = temp.path().join("config.toml");
        std::fs::write(&global, "[server]\nbind = \"127.0.0.1:7000\"\n").expect("write config");

        let builder = MedConsultApp::builder(NoOpResolver).with_loader(
            ConfigLoader::new()
                .with_global_config(&global)
                .skip_project_config()
                .skip_env_vars(),
        );
        let config = builder.resolve_config().expect("resolve");
        assert_eq!(config.server.bind, "127.0.0.1:7000");
    }
}
