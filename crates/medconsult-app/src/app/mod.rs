//! The assembled MedConsult application.

mod builder;

pub use builder::MedConsultAppBuilder;

use crate::{http, AppError};
use medconsult_runtime::config::{ConfigResolver, MedConsultConfig};
use medconsult_runtime::ConsultationService;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// A fully wired application: configuration plus the service built from it.
///
/// # Example
///
/// ```
/// use medconsult_app::{CliOverrides, MedConsultApp, MedConsultConfig};
///
/// let app = MedConsultApp::builder(CliOverrides::new())
///     .with_config(MedConsultConfig::default())
///     .build()
///     .unwrap();
/// assert_eq!(app.summary().consultations, 0);
/// ```
#[derive(Debug, Clone)]
pub struct MedConsultApp {
    config: MedConsultConfig,
    service: ConsultationService,
    summary: AppSummary,
}

/// Counts reported at startup and by `--check`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppSummary {
    pub principals: usize,
    pub doctors: usize,
    pub patients: usize,
    pub clinics: usize,
    pub consultations: usize,
}

impl MedConsultApp {
    /// Starts building an app whose config is finalized by `resolver`.
    #[must_use]
    pub fn builder(resolver: impl ConfigResolver + 'static) -> MedConsultAppBuilder {
        MedConsultAppBuilder::new(resolver)
    }

    /// The effective configuration.
    #[must_use]
    pub fn config(&self) -> &MedConsultConfig {
        &self.config
    }

    /// The consultation service.
    #[must_use]
    pub fn service(&self) -> &ConsultationService {
        &self.service
    }

    /// Directory and store counts taken at build time.
    #[must_use]
    pub fn summary(&self) -> AppSummary {
        self.summary
    }

    /// The HTTP router over this app's service.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        http::router(self.service.clone())
    }

    /// Parses the configured bind address.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidBind`] if it is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        let bind = &self.config.server.bind;
        bind.parse().map_err(|e: std::net::AddrParseError| AppError::InvalidBind {
            bind: bind.clone(),
            message: e.to_string(),
        })
    }

    /// Serves HTTP on the configured address until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the address is invalid or cannot be bound.
    pub async fn serve(self) -> Result<(), AppError> {
        let addr = self.bind_addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve_on(listener, shutdown_signal()).await
    }

    /// Serves HTTP on `listener` until `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] on a server failure.
    pub async fn serve_on(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), AppError> {
        let local = listener.local_addr()?;
        info!(addr = %local, "listening");

        axum::serve(listener, self.router().into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliOverrides;

    fn app(bind: &str) -> MedConsultApp {
        MedConsultApp::builder(CliOverrides::new().bind(bind))
            .with_config(MedConsultConfig::default())
            .build()
            .expect("build app")
    }

    #[test]
    fn bind_addr_is_validated() {
        assert!(app("127.0.0.1:0").bind_addr().is_ok());
        assert!(matches!(
            app("localhost").bind_addr(),
            Err(AppError::InvalidBind { .. })
        ));
    }

    #[tokio::test]
    async fn serve_on_stops_on_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let result = app("127.0.0.1:0").serve_on(listener, async {}).await;
        assert!(result.is_ok());
    }
}
