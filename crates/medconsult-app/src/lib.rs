//! MedConsult Application Layer.
//!
//! This crate provides:
//!
//! - **MedConsultApp**: wiring of config, directory, store and service
//! - **HTTP API**: the axum router over [`ConsultationService`]
//! - **CliOverrides**: command-line layer of the configuration
//! - **AppError**: Unified application-level error type
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  medconsult-types, medconsult-auth                          │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Runtime Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  medconsult-runtime (service, store, directory, config)     │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Application Layer  ◄── HERE                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  medconsult-app (builder + HTTP router + AppError)          │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Frontend Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  medconsult-server (clap + tracing-subscriber + anyhow)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Error Handling Strategy
//!
//! ```text
//! Startup errors (ConfigError, DirectoryError, StoreError)
//!                    ↓ From impl
//!               AppError ──► anyhow in the binary
//!
//! Request errors (ServiceError)
//!                    ↓ From impl
//!               ApiError ──► {"code", "detail"} JSON + HTTP status
//! ```

mod app;
mod cli_overrides;
mod error;
pub mod http;

pub use app::{AppSummary, MedConsultApp, MedConsultAppBuilder};
pub use cli_overrides::CliOverrides;
pub use error::AppError;
pub use http::{router, ApiError, AppState};

// Re-export from Runtime Layer
pub use medconsult_runtime::config::{ConfigLoader, ConfigResolver, MedConsultConfig};
pub use medconsult_runtime::{ConsultationService, ServiceError};
pub use medconsult_types::ErrorCode;
