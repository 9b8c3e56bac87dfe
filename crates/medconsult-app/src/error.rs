//! Application-level error type.
//!
//! [`AppError`] unifies the startup errors of the application layer.

use medconsult_runtime::config::ConfigError;
use medconsult_runtime::{DirectoryError, StoreError};
use medconsult_types::ErrorCode;
use thiserror::Error;

/// Unified application error.
///
/// # Example
///
/// ```
/// use medconsult_app::{AppError, ErrorCode};
///
/// let err = AppError::InvalidBind {
///     bind: "localhost".into(),
///     message: "invalid socket address syntax".into(),
/// };
/// assert_eq!(err.code(), "APP_INVALID_BIND");
/// eprintln!("Error: {}", err);
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Directory seed could not be loaded.
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Consultation store could not be opened.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The configured bind address is not a socket address.
    #[error("invalid bind address '{bind}': {message}")]
    InvalidBind { bind: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ErrorCode for AppError {
    fn code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.code(),
            Self::Directory(e) => e.code(),
            Self::Store(e) => e.code(),
            Self::InvalidBind { .. } => "APP_INVALID_BIND",
            Self::Io(_) => "APP_IO_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Config(e) => e.is_recoverable(),
            Self::Directory(e) => e.is_recoverable(),
            Self::Store(e) => e.is_recoverable(),
            Self::InvalidBind { .. } => false,
            Self::Io(_) => true,
        }
    }
}
