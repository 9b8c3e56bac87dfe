//! Store error types.

use chrono::{DateTime, Utc};
use medconsult_types::{ConsultationId, DoctorId, ErrorCode};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during consultation store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id.
    #[error("consultation not found: {0}")]
    NotFound(ConsultationId),

    /// The `(doctor, start_time)` slot is already held by another record.
    #[error("{doctor} already has {existing} starting at {start_time}")]
    ConstraintViolation {
        doctor: DoctorId,
        start_time: DateTime<Utc>,
        existing: ConsultationId,
    },

    /// I/O error while persisting or loading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A snapshot on disk breaks the store invariants.
    #[error("corrupt snapshot '{path}': {reason}")]
    Corrupt {
        path: PathBuf,
        reason: SnapshotDefect,
    },

    /// Storage directory creation failed.
    #[error("failed to create storage directory: {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Creates a ConstraintViolation error.
    pub fn constraint_violation(
        doctor: DoctorId,
        start_time: DateTime<Utc>,
        existing: ConsultationId,
    ) -> Self {
        Self::ConstraintViolation {
            doctor,
            start_time,
            existing,
        }
    }

    /// Creates a Corrupt error.
    pub fn corrupt(path: impl Into<PathBuf>, reason: SnapshotDefect) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason,
        }
    }

    /// Creates a DirectoryCreation error.
    pub fn directory_creation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreation {
            path: path.into(),
            source,
        }
    }
}

/// Why a persisted snapshot was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotDefect {
    /// Written by an incompatible build.
    #[error("unsupported version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Two records carry the same id.
    #[error("duplicate id {0}")]
    DuplicateId(ConsultationId),

    /// Two records hold the same `(doctor, start_time)` slot.
    #[error("{holder} and {other} share slot ({doctor}, {start_time})")]
    SharedSlot {
        holder: ConsultationId,
        other: ConsultationId,
        doctor: DoctorId,
        start_time: DateTime<Utc>,
    },

    /// A record id leaves no room for the next one.
    #[error("id {0} exhausts the id sequence")]
    IdExhausted(ConsultationId),
}

impl ErrorCode for StoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "STORE_NOT_FOUND",
            Self::ConstraintViolation { .. } => "STORE_CONSTRAINT_VIOLATION",
            Self::Io(_) => "STORE_IO",
            Self::Serialization(_) => "STORE_SERIALIZATION",
            Self::Corrupt { .. } => "STORE_CORRUPT",
            Self::DirectoryCreation { .. } => "STORE_DIRECTORY_CREATION",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. } | Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use medconsult_types::assert_error_codes;

    #[test]
    fn not_found_error() {
        let err = StoreError::NotFound(ConsultationId::new(42));
        assert!(err.to_string().contains("consultation:42"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn codes_are_store_prefixed() {
        let t = Utc
            .with_ymd_and_hms(2026, 7, 7, 7, 0, 0)
            .single()
            .expect("valid timestamp");
        let errors = [
            StoreError::NotFound(ConsultationId::new(1)),
            StoreError::constraint_violation(DoctorId::new(1), t, ConsultationId::new(2)),
            StoreError::Io(std::io::Error::other("disk full")),
            StoreError::corrupt("/tmp/x.json", SnapshotDefect::DuplicateId(ConsultationId::new(1))),
            StoreError::directory_creation("/tmp/x", std::io::Error::other("denied")),
        ];
        assert_error_codes(&errors, "STORE_");
    }

    #[test]
    fn constraint_violation_and_io_are_recoverable() {
        let t = Utc
            .with_ymd_and_hms(2026, 7, 7, 7, 0, 0)
            .single()
            .expect("valid timestamp");
        assert!(
            StoreError::constraint_violation(DoctorId::new(1), t, ConsultationId::new(2))
                .is_recoverable()
        );
        assert!(StoreError::Io(std::io::Error::other("busy")).is_recoverable());
        let corrupt =
            StoreError::corrupt("/tmp/x.json", SnapshotDefect::DuplicateId(ConsultationId::new(1)));
        assert!(!corrupt.is_recoverable());
    }
}
