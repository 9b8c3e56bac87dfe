//! Service errors.

use crate::scheduling::ValidationError;
use crate::store::{ParseSortOrderError, StoreError};
use medconsult_auth::AccessDenied;
use medconsult_types::{DoctorId, ErrorCode, ParseStatusError, PatientId};
use thiserror::Error;

/// Any failure of a [`ConsultationService`](super::ConsultationService)
/// operation.
///
/// # HTTP Mapping
///
/// | Variant | Status |
/// |---------|--------|
/// | `Validation`, `UnknownDoctor`, `UnknownPatient`, `InvalidStatus`, `InvalidOrdering` | 400 |
/// | `AccessDenied` | 403 |
/// | `Store(NotFound)` | 404 |
/// | `Store(ConstraintViolation)` | 409 |
/// | other `Store` | 500 |
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown doctor: {0}")]
    UnknownDoctor(DoctorId),

    #[error("unknown patient: {0}")]
    UnknownPatient(PatientId),

    #[error("invalid status: {0}")]
    InvalidStatus(#[from] ParseStatusError),

    #[error("invalid ordering: {0}")]
    InvalidOrdering(#[from] ParseSortOrderError),
}

impl ErrorCode for ServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.code(),
            Self::AccessDenied(e) => e.code(),
            Self::Store(e) => e.code(),
            Self::UnknownDoctor(_) => "CONSULTATION_UNKNOWN_DOCTOR",
            Self::UnknownPatient(_) => "CONSULTATION_UNKNOWN_PATIENT",
            Self::InvalidStatus(_) => "CONSULTATION_INVALID_STATUS",
            Self::InvalidOrdering(_) => "CONSULTATION_INVALID_ORDERING",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Validation(e) => e.is_recoverable(),
            Self::AccessDenied(e) => e.is_recoverable(),
            Self::Store(e) => e.is_recoverable(),
            Self::UnknownDoctor(_)
            | Self::UnknownPatient(_)
            | Self::InvalidStatus(_)
            | Self::InvalidOrdering(_) => false,
        }
    }
}
