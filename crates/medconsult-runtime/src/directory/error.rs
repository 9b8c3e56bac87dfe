//! Directory errors.
//!
//! All of these are raised while loading a seed. A running directory is
//! read-only and cannot fail.

use medconsult_types::{ClinicId, DoctorId, ErrorCode, PatientId, Role};
use std::path::PathBuf;
use thiserror::Error;

/// Directory seed error type.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Failed to read the seed file.
    #[error("failed to read directory seed '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse directory seed '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Two principals share a username, id or token.
    #[error("duplicate principal {field} '{value}'")]
    DuplicatePrincipal { field: &'static str, value: String },

    /// A profile references a username that is not in `principals`.
    #[error("unknown principal '{username}'")]
    UnknownPrincipal { username: String },

    /// A profile's principal has the wrong role.
    #[error("principal '{username}' has role {actual}, expected {expected}")]
    RoleMismatch {
        username: String,
        expected: Role,
        actual: Role,
    },

    /// A principal is linked to more than one profile.
    #[error("principal '{username}' already has a profile")]
    ProfileTaken { username: String },

    /// Two doctors share an id.
    #[error("duplicate doctor id {0}")]
    DuplicateDoctor(DoctorId),

    /// Two patients share an id.
    #[error("duplicate patient id {0}")]
    DuplicatePatient(PatientId),

    /// Two patients share a phone number or e-mail address.
    #[error("duplicate patient {field} '{value}'")]
    DuplicatePatientContact { field: &'static str, value: String },

    /// Two clinics share an id.
    #[error("duplicate clinic id {0}")]
    DuplicateClinic(ClinicId),

    /// Two clinics share name and both addresses.
    #[error("duplicate clinic '{name}' at the same addresses")]
    DuplicateClinicAddress { name: String },

    /// A doctor references a clinic that is not in `clinics`.
    #[error("{doctor} references unknown {clinic}")]
    UnknownClinic { doctor: DoctorId, clinic: ClinicId },
}

impl DirectoryError {
    /// Creates a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse TOML error.
    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    /// Creates a duplicate principal error.
    pub fn duplicate_principal(field: &'static str, value: impl Into<String>) -> Self {
        Self::DuplicatePrincipal {
            field,
            value: value.into(),
        }
    }

    /// Creates an unknown principal error.
    pub fn unknown_principal(username: impl Into<String>) -> Self {
        Self::UnknownPrincipal {
            username: username.into(),
        }
    }
}

impl ErrorCode for DirectoryError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "DIRECTORY_READ_FILE",
            Self::ParseToml { .. } => "DIRECTORY_PARSE_TOML",
            Self::DuplicatePrincipal { .. } => "DIRECTORY_DUPLICATE_PRINCIPAL",
            Self::UnknownPrincipal { .. } => "DIRECTORY_UNKNOWN_PRINCIPAL",
            Self::RoleMismatch { .. } => "DIRECTORY_ROLE_MISMATCH",
            Self::ProfileTaken { .. } => "DIRECTORY_PROFILE_TAKEN",
            Self::DuplicateDoctor(_) => "DIRECTORY_DUPLICATE_DOCTOR",
            Self::DuplicatePatient(_) => "DIRECTORY_DUPLICATE_PATIENT",
            Self::DuplicatePatientContact { .. } => "DIRECTORY_DUPLICATE_PATIENT_CONTACT",
            Self::DuplicateClinic(_) => "DIRECTORY_DUPLICATE_CLINIC",
            Self::DuplicateClinicAddress { .. } => "DIRECTORY_DUPLICATE_CLINIC_ADDRESS",
            Self::UnknownClinic { .. } => "DIRECTORY_UNKNOWN_CLINIC",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::ReadFile { .. })
    }
}
