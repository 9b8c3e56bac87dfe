//! Principal (caller identity) types.
//!
//! A [`Principal`] represents the caller performing an action. It carries
//! the caller's [`Role`] and, for doctors and patients, the linked profile
//! id resolved by the directory.
//!
//! # Profile Resolution
//!
//! Profile linkage is explicit: a doctor principal whose directory entry has
//! no doctor profile is represented as `Doctor { profile: None, .. }`. The
//! authorization policy treats that case on its own rather than silently
//! skipping ownership checks.

use crate::{DoctorId, PatientId, PrincipalId};
use serde::{Deserialize, Serialize};

/// Role attribute of an authenticated principal.
///
/// Wire spelling matches the identity provider: `"Admin"`, `"Doctor"`,
/// `"Patient"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Clinic administrator.
    Admin,
    /// Practising doctor.
    Doctor,
    /// Patient.
    Patient,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Doctor, Role::Patient];

    /// Returns the wire name of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Doctor => "Doctor",
            Self::Patient => "Patient",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The caller performing an action.
///
/// # Variants
///
/// | Variant | Role | Profile |
/// |---------|------|---------|
/// | `Anonymous` | none | none |
/// | `Admin` | Admin | none |
/// | `Doctor` | Doctor | `Option<DoctorId>` |
/// | `Patient` | Patient | `Option<PatientId>` |
///
/// # Why No Default?
///
/// There is no sensible default caller. Unauthenticated requests are
/// modelled explicitly as [`Principal::Anonymous`].
///
/// # Example
///
/// ```
/// use medconsult_types::{PatientId, Principal, PrincipalId, Role};
///
/// let patient = Principal::Patient {
///     id: PrincipalId::new(),
///     profile: Some(PatientId::new(1)),
/// };
/// assert!(patient.is_authenticated());
/// assert_eq!(patient.role(), Some(Role::Patient));
/// assert!(patient.doctor_profile().is_none());
///
/// assert!(!Principal::Anonymous.is_authenticated());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Principal {
    /// Unauthenticated caller.
    Anonymous,

    /// Administrator.
    Admin(PrincipalId),

    /// Doctor, with the linked doctor profile if one exists.
    Doctor {
        /// Principal id.
        id: PrincipalId,
        /// Linked doctor profile.
        profile: Option<DoctorId>,
    },

    /// Patient, with the linked patient profile if one exists.
    Patient {
        /// Principal id.
        id: PrincipalId,
        /// Linked patient profile.
        profile: Option<PatientId>,
    },
}

impl Principal {
    /// Returns `true` unless this is [`Principal::Anonymous`].
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    /// Returns the role, or `None` for an anonymous caller.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Anonymous => None,
            Self::Admin(_) => Some(Role::Admin),
            Self::Doctor { .. } => Some(Role::Doctor),
            Self::Patient { .. } => Some(Role::Patient),
        }
    }

    /// Returns the principal id, or `None` for an anonymous caller.
    #[must_use]
    pub fn id(&self) -> Option<PrincipalId> {
        match self {
            Self::Anonymous => None,
            Self::Admin(id) | Self::Doctor { id, .. } | Self::Patient { id, .. } => Some(*id),
        }
    }

    /// Returns the linked doctor profile id, if any.
    #[must_use]
    pub fn doctor_profile(&self) -> Option<DoctorId> {
        match self {
            Self::Doctor { profile, .. } => *profile,
            _ => None,
        }
    }

    /// Returns the linked patient profile id, if any.
    #[must_use]
    pub fn patient_profile(&self) -> Option<PatientId> {
        match self {
            Self::Patient { profile, .. } => *profile,
            _ => None,
        }
    }

    /// Returns `true` if this is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Admin(id) => write!(f, "admin:{}", id.uuid()),
            Self::Doctor { id, profile } => match profile {
                Some(p) => write!(f, "doctor:{}({p})", id.uuid()),
                None => write!(f, "doctor:{}(no profile)", id.uuid()),
            },
            Self::Patient { id, profile } => match profile {
                Some(p) => write!(f, "patient:{}({p})", id.uuid()),
                None => write!(f, "patient:{}(no profile)", id.uuid()),
            },
        }
    }
}
