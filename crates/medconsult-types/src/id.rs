//! Identifier types for MedConsult.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for an authenticated principal.
///
/// Principals are issued by the identity provider, so the id is a UUID
/// rather than a local sequence number.
///
/// # Example
///
/// ```
/// use medconsult_types::PrincipalId;
///
/// let id1 = PrincipalId::new();
/// let id2 = PrincipalId::new();
/// assert_ne!(id1, id2);
/// assert!(format!("{id1}").starts_with("principal:"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(pub Uuid);

impl PrincipalId {
    /// Creates a new random [`PrincipalId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "principal:{}", self.0)
    }
}

/// Declares a numeric record identifier.
///
/// Numeric ids serialize as bare integers so that JSON payloads carry
/// `"doctor": 3` rather than a wrapped object.
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Wraps a raw numeric id.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw numeric id.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a doctor profile in the directory.
    DoctorId,
    "doctor"
);

numeric_id!(
    /// Identifier of a patient profile in the directory.
    PatientId,
    "patient"
);

numeric_id!(
    /// Identifier of a clinic in the directory.
    ClinicId,
    "clinic"
);

numeric_id!(
    /// Identifier of a consultation, assigned by the store on creation.
    ///
    /// Ids are allocated from a monotonically increasing sequence and are
    /// never reused, even after deletion.
    ConsultationId,
    "consultation"
);
