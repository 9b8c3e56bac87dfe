//! Directory of principals, doctors, patients and clinics.
//!
//! The directory is an external collaborator of the consultation engine:
//! it turns bearer tokens into [`Principal`]s and profile ids into records.
//! The engine never writes to it.
//!
//! # Architecture
//!
//! ```text
//! Directory trait (THIS MODULE)      <- consumed by ConsultationService, HTTP layer
//!          │
//!          └── InMemoryDirectory      <- built from a validated DirectorySeed (TOML)
//! ```
//!
//! # Seed File
//!
//! ```toml
//! [[principals]]
//! username = "house"
//! first_name = "Gregory"
//! last_name = "House"
//! role = "Doctor"
//! token = "doctor-house-token"
//!
//! [[clinics]]
//! id = 1
//! name = "Princeton-Plainsboro"
//! legal_address = "1 Hospital Rd"
//! physical_address = "1 Hospital Rd"
//!
//! [[doctors]]
//! id = 1
//! username = "house"
//! specialization = "Diagnostics"
//! clinics = [1]
//! ```
//!
//! Principal ids may be given explicitly (`id = "<uuid>"`); otherwise they
//! are derived from the username so they stay stable across restarts.

mod error;
mod memory;
mod seed;

pub use error::DirectoryError;
pub use memory::InMemoryDirectory;
pub use seed::{DirectorySeed, DoctorSeed, PatientSeed, PrincipalSeed};

use medconsult_types::{
    Clinic, ClinicId, Doctor, DoctorId, Patient, PatientId, Principal, PrincipalId,
    PrincipalRecord,
};
use std::collections::HashSet;

/// Read-only view of the directory.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait Directory: Send + Sync {
    /// Resolves a bearer token to a principal.
    ///
    /// Returns `None` for unknown tokens. A known doctor or patient whose
    /// profile is missing resolves with `profile: None`.
    fn resolve_token(&self, token: &str) -> Option<Principal>;

    /// Looks up a principal record.
    fn principal(&self, id: PrincipalId) -> Option<PrincipalRecord>;

    /// Looks up a doctor profile.
    fn doctor(&self, id: DoctorId) -> Option<Doctor>;

    /// Looks up a patient profile.
    fn patient(&self, id: PatientId) -> Option<Patient>;

    /// Looks up a clinic.
    fn clinic(&self, id: ClinicId) -> Option<Clinic>;

    /// Doctors whose first name, last name or patronymic contains `term`
    /// (case-insensitive).
    fn search_doctors(&self, term: &str) -> HashSet<DoctorId>;

    /// Patients whose first name, last name or patronymic contains `term`
    /// (case-insensitive).
    fn search_patients(&self, term: &str) -> HashSet<PatientId>;
}
