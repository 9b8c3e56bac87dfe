//! Seed-backed in-memory directory.

use super::{Directory, DirectoryError, DirectorySeed};
use medconsult_types::{
    Clinic, ClinicId, Doctor, DoctorId, Patient, PatientId, Principal, PrincipalId,
    PrincipalRecord, Role,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// Immutable directory built from a validated [`DirectorySeed`].
///
/// # Validation
///
/// | Rule | Error |
/// |------|-------|
/// | usernames, principal ids and tokens are unique | `DuplicatePrincipal` |
/// | profiles reference a known username | `UnknownPrincipal` |
/// | doctor principals have role Doctor, patient principals role Patient | `RoleMismatch` |
/// | a principal has at most one profile | `ProfileTaken` |
/// | doctor, patient and clinic ids are unique | `Duplicate{Doctor,Patient,Clinic}` |
/// | patient phone and e-mail are unique | `DuplicatePatientContact` |
/// | clinic `(name, legal_address, physical_address)` is unique | `DuplicateClinicAddress` |
/// | doctor clinics exist | `UnknownClinic` |
///
/// # Example
///
/// ```
/// use medconsult_runtime::{Directory, DirectorySeed, InMemoryDirectory};
/// use medconsult_types::Role;
///
/// let seed = DirectorySeed::from_toml(r#"
/// [[principals]]
/// username = "root"
/// role = "Admin"
/// token = "secret"
/// "#).unwrap();
///
/// let directory = InMemoryDirectory::from_seed(seed).unwrap();
/// let principal = directory.resolve_token("secret").unwrap();
/// assert_eq!(principal.role(), Some(Role::Admin));
/// assert!(directory.resolve_token("wrong").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    principals: HashMap<PrincipalId, PrincipalRecord>,
    tokens: HashMap<String, PrincipalId>,
    doctors: BTreeMap<DoctorId, Doctor>,
    patients: BTreeMap<PatientId, Patient>,
    clinics: BTreeMap<ClinicId, Clinic>,
    doctor_by_principal: HashMap<PrincipalId, DoctorId>,
    patient_by_principal: HashMap<PrincipalId, PatientId>,
}

impl InMemoryDirectory {
    /// Creates an empty directory. Every token is rejected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads, parses and validates a seed file.
    ///
    /// # Errors
    ///
    /// Any [`DirectoryError`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        Self::from_seed(DirectorySeed::load(path)?)
    }

    /// Validates `seed` and builds the directory.
    ///
    /// # Errors
    ///
    /// The first validation failure found; see the type docs.
    pub fn from_seed(seed: DirectorySeed) -> Result<Self, DirectoryError> {
        let mut dir = Self::default();
        let mut by_username: HashMap<String, PrincipalId> = HashMap::new();

        for entry in seed.principals {
            let id = entry.principal_id();
            if by_username.contains_key(&entry.username) {
                return Err(DirectoryError::duplicate_principal("username", entry.username));
            }
            if dir.principals.contains_key(&id) {
                return Err(DirectoryError::duplicate_principal("id", id.uuid().to_string()));
            }
            if dir.tokens.contains_key(&entry.token) {
                // Never echo the token itself.
                return Err(DirectoryError::duplicate_principal("token", entry.username));
            }

            by_username.insert(entry.username.clone(), id);
            dir.tokens.insert(entry.token.clone(), id);
            dir.principals.insert(
                id,
                PrincipalRecord {
                    id,
                    username: entry.username,
                    first_name: entry.first_name,
                    last_name: entry.last_name,
                    patronymic: entry.patronymic,
                    role: entry.role,
                    token: entry.token,
                },
            );
        }

        let mut addresses = HashSet::new();
        for clinic in seed.clinics {
            if dir.clinics.contains_key(&clinic.id) {
                return Err(DirectoryError::DuplicateClinic(clinic.id));
            }
            let key = (
                clinic.name.clone(),
                clinic.legal_address.clone(),
                clinic.physical_address.clone(),
            );
            if !addresses.insert(key) {
                return Err(DirectoryError::DuplicateClinicAddress { name: clinic.name });
            }
            dir.clinics.insert(clinic.id, clinic);
        }

        for entry in seed.doctors {
            if dir.doctors.contains_key(&entry.id) {
                return Err(DirectoryError::DuplicateDoctor(entry.id));
            }
            let principal = dir.linkable_principal(&by_username, &entry.username, Role::Doctor)?;
            if let Some(&clinic) = entry.clinics.iter().find(|c| !dir.clinics.contains_key(*c)) {
                return Err(DirectoryError::UnknownClinic {
                    doctor: entry.id,
                    clinic,
                });
            }

            dir.doctor_by_principal.insert(principal, entry.id);
            dir.doctors.insert(
                entry.id,
                Doctor {
                    id: entry.id,
                    principal,
                    specialization: entry.specialization,
                    clinics: entry.clinics,
                },
            );
        }

        let mut phones = HashSet::new();
        let mut emails = HashSet::new();
        for entry in seed.patients {
            if dir.patients.contains_key(&entry.id) {
                return Err(DirectoryError::DuplicatePatient(entry.id));
            }
            let principal = dir.linkable_principal(&by_username, &entry.username, Role::Patient)?;
            if !phones.insert(entry.phone.clone()) {
                return Err(DirectoryError::DuplicatePatientContact {
                    field: "phone",
                    value: entry.phone,
                });
            }
            if !emails.insert(entry.email.to_lowercase()) {
                return Err(DirectoryError::DuplicatePatientContact {
                    field: "email",
                    value: entry.email,
                });
            }

            dir.patient_by_principal.insert(principal, entry.id);
            dir.patients.insert(
                entry.id,
                Patient {
                    id: entry.id,
                    principal,
                    phone: entry.phone,
                    email: entry.email,
                },
            );
        }

        tracing::debug!(
            principals = dir.principals.len(),
            doctors = dir.doctors.len(),
            patients = dir.patients.len(),
            clinics = dir.clinics.len(),
            "Directory loaded"
        );
        Ok(dir)
    }

    /// Resolves `username` to a principal that has `role` and no profile yet.
    fn linkable_principal(
        &self,
        by_username: &HashMap<String, PrincipalId>,
        username: &str,
        role: Role,
    ) -> Result<PrincipalId, DirectoryError> {
        let id = *by_username
            .get(username)
            .ok_or_else(|| DirectoryError::unknown_principal(username))?;
        let actual = self
            .principals
            .get(&id)
            .map(|p| p.role)
            .ok_or_else(|| DirectoryError::unknown_principal(username))?;

        if actual != role {
            return Err(DirectoryError::RoleMismatch {
                username: username.to_string(),
                expected: role,
                actual,
            });
        }
        if self.doctor_by_principal.contains_key(&id) || self.patient_by_principal.contains_key(&id)
        {
            return Err(DirectoryError::ProfileTaken {
                username: username.to_string(),
            });
        }
        Ok(id)
    }

    /// Number of principals.
    #[must_use]
    pub fn principal_count(&self) -> usize {
        self.principals.len()
    }

    /// Number of doctor profiles.
    #[must_use]
    pub fn doctor_count(&self) -> usize {
        self.doctors.len()
    }

    /// Number of patient profiles.
    #[must_use]
    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    /// Number of clinics.
    #[must_use]
    pub fn clinic_count(&self) -> usize {
        self.clinics.len()
    }

    fn name_matches(&self, principal: PrincipalId, term: &str) -> bool {
        self.principals
            .get(&principal)
            .is_some_and(|p| p.matches_name(term))
    }
}

impl Directory for InMemoryDirectory {
    fn resolve_token(&self, token: &str) -> Option<Principal> {
        let id = *self.tokens.get(token)?;
        let record = self.principals.get(&id)?;

        let principal = match record.role {
            Role::Admin => Principal::Admin(id),
            Role::Doctor => Principal::Doctor {
                id,
                profile: self.doctor_by_principal.get(&id).copied(),
            },
            Role::Patient => Principal::Patient {
                id,
                profile: self.patient_by_principal.get(&id).copied(),
            },
        };
        Some(principal)
    }

    fn principal(&self, id: PrincipalId) -> Option<PrincipalRecord> {
        self.principals.get(&id).cloned()
    }

    fn doctor(&self, id: DoctorId) -> Option<Doctor> {
        self.doctors.get(&id).cloned()
    }

    fn patient(&self, id: PatientId) -> Option<Patient> {
        self.patients.get(&id).cloned()
    }

    fn clinic(&self, id: ClinicId) -> Option<Clinic> {
        self.clinics.get(&id).cloned()
    }

    fn search_doctors(&self, term: &str) -> HashSet<DoctorId> {
        self.doctors
            .values()
            .filter(|d| self.name_matches(d.principal, term))
            .map(|d| d.id)
            .collect()
    }

    fn search_patients(&self, term: &str) -> HashSet<PatientId> {
        self.patients
            .values()
            .filter(|p| self.name_matches(p.principal, term))
            .map(|p| p.id)
            .collect()
    }
}
