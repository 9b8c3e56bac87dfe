//! Directory seed file format.

use super::DirectoryError;
use medconsult_types::{Clinic, ClinicId, DoctorId, PatientId, PrincipalId, Role};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Contents of a directory seed file.
///
/// Parsing only checks shape; cross-references and uniqueness are checked
/// by [`InMemoryDirectory::from_seed`](super::InMemoryDirectory::from_seed).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorySeed {
    pub principals: Vec<PrincipalSeed>,
    pub clinics: Vec<Clinic>,
    pub doctors: Vec<DoctorSeed>,
    pub patients: Vec<PatientSeed>,
}

/// A principal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalSeed {
    /// Explicit id. Derived from `username` when omitted.
    #[serde(default)]
    pub id: Option<PrincipalId>,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub patronymic: Option<String>,
    pub role: Role,
    /// Bearer token accepted for this principal.
    pub token: String,
}

impl PrincipalSeed {
    /// Returns the explicit id, or a UUIDv5 of the username.
    #[must_use]
    pub fn principal_id(&self) -> PrincipalId {
        self.id.unwrap_or_else(|| {
            PrincipalId::from_uuid(Uuid::new_v5(&Uuid::NAMESPACE_OID, self.username.as_bytes()))
        })
    }
}

/// A doctor profile entry, linked to a principal by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorSeed {
    pub id: DoctorId,
    pub username: String,
    pub specialization: String,
    #[serde(default)]
    pub clinics: Vec<ClinicId>,
}

/// A patient profile entry, linked to a principal by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSeed {
    pub id: PatientId,
    pub username: String,
    pub phone: String,
    pub email: String,
}

impl DirectorySeed {
    /// Deserializes from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Reads and parses a seed file.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::ReadFile`] or [`DirectoryError::ParseToml`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| DirectoryError::read_file(path, e))?;
        Self::from_toml(&content).map_err(|e| DirectoryError::parse_toml(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SEED: &str = r#"
[[principals]]
username = "house"
first_name = "Gregory"
last_name = "House"
role = "Doctor"
token = "t-house"

[[principals]]
id = "6f1c2a4e-8d3b-4f7a-9c2e-1b5d7e9f0a11"
username = "admin"
role = "Admin"
token = "t-admin"

[[clinics]]
id = 1
name = "PPTH"
legal_address = "1 Main St"
physical_address = "1 Main St"

[[doctors]]
id = 1
username = "house"
specialization = "Diagnostics"
clinics = [1]
"#;

    #[test]
    fn parse_seed() {
        let seed = DirectorySeed::from_toml(SEED).expect("parse seed");
        assert_eq!(seed.principals.len(), 2);
        assert_eq!(seed.clinics[0].name, "PPTH");
        assert_eq!(seed.doctors[0].clinics, vec![ClinicId::new(1)]);
        assert!(seed.patients.is_empty());
        assert_eq!(seed.principals[1].first_name, "");
    }

    #[test]
    fn derived_principal_id_is_stable() {
        let seed = DirectorySeed::from_toml(SEED).expect("parse seed");
        let house = &seed.principals[0];
        assert_eq!(house.principal_id(), house.principal_id());
        assert_ne!(house.principal_id(), seed.principals[1].principal_id());
    }

    #[test]
    fn explicit_principal_id_wins() {
        let seed = DirectorySeed::from_toml(SEED).expect("parse seed");
        assert_eq!(
            seed.principals[1].principal_id().uuid().to_string(),
            "6f1c2a4e-8d3b-4f7a-9c2e-1b5d7e9f0a11"
        );
    }

    #[test]
    fn unknown_role_fails_to_parse() {
        let bad = r#"
[[principals]]
username = "x"
role = "Nurse"
token = "t"
"#;
        assert!(DirectorySeed::from_toml(bad).is_err());
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let temp = TempDir::new().expect("create temp dir");
        let err = DirectorySeed::load(temp.path().join("missing.toml")).expect_err("missing");
        assert!(matches!(err, DirectoryError::ReadFile { .. }));
    }

    #[test]
    fn load_bad_toml_is_parse_error() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("seed.toml");
        std::fs::write(&path, "[[principals]\n").expect("write seed");
        let err = DirectorySeed::load(&path).expect_err("bad toml");
        assert!(matches!(err, DirectoryError::ParseToml { .. }));
    }
}
