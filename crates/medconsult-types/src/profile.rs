//! Directory records: principals, doctors, patients and clinics.
//!
//! These records are owned by the directory and only referenced by
//! consultations. Each doctor or patient profile wraps exactly one
//! principal.

use crate::{ClinicId, DoctorId, PatientId, PrincipalId, Role};
use serde::{Deserialize, Serialize};

/// An account known to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalRecord {
    /// Stable principal id.
    pub id: PrincipalId,
    /// Login name.
    pub username: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Patronymic, when the person has one.
    #[serde(default)]
    pub patronymic: Option<String>,
    /// Role attribute.
    pub role: Role,
    /// Bearer token accepted for this principal.
    pub token: String,
}

impl PrincipalRecord {
    /// `"first last"`, trimmed.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Case-insensitive substring match over first name, last name and
    /// patronymic.
    #[must_use]
    pub fn matches_name(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            Some(self.first_name.as_str()),
            Some(self.last_name.as_str()),
            self.patronymic.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|part| part.to_lowercase().contains(&needle))
    }
}

/// A doctor profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Profile id.
    pub id: DoctorId,
    /// Principal this profile belongs to. Must have role `Doctor`.
    pub principal: PrincipalId,
    /// Medical specialization.
    pub specialization: String,
    /// Clinics the doctor practises at.
    #[serde(default)]
    pub clinics: Vec<ClinicId>,
}

/// A patient profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Profile id.
    pub id: PatientId,
    /// Principal this profile belongs to. Must have role `Patient`.
    pub principal: PrincipalId,
    /// Contact phone in E.164 form. Unique among patients.
    pub phone: String,
    /// Contact e-mail. Unique among patients.
    pub email: String,
}

/// A clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    /// Clinic id.
    pub id: ClinicId,
    /// Name.
    pub name: String,
    /// Registered legal address.
    pub legal_address: String,
    /// Street address patients visit.
    pub physical_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PrincipalRecord {
        PrincipalRecord {
            id: PrincipalId::new(),
            username: "jdoe".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            patronymic: Some("Ivanovich".into()),
            role: Role::Doctor,
            token: "t".into(),
        }
    }

    #[test]
    fn display_name_joins_first_and_last() {
        assert_eq!(record().display_name(), "John Doe");
    }

    #[test]
    fn display_name_trims_missing_parts() {
        let mut r = record();
        r.first_name.clear();
        assert_eq!(r.display_name(), "Doe");
    }

    #[test]
    fn matches_name_is_case_insensitive() {
        let r = record();
        assert!(r.matches_name("john"));
        assert!(r.matches_name("DOE"));
        assert!(r.matches_name("ivanov"));
        assert!(!r.matches_name("smith"));
    }

    #[test]
    fn empty_needle_matches_everything() {
        assert!(record().matches_name("   "));
    }
}
