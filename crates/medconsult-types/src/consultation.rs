//! The consultation record.

use crate::{ConsultationId, ConsultationStatus, DoctorId, PatientId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled consultation between one doctor and one patient.
///
/// Records are created by the store, which assigns `id` and `created_at`.
/// Every persisted record satisfies:
///
/// - `start_time < end_time`
/// - the doctor and patient are different people
/// - no other record has the same `(doctor, start_time)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultation {
    /// Store-assigned identifier.
    pub id: ConsultationId,
    /// Creation time, immutable.
    pub created_at: DateTime<Utc>,
    /// Start of the appointment window.
    pub start_time: DateTime<Utc>,
    /// End of the appointment window.
    pub end_time: DateTime<Utc>,
    /// Current status.
    pub status: ConsultationStatus,
    /// Owning doctor.
    pub doctor: DoctorId,
    /// Patient being seen.
    pub patient: PatientId,
}

impl Consultation {
    /// Returns `true` if `doctor` owns this consultation.
    #[must_use]
    pub fn is_owned_by_doctor(&self, doctor: DoctorId) -> bool {
        self.doctor == doctor
    }

    /// Returns `true` if `patient` is the patient of this consultation.
    #[must_use]
    pub fn is_for_patient(&self, patient: PatientId) -> bool {
        self.patient == patient
    }

    /// The `(doctor, start_time)` slot this record occupies.
    #[must_use]
    pub fn slot(&self) -> (DoctorId, DateTime<Utc>) {
        (self.doctor, self.start_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Consultation {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        Consultation {
            id: ConsultationId::new(1),
            created_at: start,
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            status: ConsultationStatus::Waiting,
            doctor: DoctorId::new(2),
            patient: PatientId::new(3),
        }
    }

    #[test]
    fn ownership_helpers() {
        let c = sample();
        assert!(c.is_owned_by_doctor(DoctorId::new(2)));
        assert!(!c.is_owned_by_doctor(DoctorId::new(5)));
        assert!(c.is_for_patient(PatientId::new(3)));
        assert!(!c.is_for_patient(PatientId::new(2)));
    }

    #[test]
    fn slot_is_doctor_and_start() {
        let c = sample();
        assert_eq!(c.slot(), (DoctorId::new(2), c.start_time));
    }

    #[test]
    fn json_shape() {
        let value = serde_json::to_value(sample()).expect("serialize consultation");
        assert_eq!(value["id"], 1);
        assert_eq!(value["doctor"], 2);
        assert_eq!(value["patient"], 3);
        assert_eq!(value["status"], "Waiting");
        assert_eq!(value["start_time"], "2026-03-01T09:00:00Z");
    }
}
