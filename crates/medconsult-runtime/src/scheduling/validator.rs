//! The scheduling validator.

use super::ValidationError;
use chrono::{DateTime, Utc};
use medconsult_types::{Consultation, ConsultationId, DoctorId, PatientId, PrincipalId};

/// A consultation as it would look after a create or update.
///
/// Profile ids have already been resolved against the directory, so the
/// candidate also carries the principal behind each profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCandidate {
    /// The record being updated, excluded from collision checks.
    /// `None` when creating.
    pub consultation: Option<ConsultationId>,
    pub doctor: DoctorId,
    pub patient: PatientId,
    /// Principal behind `doctor`.
    pub doctor_principal: PrincipalId,
    /// Principal behind `patient`.
    pub patient_principal: PrincipalId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Validates scheduling invariants of a [`ScheduleCandidate`].
///
/// # Example
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use medconsult_runtime::{ScheduleCandidate, SchedulingValidator, ValidationError};
/// use medconsult_types::{DoctorId, PatientId, PrincipalId};
///
/// let start = Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap();
/// let candidate = ScheduleCandidate {
///     consultation: None,
///     doctor: DoctorId::new(1),
///     patient: PatientId::new(1),
///     doctor_principal: PrincipalId::new(),
///     patient_principal: PrincipalId::new(),
///     start_time: start,
///     end_time: start - Duration::minutes(30),
/// };
///
/// let err = SchedulingValidator::new().validate(&candidate, &[]).unwrap_err();
/// assert!(matches!(err, ValidationError::InvalidTimeRange { .. }));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulingValidator;

impl SchedulingValidator {
    /// Creates a validator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Checks `candidate` against `existing`.
    ///
    /// `existing` may contain any records; only those of the candidate's
    /// doctor are considered for collisions.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, in the order documented
    /// on the [module](super).
    pub fn validate(
        &self,
        candidate: &ScheduleCandidate,
        existing: &[Consultation],
    ) -> Result<(), ValidationError> {
        if candidate.start_time >= candidate.end_time {
            return Err(ValidationError::InvalidTimeRange {
                start_time: candidate.start_time,
                end_time: candidate.end_time,
            });
        }

        if candidate.doctor_principal == candidate.patient_principal {
            return Err(ValidationError::SelfConsultation {
                principal: candidate.doctor_principal,
            });
        }

        let clash = existing.iter().find(|record| {
            Some(record.id) != candidate.consultation
                && record.slot() == (candidate.doctor, candidate.start_time)
        });
        if let Some(record) = clash {
            return Err(ValidationError::DoubleBooking {
                doctor: candidate.doctor,
                start_time: candidate.start_time,
                existing: record.id,
            });
        }

        Ok(())
    }
}
