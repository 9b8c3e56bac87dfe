//! Scheduling validation errors.

use chrono::{DateTime, Utc};
use medconsult_types::{ConsultationId, DoctorId, ErrorCode, PrincipalId};
use thiserror::Error;

/// A candidate consultation broke a scheduling invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The window does not start before it ends.
    #[error("start time {start_time} must be earlier than end time {end_time}")]
    InvalidTimeRange {
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    },

    /// Doctor and patient resolve to the same person.
    #[error("doctor and patient cannot be the same person ({principal})")]
    SelfConsultation { principal: PrincipalId },

    /// The doctor already has a consultation starting at this instant.
    #[error("{doctor} already has {existing} starting at {start_time}")]
    DoubleBooking {
        doctor: DoctorId,
        start_time: DateTime<Utc>,
        existing: ConsultationId,
    },
}

impl ErrorCode for ValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidTimeRange { .. } => "SCHEDULE_INVALID_TIME_RANGE",
            Self::SelfConsultation { .. } => "SCHEDULE_SELF_CONSULTATION",
            Self::DoubleBooking { .. } => "SCHEDULE_DOUBLE_BOOKING",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use medconsult_types::assert_error_codes;

    #[test]
    fn codes_are_schedule_prefixed() {
        let t = Utc
            .with_ymd_and_hms(2026, 2, 2, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let errors = [
            ValidationError::InvalidTimeRange {
                start_time: t,
                end_time: t,
            },
            ValidationError::SelfConsultation {
                principal: PrincipalId::new(),
            },
            ValidationError::DoubleBooking {
                doctor: DoctorId::new(1),
                start_time: t,
                existing: ConsultationId::new(4),
            },
        ];
        assert_error_codes(&errors, "SCHEDULE_");
        assert!(errors.iter().all(|e| !e.is_recoverable()));
    }

    #[test]
    fn double_booking_message_names_the_conflict() {
        let t = Utc
            .with_ymd_and_hms(2026, 2, 2, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let err = ValidationError::DoubleBooking {
            doctor: DoctorId::new(3),
            start_time: t,
            existing: ConsultationId::new(8),
        };
        let msg = err.to_string();
        assert!(msg.contains("doctor:3"), "got: {msg}");
        assert!(msg.contains("consultation:8"), "got: {msg}");
    }
}
