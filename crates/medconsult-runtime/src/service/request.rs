//! Service request payloads.

use super::ServiceError;
use crate::store::{ConsultationFields, SortOrder};
use chrono::{DateTime, Utc};
use medconsult_types::{Consultation, ConsultationStatus, DoctorId, PatientId};
use serde::Deserialize;

/// Body of a create or full update.
///
/// `status` is optional: a new record starts as `Waiting`, an updated one
/// keeps its current status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConsultationDraft {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<ConsultationStatus>,
    pub doctor: DoctorId,
    pub patient: PatientId,
}

impl ConsultationDraft {
    /// Fields for a new record.
    pub(crate) fn into_new(self) -> ConsultationFields {
        ConsultationFields {
            start_time: self.start_time,
            end_time: self.end_time,
            status: self.status.unwrap_or_default(),
            doctor: self.doctor,
            patient: self.patient,
        }
    }

    /// Fields replacing `current`.
    pub(crate) fn replacing(self, current: &Consultation) -> ConsultationFields {
        ConsultationFields {
            start_time: self.start_time,
            end_time: self.end_time,
            status: self.status.unwrap_or(current.status),
            doctor: self.doctor,
            patient: self.patient,
        }
    }
}

/// Body of a partial update. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsultationPatch {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: Option<ConsultationStatus>,
    pub doctor: Option<DoctorId>,
    pub patient: Option<PatientId>,
}

impl ConsultationPatch {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fields of `current` with this patch applied.
    pub(crate) fn applied_to(self, current: &Consultation) -> ConsultationFields {
        ConsultationFields {
            start_time: self.start_time.unwrap_or(current.start_time),
            end_time: self.end_time.unwrap_or(current.end_time),
            status: self.status.unwrap_or(current.status),
            doctor: self.doctor.unwrap_or(current.doctor),
            patient: self.patient.unwrap_or(current.patient),
        }
    }
}

/// List filters requested by the caller, on top of role scoping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Free text matched against doctor and patient names. Each
    /// whitespace-separated term must match.
    pub search: Option<String>,
    pub status: Option<ConsultationStatus>,
    pub ordering: SortOrder,
}

impl ListParams {
    /// Builds params from raw query-string values.
    ///
    /// Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// [`ServiceError::InvalidStatus`] or [`ServiceError::InvalidOrdering`].
    ///
    /// # Example
    ///
    /// ```
    /// use medconsult_runtime::{ListParams, SortOrder};
    /// use medconsult_types::ConsultationStatus;
    ///
    /// let params = ListParams::parse(Some("house"), Some("Paid"), Some("created_at")).unwrap();
    /// assert_eq!(params.status, Some(ConsultationStatus::Paid));
    /// assert_eq!(params.ordering, SortOrder::CreatedAtAsc);
    ///
    /// assert!(ListParams::parse(None, Some("paid"), None).is_err());
    /// ```
    pub fn parse(
        search: Option<&str>,
        status: Option<&str>,
        ordering: Option<&str>,
    ) -> Result<Self, ServiceError> {
        fn non_empty(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }

        let status = non_empty(status).map(str::parse).transpose()?;
        let ordering = match non_empty(ordering) {
            Some(raw) => raw.parse::<SortOrder>()?,
            None => SortOrder::default(),
        };

        Ok(Self {
            search: non_empty(search).map(str::to_string),
            status,
            ordering,
        })
    }

    /// Search terms, split on whitespace.
    pub(crate) fn search_terms(&self) -> impl Iterator<Item = &str> {
        self.search.as_deref().unwrap_or_default().split_whitespace()
    }
}
