//! Consultation persistence.
//!
//! The [`ConsultationStore`] trait defines the interface for consultation
//! persistence. Two backends ship with the runtime:
//!
//! | Backend | Type | Durability |
//! |---------|------|------------|
//! | memory | [`InMemoryConsultationStore`] | process lifetime |
//! | json | [`JsonFileStore`] | JSON snapshot on disk, rewritten atomically |
//!
//! # Uniqueness
//!
//! Both backends keep a unique index on `(doctor, start_time)` next to the
//! records. The index check and the write happen under the same write lock,
//! so two concurrent creates for one slot can never both succeed: the loser
//! gets [`StoreError::ConstraintViolation`].

mod error;
mod json_file;
mod memory;
mod table;

pub use error::{SnapshotDefect, StoreError};
pub use json_file::{default_store_path, JsonFileStore};
pub use memory::InMemoryConsultationStore;

use chrono::{DateTime, Utc};
use medconsult_types::{Consultation, ConsultationId, ConsultationStatus, DoctorId, PatientId};
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;

/// Consultation storage abstraction.
///
/// Implementations must be thread-safe (`Send + Sync`); the service holds
/// the store as `Arc<dyn ConsultationStore>` and calls it from many request
/// handlers at once.
///
/// # Design Principles
///
/// - **Synchronous**: every call completes promptly under one lock
/// - **Atomic**: each mutation either fully applies or leaves no trace
/// - **Id assignment**: ids come from a per-store increasing sequence
pub trait ConsultationStore: Send + Sync {
    /// Inserts a new record, assigning its id and `created_at`.
    ///
    /// # Errors
    ///
    /// [`StoreError::ConstraintViolation`] if `(doctor, start_time)` is taken.
    fn create(&self, fields: ConsultationFields) -> Result<Consultation, StoreError>;

    /// Loads a record by id.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if absent.
    fn get(&self, id: ConsultationId) -> Result<Consultation, StoreError>;

    /// Replaces every mutable field of a record.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if absent, [`StoreError::ConstraintViolation`]
    /// if the new `(doctor, start_time)` belongs to another record.
    fn update(
        &self,
        id: ConsultationId,
        fields: ConsultationFields,
    ) -> Result<Consultation, StoreError>;

    /// Replaces only the status of a record.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if absent.
    fn set_status(
        &self,
        id: ConsultationId,
        status: ConsultationStatus,
    ) -> Result<Consultation, StoreError>;

    /// Permanently removes a record.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if absent.
    fn delete(&self, id: ConsultationId) -> Result<(), StoreError>;

    /// Returns the records matching `query`, in `query.order`.
    fn list(&self, query: &ListQuery) -> Result<Vec<Consultation>, StoreError>;

    /// Number of stored records.
    fn len(&self) -> Result<usize, StoreError>;

    /// Returns `true` if the store holds no records.
    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// The mutable fields of a consultation.
///
/// Used both to create a record and to replace one on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationFields {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ConsultationStatus,
    pub doctor: DoctorId,
    pub patient: PatientId,
}

impl ConsultationFields {
    /// Extracts the mutable fields of an existing record.
    #[must_use]
    pub fn of(record: &Consultation) -> Self {
        Self {
            start_time: record.start_time,
            end_time: record.end_time,
            status: record.status,
            doctor: record.doctor,
            patient: record.patient,
        }
    }
}

/// Ordering of list results by `created_at`.
///
/// Ties are broken by id in the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first (`ordering=created_at`).
    CreatedAtAsc,
    /// Newest first (`ordering=-created_at`).
    #[default]
    CreatedAtDesc,
}

impl SortOrder {
    /// Returns the query-string spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAtAsc => "created_at",
            Self::CreatedAtDesc => "-created_at",
        }
    }
}

/// Returned when a string is not a supported ordering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a valid ordering: expected 'created_at' or '-created_at'")]
pub struct ParseSortOrderError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(Self::CreatedAtAsc),
            "-created_at" => Ok(Self::CreatedAtDesc),
            other => Err(ParseSortOrderError {
                input: other.to_string(),
            }),
        }
    }
}

/// Records whose doctor or patient matched one search term.
///
/// A record satisfies the match if its doctor is in `doctors` OR its
/// patient is in `patients`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantMatch {
    pub doctors: HashSet<DoctorId>,
    pub patients: HashSet<PatientId>,
}

impl ParticipantMatch {
    /// Returns `true` if `record` involves a matched doctor or patient.
    #[must_use]
    pub fn matches(&self, record: &Consultation) -> bool {
        self.doctors.contains(&record.doctor) || self.patients.contains(&record.patient)
    }
}

/// Filter and ordering for [`ConsultationStore::list`].
///
/// All set filters must hold. Every entry of `participants` must match.
///
/// # Example
///
/// ```
/// use medconsult_runtime::{ListQuery, SortOrder};
/// use medconsult_types::{ConsultationStatus, DoctorId};
///
/// let query = ListQuery::default()
///     .with_doctor(DoctorId::new(1))
///     .with_status(ConsultationStatus::Paid)
///     .with_order(SortOrder::CreatedAtAsc);
/// assert_eq!(query.doctor, Some(DoctorId::new(1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub status: Option<ConsultationStatus>,
    pub doctor: Option<DoctorId>,
    pub patient: Option<PatientId>,
    pub participants: Vec<ParticipantMatch>,
    pub order: SortOrder,
}

impl ListQuery {
    /// Query for every record of one doctor.
    #[must_use]
    pub fn for_doctor(doctor: DoctorId) -> Self {
        Self::default().with_doctor(doctor)
    }

    /// Restricts to one doctor.
    #[must_use]
    pub fn with_doctor(mut self, doctor: DoctorId) -> Self {
        self.doctor = Some(doctor);
        self
    }

    /// Restricts to one patient.
    #[must_use]
    pub fn with_patient(mut self, patient: PatientId) -> Self {
        self.patient = Some(patient);
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub fn with_status(mut self, status: ConsultationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Adds a participant match that must hold.
    #[must_use]
    pub fn with_participants(mut self, participants: ParticipantMatch) -> Self {
        self.participants.push(participants);
        self
    }

    /// Sets the result order.
    #[must_use]
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Returns `true` if `record` passes every filter.
    #[must_use]
    pub fn matches(&self, record: &Consultation) -> bool {
        self.status.map_or(true, |s| record.status == s)
            && self.doctor.map_or(true, |d| record.doctor == d)
            && self.patient.map_or(true, |p| record.patient == p)
            && self.participants.iter().all(|m| m.matches(record))
    }
}
