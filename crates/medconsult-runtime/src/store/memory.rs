//! In-memory consultation store.

use super::table::ConsultationTable;
use super::{ConsultationFields, ConsultationStore, ListQuery, StoreError};
use chrono::Utc;
use medconsult_types::{Consultation, ConsultationId, ConsultationStatus};
use parking_lot::RwLock;

/// Thread-safe, in-memory consultation store.
///
/// Records live for the lifetime of the process. Reads take a shared lock;
/// every mutation runs under one exclusive lock, including the unique-slot
/// check.
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use medconsult_runtime::{ConsultationFields, ConsultationStore, InMemoryConsultationStore};
/// use medconsult_types::{ConsultationStatus, DoctorId, PatientId};
///
/// let store = InMemoryConsultationStore::new();
/// let start = Utc::now();
/// let record = store
///     .create(ConsultationFields {
///         start_time: start,
///         end_time: start + Duration::minutes(30),
///         status: ConsultationStatus::Waiting,
///         doctor: DoctorId::new(1),
///         patient: PatientId::new(2),
///     })
///     .unwrap();
///
/// assert_eq!(store.get(record.id).unwrap(), record);
/// assert_eq!(store.len().unwrap(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryConsultationStore {
    table: RwLock<ConsultationTable>,
}

impl InMemoryConsultationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConsultationStore for InMemoryConsultationStore {
    fn create(&self, fields: ConsultationFields) -> Result<Consultation, StoreError> {
        self.table.write().insert(fields, Utc::now())
    }

    fn get(&self, id: ConsultationId) -> Result<Consultation, StoreError> {
        self.table.read().get(id)
    }

    fn update(
        &self,
        id: ConsultationId,
        fields: ConsultationFields,
    ) -> Result<Consultation, StoreError> {
        self.table.write().replace(id, fields)
    }

    fn set_status(
        &self,
        id: ConsultationId,
        status: ConsultationStatus,
    ) -> Result<Consultation, StoreError> {
        self.table.write().set_status(id, status)
    }

    fn delete(&self, id: ConsultationId) -> Result<(), StoreError> {
        self.table.write().remove(id).map(|_| ())
    }

    fn list(&self, query: &ListQuery) -> Result<Vec<Consultation>, StoreError> {
        Ok(self.table.read().query(query))
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.table.read().len())
    }
}
