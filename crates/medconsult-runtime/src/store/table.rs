//! Record table with a unique `(doctor, start_time)` index.
//!
//! Shared by both store backends. The table itself is not synchronized;
//! callers hold it behind a lock and perform each mutation under one write
//! guard.

use super::{ConsultationFields, ListQuery, SnapshotDefect, SortOrder, StoreError};
use chrono::{DateTime, Utc};
use medconsult_types::{Consultation, ConsultationId, ConsultationStatus, DoctorId};
use std::collections::{BTreeMap, HashMap};

type Slot = (DoctorId, DateTime<Utc>);

#[derive(Debug, Clone)]
pub(crate) struct ConsultationTable {
    records: BTreeMap<ConsultationId, Consultation>,
    slots: HashMap<Slot, ConsultationId>,
    next_id: u64,
}

impl Default for ConsultationTable {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            slots: HashMap::new(),
            next_id: 1,
        }
    }
}

impl ConsultationTable {
    /// Rebuilds a table from persisted records.
    ///
    /// Fails if two records share an id or a slot, or if the highest id
    /// leaves no successor.
    pub(crate) fn from_records(
        next_id: u64,
        records: Vec<Consultation>,
    ) -> Result<Self, SnapshotDefect> {
        let mut table = Self::default();
        for record in records {
            if table.records.contains_key(&record.id) {
                return Err(SnapshotDefect::DuplicateId(record.id));
            }
            if let Some(&holder) = table.slots.get(&record.slot()) {
                return Err(SnapshotDefect::SharedSlot {
                    holder,
                    other: record.id,
                    doctor: record.doctor,
                    start_time: record.start_time,
                });
            }
            table.slots.insert(record.slot(), record.id);
            table.records.insert(record.id, record);
        }
        let after_max = match table.records.keys().next_back() {
            Some(&max) => max
                .get()
                .checked_add(1)
                .ok_or(SnapshotDefect::IdExhausted(max))?,
            None => 1,
        };
        table.next_id = next_id.max(after_max);
        Ok(table)
    }

    pub(crate) fn next_id(&self) -> u64 {
        self.next_id
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = &Consultation> {
        self.records.values()
    }

    pub(crate) fn get(&self, id: ConsultationId) -> Result<Consultation, StoreError> {
        self.records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Fails if `slot` is held by a record other than `except`.
    fn ensure_slot_free(
        &self,
        slot: Slot,
        except: Option<ConsultationId>,
    ) -> Result<(), StoreError> {
        match self.slots.get(&slot) {
            Some(&holder) if Some(holder) != except => {
                Err(StoreError::constraint_violation(slot.0, slot.1, holder))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn insert(
        &mut self,
        fields: ConsultationFields,
        created_at: DateTime<Utc>,
    ) -> Result<Consultation, StoreError> {
        self.ensure_slot_free((fields.doctor, fields.start_time), None)?;

        let id = ConsultationId::new(self.next_id);
        self.next_id += 1;

        let record = Consultation {
            id,
            created_at,
            start_time: fields.start_time,
            end_time: fields.end_time,
            status: fields.status,
            doctor: fields.doctor,
            patient: fields.patient,
        };
        self.slots.insert(record.slot(), id);
        self.records.insert(id, record.clone());
        Ok(record)
    }

    pub(crate) fn replace(
        &mut self,
        id: ConsultationId,
        fields: ConsultationFields,
    ) -> Result<Consultation, StoreError> {
        let old_slot = self.get(id)?.slot();
        let new_slot = (fields.doctor, fields.start_time);
        self.ensure_slot_free(new_slot, Some(id))?;

        let record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.start_time = fields.start_time;
        record.end_time = fields.end_time;
        record.status = fields.status;
        record.doctor = fields.doctor;
        record.patient = fields.patient;
        let updated = record.clone();

        if old_slot != new_slot {
            self.slots.remove(&old_slot);
            self.slots.insert(new_slot, id);
        }
        Ok(updated)
    }

    pub(crate) fn set_status(
        &mut self,
        id: ConsultationId,
        status: ConsultationStatus,
    ) -> Result<Consultation, StoreError> {
        let record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.status = status;
        Ok(record.clone())
    }

    pub(crate) fn remove(&mut self, id: ConsultationId) -> Result<Consultation, StoreError> {
        let record = self.records.remove(&id).ok_or(StoreError::NotFound(id))?;
        self.slots.remove(&record.slot());
        Ok(record)
    }

    pub(crate) fn query(&self, query: &ListQuery) -> Vec<Consultation> {
        let mut rows: Vec<Consultation> = self
            .records
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let asc = a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id));
            match query.order {
                SortOrder::CreatedAtAsc => asc,
                SortOrder::CreatedAtDesc => asc.reverse(),
            }
        });
        rows
    }
}
