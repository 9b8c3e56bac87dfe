//! JSON snapshot consultation store.
//!
//! The whole table is kept in memory and mirrored to a single
//! pretty-printed JSON file after every successful mutation:
//!
//! ```text
//! ~/.medconsult/
//! ├── consultations.json        # current snapshot
//! └── .consultations.json.tmp   # transient, during a write
//! ```
//!
//! # Snapshot Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "next_id": 4,
//!   "consultations": [ { "id": 1, "created_at": "...", ... } ]
//! }
//! ```

use super::table::ConsultationTable;
use super::{ConsultationFields, ConsultationStore, ListQuery, SnapshotDefect, StoreError};
use chrono::Utc;
use medconsult_types::{Consultation, ConsultationId, ConsultationStatus};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Snapshot format version written by this build.
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    next_id: u64,
    consultations: Vec<Consultation>,
}

/// File-backed consultation store.
///
/// # Features
///
/// - Same semantics as [`InMemoryConsultationStore`](super::InMemoryConsultationStore)
/// - Atomic writes (write to temp, then rename)
/// - A failed write leaves both the file and the in-memory table unchanged
/// - Unique index and id sequence rebuilt on open
///
/// # Example
///
/// ```no_run
/// use medconsult_runtime::{ConsultationStore, JsonFileStore};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = JsonFileStore::open("~/.medconsult/consultations.json")?;
/// println!("{} consultations on file", store.len()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    table: RwLock<ConsultationTable>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading an existing snapshot if present.
    ///
    /// The parent directory is created if it doesn't exist, and an empty
    /// snapshot is written when there is none yet. A leading `~/` is
    /// expanded to the home directory.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DirectoryCreation`] if the parent cannot be created
    /// - [`StoreError::Io`] / [`StoreError::Serialization`] if the snapshot
    ///   cannot be read or parsed
    /// - [`StoreError::Corrupt`] if the snapshot breaks the unique index or
    ///   has an unsupported version
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = expand_tilde(path.as_ref());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::directory_creation(parent, e))?;
            }
        }

        let existing = path.exists();
        let table = if existing {
            let json = std::fs::read_to_string(&path)?;
            let snapshot: Snapshot = serde_json::from_str(&json)?;
            if snapshot.version != SNAPSHOT_VERSION {
                return Err(StoreError::corrupt(
                    &path,
                    SnapshotDefect::UnsupportedVersion {
                        found: snapshot.version,
                        expected: SNAPSHOT_VERSION,
                    },
                ));
            }
            let table = ConsultationTable::from_records(snapshot.next_id, snapshot.consultations)
                .map_err(|reason| StoreError::corrupt(&path, reason))?;
            tracing::debug!(
                path = %path.display(),
                records = table.len(),
                "Loaded consultation snapshot"
            );
            table
        } else {
            ConsultationTable::default()
        };

        let store = Self {
            path,
            table: RwLock::new(table),
        };
        if !existing {
            store.persist(&store.table.read())?;
            tracing::debug!(path = %store.path.display(), "Created empty consultation snapshot");
        }
        Ok(store)
    }

    /// Returns the snapshot path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a temporary file path for atomic writes.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "consultations.json".into(), |n| n.to_string_lossy());
        self.path.with_file_name(format!(".{name}.tmp"))
    }

    fn persist(&self, table: &ConsultationTable) -> Result<(), StoreError> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            next_id: table.next_id(),
            consultations: table.records().cloned().collect(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        let temp_path = self.temp_path();

        // Write to temp file first (atomic write pattern)
        std::fs::write(&temp_path, json)?;

        // Rename to final path (atomic on most filesystems)
        std::fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    /// Applies `change` to a copy of the table, persists the copy, then
    /// swaps it in. Nothing changes if either step fails.
    fn mutate<T>(
        &self,
        change: impl FnOnce(&mut ConsultationTable) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.table.write();
        let mut next = guard.clone();
        let out = change(&mut next)?;

        if let Err(e) = self.persist(&next) {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to persist consultations");
            return Err(e);
        }

        *guard = next;
        Ok(out)
    }
}

impl ConsultationStore for JsonFileStore {
    fn create(&self, fields: ConsultationFields) -> Result<Consultation, StoreError> {
        self.mutate(|table| table.insert(fields, Utc::now()))
    }

    fn get(&self, id: ConsultationId) -> Result<Consultation, StoreError> {
        self.table.read().get(id)
    }

    fn update(
        &self,
        id: ConsultationId,
        fields: ConsultationFields,
    ) -> Result<Consultation, StoreError> {
        self.mutate(|table| table.replace(id, fields))
    }

    fn set_status(
        &self,
        id: ConsultationId,
        status: ConsultationStatus,
    ) -> Result<Consultation, StoreError> {
        self.mutate(|table| table.set_status(id, status))
    }

    fn delete(&self, id: ConsultationId) -> Result<(), StoreError> {
        self.mutate(|table| table.remove(id).map(|_| ()))
    }

    fn list(&self, query: &ListQuery) -> Result<Vec<Consultation>, StoreError> {
        Ok(self.table.read().query(query))
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.table.read().len())
    }
}

/// Expands `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(rest) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
    }
    path.to_path_buf()
}

/// Returns the default snapshot path.
#[must_use]
pub fn default_store_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".medconsult")
        .join("consultations.json")
}
