//! MedConsult Runtime - consultation engine implementation layer.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  medconsult-types : IDs, Principal, Consultation, ErrorCode │
//! │  medconsult-auth  : Action, Rule table, AccessPolicy        │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Runtime Layer (THIS CRATE)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  auth/       : DefaultPolicy (rule table + audit log)       │
//! │  directory/  : Directory trait, seed-backed directory       │
//! │  scheduling/ : SchedulingValidator                          │
//! │  store/      : ConsultationStore, memory + JSON file        │
//! │  service/    : ConsultationService                          │
//! │  config/     : MedConsultConfig, ConfigLoader               │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Frontend Layer                             │
//! │  (medconsult-app: HTTP router, medconsult-server: binary)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! ```text
//! bearer token ──► Directory::resolve_token ──► Principal
//!                                                   │
//!                     ConsultationService ◄─────────┘
//!                       │  1. AccessPolicy (collection, then object)
//!                       │  2. Directory (resolve doctor / patient)
//!                       │  3. SchedulingValidator
//!                       ▼
//!                 ConsultationStore (unique (doctor, start) index)
//! ```
//!
//! Authorization and validation always run before any write, so a refused
//! or invalid request never leaves a partial change behind.

pub mod auth;
pub mod config;
pub mod directory;
pub mod scheduling;
pub mod service;
pub mod store;

pub use auth::DefaultPolicy;
pub use directory::{Directory, DirectoryError, DirectorySeed, InMemoryDirectory};
pub use scheduling::{ScheduleCandidate, SchedulingValidator, ValidationError};
pub use service::{
    ConsultationDraft, ConsultationPatch, ConsultationService, ListParams, ServiceError,
};
pub use store::{
    ConsultationFields, ConsultationStore, InMemoryConsultationStore, JsonFileStore, ListQuery,
    ParseSortOrderError, ParticipantMatch, SnapshotDefect, SortOrder, StoreError,
};

// Re-export for convenience
pub use medconsult_auth::{AccessDenied, AccessPolicy, CollectionAction, ObjectAction};
pub use medconsult_types::{Consultation, ConsultationStatus, Principal};
