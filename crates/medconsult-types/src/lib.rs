//! Core types for MedConsult.
//!
//! This crate provides the foundational identifier, identity and record
//! types shared by every other MedConsult crate.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Domain Layer                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  medconsult-types : IDs, Principal, Consultation  ◄── HERE  │
//! │  medconsult-auth  : Actions, rule table, AccessPolicy       │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Runtime Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  medconsult-runtime : directory, scheduling, store, service │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Frontend Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  medconsult-app    : HTTP router                            │
//! │  medconsult-server : `medconsult` binary                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Identifier Design
//!
//! - [`PrincipalId`] is UUID-based: principals come from an external
//!   identity provider and must be globally unique.
//! - [`DoctorId`], [`PatientId`], [`ClinicId`] and [`ConsultationId`] are
//!   numeric, matching the directory's and the store's sequences.
//!
//! # Example
//!
//! ```
//! use medconsult_types::{ConsultationStatus, DoctorId, Principal, PrincipalId, Role};
//!
//! let doctor = Principal::Doctor {
//!     id: PrincipalId::new(),
//!     profile: Some(DoctorId::new(7)),
//! };
//! assert_eq!(doctor.role(), Some(Role::Doctor));
//! assert_eq!(doctor.doctor_profile(), Some(DoctorId::new(7)));
//!
//! assert_eq!(ConsultationStatus::default(), ConsultationStatus::Waiting);
//! ```

mod consultation;
mod error;
mod id;
mod principal;
mod profile;
mod status;

pub use consultation::Consultation;
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{ClinicId, ConsultationId, DoctorId, PatientId, PrincipalId};
pub use principal::{Principal, Role};
pub use profile::{Clinic, Doctor, Patient, PrincipalRecord};
pub use status::{ConsultationStatus, ParseStatusError};
