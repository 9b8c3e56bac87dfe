//! Authorization primitives for MedConsult.
//!
//! This crate defines *what* can be asked of the consultation engine and
//! *who* may ask it. Concrete policy implementations live in
//! `medconsult-runtime`.
//!
//! # Two Decision Points
//!
//! | Kind | Type | Targets |
//! |------|------|---------|
//! | Collection | [`CollectionAction`] | the consultation collection (create, list) |
//! | Object | [`ObjectAction`] | one existing record (retrieve, update, delete, change status) |
//!
//! # Crate Architecture
//!
//! ```text
//! medconsult-types  (ids, Principal, Consultation)
//!        ↑
//! medconsult-auth  ◄── THIS CRATE
//! (Action, Rule table, AccessPolicy, AccessDenied)
//!        ↑
//! medconsult-runtime (DefaultPolicy impl, ConsultationService)
//! ```
//!
//! # Design Principles
//!
//! - **Table, not conditionals**: every `(Role, Action)` pair maps to one [`Rule`]
//! - **Denials are booleans**: [`AccessPolicy`] answers yes/no; callers turn
//!   `false` into [`AccessDenied`]
//! - **Anonymous never passes**: an unauthenticated principal has no role and
//!   therefore no rule

pub mod action;
pub mod error;
pub mod policy;
pub mod rule;

pub use action::{Action, CollectionAction, ObjectAction};
pub use error::AccessDenied;
pub use policy::AccessPolicy;
pub use rule::{rule_for, Rule};

// Re-export Principal from medconsult_types for convenience
pub use medconsult_types::Principal;
