//! Authorization for the consultation engine.
//!
//! Core types ([`Action`](medconsult_auth::Action), [`Rule`](medconsult_auth::Rule),
//! [`AccessPolicy`]) are defined in `medconsult-auth`. This module provides
//! the runtime implementation:
//!
//! - [`DefaultPolicy`]: the `(Role, Action)` rule table with audit logging
//!
//! # Architecture
//!
//! ```text
//! medconsult-auth (traits + data types)
//!     Action, Rule, rule_for, AccessPolicy, AccessDenied
//!         ↓
//! medconsult-runtime/auth (implementations)
//!     DefaultPolicy
//! ```

mod policy;

pub use policy::DefaultPolicy;

// Re-export from medconsult-auth for convenience
pub use medconsult_auth::{AccessDenied, AccessPolicy};
