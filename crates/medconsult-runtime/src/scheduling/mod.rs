//! Scheduling validation.
//!
//! [`SchedulingValidator`] enforces the temporal and identity invariants of
//! a consultation before it is written. It is pure: the caller supplies the
//! candidate and the records to check for collisions, and nothing is
//! mutated.
//!
//! # Checks
//!
//! Run in order, stopping at the first failure:
//!
//! | # | Rule | Error |
//! |---|------|-------|
//! | 1 | `start_time < end_time` | [`ValidationError::InvalidTimeRange`] |
//! | 2 | doctor and patient are different principals | [`ValidationError::SelfConsultation`] |
//! | 3 | no other record has the same `(doctor, start_time)` | [`ValidationError::DoubleBooking`] |
//!
//! Check 3 is a fast pre-check with a clear message. The store enforces the
//! same rule again under its write lock.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ScheduleCandidate, SchedulingValidator};
