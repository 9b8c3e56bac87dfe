//! Consultation status.
//!
//! Status is a flat enumeration. Any status may be replaced by any other;
//! the only constraint on a change is membership in [`ConsultationStatus::ALL`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle status of a consultation.
///
/// Wire spelling is the capitalised variant name (`"Waiting"`, `"Paid"`, ...).
///
/// # Example
///
/// ```
/// use medconsult_types::ConsultationStatus;
///
/// let status: ConsultationStatus = "Confirmed".parse().unwrap();
/// assert_eq!(status, ConsultationStatus::Confirmed);
/// assert!("confirmed".parse::<ConsultationStatus>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConsultationStatus {
    /// Booked, awaiting confirmation.
    #[default]
    Waiting,
    /// Confirmed by the clinic.
    Confirmed,
    /// In progress.
    Started,
    /// Finished, not yet paid.
    Finished,
    /// Paid.
    Paid,
}

impl ConsultationStatus {
    /// Every valid status.
    pub const ALL: [ConsultationStatus; 5] = [
        ConsultationStatus::Confirmed,
        ConsultationStatus::Waiting,
        ConsultationStatus::Started,
        ConsultationStatus::Finished,
        ConsultationStatus::Paid,
    ];

    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "Waiting",
            Self::Confirmed => "Confirmed",
            Self::Started => "Started",
            Self::Finished => "Finished",
            Self::Paid => "Paid",
        }
    }
}

impl std::fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the valid status names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a valid consultation status")]
pub struct ParseStatusError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for ConsultationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError {
                input: s.to_string(),
            })
    }
}
