//! Access denied error type.
//!
//! [`AccessPolicy`](crate::AccessPolicy) answers with a boolean. The service
//! turns a `false` into an [`AccessDenied`] naming who was refused what.

use crate::{CollectionAction, ObjectAction};
use medconsult_types::{ConsultationId, ErrorCode};
use thiserror::Error;

/// Access denied by the authorization policy.
///
/// # Example
///
/// ```
/// use medconsult_auth::{AccessDenied, CollectionAction};
/// use medconsult_types::ErrorCode;
///
/// let err = AccessDenied::collection("anonymous", CollectionAction::Create);
/// assert_eq!(err.code(), "AUTH_ACCESS_DENIED");
/// assert!(err.to_string().contains("create"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// A collection action was refused.
    #[error("access denied: {principal} may not {action} consultations")]
    Collection {
        /// Display form of the refused principal.
        principal: String,
        /// The refused action.
        action: CollectionAction,
    },

    /// An object action on a specific record was refused.
    #[error("access denied: {principal} may not {action} {consultation}")]
    Object {
        /// Display form of the refused principal.
        principal: String,
        /// The refused action.
        action: ObjectAction,
        /// The target record.
        consultation: ConsultationId,
    },
}

impl AccessDenied {
    /// Creates a collection-level denial.
    #[must_use]
    pub fn collection(principal: impl Into<String>, action: CollectionAction) -> Self {
        Self::Collection {
            principal: principal.into(),
            action,
        }
    }

    /// Creates an object-level denial.
    #[must_use]
    pub fn object(
        principal: impl Into<String>,
        action: ObjectAction,
        consultation: ConsultationId,
    ) -> Self {
        Self::Object {
            principal: principal.into(),
            action,
            consultation,
        }
    }

    /// Returns the refused action name.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::Collection { action, .. } => action.as_str(),
            Self::Object { action, .. } => action.as_str(),
        }
    }
}

impl ErrorCode for AccessDenied {
    fn code(&self) -> &'static str {
        "AUTH_ACCESS_DENIED"
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
