//! Access policy trait.
//!
//! Defines [`AccessPolicy`], the abstract policy the consultation service
//! consults before touching the store.
//!
//! # Architecture
//!
//! ```text
//! AccessPolicy trait (medconsult-auth)   <- abstract, no runtime deps
//!          │
//!          └── DefaultPolicy (medconsult-runtime) <- rule table + audit logging
//! ```

use crate::{AccessDenied, CollectionAction, ObjectAction};
use medconsult_types::{Consultation, Principal};

/// Decides whether a principal may perform an action.
///
/// Both decision points return `bool`. The provided `check_*` methods wrap
/// them into `Result<(), AccessDenied>` for callers that want `?`.
///
/// # Implementors
///
/// - `DefaultPolicy` (in `medconsult-runtime`): the `(Role, Action)` table
/// - Custom impls for testing
///
/// # Example
///
/// ```
/// use medconsult_auth::{AccessPolicy, CollectionAction, ObjectAction};
/// use medconsult_types::{Consultation, Principal, PrincipalId};
///
/// struct AdminsOnly;
///
/// impl AccessPolicy for AdminsOnly {
///     fn can_perform_collection_action(&self, p: &Principal, _: CollectionAction) -> bool {
///         p.is_admin()
///     }
///
///     fn can_perform_object_action(&self, p: &Principal, _: &Consultation, _: ObjectAction) -> bool {
///         p.is_admin()
///     }
/// }
///
/// let policy = AdminsOnly;
/// let admin = Principal::Admin(PrincipalId::new());
/// assert!(policy.check_collection_action(&admin, CollectionAction::Create).is_ok());
/// assert!(policy.check_collection_action(&Principal::Anonymous, CollectionAction::List).is_err());
/// ```
pub trait AccessPolicy: Send + Sync {
    /// Check if `principal` may perform a collection action.
    fn can_perform_collection_action(&self, principal: &Principal, action: CollectionAction)
        -> bool;

    /// Check if `principal` may perform an object action on `record`.
    fn can_perform_object_action(
        &self,
        principal: &Principal,
        record: &Consultation,
        action: ObjectAction,
    ) -> bool;

    /// Like [`can_perform_collection_action`](Self::can_perform_collection_action),
    /// but returns [`AccessDenied`] on refusal.
    fn check_collection_action(
        &self,
        principal: &Principal,
        action: CollectionAction,
    ) -> Result<(), AccessDenied> {
        if self.can_perform_collection_action(principal, action) {
            Ok(())
        } else {
            Err(AccessDenied::collection(principal.to_string(), action))
        }
    }

    /// Like [`can_perform_object_action`](Self::can_perform_object_action),
    /// but returns [`AccessDenied`] on refusal.
    fn check_object_action(
        &self,
        principal: &Principal,
        record: &Consultation,
        action: ObjectAction,
    ) -> Result<(), AccessDenied> {
        if self.can_perform_object_action(principal, record, action) {
            Ok(())
        } else {
            Err(AccessDenied::object(principal.to_string(), action, record.id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use medconsult_types::{
        ConsultationId, ConsultationStatus, DoctorId, PatientId, PrincipalId,
    };

    struct PermissivePolicy;

    impl AccessPolicy for PermissivePolicy {
        fn can_perform_collection_action(&self, _: &Principal, _: CollectionAction) -> bool {
            true
        }
        fn can_perform_object_action(&self, _: &Principal, _: &Consultation, _: ObjectAction) -> bool {
            true
        }
    }

    struct ReadOnlyPolicy;

    impl AccessPolicy for ReadOnlyPolicy {
        fn can_perform_collection_action(&self, p: &Principal, a: CollectionAction) -> bool {
            p.is_authenticated() && a == CollectionAction::List
        }
        fn can_perform_object_action(&self, p: &Principal, _: &Consultation, a: ObjectAction) -> bool {
            p.is_authenticated() && !a.is_mutating()
        }
    }

    fn record() -> Consultation {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 10, 8, 30, 0)
            .single()
            .expect("valid timestamp");
        Consultation {
            id: ConsultationId::new(3),
            created_at: start,
            start_time: start,
            end_time: start + chrono::Duration::minutes(45),
            status: ConsultationStatus::Confirmed,
            doctor: DoctorId::new(1),
            patient: PatientId::new(2),
        }
    }

    fn patient() -> Principal {
        Principal::Patient {
            id: PrincipalId::new(),
            profile: Some(PatientId::new(2)),
        }
    }

    #[test]
    fn permissive_allows_everything() {
        let policy = PermissivePolicy;
        let rec = record();
        assert!(policy.check_collection_action(&patient(), CollectionAction::Create).is_ok());
        for action in ObjectAction::ALL {
            assert!(policy.check_object_action(&patient(), &rec, action).is_ok());
        }
    }

    #[test]
    fn read_only_denies_mutations_with_record_id() {
        let policy = ReadOnlyPolicy;
        let rec = record();

        assert!(policy.check_object_action(&patient(), &rec, ObjectAction::Retrieve).is_ok());

        let err = policy
            .check_object_action(&patient(), &rec, ObjectAction::Update)
            .expect_err("update should be denied");
        assert!(
            matches!(
                err,
                AccessDenied::Object {
                    action: ObjectAction::Update,
                    consultation,
                    ..
                } if consultation == ConsultationId::new(3)
            ),
            "got: {err:?}"
        );
    }

    #[test]
    fn check_collection_action_reports_action() {
        let err = ReadOnlyPolicy
            .check_collection_action(&patient(), CollectionAction::Create)
            .expect_err("create should be denied");
        assert_eq!(err.action(), "create");
    }

    #[test]
    fn trait_object_works() {
        let policy: Box<dyn AccessPolicy> = Box::new(ReadOnlyPolicy);
        assert!(!policy.can_perform_collection_action(&Principal::Anonymous, CollectionAction::List));
    }
}
