//! Default access policy.
//!
//! # Example
//!
//! ```
//! use medconsult_runtime::DefaultPolicy;
//! use medconsult_auth::{AccessPolicy, CollectionAction};
//! use medconsult_types::{PatientId, Principal, PrincipalId};
//!
//! let policy = DefaultPolicy;
//! let patient = Principal::Patient {
//!     id: PrincipalId::new(),
//!     profile: Some(PatientId::new(1)),
//! };
//!
//! // Patients may list but not book.
//! assert!(policy.can_perform_collection_action(&patient, CollectionAction::List));
//! assert!(!policy.can_perform_collection_action(&patient, CollectionAction::Create));
//! ```

use medconsult_auth::{rule_for, AccessPolicy, Action, CollectionAction, ObjectAction, Rule};
use medconsult_types::{Consultation, Principal};

/// Default access policy.
///
/// # Rules
///
/// Decisions come from [`rule_for`]:
///
/// | Action | Admin | Doctor | Patient | Anonymous |
/// |--------|-------|--------|---------|-----------|
/// | create | Allowed | Allowed | Denied | Denied |
/// | list | Allowed | Allowed | Allowed | Denied |
/// | retrieve | Allowed | Allowed | Allowed | Denied |
/// | update / delete / change_status | Allowed | Owner only | Denied | Denied |
///
/// # Audit Logging
///
/// All checks are logged for audit:
/// - Allowed operations: debug level
/// - Denied operations: warn level
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl DefaultPolicy {
    fn decide(&self, principal: &Principal, action: Action, record: Option<&Consultation>) -> bool {
        let rule = principal.role().map(|role| rule_for(role, action));
        let allowed = rule.is_some_and(|r| r.permits(principal, record));
        let rule_name = rule.map_or("unauthenticated", |r: Rule| r.as_str());
        let consultation = record.map(|r| r.id.get());

        // Audit logging
        if allowed {
            tracing::debug!(
                principal = %principal,
                action = %action,
                rule = rule_name,
                consultation = ?consultation,
                "access allowed"
            );
        } else {
            tracing::warn!(
                principal = %principal,
                action = %action,
                rule = rule_name,
                consultation = ?consultation,
                "access denied"
            );
        }

        allowed
    }
}

impl AccessPolicy for DefaultPolicy {
    fn can_perform_collection_action(
        &self,
        principal: &Principal,
        action: CollectionAction,
    ) -> bool {
        self.decide(principal, action.into(), None)
    }

    fn can_perform_object_action(
        &self,
        principal: &Principal,
        record: &Consultation,
        action: ObjectAction,
    ) -> bool {
        self.decide(principal, action.into(), Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use medconsult_types::{
        ConsultationId, ConsultationStatus, DoctorId, PatientId, PrincipalId,
    };

    fn record(doctor: u64, patient: u64) -> Consultation {
        let t = Utc
            .with_ymd_and_hms(2026, 11, 2, 13, 0, 0)
            .single()
            .expect("valid timestamp");
        Consultation {
            id: ConsultationId::new(1),
            created_at: t,
            start_time: t,
            end_time: t + chrono::Duration::minutes(30),
            status: ConsultationStatus::Waiting,
            doctor: DoctorId::new(doctor),
            patient: PatientId::new(patient),
        }
    }

    fn admin() -> Principal {
        Principal::Admin(PrincipalId::new())
    }

    fn doctor(profile: Option<u64>) -> Principal {
        Principal::Doctor {
            id: PrincipalId::new(),
            profile: profile.map(DoctorId::new),
        }
    }

    fn patient(profile: u64) -> Principal {
        Principal::Patient {
            id: PrincipalId::new(),
            profile: Some(PatientId::new(profile)),
        }
    }

    #[test]
    fn create_only_for_admin_and_doctor() {
        let policy = DefaultPolicy;
        assert!(policy.can_perform_collection_action(&admin(), CollectionAction::Create));
        assert!(policy.can_perform_collection_action(&doctor(Some(1)), CollectionAction::Create));
        assert!(!policy.can_perform_collection_action(&patient(1), CollectionAction::Create));
        assert!(!policy.can_perform_collection_action(&Principal::Anonymous, CollectionAction::Create));
    }

    #[test]
    fn list_for_any_authenticated() {
        let policy = DefaultPolicy;
        for p in [admin(), doctor(None), patient(3)] {
            assert!(policy.can_perform_collection_action(&p, CollectionAction::List), "{p}");
        }
        assert!(!policy.can_perform_collection_action(&Principal::Anonymous, CollectionAction::List));
    }

    #[test]
    fn admin_may_do_everything() {
        let rec = record(1, 2);
        for action in ObjectAction::ALL {
            assert!(DefaultPolicy.can_perform_object_action(&admin(), &rec, action));
        }
    }

    #[test]
    fn owning_doctor_may_mutate() {
        let rec = record(1, 2);
        for action in ObjectAction::ALL {
            assert!(DefaultPolicy.can_perform_object_action(&doctor(Some(1)), &rec, action));
        }
    }

    #[test]
    fn other_doctor_may_only_retrieve() {
        let rec = record(1, 2);
        let other = doctor(Some(2));
        assert!(DefaultPolicy.can_perform_object_action(&other, &rec, ObjectAction::Retrieve));
        for action in [ObjectAction::Update, ObjectAction::Delete, ObjectAction::ChangeStatus] {
            assert!(!DefaultPolicy.can_perform_object_action(&other, &rec, action));
        }
    }

    #[test]
    fn doctor_without_profile_never_owns() {
        let rec = record(1, 2);
        assert!(!DefaultPolicy.can_perform_object_action(&doctor(None), &rec, ObjectAction::Delete));
    }

    #[test]
    fn patient_may_retrieve_but_never_mutate() {
        let rec = record(1, 2);
        let own = patient(2);
        assert!(DefaultPolicy.can_perform_object_action(&own, &rec, ObjectAction::Retrieve));
        assert!(DefaultPolicy.can_perform_object_action(&patient(9), &rec, ObjectAction::Retrieve));
        for action in [ObjectAction::Update, ObjectAction::Delete, ObjectAction::ChangeStatus] {
            assert!(!DefaultPolicy.can_perform_object_action(&own, &rec, action));
        }
    }

    #[test]
    fn anonymous_is_always_denied() {
        let rec = record(1, 2);
        for action in ObjectAction::ALL {
            assert!(!DefaultPolicy.can_perform_object_action(&Principal::Anonymous, &rec, action));
        }
    }

    #[test]
    fn check_helpers_build_access_denied() {
        let rec = record(1, 2);
        let err = DefaultPolicy
            .check_object_action(&doctor(Some(2)), &rec, ObjectAction::Delete)
            .expect_err("non-owner delete");
        assert_eq!(err.action(), "delete");
    }
}
