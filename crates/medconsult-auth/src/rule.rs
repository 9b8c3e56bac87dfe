//! The `(Role, Action) -> Rule` table.
//!
//! | Role \ Action | create | list | retrieve | update | delete | change_status |
//! |---------------|--------|------|----------|--------|--------|---------------|
//! | Admin         | Allow  | Allow | Allow   | Allow  | Allow  | Allow         |
//! | Doctor        | Allow  | Allow | Allow   | Owner  | Owner  | Owner         |
//! | Patient       | Deny   | Allow | Allow   | Deny   | Deny   | Deny          |
//!
//! `Owner` is [`Rule::OwnerDoctor`]: the record's doctor must be the caller's
//! own doctor profile. Retrieve is role-gated only; list results are scoped
//! separately by the service.
//!
//! Anonymous principals have no role and are not in the table.

use crate::{Action, CollectionAction, ObjectAction};
use medconsult_types::{Consultation, Principal, Role};

/// Outcome of a table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Always allowed.
    Allow,
    /// Always denied.
    Deny,
    /// Allowed only when the record belongs to the caller's doctor profile.
    OwnerDoctor,
}

impl Rule {
    /// Evaluates the rule for `principal`, optionally against a record.
    ///
    /// [`Rule::OwnerDoctor`] without a record, or for a principal with no
    /// doctor profile, is never satisfied.
    #[must_use]
    pub fn permits(&self, principal: &Principal, record: Option<&Consultation>) -> bool {
        match self {
            Self::Allow => principal.is_authenticated(),
            Self::Deny => false,
            Self::OwnerDoctor => match (principal.doctor_profile(), record) {
                (Some(own), Some(record)) => record.is_owned_by_doctor(own),
                _ => false,
            },
        }
    }

    /// Returns the rule name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
            Self::OwnerDoctor => "owner_doctor",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up the rule for `role` performing `action`.
///
/// # Example
///
/// ```
/// use medconsult_auth::{rule_for, CollectionAction, ObjectAction, Rule};
/// use medconsult_types::Role;
///
/// assert_eq!(rule_for(Role::Patient, CollectionAction::Create.into()), Rule::Deny);
/// assert_eq!(rule_for(Role::Doctor, ObjectAction::Delete.into()), Rule::OwnerDoctor);
/// ```
#[must_use]
pub const fn rule_for(role: Role, action: Action) -> Rule {
    use Action::{Collection, Object};

    match (role, action) {
        (Role::Admin, _) => Rule::Allow,

        (Role::Doctor, Collection(CollectionAction::Create | CollectionAction::List)) => {
            Rule::Allow
        }
        (Role::Doctor, Object(ObjectAction::Retrieve)) => Rule::Allow,
        (
            Role::Doctor,
            Object(ObjectAction::Update | ObjectAction::Delete | ObjectAction::ChangeStatus),
        ) => Rule::OwnerDoctor,

        (Role::Patient, Collection(CollectionAction::Create)) => Rule::Deny,
        (Role::Patient, Collection(CollectionAction::List)) => Rule::Allow,
        (Role::Patient, Object(ObjectAction::Retrieve)) => Rule::Allow,
        (
            Role::Patient,
            Object(ObjectAction::Update | ObjectAction::Delete | ObjectAction::ChangeStatus),
        ) => Rule::Deny,
    }
}
