//! Actions a principal can request on consultations.

/// An action on the consultation collection as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionAction {
    /// Book a new consultation.
    Create,
    /// List consultations visible to the caller.
    List,
}

/// An action on one existing consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectAction {
    /// Read the record.
    Retrieve,
    /// Full or partial update of the record.
    Update,
    /// Permanently remove the record.
    Delete,
    /// Replace only the status.
    ChangeStatus,
}

/// Any action, used as the key of the rule table.
///
/// # Example
///
/// ```
/// use medconsult_auth::{Action, CollectionAction, ObjectAction};
///
/// let action: Action = ObjectAction::ChangeStatus.into();
/// assert!(action.is_object());
/// assert_eq!(action.as_str(), "change_status");
///
/// let action = Action::from(CollectionAction::List);
/// assert_eq!(action.to_string(), "list");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Collection-level action.
    Collection(CollectionAction),
    /// Object-level action.
    Object(ObjectAction),
}

impl CollectionAction {
    /// Returns the action name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
        }
    }
}

impl ObjectAction {
    /// All object actions.
    pub const ALL: [ObjectAction; 4] = [
        ObjectAction::Retrieve,
        ObjectAction::Update,
        ObjectAction::Delete,
        ObjectAction::ChangeStatus,
    ];

    /// Returns the action name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retrieve => "retrieve",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::ChangeStatus => "change_status",
        }
    }

    /// Returns `true` if the action writes to the record.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::Retrieve)
    }
}

impl Action {
    /// Returns the action name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collection(a) => a.as_str(),
            Self::Object(a) => a.as_str(),
        }
    }

    /// Returns `true` for object-level actions.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }
}

impl From<CollectionAction> for Action {
    fn from(action: CollectionAction) -> Self {
        Self::Collection(action)
    }
}

impl From<ObjectAction> for Action {
    fn from(action: ObjectAction) -> Self {
        Self::Object(action)
    }
}

impl std::fmt::Display for CollectionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for ObjectAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_snake_case() {
        assert_eq!(CollectionAction::Create.as_str(), "create");
        assert_eq!(ObjectAction::ChangeStatus.as_str(), "change_status");
        assert_eq!(Action::from(ObjectAction::Delete).to_string(), "delete");
    }

    #[test]
    fn only_retrieve_is_read_only() {
        for action in ObjectAction::ALL {
            assert_eq!(action.is_mutating(), action != ObjectAction::Retrieve);
        }
    }

    #[test]
    fn collection_actions_are_not_object_actions() {
        assert!(!Action::from(CollectionAction::List).is_object());
        assert!(Action::from(ObjectAction::Retrieve).is_object());
    }
}
