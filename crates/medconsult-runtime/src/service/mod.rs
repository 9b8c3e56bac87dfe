//! Consultation service.
//!
//! [`ConsultationService`] is the single entry point for consultation
//! operations. It combines the directory, the access policy, the
//! scheduling validator and the store:
//!
//! ```text
//! caller ──► ConsultationService
//!              │ 1. fetch record (object actions)      -> StoreError::NotFound
//!              │ 2. AccessPolicy                       -> AccessDenied
//!              │ 3. resolve doctor / patient profiles  -> UnknownDoctor / UnknownPatient
//!              │ 4. SchedulingValidator                -> ValidationError
//!              ▼ 5. ConsultationStore write            -> StoreError
//! ```
//!
//! Steps 1 to 4 never write, so a refused or invalid request leaves the
//! store untouched.

mod error;
mod request;

pub use error::ServiceError;
pub use request::{ConsultationDraft, ConsultationPatch, ListParams};

use crate::auth::DefaultPolicy;
use crate::directory::Directory;
use crate::scheduling::{ScheduleCandidate, SchedulingValidator};
use crate::store::{ConsultationFields, ConsultationStore, ListQuery, ParticipantMatch};
use medconsult_auth::{AccessPolicy, CollectionAction, ObjectAction};
use medconsult_types::{Consultation, ConsultationId, ConsultationStatus, Principal};
use std::sync::Arc;
use tracing::info;

/// Consultation operations on behalf of a [`Principal`].
///
/// Cheap to clone; clones share the same store, directory and policy.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use medconsult_runtime::{
///     ConsultationService, InMemoryConsultationStore, InMemoryDirectory, ListParams,
/// };
/// use medconsult_types::{Principal, PrincipalId};
///
/// let service = ConsultationService::new(
///     Arc::new(InMemoryConsultationStore::new()),
///     Arc::new(InMemoryDirectory::new()),
/// );
///
/// let admin = Principal::Admin(PrincipalId::new());
/// assert!(service.list(&admin, &ListParams::default()).unwrap().is_empty());
/// assert!(service.list(&Principal::Anonymous, &ListParams::default()).is_err());
/// ```
#[derive(Clone)]
pub struct ConsultationService {
    store: Arc<dyn ConsultationStore>,
    directory: Arc<dyn Directory>,
    policy: Arc<dyn AccessPolicy>,
    validator: SchedulingValidator,
}

impl std::fmt::Debug for ConsultationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsultationService")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl ConsultationService {
    /// Creates a service using [`DefaultPolicy`].
    #[must_use]
    pub fn new(store: Arc<dyn ConsultationStore>, directory: Arc<dyn Directory>) -> Self {
        Self {
            store,
            directory,
            policy: Arc::new(DefaultPolicy),
            validator: SchedulingValidator::new(),
        }
    }

    /// Replaces the access policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn AccessPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ConsultationStore> {
        &self.store
    }

    /// The underlying directory.
    #[must_use]
    pub fn directory(&self) -> &Arc<dyn Directory> {
        &self.directory
    }

    /// Books a new consultation.
    ///
    /// The record starts as `Waiting` unless the draft names a status.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::AccessDenied`] unless the principal may create
    /// - [`ServiceError::UnknownDoctor`] / [`ServiceError::UnknownPatient`]
    /// - [`ServiceError::Validation`] for a bad time range, a self
    ///   consultation or a taken slot
    /// - [`ServiceError::Store`] with `ConstraintViolation` if a concurrent
    ///   create took the slot first
    pub fn create(
        &self,
        principal: &Principal,
        draft: ConsultationDraft,
    ) -> Result<Consultation, ServiceError> {
        self.policy
            .check_collection_action(principal, CollectionAction::Create)?;

        let fields = draft.into_new();
        self.validate(None, &fields)?;
        let record = self.store.create(fields)?;

        info!(
            principal = %principal,
            consultation = %record.id,
            doctor = %record.doctor,
            patient = %record.patient,
            "consultation created"
        );
        Ok(record)
    }

    /// Lists the consultations visible to the principal.
    ///
    /// Doctors see their own consultations, patients the ones they attend,
    /// admins all of them. A doctor or patient without a linked profile
    /// sees nothing.
    ///
    /// # Errors
    ///
    /// [`ServiceError::AccessDenied`] for an anonymous caller, or a store
    /// failure.
    pub fn list(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<Vec<Consultation>, ServiceError> {
        self.policy
            .check_collection_action(principal, CollectionAction::List)?;

        let scoped = match principal {
            Principal::Admin(_) => Some(ListQuery::default()),
            Principal::Doctor { profile, .. } => profile.map(ListQuery::for_doctor),
            Principal::Patient { profile, .. } => {
                profile.map(|p| ListQuery::default().with_patient(p))
            }
            Principal::Anonymous => None,
        };
        let Some(mut query) = scoped else {
            return Ok(Vec::new());
        };

        if let Some(status) = params.status {
            query = query.with_status(status);
        }
        for term in params.search_terms() {
            query = query.with_participants(ParticipantMatch {
                doctors: self.directory.search_doctors(term),
                patients: self.directory.search_patients(term),
            });
        }

        Ok(self.store.list(&query.with_order(params.ordering))?)
    }

    /// Loads one consultation.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`](crate::StoreError::NotFound) before
    /// [`ServiceError::AccessDenied`].
    pub fn retrieve(
        &self,
        principal: &Principal,
        id: ConsultationId,
    ) -> Result<Consultation, ServiceError> {
        self.authorize_object(principal, id, ObjectAction::Retrieve)
    }

    /// Replaces a consultation (PUT). A draft without a status keeps the
    /// stored one.
    ///
    /// # Errors
    ///
    /// As [`create`](Self::create), plus `NotFound`. The record's own slot
    /// never counts as a collision.
    pub fn update(
        &self,
        principal: &Principal,
        id: ConsultationId,
        draft: ConsultationDraft,
    ) -> Result<Consultation, ServiceError> {
        let current = self.authorize_object(principal, id, ObjectAction::Update)?;
        self.replace(principal, &current, draft.replacing(&current))
    }

    /// Updates the given fields of a consultation (PATCH).
    ///
    /// # Errors
    ///
    /// As [`update`](Self::update).
    pub fn partial_update(
        &self,
        principal: &Principal,
        id: ConsultationId,
        patch: ConsultationPatch,
    ) -> Result<Consultation, ServiceError> {
        let current = self.authorize_object(principal, id, ObjectAction::Update)?;
        if patch.is_empty() {
            return Ok(current);
        }
        self.replace(principal, &current, patch.applied_to(&current))
    }

    /// Permanently removes a consultation.
    ///
    /// # Errors
    ///
    /// `NotFound` before [`ServiceError::AccessDenied`].
    pub fn delete(&self, principal: &Principal, id: ConsultationId) -> Result<(), ServiceError> {
        self.authorize_object(principal, id, ObjectAction::Delete)?;
        self.store.delete(id)?;

        info!(principal = %principal, consultation = %id, "consultation deleted");
        Ok(())
    }

    /// Sets the status of a consultation from its wire name.
    ///
    /// Any status may follow any other.
    ///
    /// # Errors
    ///
    /// `NotFound`, then [`ServiceError::AccessDenied`], then
    /// [`ServiceError::InvalidStatus`] if `raw_status` is not a status name.
    pub fn change_status(
        &self,
        principal: &Principal,
        id: ConsultationId,
        raw_status: &str,
    ) -> Result<Consultation, ServiceError> {
        let current = self.authorize_object(principal, id, ObjectAction::ChangeStatus)?;
        let status: ConsultationStatus = raw_status.parse()?;
        let record = self.store.set_status(id, status)?;

        info!(
            principal = %principal,
            consultation = %id,
            from = %current.status,
            to = %record.status,
            "consultation status changed"
        );
        Ok(record)
    }

    /// Fetches `id` and checks that `principal` may perform `action` on it.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`](crate::StoreError::NotFound) if absent,
    /// [`ServiceError::AccessDenied`] if the policy refuses.
    pub fn authorize_object(
        &self,
        principal: &Principal,
        id: ConsultationId,
        action: ObjectAction,
    ) -> Result<Consultation, ServiceError> {
        let record = self.store.get(id)?;
        self.policy.check_object_action(principal, &record, action)?;
        Ok(record)
    }

    fn replace(
        &self,
        principal: &Principal,
        current: &Consultation,
        fields: ConsultationFields,
    ) -> Result<Consultation, ServiceError> {
        self.validate(Some(current.id), &fields)?;
        let record = self.store.update(current.id, fields)?;

        info!(
            principal = %principal,
            consultation = %record.id,
            doctor = %record.doctor,
            patient = %record.patient,
            "consultation updated"
        );
        Ok(record)
    }

    /// Resolves the profiles in `fields` and runs the scheduling checks
    /// against the records of the same doctor.
    fn validate(
        &self,
        own: Option<ConsultationId>,
        fields: &ConsultationFields,
    ) -> Result<(), ServiceError> {
        let doctor = self
            .directory
            .doctor(fields.doctor)
            .ok_or(ServiceError::UnknownDoctor(fields.doctor))?;
        let patient = self
            .directory
            .patient(fields.patient)
            .ok_or(ServiceError::UnknownPatient(fields.patient))?;

        let candidate = ScheduleCandidate {
            consultation: own,
            doctor: doctor.id,
            patient: patient.id,
            doctor_principal: doctor.principal,
            patient_principal: patient.principal,
            start_time: fields.start_time,
            end_time: fields.end_time,
        };
        let existing = self.store.list(&ListQuery::for_doctor(fields.doctor))?;
        self.validator.validate(&candidate, &existing)?;
        Ok(())
    }
}
