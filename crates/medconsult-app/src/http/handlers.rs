//! Route handlers.

use super::{ApiError, ApiResult, SharedState};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use medconsult_runtime::{ConsultationDraft, ConsultationPatch, ListParams, ObjectAction};
use medconsult_types::{Consultation, ConsultationId, Principal};
use serde::Deserialize;
use serde_json::{json, Value};

/// Raw list query string. Values are validated by [`ListParams::parse`].
#[derive(Debug, Default, Deserialize)]
pub(super) struct ListQueryString {
    search: Option<String>,
    status: Option<String>,
    ordering: Option<String>,
}

/// Body of `change_status`. The status stays a raw string so an unknown
/// name is reported as an invalid status rather than a malformed body.
#[derive(Debug, Deserialize)]
pub(super) struct StatusChange {
    status: String,
}

fn consultation_id(path: Result<Path<u64>, PathRejection>) -> ApiResult<ConsultationId> {
    let Path(raw) = path?;
    Ok(ConsultationId::new(raw))
}

/// Unwraps the body of a request on an existing record.
///
/// A rejected body is reported only after the record is found and `action`
/// is allowed, so 404 and 403 take precedence over 400.
async fn record_body<T>(
    state: &SharedState,
    principal: &Principal,
    id: ConsultationId,
    action: ObjectAction,
    payload: Result<Json<T>, JsonRejection>,
) -> ApiResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let principal = principal.clone();
            state
                .run(move |service| service.authorize_object(&principal, id, action))
                .await?;
            Err(rejection.into())
        }
    }
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(super) async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "REQUEST_NOT_FOUND", "no such route")
}

pub(super) async fn create_consultation(
    State(state): State<SharedState>,
    headers: HeaderMap,
    payload: Result<Json<ConsultationDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Consultation>)> {
    let principal = state.authenticate(&headers)?;
    let Json(draft) = payload?;

    let record = state
        .run(move |service| service.create(&principal, draft))
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub(super) async fn list_consultations(
    State(state): State<SharedState>,
    headers: HeaderMap,
    query: Result<Query<ListQueryString>, QueryRejection>,
) -> ApiResult<Json<Vec<Consultation>>> {
    let principal = state.authenticate(&headers)?;
    let Query(query) = query?;

    let records = state
        .run(move |service| {
            let params = ListParams::parse(
                query.search.as_deref(),
                query.status.as_deref(),
                query.ordering.as_deref(),
            )?;
            service.list(&principal, &params)
        })
        .await?;
    Ok(Json(records))
}

pub(super) async fn retrieve_consultation(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<Consultation>> {
    let principal = state.authenticate(&headers)?;
    let id = consultation_id(path)?;

    let record = state
        .run(move |service| service.retrieve(&principal, id))
        .await?;
    Ok(Json(record))
}

pub(super) async fn update_consultation(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<ConsultationDraft>, JsonRejection>,
) -> ApiResult<Json<Consultation>> {
    let principal = state.authenticate(&headers)?;
    let id = consultation_id(path)?;
    let draft = record_body(&state, &principal, id, ObjectAction::Update, payload).await?;

    let record = state
        .run(move |service| service.update(&principal, id, draft))
        .await?;
    Ok(Json(record))
}

pub(super) async fn partial_update_consultation(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<ConsultationPatch>, JsonRejection>,
) -> ApiResult<Json<Consultation>> {
    let principal = state.authenticate(&headers)?;
    let id = consultation_id(path)?;
    let patch = record_body(&state, &principal, id, ObjectAction::Update, payload).await?;

    let record = state
        .run(move |service| service.partial_update(&principal, id, patch))
        .await?;
    Ok(Json(record))
}

pub(super) async fn delete_consultation(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let principal = state.authenticate(&headers)?;
    let id = consultation_id(path)?;

    state
        .run(move |service| service.delete(&principal, id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn change_status(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<StatusChange>, JsonRejection>,
) -> ApiResult<Json<Consultation>> {
    let principal = state.authenticate(&headers)?;
    let id = consultation_id(path)?;
    let change = record_body(&state, &principal, id, ObjectAction::ChangeStatus, payload).await?;

    let record = state
        .run(move |service| service.change_status(&principal, id, &change.status))
        .await?;
    Ok(Json(record))
}
