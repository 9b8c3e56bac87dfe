//! HTTP error responses.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medconsult_runtime::{ServiceError, StoreError};
use medconsult_types::ErrorCode;
use serde::Serialize;

/// An error returned to an HTTP client.
///
/// Rendered as `{"code": "...", "detail": "..."}` with the matching status.
///
/// | Source | Status |
/// |--------|--------|
/// | missing or unknown bearer token | 401 |
/// | scheduling, unknown profile, bad status or ordering, malformed body | 400 |
/// | access denied | 403 |
/// | record not found | 404 |
/// | unique slot taken concurrently | 409 |
/// | storage failure | 500 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    detail: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    detail: &'a str,
}

impl ApiError {
    /// Creates an error with an explicit status and code.
    pub fn new(status: StatusCode, code: &'static str, detail: impl Into<String>) -> Self {
        Self {
            status,
            code,
            detail: detail.into(),
        }
    }

    /// 401 for a request without a valid bearer token.
    pub fn unauthenticated(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "AUTH_UNAUTHENTICATED", detail)
    }

    /// 400 for a request the extractors could not decode.
    pub fn bad_request(code: &'static str, detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, detail)
    }

    /// 500 for failures outside the service.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "APP_INTERNAL", detail)
    }

    /// HTTP status of the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Human-readable detail.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Status for a service failure.
fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_)
        | ServiceError::UnknownDoctor(_)
        | ServiceError::UnknownPatient(_)
        | ServiceError::InvalidStatus(_)
        | ServiceError::InvalidOrdering(_) => StatusCode::BAD_REQUEST,
        ServiceError::AccessDenied(_) => StatusCode::FORBIDDEN,
        ServiceError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
        ServiceError::Store(StoreError::ConstraintViolation { .. }) => StatusCode::CONFLICT,
        ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            tracing::error!(code = err.code(), error = %err, "request failed");
        }
        Self::new(status, err.code(), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("REQUEST_INVALID_BODY", rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request("REQUEST_INVALID_PATH", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request("REQUEST_INVALID_QUERY", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            code: self.code,
            detail: &self.detail,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medconsult_runtime::{AccessDenied, CollectionAction, SnapshotDefect, ValidationError};
    use medconsult_types::{ConsultationId, ConsultationStatus, DoctorId};

    #[test]
    fn service_errors_map_to_statuses() {
        let cases: Vec<(ServiceError, StatusCode, &str)> = vec![
            (
                ServiceError::UnknownDoctor(DoctorId::new(7)),
                StatusCode::BAD_REQUEST,
                "CONSULTATION_UNKNOWN_DOCTOR",
            ),
            (
                ServiceError::from(
                    "Nope"
                        .parse::<ConsultationStatus>()
                        .expect_err("not a status"),
                ),
                StatusCode::BAD_REQUEST,
                "CONSULTATION_INVALID_STATUS",
            ),
            (
                AccessDenied::collection("patient:x", CollectionAction::Create).into(),
                StatusCode::FORBIDDEN,
                "AUTH_ACCESS_DENIED",
            ),
            (
                StoreError::NotFound(ConsultationId::new(1)).into(),
                StatusCode::NOT_FOUND,
                "STORE_NOT_FOUND",
            ),
            (
                StoreError::corrupt(
                    "/tmp/x.json",
                    SnapshotDefect::DuplicateId(ConsultationId::new(1)),
                )
                .into(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_CORRUPT",
            ),
        ];

        for (err, status, code) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status(), status, "{code}");
            assert_eq!(api.code(), code);
            assert!(!api.detail().is_empty());
        }
    }

    #[test]
    fn validation_is_bad_request() {
        let start = chrono::Utc::now();
        let err = ServiceError::from(ValidationError::InvalidTimeRange {
            start_time: start,
            end_time: start,
        });
        let api = ApiError::from(err);
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.code(), "SCHEDULE_INVALID_TIME_RANGE");
    }

    #[test]
    fn unauthenticated_is_401() {
        let api = ApiError::unauthenticated("missing bearer token");
        assert_eq!(api.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(api.code(), "AUTH_UNAUTHENTICATED");
    }
}
