//! HTTP API.
//!
//! # Routes
//!
//! | Method & path | Operation | Success |
//! |---------------|-----------|---------|
//! | `GET /health` | liveness | 200 |
//! | `POST /api/v1/consultations` | create | 201 |
//! | `GET /api/v1/consultations?search=&status=&ordering=` | list | 200 |
//! | `GET /api/v1/consultations/:id` | retrieve | 200 |
//! | `PUT /api/v1/consultations/:id` | full update | 200 |
//! | `PATCH /api/v1/consultations/:id` | partial update | 200 |
//! | `DELETE /api/v1/consultations/:id` | delete | 204 |
//! | `PATCH /api/v1/consultations/:id/change_status` | set status | 200 |
//!
//! Every `/api` route requires `Authorization: Bearer <token>`. The token
//! is checked before the body is decoded, so an unauthenticated request is
//! always answered with 401. On routes with an `:id`, a malformed body is
//! reported after the record lookup and the access check:
//!
//! ```text
//! 401 token ─► 400 path ─► 404 record ─► 403 policy ─► 400 body ─► validation
//! ```

mod error;
mod handlers;

pub use error::ApiError;

use axum::extract::Request;
use axum::http::{header, HeaderMap};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, patch};
use axum::Router;
use medconsult_runtime::{ConsultationService, ServiceError};
use medconsult_types::Principal;
use std::sync::Arc;
use std::time::Instant;

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Shared state of the router.
#[derive(Debug, Clone)]
pub struct AppState {
    service: ConsultationService,
}

pub(crate) type SharedState = Arc<AppState>;

impl AppState {
    /// Wraps a service.
    #[must_use]
    pub fn new(service: ConsultationService) -> Self {
        Self { service }
    }

    /// The consultation service behind the router.
    #[must_use]
    pub fn service(&self) -> &ConsultationService {
        &self.service
    }

    /// Resolves the bearer token of a request to a principal.
    ///
    /// # Errors
    ///
    /// [`ApiError::unauthenticated`] if the header is missing, malformed or
    /// names an unknown token.
    pub fn authenticate(&self, headers: &HeaderMap) -> ApiResult<Principal> {
        let token = bearer_token(headers)?;
        self.service
            .directory()
            .resolve_token(token)
            .ok_or_else(|| ApiError::unauthenticated("invalid bearer token"))
    }

    /// Runs a service call on the blocking pool.
    ///
    /// Store backends may touch the filesystem, so calls never run on the
    /// async workers.
    pub(crate) async fn run<T, F>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(&ConsultationService) -> Result<T, ServiceError> + Send + 'static,
        T: Send + 'static,
    {
        let service = self.service.clone();
        tokio::task::spawn_blocking(move || op(&service))
            .await
            .map_err(|err| ApiError::internal(format!("task join error: {err}")))?
            .map_err(ApiError::from)
    }
}

fn bearer_token(headers: &HeaderMap) -> ApiResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthenticated("missing Authorization header"))?
        .to_str()
        .map_err(|_| ApiError::unauthenticated("malformed Authorization header"))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| ApiError::unauthenticated("expected 'Bearer <token>'"))?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(ApiError::unauthenticated("expected 'Bearer <token>'"));
    }
    Ok(token)
}

/// Builds the HTTP router over `service`.
pub fn router(service: ConsultationService) -> Router {
    let state: SharedState = Arc::new(AppState::new(service));

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/v1/consultations",
            get(handlers::list_consultations).post(handlers::create_consultation),
        )
        .route(
            "/api/v1/consultations/:id",
            get(handlers::retrieve_consultation)
                .put(handlers::update_consultation)
                .patch(handlers::partial_update_consultation)
                .delete(handlers::delete_consultation),
        )
        .route(
            "/api/v1/consultations/:id/change_status",
            patch(handlers::change_status),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed = ?started.elapsed(),
        "request"
    );
    response
}
