//! Integration tests for the HTTP API.
//!
//! Drives the router with `tower::ServiceExt::oneshot` and checks status
//! codes and JSON bodies end to end.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use medconsult_app::router;
use medconsult_runtime::{
    ConsultationService, DirectorySeed, InMemoryConsultationStore, InMemoryDirectory,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

// =============================================================================
// Test Fixtures
// =============================================================================

const SEED: &str = r#"
[[principals]]
username = "admin"
role = "Admin"
token = "admin-token"

[[principals]]
username = "house"
first_name = "Gregory"
last_name = "House"
role = "Doctor"
token = "house-token"

[[principals]]
username = "wilson"
first_name = "James"
last_name = "Wilson"
role = "Doctor"
token = "wilson-token"

[[principals]]
username = "clancy"
first_name = "Clancy"
last_name = "Brown"
role = "Patient"
token = "clancy-token"

[[doctors]]
id = 1
username = "house"
specialization = "Diagnostics"

[[doctors]]
id = 2
username = "wilson"
specialization = "Oncology"

[[patients]]
id = 1
username = "clancy"
phone = "+15550001"
email = "clancy@example.com"
"#;

fn app() -> Router {
    let seed = DirectorySeed::from_toml(SEED).expect("parse seed");
    let directory = InMemoryDirectory::from_seed(seed).expect("valid seed");
    router(ConsultationService::new(
        Arc::new(InMemoryConsultationStore::new()),
        Arc::new(directory),
    ))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).expect("build request");

    let response = app.clone().oneshot(request).await.expect("call router");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn booking(doctor: u64, start: &str, end: &str) -> Value {
    json!({
        "start_time": start,
        "end_time": end,
        "doctor": doctor,
        "patient": 1,
    })
}

async fn create(app: &Router, token: &str, doctor: u64, start: &str, end: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/consultations",
        Some(token),
        Some(booking(doctor, start, end)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_is_public() {
    let (status, body) = send(&app(), Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn missing_or_unknown_token_is_401() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/v1/consultations", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_UNAUTHENTICATED");

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/consultations",
        Some("forged"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Authentication is checked before the body is decoded.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/consultations",
        None,
        Some(json!({ "nonsense": true })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn doctor_books_and_retrieves() {
    let app = app();
    let record = create(
        &app,
        "house-token",
        1,
        "2026-12-01T09:00:00Z",
        "2026-12-01T09:30:00Z",
    )
    .await;
    assert_eq!(record["status"], "Waiting");
    assert_eq!(record["doctor"], 1);
    assert_eq!(record["patient"], 1);
    assert!(record["created_at"].is_string());

    let uri = format!("/api/v1/consultations/{}", record["id"]);
    let (status, body) = send(&app, Method::GET, &uri, Some("clancy-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, record);
}

#[tokio::test]
async fn admin_retrieves_doctor_booking() {
    let app = app();
    let record = create(
        &app,
        "house-token",
        1,
        "2026-12-01T09:00:00Z",
        "2026-12-01T09:30:00Z",
    )
    .await;

    let uri = format!("/api/v1/consultations/{}", record["id"]);
    let (status, body) = send(&app, Method::GET, &uri, Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, record);
}

#[tokio::test]
async fn record_access_is_checked_before_body() {
    let app = app();
    let record = create(
        &app,
        "house-token",
        1,
        "2026-12-01T09:00:00Z",
        "2026-12-01T09:30:00Z",
    )
    .await;
    let uri = format!("/api/v1/consultations/{}", record["id"]);
    let status_uri = format!("{uri}/change_status");
    let garbage = json!({ "start_time": 42 });

    for (method, target) in [
        (Method::PUT, uri.as_str()),
        (Method::PATCH, uri.as_str()),
        (Method::PATCH, status_uri.as_str()),
    ] {
        let (status, body) = send(
            &app,
            method.clone(),
            target,
            Some("wilson-token"),
            Some(garbage.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {target}: {body}");
        assert_eq!(body["code"], "AUTH_ACCESS_DENIED");

        let (status, body) = send(
            &app,
            method.clone(),
            target,
            Some("house-token"),
            Some(garbage.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {target}: {body}");
        assert_eq!(body["code"], "REQUEST_INVALID_BODY");
    }

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/consultations/999",
        Some("house-token"),
        Some(garbage),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "STORE_NOT_FOUND");
}

#[tokio::test]
async fn patient_create_is_403() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/v1/consultations",
        Some("clancy-token"),
        Some(booking(1, "2026-12-01T09:00:00Z", "2026-12-01T09:30:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "AUTH_ACCESS_DENIED");
    assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
async fn validation_failures_are_400() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/consultations",
        Some("house-token"),
        Some(booking(1, "2026-12-01T10:00:00Z", "2026-12-01T09:00:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "SCHEDULE_INVALID_TIME_RANGE");

    create(
        &app,
        "house-token",
        1,
        "2026-12-01T09:00:00Z",
        "2026-12-01T09:30:00Z",
    )
    .await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/consultations",
        Some("admin-token"),
        Some(booking(1, "2026-12-01T09:00:00Z", "2026-12-01T09:45:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "SCHEDULE_DOUBLE_BOOKING");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/consultations",
        Some("admin-token"),
        Some(booking(9, "2026-12-02T09:00:00Z", "2026-12-02T09:30:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONSULTATION_UNKNOWN_DOCTOR");
}

#[tokio::test]
async fn malformed_requests_are_400() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/consultations",
        Some("house-token"),
        Some(json!({ "doctor": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "REQUEST_INVALID_BODY");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/consultations/abc",
        Some("house-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "REQUEST_INVALID_PATH");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/consultations?ordering=start_time",
        Some("house-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONSULTATION_INVALID_ORDERING");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/consultations?status=Lost",
        Some("house-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONSULTATION_INVALID_STATUS");
}

#[tokio::test]
async fn list_is_scoped_filtered_and_ordered() {
    let app = app();
    let first = create(
        &app,
        "house-token",
        1,
        "2026-12-01T09:00:00Z",
        "2026-12-01T09:30:00Z",
    )
    .await;
    let second = create(
        &app,
        "wilson-token",
        2,
        "2026-12-01T09:00:00Z",
        "2026-12-01T09:30:00Z",
    )
    .await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/consultations",
        Some("house-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([first]));

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/consultations?ordering=created_at",
        Some("admin-token"),
        None,
    )
    .await;
    assert_eq!(body, json!([first, second]));

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/consultations",
        Some("admin-token"),
        None,
    )
    .await;
    assert_eq!(body, json!([second, first]));

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/consultations?search=wilson",
        Some("admin-token"),
        None,
    )
    .await;
    assert_eq!(body, json!([second]));

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/consultations?status=Paid",
        Some("clancy-token"),
        None,
    )
    .await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn change_status_flow() {
    let app = app();
    let record = create(
        &app,
        "house-token",
        1,
        "2026-12-01T09:00:00Z",
        "2026-12-01T09:30:00Z",
    )
    .await;
    let uri = format!("/api/v1/consultations/{}/change_status", record["id"]);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &uri,
        Some("house-token"),
        Some(json!({ "status": "InvalidStatus" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONSULTATION_INVALID_STATUS");

    let (status, _) = send(
        &app,
        Method::PATCH,
        &uri,
        Some("wilson-token"),
        Some(json!({ "status": "Paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &uri,
        Some("house-token"),
        Some(json!({ "status": "Confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Confirmed");
    assert_eq!(body["id"], record["id"]);
}

#[tokio::test]
async fn update_and_partial_update() {
    let app = app();
    let record = create(
        &app,
        "house-token",
        1,
        "2026-12-01T09:00:00Z",
        "2026-12-01T09:30:00Z",
    )
    .await;
    let uri = format!("/api/v1/consultations/{}", record["id"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some("house-token"),
        Some(booking(1, "2026-12-01T11:00:00Z", "2026-12-01T12:00:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start_time"], "2026-12-01T11:00:00Z");
    assert_eq!(body["status"], "Waiting");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &uri,
        Some("house-token"),
        Some(json!({ "end_time": "2026-12-01T11:15:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start_time"], "2026-12-01T11:00:00Z");
    assert_eq!(body["end_time"], "2026-12-01T11:15:00Z");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/consultations/999",
        Some("house-token"),
        Some(booking(1, "2026-12-01T11:00:00Z", "2026-12-01T12:00:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_flow() {
    let app = app();
    let record = create(
        &app,
        "house-token",
        1,
        "2026-12-01T09:00:00Z",
        "2026-12-01T09:30:00Z",
    )
    .await;
    let uri = format!("/api/v1/consultations/{}", record["id"]);

    let (status, _) = send(&app, Method::DELETE, &uri, Some("wilson-token"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::DELETE, &uri, Some("house-token"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &uri, Some("house-token"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "STORE_NOT_FOUND");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let (status, body) = send(&app(), Method::GET, "/api/v2/nothing", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "REQUEST_NOT_FOUND");
}
