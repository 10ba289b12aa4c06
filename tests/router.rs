use adoptify_api::{
    config::AppConfig,
    entity::UserRole,
    routes::{create_app, normalize},
    services::auth_service::issue_token_pair,
    state::AppState,
};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

// These requests are all answered before any query runs, so no database is needed.
fn test_state() -> AppState {
    let config = AppConfig {
        database_url: "postgres://unused".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "router-test-secret".into(),
        access_token_ttl_minutes: 5,
        refresh_token_ttl_hours: 1,
        db_max_connections: 1,
        cors_allowed_origins: vec![],
    };
    AppState::new(DatabaseConnection::Disconnected, config)
}

fn bearer(state: &AppState, role: UserRole) -> String {
    let pair = issue_token_pair(&state.config, Uuid::new_v4(), role).unwrap();
    format!("Bearer {}", pair.access)
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
    let app = normalize(create_app(state.clone()));
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: Method, uri: &str, auth: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn root_and_health_report_ok() {
    let state = test_state();
    for uri in ["/", "/health"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Backend is working");
        assert_eq!(body["data"]["status"], "OK");
    }
}

#[tokio::test]
async fn missing_token_is_unauthorized_with_or_without_trailing_slash() {
    let state = test_state();
    for uri in ["/api/user/details", "/api/user/details/"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(&state, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Authentication credentials were not provided.");
    }
}

#[tokio::test]
async fn refresh_token_cannot_authenticate_requests() {
    let state = test_state();
    let pair = issue_token_pair(&state.config, Uuid::new_v4(), UserRole::Admin).unwrap();
    let request = Request::builder()
        .uri("/api/user/details/")
        .header(header::AUTHORIZATION, format!("Bearer {}", pair.refresh))
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(&state, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_admin_cannot_update_application_status() {
    let state = test_state();
    let auth = bearer(&state, UserRole::User);
    let uri = format!("/api/adoption-application/{}/update-status/", Uuid::new_v4());

    let (status, body) = send(
        &state,
        json_request(Method::PATCH, &uri, Some(&auth), r#"{"application_status":"Approved"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You do not have permission to perform this action"
    );
}

#[tokio::test]
async fn invalid_application_status_is_rejected() {
    let state = test_state();
    let auth = bearer(&state, UserRole::Admin);
    let uri = format!("/api/adoption-application/{}/update-status/", Uuid::new_v4());

    let (status, body) = send(
        &state,
        json_request(Method::PATCH, &uri, Some(&auth), r#"{"status":"Cancelled"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["fields"]["application_status"].is_array());
}

#[tokio::test]
async fn malformed_json_gets_json_error() {
    let state = test_state();
    let auth = bearer(&state, UserRole::Admin);
    let uri = format!("/api/adoption-application/{}/update-status", Uuid::new_v4());

    let (status, body) = send(
        &state,
        json_request(Method::PATCH, &uri, Some(&auth), "{not json"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn bad_path_id_gets_json_error() {
    let state = test_state();
    let auth = bearer(&state, UserRole::User);
    let request = Request::builder()
        .uri("/api/pets/not-a-uuid/")
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&state, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["error"].is_string());
}

#[tokio::test]
async fn users_cannot_register_pets() {
    let state = test_state();
    let auth = bearer(&state, UserRole::User);
    let (status, _) = send(
        &state,
        json_request(
            Method::POST,
            "/api/register-pet/",
            Some(&auth),
            r#"{"name":"Rex","age":2,"gender":"Male"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn donation_without_amount_is_bad_request() {
    let state = test_state();
    let auth = bearer(&state, UserRole::User);
    let (status, body) = send(
        &state,
        json_request(
            Method::POST,
            "/api/donate/",
            Some(&auth),
            &format!(r#"{{"shelter_id":"{}"}}"#, Uuid::new_v4()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Shelter ID and amount are required.");
}

#[tokio::test]
async fn unknown_route_returns_json_not_found() {
    let state = test_state();
    let request = Request::builder()
        .uri("/api/nowhere")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&state, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/api/nowhere");
}

#[tokio::test]
async fn overlong_fields_are_rejected_before_storage() {
    let state = test_state();
    let body = serde_json::json!({
        "username": "u".repeat(151),
        "email": "long@example.com",
        "password": "long-enough-password",
        "first_name": "Sam",
        "last_name": "Adopter",
        "phone_number": "1".repeat(21),
    });
    let (status, body) = send(
        &state,
        json_request(Method::POST, "/api/user/register/", None, &body.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["fields"]["username"].is_array());
    assert!(body["data"]["fields"]["phone_number"].is_array());

    let auth = bearer(&state, UserRole::Admin);
    let pet = serde_json::json!({
        "name": "n".repeat(101),
        "age": 2,
        "gender": "Male",
        "shelter_id": Uuid::new_v4(),
    });
    let (status, body) = send(
        &state,
        json_request(Method::POST, "/api/register-pet/", Some(&auth), &pet.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["fields"]["name"].is_array());
}
