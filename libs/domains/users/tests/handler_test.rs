//! Handler tests for the users domain
//!
//! Drive the auth and user routers end to end over the in-memory repository:
//! status codes, JSON bodies, and the bearer/admin gates.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

const SECRET: &str = "handler-test-secret-at-least-32-bytes!!";

struct TestApp {
    router: Router,
    service: UserService<InMemoryUserRepository>,
}

fn app() -> TestApp {
    let jwt = JwtAuth::new(&JwtConfig::new(SECRET).unwrap());
    let service = UserService::new(InMemoryUserRepository::new());

    let router = auth_handlers::auth_router(service.clone(), jwt.clone())
        .merge(handlers::router(service.clone(), jwt));

    TestApp { router, service }
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = json_body(response.into_body()).await;
    (status, body)
}

async fn register(app: &TestApp, hrms_id: &str) -> (StatusCode, Value) {
    send(
        app,
        post_json(
            "/register",
            json!({"hrms_id": hrms_id, "password": "pw"}),
            None,
        ),
    )
    .await
}

async fn login(app: &TestApp, hrms_id: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        post_json(
            "/login",
            json!({"hrms_id": hrms_id, "password": password}),
            None,
        ),
    )
    .await
}

async fn admin_token(app: &TestApp) -> String {
    app.service
        .ensure_superuser("ADMIN", None, "admin-pw")
        .await
        .unwrap();
    let (_, body) = login(app, "ADMIN", "admin-pw").await;
    body["access"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_returns_201_with_pending_user() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json(
            "/register",
            json!({"hrms_id": "E100", "password": "pw", "email": "e100@Corp.Example", "phone_no": "555-0100"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["hrms_id"], "E100");
    assert_eq!(body["user"]["status"], "pending");
    assert_eq!(body["user"]["email"], "e100@corp.example");
    assert_eq!(body["user"]["phone_number"], "555-0100");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_returns_field_error() {
    let app = app();
    register(&app, "E100").await;

    let (status, body) = register(&app, "E100").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(
        body["details"]["hrms_id"][0],
        "user with this hrms_id already exists."
    );
}

#[tokio::test]
async fn test_register_validates_input() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json(
            "/register",
            json!({"hrms_id": "", "password": "pw", "email": "not-an-email"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("hrms_id").is_some());
    assert!(body["details"].get("email").is_some());
}

#[tokio::test]
async fn test_register_missing_hrms_id_returns_field_error() {
    let app = app();

    let (status, body) = send(&app, post_json("/register", json!({"password": "pw"}), None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["hrms_id"][0], "This field is required.");
}

#[tokio::test]
async fn test_register_duplicate_phone_uses_request_field() {
    let app = app();
    let phone_user = |hrms_id: &str| {
        post_json(
            "/register",
            json!({"hrms_id": hrms_id, "password": "pw", "phone_no": "555-0100"}),
            None,
        )
    };
    let (status, _) = send(&app, phone_user("E100")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, phone_user("E200")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("phone_no").is_some());
    assert!(body["details"].get("phone_number").is_none());
}

#[tokio::test]
async fn test_pending_user_can_log_in() {
    let app = app();
    register(&app, "E100").await;

    let (status, body) = login(&app, "E100", "pw").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["access"].is_string());
    assert!(body["refresh"].is_string());
}

#[tokio::test]
async fn test_login_with_wrong_password_returns_401() {
    let app = app();
    register(&app, "E100").await;

    let (status, body) = login(&app, "E100", "wrong").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        "No active account found with the given credentials"
    );
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = app();
    register(&app, "E100").await;
    let (_, tokens) = login(&app, "E100", "pw").await;

    let (status, body) = send(
        &app,
        post_json("/refresh", json!({"refresh": tokens["refresh"]}), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let access = body["access"].as_str().unwrap();
    let (status, _) = send(&app, get("/hello", Some(access))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = app();
    register(&app, "E100").await;
    let (_, tokens) = login(&app, "E100", "pw").await;

    let (status, _) = send(
        &app,
        post_json("/refresh", json!({"refresh": tokens["access"]}), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_hello_requires_token() {
    let app = app();

    let (status, body) = send(&app, get("/hello", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_hello_rejects_refresh_token_as_bearer() {
    let app = app();
    register(&app, "E100").await;
    let (_, tokens) = login(&app, "E100", "pw").await;

    let refresh = tokens["refresh"].as_str().unwrap();
    let (status, _) = send(&app, get("/hello", Some(refresh))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_hello_echoes_identity_and_token() {
    let app = app();
    send(
        &app,
        post_json(
            "/register",
            json!({"hrms_id": "E100", "password": "pw", "email": "e100@corp.example"}),
            None,
        ),
    )
    .await;
    let (_, tokens) = login(&app, "E100", "pw").await;
    let access = tokens["access"].as_str().unwrap();

    let (status, body) = send(&app, get("/hello", Some(access))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hello, E100!");
    assert_eq!(body["hrms_id"], "E100");
    assert_eq!(body["email"], "e100@corp.example");
    assert_eq!(body["phone_number"], Value::Null);
    assert_eq!(body["token"], access);
}

#[tokio::test]
async fn test_registrations_forbidden_for_regular_user() {
    let app = app();
    register(&app, "E100").await;
    let (_, tokens) = login(&app, "E100", "pw").await;

    let (status, body) = send(
        &app,
        get("/registrations", tokens["access"].as_str()),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You do not have permission to perform this action."
    );
}

#[tokio::test]
async fn test_registrations_filter_for_admin() {
    let app = app();
    let token = admin_token(&app).await;
    for id in ["E1", "E2", "E3"] {
        register(&app, id).await;
    }

    let (status, body) = send(&app, get("/registrations?filter=pending", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["hrms_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["E1", "E2", "E3"]);

    let (status, body) = send(&app, get("/registrations", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);

    let (status, body) = send(&app, get("/registrations?filter=bogus", Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["filter"][0], "\"bogus\" is not a valid choice.");
}

#[tokio::test]
async fn test_update_status_flow() {
    let app = app();
    let token = admin_token(&app).await;
    register(&app, "E100").await;

    let (status, body) = send(
        &app,
        post_json(
            "/update_status",
            json!({"hrms_id": "E100", "status": "accepted"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "accepted");

    let (status, body) = send(
        &app,
        post_json(
            "/update_status",
            json!({"hrms_id": "E100", "status": "approved"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("status").is_some());

    let (status, _) = send(
        &app,
        post_json(
            "/update_status",
            json!({"hrms_id": "E404", "status": "rejected"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
