use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, JwtAuth, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, RegisterRequest,
    RegisterResponse, UserResponse,
};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "auth";

/// OpenAPI documentation for the public authentication endpoints
#[derive(OpenApi)]
#[openapi(
    paths(register, login, refresh),
    components(
        schemas(
            RegisterRequest,
            RegisterResponse,
            UserResponse,
            LoginRequest,
            LoginResponse,
            RefreshRequest,
            RefreshResponse
        ),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Registration, login and token refresh"))
)]
pub struct AuthApiDoc;

/// Application state for auth handlers
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt: JwtAuth,
}

/// Public routes: `/register`, `/login`, `/refresh`
pub fn auth_router<R: UserRepository + 'static>(service: UserService<R>, jwt: JwtAuth) -> Router {
    let state = Arc::new(AuthState { service, jwt });

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .with_state(state)
}

/// Register a new account; it starts in `pending` state
#[utoipa::path(
    post,
    path = "/register",
    tag = TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<impl IntoResponse> {
    let hrms_id = input.hrms_id.clone();

    let user = match state.service.register(input).await {
        Ok(user) => user,
        Err(e) => {
            AuditEvent::new(
                Some(hrms_id),
                "user.register",
                None,
                AuditOutcome::Failure,
            )
            .with_request(&headers)
            .with_details(json!({ "error": e.kind(), "field": e.field() }))
            .log();
            return Err(e);
        }
    };

    AuditEvent::new(
        Some(user.hrms_id.clone()),
        "user.register",
        Some(format!("user:{}", user.hrms_id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .log();

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: user.into(),
        }),
    ))
}

/// Exchange HRMS ID and password for an access/refresh pair
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair", body = LoginResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<LoginResponse>> {
    let user = match state
        .service
        .verify_credentials(&input.hrms_id, &input.password)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            AuditEvent::new(
                Some(input.hrms_id.clone()),
                "user.login",
                None,
                AuditOutcome::Failure,
            )
            .with_request(&headers)
            .log();
            return Err(e);
        }
    };

    let pair = state
        .jwt
        .issue_pair(&user.hrms_id, user.email.as_deref(), &user.roles())?;

    AuditEvent::new(
        Some(user.hrms_id.clone()),
        "user.login",
        None,
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({ "status": user.status }))
    .log();

    Ok(Json(LoginResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

/// Issue a new access token from a refresh token
#[utoipa::path(
    post,
    path = "/refresh",
    tag = TAG,
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = RefreshResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn refresh<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    ValidatedJson(input): ValidatedJson<RefreshRequest>,
) -> UserResult<Json<RefreshResponse>> {
    let access = state.jwt.refresh_access_token(&input.refresh)?;
    Ok(Json(RefreshResponse { access }))
}
