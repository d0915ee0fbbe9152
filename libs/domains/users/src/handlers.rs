use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    http::HeaderMap,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, BearerToken, JwtAuth, JwtClaims, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware, require_admin,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{
    HelloResponse, RegistrationsQuery, UpdateStatusRequest, UserResponse, UserStatus,
};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "users";

/// OpenAPI documentation for the authenticated user endpoints
#[derive(OpenApi)]
#[openapi(
    paths(hello, list_registrations, update_status),
    components(
        schemas(HelloResponse, UserResponse, UserStatus, UpdateStatusRequest),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Caller identity and registration review"))
)]
pub struct ApiDoc;

/// Bearer-protected routes. `/registrations` and `/update_status`
/// additionally require the admin role.
pub fn router<R: UserRepository + 'static>(service: UserService<R>, jwt: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    let admin = Router::new()
        .route("/registrations", get(list_registrations))
        .route("/update_status", post(update_status))
        .route_layer(from_fn(require_admin));

    Router::new()
        .route("/hello", get(hello))
        .merge(admin)
        .route_layer(from_fn_with_state(jwt, jwt_auth_middleware))
        .with_state(shared_service)
}

/// Greet the caller and echo their identity and token
#[utoipa::path(
    get,
    path = "/hello",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller identity", body = HelloResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn hello<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> UserResult<Json<HelloResponse>> {
    let user = service.get_by_hrms_id(&claims.sub).await?;

    Ok(Json(HelloResponse {
        message: format!("Hello, {}!", user.hrms_id),
        hrms_id: user.hrms_id,
        email: user.email,
        phone_number: user.phone_number,
        token,
    }))
}

/// List registrations, optionally filtered by status
#[utoipa::path(
    get,
    path = "/registrations",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(RegistrationsQuery),
    responses(
        (status = 200, description = "Users in registration order", body = Vec<UserResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse)
    )
)]
async fn list_registrations<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Query(query): Query<RegistrationsQuery>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.list_users(query.filter.as_deref()).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Accept or reject a registration
#[utoipa::path(
    post,
    path = "/update_status",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_status<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<UpdateStatusRequest>,
) -> UserResult<Json<UserResponse>> {
    let resource = Some(format!("user:{}", input.hrms_id));

    let result = service.set_status(&input.hrms_id, &input.status).await;
    let outcome = if result.is_ok() {
        AuditOutcome::Success
    } else {
        AuditOutcome::Failure
    };

    AuditEvent::new(Some(claims.sub), "user.update_status", resource, outcome)
        .with_request(&headers)
        .with_details(json!({ "status": input.status }))
        .log();

    Ok(Json(result?.into()))
}
