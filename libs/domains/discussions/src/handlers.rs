use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, JwtAuth, JwtClaims, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    jwt_auth_middleware,
};
use domain_documents::DocumentRepository;
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{PostError, PostResult};
use crate::models::{CreatePost, CreatePostResponse, PostQuery, PostResponse, PostType};
use crate::repository::PostRepository;
use crate::service::PostService;

const TAG: &str = "posts";

/// OpenAPI documentation for the discussion endpoints
#[derive(OpenApi)]
#[openapi(
    paths(create_post, list_posts),
    components(
        schemas(CreatePost, CreatePostResponse, PostResponse, PostType),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Comments and feedback on documents"))
)]
pub struct ApiDoc;

/// Create the discussion router; every route requires a bearer token
pub fn router<P, D>(service: PostService<P, D>, jwt: JwtAuth) -> Router
where
    P: PostRepository + 'static,
    D: DocumentRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/create_post", post(create_post))
        .route("/posts", get(list_posts))
        .route_layer(from_fn_with_state(jwt, jwt_auth_middleware))
        .with_state(shared_service)
}

/// Post a comment or feedback on a document
#[utoipa::path(
    post,
    path = "/create_post",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = CreatePost,
    responses(
        (status = 201, description = "Post created", body = CreatePostResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn create_post<P: PostRepository, D: DocumentRepository>(
    State(service): State<Arc<PostService<P, D>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreatePost>,
) -> PostResult<impl IntoResponse> {
    let document_id = input.document_id.clone();
    let post = service.create_post(&claims.sub, input).await?;

    AuditEvent::new(
        Some(claims.sub),
        "post.create",
        Some(format!("post:{}", post.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({
        "document_id": document_id,
        "type": post.post_type,
        "parent_id": post.parent_id,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(CreatePostResponse { id: post.id })))
}

/// List all posts of a document, replies included
#[utoipa::path(
    get,
    path = "/posts",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(PostQuery),
    responses(
        (status = 200, description = "Posts in creation order", body = Vec<PostResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn list_posts<P: PostRepository, D: DocumentRepository>(
    State(service): State<Arc<PostService<P, D>>>,
    Query(query): Query<PostQuery>,
) -> PostResult<Json<Vec<PostResponse>>> {
    let document_id = query
        .document_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| PostError::Validation {
            field: "document_id",
            message: "This query parameter is required.".to_string(),
        })?;

    let posts = service.list_posts(document_id.trim()).await?;
    Ok(Json(posts))
}
