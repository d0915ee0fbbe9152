use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, JwtAuth, JwtClaims, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    jwt_auth_middleware,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::DocumentResult;
use crate::models::{Document, DocumentQuery, SaveDocument, SaveOutcome, UpdateDocument};
use crate::repository::DocumentRepository;
use crate::service::DocumentService;

const TAG: &str = "documents";

const DOWNLOAD_DISPOSITION: &str = "attachment; filename=\"documents.json\"";

/// OpenAPI documentation for Documents API
#[derive(OpenApi)]
#[openapi(
    paths(create_document, update_document, list_documents),
    components(
        schemas(Document, SaveDocument, UpdateDocument),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "HR documents and their categories"))
)]
pub struct ApiDoc;

/// Create the document router; every route requires a bearer token
pub fn router<R: DocumentRepository + 'static>(service: DocumentService<R>, jwt: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/create_document", post(create_document))
        .route("/documents", get(list_documents))
        .route("/documents/{document_id}", put(update_document))
        .route_layer(from_fn_with_state(jwt, jwt_auth_middleware))
        .with_state(shared_service)
}

/// Create a document, or update it when `document_id` already exists
#[utoipa::path(
    post,
    path = "/create_document",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = SaveDocument,
    responses(
        (status = 201, description = "Document created", body = Document),
        (status = 200, description = "Existing document updated", body = Document),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_document<R: DocumentRepository>(
    State(service): State<Arc<DocumentService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<SaveDocument>,
) -> DocumentResult<impl IntoResponse> {
    let (document, outcome) = service.save_document(input).await?;

    let (status, action) = match outcome {
        SaveOutcome::Created => (StatusCode::CREATED, "document.create"),
        SaveOutcome::Updated => (StatusCode::OK, "document.update"),
    };

    AuditEvent::new(
        Some(claims.sub),
        action,
        Some(format!("document:{}", document.document_id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({ "categories": document.categories }))
    .log();

    Ok((status, Json(document)))
}

/// Update supplied fields of an existing document
#[utoipa::path(
    put,
    path = "/documents/{document_id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("document_id" = String, Path, description = "External document id")
    ),
    request_body = UpdateDocument,
    responses(
        (status = 200, description = "Document updated", body = Document),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_document<R: DocumentRepository>(
    State(service): State<Arc<DocumentService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    Path(document_id): Path<String>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<UpdateDocument>,
) -> DocumentResult<Json<Document>> {
    let document = service.update_document(&document_id, input).await?;

    AuditEvent::new(
        Some(claims.sub),
        "document.update",
        Some(format!("document:{}", document.document_id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .log();

    Ok(Json(document))
}

/// List documents by external id
#[utoipa::path(
    get,
    path = "/documents",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(DocumentQuery),
    responses(
        (status = 200, description = "Documents in creation order", body = Vec<Document>),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn list_documents<R: DocumentRepository>(
    State(service): State<Arc<DocumentService<R>>>,
    Query(query): Query<DocumentQuery>,
) -> DocumentResult<Response> {
    let documents = service
        .list_documents(query.document_ids.as_deref())
        .await?;

    let mut response = Json(documents).into_response();
    if query.download {
        response.headers_mut().insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static(DOWNLOAD_DISPOSITION),
        );
    }

    Ok(response)
}
