pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Returned for every error:
/// - `code`: Integer error code for logging/monitoring (e.g., 1001)
/// - `error`: Machine-readable error identifier (e.g., "VALIDATION_ERROR")
/// - `message`: Human-readable error message
/// - `details`: Optional per-field messages
///
/// ```json
/// {
///   "code": 1001,
///   "error": "VALIDATION_ERROR",
///   "message": "Request validation failed",
///   "details": { "hrms_id": ["user with this hrms_id already exists."] }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details, keyed by field name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    /// Field-level validation failure produced by domain logic,
    /// e.g. `{"hrms_id": ["user with this hrms_id already exists."]}`.
    #[error("Validation error: {0}")]
    FieldErrors(Value),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Single-field validation failure.
    pub fn field_error(field: &str, message: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(field.to_string(), json!([message.into()]));
        AppError::FieldErrors(Value::Object(fields))
    }
}

/// Flattens `validator` output into `{field: [message, ...]}`.
///
/// Uses the rule's custom message when present, otherwise its code.
pub fn validation_details(errors: &ValidationErrors) -> Value {
    let mut fields = Map::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .map(Value::String)
            .collect();
        fields.insert(field.to_string(), Value::Array(messages));
    }
    Value::Object(fields)
}

/// Body rejections tied to a field render like validation failures; bad
/// syntax and content type keep the extraction error.
fn json_rejection_parts(rejection: JsonRejection) -> ErrorParts {
    let text = rejection.body_text();

    if let JsonRejection::JsonDataError(_) = &rejection {
        if let Some(details) = data_error_details(&text) {
            tracing::info!(
                error_code = ErrorCode::ValidationError.code(),
                "Request body shape error: {}",
                text
            );
            return (
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError.default_message().to_string(),
                Some(details),
                ErrorCode::ValidationError,
            );
        }
    }

    tracing::warn!(
        error_code = ErrorCode::JsonExtraction.code(),
        "JSON extraction error: {}",
        text
    );
    let status = match &rejection {
        JsonRejection::MissingJsonContentType(_) => rejection.status(),
        _ => StatusCode::BAD_REQUEST,
    };
    (status, text, None, ErrorCode::JsonExtraction)
}

/// Turns a body deserialization failure into `{field: [message]}`.
///
/// Works on the rejection text, e.g. ``missing field `hrms_id` at line 1 column 17``
/// or ``email: invalid type: integer `5`, expected a string``. Errors not tied
/// to a field (wrong top-level type) yield `None`.
fn data_error_details(text: &str) -> Option<Value> {
    let reason = text.split_once("target type: ").map_or(text, |(_, r)| r);
    let reason = reason.split(" at line ").next().unwrap_or(reason);

    let (field, message) = if let Some(rest) = reason.strip_prefix("missing field `") {
        let field = rest.split('`').next()?;
        (field, "This field is required.".to_string())
    } else {
        let (path, inner) = reason.split_once(": ")?;
        let field = path.split(['.', '[']).next()?;
        if field.is_empty() || field.contains(' ') {
            return None;
        }
        let message = if inner.starts_with("missing field") {
            "This field is required."
        } else {
            "Invalid value."
        };
        (field, message.to_string())
    };

    let mut fields = Map::new();
    fields.insert(field.to_string(), json!([message]));
    Some(Value::Object(fields))
}

type ErrorParts = (StatusCode, String, Option<Value>, ErrorCode);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details, code): ErrorParts = match self {
            AppError::Database(e) => map_db_error(&e),
            AppError::JsonExtractorRejection(e) => json_rejection_parts(e),
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(validation_details(&e)),
                    ErrorCode::ValidationError,
                )
            }
            AppError::FieldErrors(details) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    %details,
                    "Field validation error"
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(details),
                    ErrorCode::ValidationError,
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg, None, ErrorCode::BadRequest)
            }
            AppError::Unauthorized(msg) => {
                tracing::info!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, msg, None, ErrorCode::Unauthorized)
            }
            AppError::Forbidden(msg) => {
                tracing::info!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, msg, None, ErrorCode::Forbidden)
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                (StatusCode::NOT_FOUND, msg, None, ErrorCode::NotFound)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError.default_message().to_string(),
                    None,
                    ErrorCode::InternalError,
                )
            }
        };

        error_response_with_details(status, message, code, details)
    }
}

/// Maps a `DbErr` onto response parts. Internal details are logged, never returned.
fn map_db_error(error: &DbErr) -> ErrorParts {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = error.sql_err() {
        tracing::info!(
            error_code = ErrorCode::Conflict.code(),
            "Unique constraint violation: {}",
            detail
        );
        return (
            StatusCode::CONFLICT,
            ErrorCode::Conflict.default_message().to_string(),
            None,
            ErrorCode::Conflict,
        );
    }

    match error {
        DbErr::RecordNotFound(what) => {
            tracing::info!(
                error_code = ErrorCode::DatabaseNotFound.code(),
                "Database record not found: {}",
                what
            );
            (
                StatusCode::NOT_FOUND,
                ErrorCode::DatabaseNotFound.default_message().to_string(),
                None,
                ErrorCode::DatabaseNotFound,
            )
        }
        DbErr::ConnectionAcquire(e) => {
            tracing::warn!(
                error_code = ErrorCode::DatabaseUnavailable.code(),
                "Database connection acquire failed: {:?}",
                e
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::DatabaseUnavailable.default_message().to_string(),
                None,
                ErrorCode::DatabaseUnavailable,
            )
        }
        other => {
            tracing::error!(
                error_code = ErrorCode::DatabaseError.code(),
                "Database error: {:?}",
                other
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DatabaseError.default_message().to_string(),
                None,
                ErrorCode::DatabaseError,
            )
        }
    }
}

/// Helper function to create error responses.
///
/// ```rust,ignore
/// let response = error_response(
///     StatusCode::BAD_REQUEST,
///     "Invalid input".to_string(),
///     ErrorCode::BadRequest,
/// );
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    error_response_with_details(status, message, error_code, None)
}

fn error_response_with_details(
    status: StatusCode,
    message: String,
    error_code: ErrorCode,
    details: Option<Value>,
) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details,
    });

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[derive(Validate)]
    struct Signup {
        #[validate(length(min = 1, message = "This field may not be blank."))]
        hrms_id: String,
        #[validate(email)]
        email: String,
    }

    #[tokio::test]
    async fn test_field_error_body() {
        let response =
            AppError::field_error("hrms_id", "user with this hrms_id already exists.").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], 1001);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(
            body["details"]["hrms_id"][0],
            "user with this hrms_id already exists."
        );
    }

    #[tokio::test]
    async fn test_validation_errors_flattened() {
        let errors = Signup {
            hrms_id: String::new(),
            email: "not-an-email".to_string(),
        }
        .validate()
        .unwrap_err();

        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["details"]["hrms_id"][0], "This field may not be blank.");
        assert_eq!(body["details"]["email"][0], "email");
    }

    #[tokio::test]
    async fn test_internal_error_hides_message() {
        let response =
            AppError::InternalServerError("pool exploded at 10.0.0.3".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], 1005);
        assert_eq!(body["message"], "An internal server error occurred");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, 1002),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, 1006),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN, 1007),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, 1004),
        ];

        for (error, status, code) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), status);
            assert_eq!(body_json(response).await["code"], code);
        }
    }

    #[test]
    fn test_data_error_details() {
        let missing = "Failed to deserialize the JSON body into the target type: missing field `hrms_id` at line 1 column 17";
        assert_eq!(
            data_error_details(missing),
            Some(json!({"hrms_id": ["This field is required."]}))
        );

        let wrong_type = "Failed to deserialize the JSON body into the target type: email: invalid type: integer `5`, expected a string at line 1 column 12";
        assert_eq!(
            data_error_details(wrong_type),
            Some(json!({"email": ["Invalid value."]}))
        );

        let top_level = "Failed to deserialize the JSON body into the target type: invalid type: sequence, expected struct Signup at line 1 column 0";
        assert_eq!(data_error_details(top_level), None);
    }

    #[tokio::test]
    async fn test_db_errors() {
        let response = AppError::from(DbErr::RecordNotFound("users".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::from(DbErr::Custom("boom".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "Database error occurred");
    }
}
