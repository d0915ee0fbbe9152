use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Document '{0}' not found")]
    NotFound(String),

    #[error("document with this document_id already exists.")]
    Duplicate(String),

    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Convert DocumentError to AppError for standardized error responses
impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        let message = err.to_string();
        match err {
            DocumentError::NotFound(_) => AppError::NotFound(message),
            DocumentError::Duplicate(_) => AppError::field_error("document_id", message),
            DocumentError::Validation { field, message } => AppError::field_error(field, message),
            DocumentError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for DocumentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
