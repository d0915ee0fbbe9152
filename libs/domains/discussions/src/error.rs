use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_documents::DocumentError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("Document '{0}' not found")]
    DocumentNotFound(String),

    #[error("Parent post {0} not found")]
    ParentNotFound(Uuid),

    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type PostResult<T> = Result<T, PostError>;

/// Convert PostError to AppError for standardized error responses
impl From<PostError> for AppError {
    fn from(err: PostError) -> Self {
        let message = err.to_string();
        match err {
            PostError::DocumentNotFound(_) | PostError::ParentNotFound(_) => {
                AppError::NotFound(message)
            }
            PostError::Validation { field, message } => AppError::field_error(field, message),
            PostError::Document(e) => e.into(),
            PostError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
