use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, AuthError};
use sea_orm::DbErr;
use strum::IntoStaticStr;
use thiserror::Error;

#[derive(Debug, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum UserError {
    #[error("User '{0}' not found")]
    NotFound(String),

    #[error("user with this {field} already exists.")]
    Duplicate { field: &'static str, value: String },

    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("No active account found with the given credentials")]
    InvalidCredentials,

    #[error("\"{value}\" is not a valid choice.")]
    InvalidChoice { field: &'static str, value: String },

    #[error(transparent)]
    Token(#[from] AuthError),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Variant name for logs, e.g. `"duplicate"`
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Request field the error is reported under, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            UserError::Duplicate { field, .. }
            | UserError::Validation { field, .. }
            | UserError::InvalidChoice { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        let message = err.to_string();
        match err {
            UserError::NotFound(_) => AppError::NotFound(message),
            UserError::Duplicate { field, .. } | UserError::InvalidChoice { field, .. } => {
                AppError::field_error(field, message)
            }
            UserError::Validation { field, message } => AppError::field_error(field, message),
            UserError::InvalidCredentials => AppError::Unauthorized(message),
            UserError::Token(e) => e.into(),
            UserError::PasswordHash(msg) => {
                tracing::error!("Password hash error: {}", msg);
                AppError::InternalServerError(msg)
            }
            UserError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
