//! Shared application state, built once in `main`.

use axum_helpers::JwtAuth;

/// Cloned into every router that needs it; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Token issuer/verifier shared by every domain router
    pub jwt: JwtAuth,
}
