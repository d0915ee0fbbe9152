//! Authentication and authorization module.
//!
//! This module provides:
//! - Stateless HS256 access/refresh tokens
//! - Bearer authentication middleware for protected routes
//! - An admin gate layered on top of it
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let jwt = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/hello", get(handler))
//!     .route_layer(axum::middleware::from_fn_with_state(jwt, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

// Re-export commonly used types
pub use config::JwtConfig;
pub use jwt::{
    ACCESS_TOKEN_TTL, AuthError, JwtAuth, JwtClaims, REFRESH_TOKEN_TTL, ROLE_ADMIN, ROLE_USER,
    TokenPair, TokenType,
};
pub use middleware::{BearerToken, extract_token, jwt_auth_middleware, require_admin};
