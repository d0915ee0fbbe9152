//! # Axum Helpers
//!
//! Shared HTTP plumbing for the HR documents services.
//!
//! ## Modules
//!
//! - **[`auth`]**: Stateless JWT access/refresh tokens and bearer/admin middleware
//! - **[`server`]**: Router setup with API docs, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Validated JSON extractor
//! - **[`audit`]**: Audit logging for account and document changes
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let server = ServerConfig::default();
//! let app = create_router::<ApiDoc>(Router::new(), &server)?.merge(health_router(app_info!()));
//! create_production_app(app, &server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    ACCESS_TOKEN_TTL, AuthError, BearerToken, JwtAuth, JwtClaims, JwtConfig, REFRESH_TOKEN_TTL,
    ROLE_ADMIN, ROLE_USER, TokenPair, TokenType, extract_token, jwt_auth_middleware,
    require_admin,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::ValidatedJson;

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
