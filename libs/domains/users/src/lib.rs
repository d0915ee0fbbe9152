//! Users Domain
//!
//! Account registration keyed by HRMS ID, login with JWT access/refresh
//! tokens, and the admin review workflow that moves accounts between
//! `pending`, `accepted` and `rejected`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ auth_handlers / handlers     │  ← HTTP endpoints
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │ Service                      │  ← Password hashing, status rules
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │ Repository                   │  ← In-memory or PostgreSQL
//! └──────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{InMemoryUserRepository, UserService, auth_handlers, handlers};
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("0123456789abcdef0123456789abcdef").unwrap());
//! let service = UserService::new(InMemoryUserRepository::new());
//!
//! let router = auth_handlers::auth_router(service.clone(), jwt.clone())
//!     .merge(handlers::router(service, jwt));
//! ```

pub mod auth_handlers;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{
    LoginRequest, RegisterRequest, UpdateStatusRequest, User, UserResponse, UserStatus,
};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
