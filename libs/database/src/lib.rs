//! Database connectors and utilities.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - `core_config::FromEnv` for [`postgres::PostgresConfig`] and [`common::RetryConfig`]
//!
//! ```ignore
//! use database::{common::RetryConfig, postgres};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(
//!     postgres::PostgresConfig::from_env()?,
//!     RetryConfig::from_env()?,
//! )
//! .await?;
//! postgres::run_migrations::<Migrator>(&db, "hrdocs_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, RetryConfig};
