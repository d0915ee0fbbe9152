/// Database infrastructure errors raised outside repositories.
///
/// Query errors inside repositories stay as `sea_orm::DbErr` and are mapped
/// by each domain crate.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}
