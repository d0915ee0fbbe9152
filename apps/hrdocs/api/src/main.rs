use axum_helpers::JwtAuth;
use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{PgUserRepository, UserService};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(
        config.database.clone(),
        config.retry.clone(),
    )
    .await
    .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name)
        .await
        .map_err(|e| eyre::eyre!("Failed to run migrations: {}", e))?;

    if let Some(admin) = &config.admin {
        UserService::new(PgUserRepository::new(db.clone()))
            .ensure_superuser(&admin.hrms_id, admin.email.as_deref(), &admin.password)
            .await
            .map_err(|e| eyre::eyre!("Superuser bootstrap failed: {}", e))?;
    }

    let jwt = JwtAuth::new(&config.jwt);

    let state = AppState { config, db, jwt };

    // Build router with API routes (pass reference, not ownership!)
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.server)?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check against PostgreSQL
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!("Starting hrdocs API with graceful shutdown (30s timeout)");

    let db_for_cleanup = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            match db_for_cleanup.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("hrdocs API shutdown complete");
    Ok(())
}
