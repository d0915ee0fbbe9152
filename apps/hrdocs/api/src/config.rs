use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, env_optional, server::ServerConfig};

// Import database configs from the database library
use database::RetryConfig;
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Credentials of the superuser created at startup when absent
#[derive(Clone, Debug, PartialEq)]
pub struct AdminBootstrap {
    pub hrms_id: String,
    pub password: String,
    pub email: Option<String>,
}

impl AdminBootstrap {
    /// `ADMIN_HRMS_ID` and `ADMIN_PASSWORD` must both be set; `ADMIN_EMAIL` is optional.
    pub fn from_env() -> Option<Self> {
        let hrms_id = env_optional("ADMIN_HRMS_ID")?;
        let password = env_optional("ADMIN_PASSWORD")?;

        Some(Self {
            hrms_id,
            password,
            email: env_optional("ADMIN_EMAIL"),
        })
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub retry: RetryConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub environment: Environment,
    pub admin: Option<AdminBootstrap>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let retry = RetryConfig::from_env()?;
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let jwt = JwtConfig::from_env()?; // Required - will fail if not set

        Ok(Self {
            app: app_info!(),
            database,
            retry,
            server,
            jwt,
            environment,
            admin: AdminBootstrap::from_env(),
        })
    }
}
