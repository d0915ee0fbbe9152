//! JWT configuration loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

/// Default access token lifetime (15 minutes)
pub const ACCESS_TOKEN_TTL: i64 = 900;
/// Default refresh token lifetime (7 days)
pub const REFRESH_TOKEN_TTL: i64 = 604_800;

const MIN_SECRET_LEN: usize = 32;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_ACCESS_TTL_SECS` (optional, default 900)
/// - `JWT_REFRESH_TTL_SECS` (optional, default 604800)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HS256 signing secret
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_ttl_secs: i64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl_secs: i64,
}

impl JwtConfig {
    /// Build a config with the default token lifetimes.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        validate_secret(&secret)?;
        Ok(Self {
            secret,
            access_ttl_secs: ACCESS_TOKEN_TTL,
            refresh_ttl_secs: REFRESH_TOKEN_TTL,
        })
    }

    pub fn with_ttls(mut self, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        self.access_ttl_secs = access_ttl_secs;
        self.refresh_ttl_secs = refresh_ttl_secs;
        self
    }
}

fn validate_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::ParseError {
            key: "JWT_SECRET".to_string(),
            details: format!(
                "must be at least {MIN_SECRET_LEN} characters (got {}). Generate one with: openssl rand -base64 32",
                secret.len()
            ),
        });
    }
    Ok(())
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        validate_secret(&secret)?;

        let access_ttl_secs = env_parse_or("JWT_ACCESS_TTL_SECS", &ACCESS_TOKEN_TTL.to_string())?;
        let refresh_ttl_secs =
            env_parse_or("JWT_REFRESH_TTL_SECS", &REFRESH_TOKEN_TTL.to_string())?;

        Ok(Self {
            secret,
            access_ttl_secs,
            refresh_ttl_secs,
        })
    }
}
