pub mod server;
pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment (dev = local, prod = deployed behind a proxy)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Name and version of the running binary, reported by `/health`.
///
/// Build it with [`app_info!`] so the values come from the calling crate's
/// `Cargo.toml` rather than from this library.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Expands to an [`AppInfo`] for the crate that invokes it.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Reads an optional variable; unset and blank values are both `None`.
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Reads `key` (falling back to `default`) and parses it into `T`.
pub fn env_parse_or<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_or_default(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_app_info_uses_calling_crate() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("HRDOCS_TEST_VAR", Some("value"), || {
            assert_eq!(env_or_default("HRDOCS_TEST_VAR", "default"), "value");
        });
        temp_env::with_var_unset("HRDOCS_TEST_VAR", || {
            assert_eq!(env_or_default("HRDOCS_TEST_VAR", "default"), "default");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("HRDOCS_MISSING_REQUIRED", || {
            let err = env_required("HRDOCS_MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("HRDOCS_MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_optional_treats_blank_as_unset() {
        temp_env::with_var("HRDOCS_OPTIONAL", Some("   "), || {
            assert_eq!(env_optional("HRDOCS_OPTIONAL"), None);
        });
        temp_env::with_var("HRDOCS_OPTIONAL", Some("admin"), || {
            assert_eq!(env_optional("HRDOCS_OPTIONAL").as_deref(), Some("admin"));
        });
    }

    #[test]
    fn test_env_parse_or() {
        temp_env::with_var("HRDOCS_TTL", Some("120"), || {
            let ttl: i64 = env_parse_or("HRDOCS_TTL", "900").unwrap();
            assert_eq!(ttl, 120);
        });
        temp_env::with_var_unset("HRDOCS_TTL", || {
            let ttl: i64 = env_parse_or("HRDOCS_TTL", "900").unwrap();
            assert_eq!(ttl, 900);
        });
        temp_env::with_var("HRDOCS_TTL", Some("soon"), || {
            let err = env_parse_or::<i64>("HRDOCS_TTL", "900").unwrap_err();
            assert!(err.to_string().contains("HRDOCS_TTL"));
        });
    }
}
