use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or};

/// Backoff policy for the startup database connection.
///
/// Only used while the service boots; request paths never retry.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
    /// Scale each delay into 50-100% of its nominal value
    pub use_jitter: bool,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Nominal delay before retry number `retry` (1-based), before jitter.
    pub fn delay_for(&self, retry: u32) -> u64 {
        let exponent = retry.saturating_sub(1) as i32;
        let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(exponent);
        (delay as u64).min(self.max_delay_ms)
    }
}

impl Default for RetryConfig {
    /// 5 retries, 500ms doubling up to 10s: roughly 15s before giving up,
    /// enough for a Postgres container started alongside the API.
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay_ms: 500,
            max_delay_ms: 10_000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// - `DB_CONNECT_RETRIES` (default 5)
/// - `DB_RETRY_INITIAL_DELAY_MS` (default 500)
/// - `DB_RETRY_MAX_DELAY_MS` (default 10000)
#[cfg(feature = "config")]
impl FromEnv for RetryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            max_retries: env_parse_or("DB_CONNECT_RETRIES", &defaults.max_retries.to_string())?,
            initial_delay_ms: env_parse_or(
                "DB_RETRY_INITIAL_DELAY_MS",
                &defaults.initial_delay_ms.to_string(),
            )?,
            max_delay_ms: env_parse_or(
                "DB_RETRY_MAX_DELAY_MS",
                &defaults.max_delay_ms.to_string(),
            )?,
            ..defaults
        })
    }
}

/// Retry an async operation with exponential backoff.
///
/// ```ignore
/// let db = retry_with_backoff(|| connect_with_options(options.clone()), RetryConfig::default()).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    info!("Operation succeeded after {} retries", attempt);
                }
                return Ok(result);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    warn!("Operation failed after {} attempts: {}", attempt, e);
                    return Err(e);
                }

                let nominal = config.delay_for(attempt);
                let delay = if config.use_jitter {
                    apply_jitter(nominal)
                } else {
                    nominal
                };

                warn!(
                    "Operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                    attempt,
                    config.max_retries + 1,
                    e,
                    delay
                );

                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
        }
    }
}

/// Uses a random value between 50% and 100% of the original delay
fn apply_jitter(delay: u64) -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let random_factor =
        (RandomState::new().hash_one(std::time::SystemTime::now()) % 50) as f64 / 100.0 + 0.5;

    (delay as f64 * random_factor) as u64
}
