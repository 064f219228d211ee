//! Core configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup by the embedding service and
//! validated before any component is constructed.
//!
//! ## Variables
//!
//! All variables are optional and fall back to production-tested defaults:
//!
//! - `REDIRECT_CACHE_TTL_MS` - Cache entry lifetime in milliseconds (default: 300000)
//! - `REDIRECT_CACHE_MAX` - Maximum cached entries (default: 500)
//! - `REDIRECT_CACHE_SWEEP_MS` - Sweep interval in milliseconds; zero or
//!   negative disables the background sweeper (default: 600000)
//! - `CODE_LENGTH` - Length of generated short codes (default: 7)
//! - `CODE_MAX_ATTEMPTS` - Collision retry budget for generated codes (default: 5)
//! - `CLICK_QUEUE_CAPACITY` - Click event buffer size (default: 10000, min: 100)
//! - `APP_BASE_URL` - Base URL used to build full short URLs
//!   (default: `http://localhost:3000`)
//!
//! [`load_from_env`] reads a `.env` file via `dotenvy` before consulting the
//! process environment.

use anyhow::Result;
use std::env;
use std::time::Duration;

/// Core configuration for the lookup cache and code allocator.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL applied to every cache entry, in milliseconds.
    pub cache_ttl_ms: u64,
    /// Maximum number of entries the cache may hold after any insertion.
    pub cache_capacity: usize,
    /// Interval between background sweeps of expired entries, in
    /// milliseconds. Zero or negative disables the sweeper entirely.
    pub cache_sweep_ms: i64,
    /// Length of system-generated short codes.
    pub code_length: usize,
    /// Maximum candidates tried before allocation gives up.
    pub code_max_attempts: usize,
    /// Bounded buffer size for fire-and-forget click events.
    pub click_queue_capacity: usize,
    /// Base URL prepended to short codes when building full short URLs.
    pub base_url: String,
}

impl Config {
    /// Loads configuration from environment variables, applying defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let cache_ttl_ms = env::var("REDIRECT_CACHE_TTL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300_000);

        let cache_capacity = env::var("REDIRECT_CACHE_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(500);

        let cache_sweep_ms = env::var("REDIRECT_CACHE_SWEEP_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(600_000);

        let code_length = env::var("CODE_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7);

        let code_max_attempts = env::var("CODE_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let click_queue_capacity = env::var("CLICK_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000);

        let base_url =
            env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            cache_ttl_ms,
            cache_capacity,
            cache_sweep_ms,
            code_length,
            code_max_attempts,
            click_queue_capacity,
            base_url,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `cache_ttl_ms` is zero
    /// - `cache_capacity` is zero or unreasonably large
    /// - `code_length` is outside the 3-32 range the code alphabet supports
    /// - `code_max_attempts` is zero or over 64
    /// - `click_queue_capacity` is outside 100..=1000000
    /// - `base_url` is empty
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl_ms == 0 {
            anyhow::bail!("REDIRECT_CACHE_TTL_MS must be greater than 0");
        }

        if self.cache_capacity == 0 || self.cache_capacity > 1_000_000 {
            anyhow::bail!(
                "REDIRECT_CACHE_MAX must be between 1 and 1000000, got {}",
                self.cache_capacity
            );
        }

        if self.code_length < 3 || self.code_length > 32 {
            anyhow::bail!(
                "CODE_LENGTH must be between 3 and 32, got {}",
                self.code_length
            );
        }

        if self.code_max_attempts == 0 || self.code_max_attempts > 64 {
            anyhow::bail!(
                "CODE_MAX_ATTEMPTS must be between 1 and 64, got {}",
                self.code_max_attempts
            );
        }

        if self.click_queue_capacity < 100 {
            anyhow::bail!(
                "CLICK_QUEUE_CAPACITY must be at least 100, got {}",
                self.click_queue_capacity
            );
        }

        if self.click_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "CLICK_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.click_queue_capacity
            );
        }

        if self.base_url.is_empty() {
            anyhow::bail!("APP_BASE_URL must not be empty");
        }

        Ok(())
    }

    /// Cache entry TTL as a [`Duration`].
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    /// Sweep interval as a [`Duration`], or `None` when the sweeper is
    /// disabled by a non-positive `REDIRECT_CACHE_SWEEP_MS`.
    pub fn cache_sweep_period(&self) -> Option<Duration> {
        if self.cache_sweep_ms > 0 {
            Some(Duration::from_millis(self.cache_sweep_ms as u64))
        } else {
            None
        }
    }

    /// Prints a configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Cache TTL: {}ms", self.cache_ttl_ms);
        tracing::info!("  Cache capacity: {} entries", self.cache_capacity);

        if self.cache_sweep_ms > 0 {
            tracing::info!("  Cache sweep interval: {}ms", self.cache_sweep_ms);
        } else {
            tracing::info!("  Cache sweeper: disabled");
        }

        tracing::info!("  Code length: {}", self.code_length);
        tracing::info!("  Code max attempts: {}", self.code_max_attempts);
        tracing::info!("  Click queue capacity: {}", self.click_queue_capacity);
        tracing::info!("  Base URL: {}", self.base_url);
    }
}

impl Default for Config {
    /// Default configuration matching the documented env-var defaults.
    fn default() -> Self {
        Self {
            cache_ttl_ms: 300_000,
            cache_capacity: 500,
            cache_sweep_ms: 600_000,
            code_length: 7,
            code_max_attempts: 5,
            click_queue_capacity: 10_000,
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Loads and validates configuration from environment variables.
///
/// Reads a `.env` file first when one is present, so local development
/// works without exporting anything.
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn load_from_env() -> Result<Config> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
