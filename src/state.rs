//! Composition root wiring the cache, services, and click worker.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::application::services::{CodeAllocator, Resolver};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheStats, LookupCache};

/// The assembled resolution and allocation core.
///
/// Owned by the embedding service and passed by reference (or cloned via
/// [`Arc`]) into its request handlers. Construction is explicit; there is
/// no process-wide instance and no module-load side effect. The sweeper
/// in particular has an explicit [`start_sweeper`](Self::start_sweeper) /
/// [`stop_sweeper`](Self::stop_sweeper) lifecycle.
///
/// Dropping the core drops the click channel sender, which lets the
/// background worker drain and exit on its own.
pub struct ShortlinkCore<R: UrlRepository + 'static> {
    cache: Arc<LookupCache>,
    resolver: Resolver<R>,
    allocator: CodeAllocator<R>,
    base_url: String,
}

impl<R: UrlRepository + 'static> ShortlinkCore<R> {
    /// Builds the core from validated configuration and a repository.
    ///
    /// Spawns the click worker on a bounded channel, so this must be
    /// called from within a Tokio runtime.
    pub fn new(config: &Config, repository: Arc<R>) -> Self {
        let cache = Arc::new(LookupCache::new(
            config.cache_ttl(),
            config.cache_capacity,
            config.cache_sweep_period(),
        ));

        let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
        tokio::spawn(run_click_worker(click_rx, repository.clone()));
        debug!("click worker started");

        let resolver = Resolver::new(cache.clone(), repository.clone(), click_tx);
        let allocator =
            CodeAllocator::new(repository, config.code_length, config.code_max_attempts);

        Self {
            cache,
            resolver,
            allocator,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolves a short code to its destination URL, cache-first.
    ///
    /// See [`Resolver::resolve`].
    pub async fn resolve(&self, code: &str) -> Result<Option<String>, AppError> {
        self.resolver.resolve(code).await
    }

    /// Allocates a unique short code, either validating a custom one or
    /// generating a fresh one.
    ///
    /// See [`CodeAllocator::allocate`].
    pub async fn allocate(&self, custom_code: Option<String>) -> Result<String, AppError> {
        self.allocator.allocate(custom_code).await
    }

    /// Drops a code from the cache immediately.
    ///
    /// Must be called by update and delete flows before they return.
    pub fn invalidate(&self, code: &str) {
        self.resolver.invalidate(code);
    }

    /// Starts the periodic cache sweep. No-op if already running or
    /// disabled by configuration.
    pub fn start_sweeper(&self) {
        self.cache.start_sweeper();
    }

    /// Stops the periodic cache sweep. Idempotent.
    pub fn stop_sweeper(&self) {
        self.cache.stop_sweeper();
    }

    /// Read-only snapshot of the cache state.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Builds the full short URL for a code from the configured base URL.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}
