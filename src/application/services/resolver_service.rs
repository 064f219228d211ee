//! Cache-first redirect resolution.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::LookupCache;

/// Resolves short codes to destination URLs, consulting the lookup cache
/// before the backing store and auto-populating the cache on miss.
///
/// Every successful resolution emits a fire-and-forget [`ClickEvent`];
/// click accounting never gates the redirect response.
pub struct Resolver<R: UrlRepository> {
    cache: Arc<LookupCache>,
    repository: Arc<R>,
    click_tx: mpsc::Sender<ClickEvent>,
}

impl<R: UrlRepository> Resolver<R> {
    /// Creates a resolver over the given cache, repository, and click
    /// channel.
    pub fn new(
        cache: Arc<LookupCache>,
        repository: Arc<R>,
        click_tx: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            cache,
            repository,
            click_tx,
        }
    }

    /// Resolves `code` to its destination URL.
    ///
    /// Cache hits return without touching the store. On a miss the store
    /// is queried; a found record populates the cache before returning.
    /// An unknown code is `Ok(None)` so the embedding service can serve
    /// its own 404.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BackingStore`] when the store lookup itself
    /// fails; absence is never reported as an error.
    pub async fn resolve(&self, code: &str) -> Result<Option<String>, AppError> {
        if let Some(destination) = self.cache.get(code) {
            debug!(code, "cache hit");
            self.track_click(code);
            return Ok(Some(destination));
        }

        debug!(code, "cache miss");
        let Some(record) = self.repository.find_by_code(code).await? else {
            return Ok(None);
        };

        self.cache.put(code, &record.original_url);
        self.track_click(code);
        Ok(Some(record.original_url))
    }

    /// Removes `code` from the cache immediately.
    ///
    /// Called by update and delete flows: after a destination change or a
    /// code rotation the old mapping must no longer resolve from cache.
    pub fn invalidate(&self, code: &str) {
        self.cache.invalidate(code);
    }

    /// Sends a click event without waiting for the worker.
    ///
    /// A full queue drops the event; losing a click under load is
    /// preferable to delaying the redirect.
    fn track_click(&self, code: &str) {
        if self.click_tx.try_send(ClickEvent::new(code)).is_err() {
            warn!(code, "click queue full, dropping click event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlRecord;
    use crate::domain::repositories::MockUrlRepository;
    use std::time::Duration;

    const TTL: Duration = Duration::from_millis(300_000);

    fn cache() -> Arc<LookupCache> {
        Arc::new(LookupCache::new(TTL, 500, None))
    }

    fn resolver_with(
        repo: MockUrlRepository,
        cache: Arc<LookupCache>,
    ) -> (Resolver<MockUrlRepository>, mpsc::Receiver<ClickEvent>) {
        let (tx, rx) = mpsc::channel(16);
        (Resolver::new(cache, Arc::new(repo), tx), rx)
    }

    #[tokio::test]
    async fn test_cache_hit_avoids_store_round_trip() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code().times(0);

        let cache = cache();
        cache.put("abc", "https://x");
        let (resolver, _rx) = resolver_with(repo, cache);

        let destination = resolver.resolve("abc").await.unwrap();
        assert_eq!(destination, Some("https://x".to_string()));
    }

    #[tokio::test]
    async fn test_miss_falls_through_and_populates_cache() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code()
            .withf(|code| code == "abc")
            .times(1)
            .returning(|code| Ok(Some(UrlRecord::new(1, code, "https://x"))));

        let cache = cache();
        let (resolver, _rx) = resolver_with(repo, cache.clone());

        let destination = resolver.resolve("abc").await.unwrap();
        assert_eq!(destination, Some("https://x".to_string()));

        // The second resolve must be served from cache (times(1) above).
        let destination = resolver.resolve("abc").await.unwrap();
        assert_eq!(destination, Some("https://x".to_string()));
        assert_eq!(cache.get("abc"), Some("https://x".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_code_is_none_not_error() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));

        let cache = cache();
        let (resolver, mut rx) = resolver_with(repo, cache.clone());

        let destination = resolver.resolve("nonexistent").await.unwrap();
        assert_eq!(destination, None);

        // Nothing cached, no click emitted.
        assert_eq!(cache.stats().size, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_store_fault_propagates() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Err(AppError::backing_store(anyhow::anyhow!("down"))));

        let (resolver, _rx) = resolver_with(repo, cache());
        let result = resolver.resolve("abc").await;

        assert!(matches!(result, Err(AppError::BackingStore(_))));
    }

    #[tokio::test]
    async fn test_resolution_emits_click_event() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(UrlRecord::new(1, code, "https://x"))));

        let (resolver, mut rx) = resolver_with(repo, cache());

        resolver.resolve("abc").await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), ClickEvent::new("abc"));

        // A hit emits one as well.
        resolver.resolve("abc").await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), ClickEvent::new("abc"));
    }

    #[tokio::test]
    async fn test_full_click_queue_never_blocks_resolution() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(UrlRecord::new(1, code, "https://x"))));

        let (tx, _rx) = mpsc::channel(1);
        tx.try_send(ClickEvent::new("filler")).unwrap();

        let resolver = Resolver::new(cache(), Arc::new(repo), tx);
        let destination = resolver.resolve("abc").await.unwrap();

        assert_eq!(destination, Some("https://x".to_string()));
    }

    #[tokio::test]
    async fn test_invalidate_forces_store_lookup() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code()
            .times(2)
            .returning(|code| Ok(Some(UrlRecord::new(1, code, "https://x"))));

        let cache = cache();
        let (resolver, _rx) = resolver_with(repo, cache.clone());

        resolver.resolve("abc").await.unwrap();
        resolver.invalidate("abc");
        assert_eq!(cache.get("abc"), None);

        // Next resolve goes back to the store (times(2) above).
        resolver.resolve("abc").await.unwrap();
    }
}
