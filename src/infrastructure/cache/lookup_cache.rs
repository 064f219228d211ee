//! Bounded, TTL-expiring in-memory cache for redirect lookups.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use dashmap::DashMap;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// A cached destination with its absolute expiry time.
///
/// Entries are replaced whole, never mutated in place.
struct CacheEntry {
    value: String,
    expires: Instant,
}

/// Read-only cache introspection.
///
/// `size` counts physically present entries, including expired ones the
/// sweep has not yet removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub ttl_ms: u64,
    pub capacity: usize,
}

/// Map from short code to destination URL with TTL expiry, a capacity
/// bound, and a periodic background sweep.
///
/// The cache never fails: a miss is a normal outcome, and the backing
/// store remains the source of truth. Reads never block writes or the
/// sweep; a read racing a sweep or eviction may observe either the pre-
/// or post-sweep state, which is acceptable for a read-mostly cache.
///
/// # Expiry
///
/// Entries expire `ttl` after insertion. An expired entry is treated as
/// absent by [`get`](Self::get) even before it is physically removed; the
/// read path stays non-mutating and removal is deferred to the periodic
/// sweep or a later write.
///
/// # Eviction
///
/// When an insertion pushes the map past `capacity`, half the entries
/// (rounded up) are dropped in map iteration order. This is deliberately
/// coarse rather than LRU: the map stays O(1) per operation and the
/// capacity bound still holds after every [`put`](Self::put).
///
/// # Lifecycle
///
/// The sweeper is started and stopped explicitly by the composition
/// root; dropping the cache aborts a still-running sweeper.
pub struct LookupCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
    capacity: usize,
    sweep_period: Option<Duration>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl LookupCache {
    /// Creates a cache with the given entry TTL, capacity bound, and
    /// sweep period (`None` disables the background sweeper).
    pub fn new(ttl: Duration, capacity: usize, sweep_period: Option<Duration>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
            capacity,
            sweep_period,
            sweeper: Mutex::new(None),
        }
    }

    /// Returns the cached destination for `code` if present and unexpired.
    ///
    /// Expired-but-present entries are treated as absent without being
    /// deleted here; the read path never mutates the map.
    pub fn get(&self, code: &str) -> Option<String> {
        let now = Instant::now();
        self.entries
            .get(code)
            .and_then(|entry| (entry.expires > now).then(|| entry.value.clone()))
    }

    /// Inserts or overwrites the mapping for `code`, stamping a fresh
    /// expiry, then enforces the capacity bound.
    ///
    /// Overwriting is unconditional so destination rotations take effect
    /// immediately. The map may transiently hold `capacity + 1` entries
    /// between the insert and the eviction step, but never after `put`
    /// returns.
    pub fn put(&self, code: &str, destination: &str) {
        self.entries.insert(
            code.to_string(),
            CacheEntry {
                value: destination.to_string(),
                expires: Instant::now() + self.ttl,
            },
        );

        if self.entries.len() > self.capacity {
            self.evict();
        }
    }

    /// Removes the entry for `code` immediately.
    ///
    /// Called by update and delete flows so a stale redirect is never
    /// served after a destination or code change.
    pub fn invalidate(&self, code: &str) {
        if self.entries.remove(code).is_some() {
            debug!(code, "cache entry invalidated");
        }
    }

    /// Removes all expired entries, returning how many were dropped.
    ///
    /// Idempotent; also invoked periodically by the background sweeper.
    pub fn sweep(&self) -> usize {
        sweep_expired(&self.entries)
    }

    /// Read-only snapshot of the cache state.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            ttl_ms: self.ttl.as_millis() as u64,
            capacity: self.capacity,
        }
    }

    /// Starts the periodic sweep task.
    ///
    /// A no-op when the sweeper is already running or the sweep period is
    /// disabled; only one timer can be active per cache instance. Must be
    /// called from within a Tokio runtime.
    pub fn start_sweeper(&self) {
        let Some(period) = self.sweep_period else {
            return;
        };

        let mut slot = self.sweeper_slot();
        if slot.is_some() {
            return;
        }

        let entries = Arc::clone(&self.entries);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let removed = sweep_expired(&entries);
                if removed > 0 {
                    debug!(removed, remaining = entries.len(), "cache sweep");
                }
            }
        });

        *slot = Some(handle);
        debug!(period_ms = period.as_millis() as u64, "cache sweeper started");
    }

    /// Stops the periodic sweep task.
    ///
    /// Idempotent: a no-op when no timer is active.
    pub fn stop_sweeper(&self) {
        if let Some(handle) = self.sweeper_slot().take() {
            handle.abort();
            debug!("cache sweeper stopped");
        }
    }

    /// Whether a sweep timer is currently active.
    pub fn sweeper_active(&self) -> bool {
        self.sweeper_slot().is_some()
    }

    /// Drops half the entries (rounded up) in map iteration order.
    ///
    /// The order is implementation-defined but stable for a given map
    /// state; access recency is intentionally ignored.
    fn evict(&self) {
        let keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        let to_remove = keys.len().div_ceil(2);

        for key in keys.into_iter().take(to_remove) {
            self.entries.remove(&key);
        }

        debug!(
            removed = to_remove,
            remaining = self.entries.len(),
            "cache capacity eviction"
        );
    }

    fn sweeper_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        // A poisoned lock only means a panic elsewhere; the slot itself
        // is still usable.
        match self.sweeper.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Removes entries whose expiry has passed, returning the removed count.
///
/// The count is taken inside the retain predicate; comparing map sizes
/// before and after would race concurrent inserts.
fn sweep_expired(entries: &DashMap<String, CacheEntry>) -> usize {
    let now = Instant::now();
    let removed = AtomicUsize::new(0);

    entries.retain(|_, entry| {
        let keep = entry.expires > now;
        if !keep {
            removed.fetch_add(1, Ordering::Relaxed);
        }
        keep
    });

    removed.into_inner()
}

impl Drop for LookupCache {
    fn drop(&mut self) {
        self.stop_sweeper();
    }
}
