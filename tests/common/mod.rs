#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use shortlink_core::domain::entities::UrlRecord;
use shortlink_core::domain::repositories::UrlRepository;
use shortlink_core::error::AppError;
use shortlink_core::prelude::Config;

/// In-memory backing store double with lookup accounting.
///
/// Enforces short-code uniqueness on insert the way a real store would
/// with a unique constraint, and counts `find_by_code` calls so tests can
/// assert which resolutions reached the store.
pub struct InMemoryStore {
    records: DashMap<String, UrlRecord>,
    next_id: AtomicI64,
    lookups: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Inserts a record, failing with `CodeConflict` when the code is
    /// already assigned.
    pub fn insert(&self, code: &str, url: &str) -> Result<UrlRecord, AppError> {
        if self.records.contains_key(code) {
            return Err(AppError::conflict(code));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let record = UrlRecord::new(id, code, url);
        self.records.insert(code.to_string(), record.clone());
        Ok(record)
    }

    pub fn delete(&self, code: &str) {
        self.records.remove(code);
    }

    /// How many times `find_by_code` hit this store.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn click_count(&self, code: &str) -> i64 {
        self.records
            .get(code)
            .map(|record| record.click_count)
            .unwrap_or(0)
    }
}

#[async_trait]
impl UrlRepository for InMemoryStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.records.get(code).map(|record| record.clone()))
    }

    async fn record_click(&self, code: &str) -> Result<UrlRecord, AppError> {
        let Some(mut record) = self.records.get_mut(code) else {
            return Err(AppError::not_found(code));
        };

        record.click_count += 1;
        record.last_accessed = Some(Utc::now());
        Ok(record.clone())
    }
}

/// Store double where every code is already taken.
///
/// Drives the allocator to retry exhaustion while counting how many
/// existence checks it performed.
pub struct SaturatedStore {
    lookups: AtomicUsize,
}

impl SaturatedStore {
    pub fn new() -> Self {
        Self {
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl UrlRepository for SaturatedStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(Some(UrlRecord::new(1, code, "https://example.com")))
    }

    async fn record_click(&self, code: &str) -> Result<UrlRecord, AppError> {
        Ok(UrlRecord::new(1, code, "https://example.com"))
    }
}

/// Installs a tracing subscriber so `RUST_LOG` works when debugging a
/// failing test. Safe to call from every test; later calls are no-ops.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Configuration matching the documented defaults, suitable for tests
/// that do not touch the environment.
pub fn test_config() -> Config {
    Config::default()
}
