//! Short-link record as stored by the backing store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted short-link record.
///
/// The backing store is the source of truth for these fields; this core
/// only ever reads them (via lookups) or asks the store to bump the click
/// counter. The record carries denormalized usage data so the embedding
/// service can serve stats without extra queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl UrlRecord {
    /// Creates a record with the given identity and destination, zero
    /// clicks, and no last-access stamp. Convenient for store
    /// implementations and tests.
    pub fn new(id: i64, short_code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            id,
            short_code: short_code.into(),
            original_url: original_url.into(),
            click_count: 0,
            created_at: Utc::now(),
            last_accessed: None,
        }
    }
}
