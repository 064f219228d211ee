//! Caching layer for fast redirect lookups.
//!
//! The cache is a performance optimization, not a consistency boundary:
//! the backing store stays the source of truth, and a miss simply falls
//! through to it.

mod lookup_cache;

pub use lookup_cache::{CacheStats, LookupCache};
