//! Infrastructure layer for in-process integrations.
//!
//! # Modules
//!
//! - [`cache`] - Bounded, TTL-expiring lookup cache with a background sweeper

pub mod cache;
