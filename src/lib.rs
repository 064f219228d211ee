//! # Shortlink Core
//!
//! The redirect-resolution cache and short-code allocation core of a URL
//! shortening service.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities, the backing-store repository
//!   trait, and asynchronous click tracking
//! - **Application Layer** ([`application`]) - Resolution and code allocation
//!   services
//! - **Infrastructure Layer** ([`infrastructure`]) - The bounded, TTL-expiring
//!   in-memory lookup cache
//!
//! The surrounding HTTP layer and the persistent store are collaborators, not
//! part of this crate: the store is consumed through
//! [`domain::repositories::UrlRepository`], and the embedding service wires
//! everything together through [`ShortlinkCore`].
//!
//! ## Features
//!
//! - Cache-first redirect resolution with bounded memory and TTL expiry
//! - Periodic background sweep of expired entries with explicit lifecycle
//! - Collision-checked short-code allocation with a bounded retry budget
//! - Fire-and-forget click accounting that never delays a redirect
//!
//! ## Quick Start
//!
//! ```ignore
//! let config = shortlink_core::config::load_from_env()?;
//! let repository = Arc::new(MyPgRepository::new(pool));
//! let core = ShortlinkCore::new(&config, repository);
//!
//! core.start_sweeper();
//! let destination = core.resolve("abc123").await?;
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See the [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub use error::AppError;
pub use state::ShortlinkCore;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CodeAllocator, Resolver};
    pub use crate::config::Config;
    pub use crate::domain::entities::UrlRecord;
    pub use crate::domain::repositories::UrlRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheStats, LookupCache};
    pub use crate::state::ShortlinkCore;
}
