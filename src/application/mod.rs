//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating the cache,
//! the backing-store repository, and click tracking. Services consume
//! repository traits and provide a clean API for the embedding service.
//!
//! # Available Services
//!
//! - [`services::resolver_service::Resolver`] - Cache-first redirect resolution
//! - [`services::allocator_service::CodeAllocator`] - Collision-checked
//!   short-code allocation

pub mod services;
