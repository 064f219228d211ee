//! Repository trait definition for the domain layer.
//!
//! The backing store (PostgreSQL, SQLite, an ORM, anything) lives outside
//! this crate. The core consumes it exclusively through the
//! [`UrlRepository`] trait; the embedding service supplies the concrete
//! implementation.
//!
//! Mock implementations are auto-generated via `mockall` for unit tests.

pub mod url_repository;

pub use url_repository::UrlRepository;

#[cfg(test)]
pub use url_repository::MockUrlRepository;
