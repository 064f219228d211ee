//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. The only
//! entity this core owns is [`UrlRecord`], the shape of a short-link
//! record as read from the backing store.

pub mod url_record;

pub use url_record::UrlRecord;
