//! Repository trait for short-link data access.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Backing-store interface consumed by the resolution and allocation core.
///
/// Exactly two operations are required; everything else the store offers
/// (creation, pagination, deletion) belongs to the embedding service.
///
/// # Uniqueness
///
/// The allocator's existence check and the eventual record write are not
/// covered by a shared lock or transaction: two concurrent allocations can
/// both observe a code as free before either write lands. Implementations
/// MUST therefore enforce a uniqueness constraint on the short code at
/// write time, and surface a late violation as
/// [`AppError::CodeConflict`]. The allocator's pre-flight check exists to
/// produce a fast, friendly error, not to guarantee correctness.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds a record by its exact short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if found
    /// - `Ok(None)` if no record carries the code
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BackingStore`] on store faults. A missing record
    /// is `Ok(None)`, never an error.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Atomically increments the click counter and stamps the last-access
    /// time for the record with the given code, returning the updated
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist and
    /// [`AppError::BackingStore`] on store faults.
    async fn record_click(&self, code: &str) -> Result<UrlRecord, AppError>;
}
