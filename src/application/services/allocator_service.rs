//! Short-code allocation with collision checking.

use std::sync::Arc;

use tracing::debug;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Allocates short codes that are unique against the backing store at
/// validation time.
///
/// Each allocation call is independent; the allocator keeps no state
/// between calls. Uniqueness is checked with an exact point lookup per
/// candidate, accepting the round-trip latency as the cost of never
/// handing out a code that is already assigned.
///
/// The check-then-write race is not closed here: the actual record write
/// happens in the caller after allocation returns, so the store must
/// enforce uniqueness at write time (see
/// [`UrlRepository`](crate::domain::repositories::UrlRepository)).
pub struct CodeAllocator<R: UrlRepository> {
    repository: Arc<R>,
    code_length: usize,
    max_attempts: usize,
}

impl<R: UrlRepository> CodeAllocator<R> {
    /// Creates an allocator generating codes of `code_length` characters
    /// with a budget of `max_attempts` candidates per call.
    pub fn new(repository: Arc<R>, code_length: usize, max_attempts: usize) -> Self {
        Self {
            repository,
            code_length,
            max_attempts,
        }
    }

    /// Returns a short code that was free at check time.
    ///
    /// With a custom code, the code is checked once against the store and
    /// returned unchanged when free; a conflict is terminal, with no
    /// retry. The custom code must already have passed syntactic
    /// validation (see
    /// [`validate_custom_code`](crate::utils::code_generator::validate_custom_code)).
    ///
    /// Without one, random candidates are generated and checked until a
    /// free code is found or the attempt budget runs out. The bound turns
    /// a pathological mostly-full keyspace into a reportable error
    /// instead of an unbounded loop.
    ///
    /// # Errors
    ///
    /// - [`AppError::CodeConflict`] - the custom code is already assigned
    /// - [`AppError::GenerationExhausted`] - no free code within the budget
    /// - [`AppError::BackingStore`] - an existence check itself failed
    pub async fn allocate(&self, custom_code: Option<String>) -> Result<String, AppError> {
        if let Some(code) = custom_code {
            if self.repository.find_by_code(&code).await?.is_some() {
                return Err(AppError::conflict(code));
            }
            return Ok(code);
        }

        for attempt in 1..=self.max_attempts {
            let code = generate_code(self.code_length);

            if self.repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }

            debug!(attempt, code, "generated code collided, retrying");
        }

        Err(AppError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}
