//! Error taxonomy for the resolution and allocation core.
//!
//! The lookup cache itself has no error path: a miss is a normal outcome.
//! Everything that can fail flows through [`AppError`], and the embedding
//! service owns the mapping to user-visible responses (e.g. `CodeConflict`
//! to a client error, `BackingStore` to a server error).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The requested custom code is already assigned. Terminal for the
    /// allocation attempt; the caller may pick another code and retry.
    #[error("short code '{code}' is already taken")]
    CodeConflict { code: String },

    /// Random generation failed to find a free code within the attempt
    /// budget. The caller may retry the whole creation request with a
    /// fresh budget.
    #[error("failed to generate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    /// No record exists for the given short code.
    #[error("no record found for short code '{code}'")]
    NotFound { code: String },

    /// A caller-supplied code failed syntactic validation.
    #[error("{message}")]
    Validation { message: String },

    /// The backing-store call itself failed (network or store fault).
    /// Surfaced as-is, never collapsed into "not found".
    #[error("backing store request failed: {0}")]
    BackingStore(anyhow::Error),
}

impl AppError {
    pub fn conflict(code: impl Into<String>) -> Self {
        Self::CodeConflict { code: code.into() }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn backing_store(source: impl Into<anyhow::Error>) -> Self {
        Self::BackingStore(source.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(source: anyhow::Error) -> Self {
        Self::BackingStore(source)
    }
}
