//! Short code generation and validation utilities.

use crate::error::AppError;
use rand::Rng;

/// URL-safe alphabet used for short codes: 64 characters, so each
/// position carries 6 bits of entropy.
pub const CODE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of system-generated codes unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Shortest accepted short code.
pub const MIN_CODE_LENGTH: usize = 3;

/// Longest accepted short code.
pub const MAX_CODE_LENGTH: usize = 32;

/// Generates a random short code of the given length.
///
/// Candidates are drawn uniformly from [`CODE_ALPHABET`]. The generator
/// is collision-resistant for any realistic keyspace (a 7-character code
/// has 64^7 ≈ 4.4 * 10^12 possibilities) but makes no cryptographic
/// claims; uniqueness is enforced by the allocator's store check and the
/// store's own constraint.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Validates a caller-supplied custom short code.
///
/// # Rules
///
/// - Length: 3-32 characters
/// - Allowed characters: ASCII letters, digits, underscore, hyphen
///
/// The allocator itself does not call this; the embedding service
/// validates input before asking for an allocation.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < MIN_CODE_LENGTH || code.len() > MAX_CODE_LENGTH {
        return Err(AppError::validation(format!(
            "Custom code must be {MIN_CODE_LENGTH}-{MAX_CODE_LENGTH} characters, got {}",
            code.len()
        )));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::validation(
            "Custom code can only contain letters, digits, underscores, and hyphens",
        ));
    }

    Ok(())
}
