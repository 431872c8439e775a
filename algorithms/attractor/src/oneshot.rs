//! Public API Layer
//!
//! Free functions over a preset hasher with default configuration.
use crate::engine::HardenedLorenzHasher;
use crate::record::HardenedSaltedHash;
use crate::types::Result;

// =============================================================================
// HASHING
// =============================================================================

/// Final digest of `data` at `width_bits`, under a fresh salt.
///
/// # Errors
/// [`crate::HashError::UnsupportedWidth`], [`crate::HashError::EmptyInput`],
/// or [`crate::HashError::NumericOverflow`] when the fresh salt drives a
/// stage off the attractor.
///
/// # Example
/// ```rust,no_run
/// let digest = attractor::hash(256, b"hello")?;
/// assert_eq!(digest.len(), 32);
/// # Ok::<(), attractor::HashError>(())
/// ```
pub fn hash(width_bits: u32, data: &[u8]) -> Result<Vec<u8>> {
    HardenedLorenzHasher::new(width_bits)?.compute_simple(data)
}

/// Full result record of `data` at `width_bits`, under a fresh salt.
///
/// # Errors
/// Same as [`hash`].
pub fn hash_hardened(width_bits: u32, data: &[u8]) -> Result<HardenedSaltedHash> {
    HardenedLorenzHasher::new(width_bits)?.compute_hardened(data)
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Verify `data` against a stored record, at the record's own width.
///
/// # Errors
/// [`crate::HashError::InvalidStoredHash`] if the record has no usable salt.
///
/// # Example
/// ```rust,no_run
/// let record = attractor::hash_hardened(256, b"hello")?;
/// assert!(attractor::verify(b"hello", &record)?);
/// assert!(!attractor::verify(b"hellp", &record)?);
/// # Ok::<(), attractor::HashError>(())
/// ```
pub fn verify(data: &[u8], stored: &HardenedSaltedHash) -> Result<bool> {
    HardenedLorenzHasher::for_width(stored.digest_width)?.verify(data, stored)
}

/// Compare a bare base64 digest against a fresh simple hash, in constant time.
///
/// # Errors
/// [`crate::HashError::UnsupportedWidth`] or [`crate::HashError::Base64`].
pub fn verify_digest(width_bits: u32, data: &[u8], expected_base64: &str) -> Result<bool> {
    HardenedLorenzHasher::new(width_bits)?.verify_digest_base64(data, expected_base64)
}
