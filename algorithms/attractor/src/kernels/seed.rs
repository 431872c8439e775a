//! Initial conditions from a byte buffer and the master salt.

use super::digest::sha256;
use super::float128::Float128;
use crate::types::{HashError, Result};

const SPAN: Float128 = Float128::from_u64(40);
const OFFSET: Float128 = Float128::from_u64(20);

/// Derive `(x0, y0, z0)` in `[-20, 20)` from `SHA-256(buffer || master_salt)`.
///
/// Each coordinate reads one big-endian 8-byte window of the digest:
/// `u / 2^64 * 40 - 20`, evaluated at 128-bit precision.
///
/// # Errors
/// [`HashError::EmptyInput`] if either slice is empty,
/// [`HashError::InsufficientEntropy`] if the digest has fewer than 24 bytes.
pub fn derive_seeds(buffer: &[u8], master_salt: &[u8]) -> Result<[Float128; 3]> {
    if buffer.is_empty() || master_salt.is_empty() {
        return Err(HashError::EmptyInput);
    }

    let digest = sha256(&[buffer, master_salt]);
    if digest.len() < 24 {
        return Err(HashError::InsufficientEntropy(digest.len()));
    }

    let mut seeds = [Float128::ZERO; 3];
    for (seed, window) in seeds.iter_mut().zip(digest.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(window);
        *seed = Float128::from_u64(u64::from_be_bytes(word)).mul_pow2(-64) * SPAN - OFFSET;
    }
    Ok(seeds)
}
