//! Finalization rounds.
//!
//! Five sequential rounds turn the last stage block into the digest:
//!
//! 1. width-selected hash of `block || master_salt`
//! 2. XOR against `SHA-256(round1 || meta_salt)`
//! 3. key-strided XOR/XOR/add against `SHA-256(timestamp_salt)`
//! 4. lattice-style dot product against `SHA-256(master_salt)`
//! 5. width-selected hash, normalized to exactly `width / 8` bytes

use tracing::trace;

use super::digest::{sha256, Primitive};
use crate::record::HierarchicalSalt;
use crate::types::{DigestWidth, HashError, Result};

// =============================================================================
// ROUNDS
// =============================================================================

/// Round 2: XOR each byte with a cyclic SHA-256 keystream of `data || salt`.
///
/// # Errors
/// [`HashError::InvalidInput`] if either slice is empty.
pub fn xor_mix(data: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() || salt.is_empty() {
        return Err(HashError::InvalidInput("xor mix needs data and salt"));
    }
    let key = sha256(&[data, salt]);
    Ok(data
        .iter()
        .enumerate()
        .map(|(i, byte)| byte ^ key[i % key.len()])
        .collect())
}

/// Round 3: XOR key bytes at strides 7 and 13, then add the stride-17 byte.
///
/// # Errors
/// [`HashError::InvalidInput`] if either slice is empty.
pub fn hyperchaos_mix(data: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() || salt.is_empty() {
        return Err(HashError::InvalidInput("hyperchaos mix needs data and salt"));
    }
    let key = sha256(&[salt]);
    let n = key.len();
    Ok(data
        .iter()
        .enumerate()
        .map(|(i, byte)| {
            (byte ^ key[(i * 7) % n] ^ key[(i * 13) % n]).wrapping_add(key[(i * 17) % n])
        })
        .collect())
}

/// Round 4: `out[i] = (sum_j data[j] * key[(i + j) % n] + key[(3i) % n]) mod 256`.
///
/// # Errors
/// [`HashError::InvalidInput`] if either slice is empty.
#[allow(clippy::cast_possible_truncation)]
pub fn lattice_mix(data: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() || salt.is_empty() {
        return Err(HashError::InvalidInput("lattice mix needs data and salt"));
    }
    let key = sha256(&[salt]);
    let n = key.len();
    Ok((0..data.len())
        .map(|i| {
            let sum: usize = data
                .iter()
                .enumerate()
                .map(|(j, &d)| usize::from(d) * usize::from(key[(i + j) % n]))
                .sum();
            let noise = usize::from(key[(i * 3) % n]);
            ((sum + noise) % 256) as u8
        })
        .collect())
}

/// Truncate, or extend with `SHA-256(buffer)` blocks, to exactly `len` bytes.
#[must_use]
pub fn normalize_length(mut buffer: Vec<u8>, len: usize) -> Vec<u8> {
    while buffer.len() < len {
        let block = sha256(&[&buffer]);
        buffer.extend_from_slice(&block);
    }
    buffer.truncate(len);
    buffer
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Run all five rounds over the last stage block.
///
/// # Errors
/// [`HashError::InvalidInput`] if the block or any salt component used by
/// the rounds is empty.
pub fn finalize(block: &[u8], salt: &HierarchicalSalt, width: DigestWidth) -> Result<Vec<u8>> {
    if block.is_empty() {
        return Err(HashError::InvalidInput("empty stage output"));
    }
    if salt.master_salt.is_empty() {
        return Err(HashError::InvalidInput("empty master salt"));
    }

    let primitive = Primitive::for_width(width);

    let r1 = primitive.digest(&[block, &salt.master_salt]);
    trace!(len = r1.len(), "finalize round 1");

    let r2 = xor_mix(&r1, &salt.meta_salt)?;
    trace!("finalize round 2");

    let r3 = hyperchaos_mix(&r2, &salt.timestamp_salt)?;
    trace!("finalize round 3");

    let r4 = lattice_mix(&r3, &salt.master_salt)?;
    trace!("finalize round 4");

    Ok(normalize_length(primitive.digest(&[&r4]), width.bytes()))
}
