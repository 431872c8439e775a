//! Verification against stored results.
//!
//! Mismatches are reported as `Ok(false)`. Errors are reserved for stored
//! records that cannot be checked at all.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;
use tracing::debug;

use super::hasher::HardenedLorenzHasher;
use crate::record::{HardenedSaltedHash, TrajectoryCheckpoint};
use crate::types::{HashError, Result};

impl HardenedLorenzHasher {
    // =========================================================================
    // FULL VERIFICATION
    // =========================================================================

    /// Recompute `data` under the stored salt hierarchy and compare.
    ///
    /// Returns `true` only if the final digest and every checkpoint (stage
    /// index, iteration count, digest string) match, in order and count.
    ///
    /// # Errors
    /// - [`HashError::InvalidStoredHash`] if the record has no usable salt.
    /// - [`HashError::DigestWidthMismatch`] if the record was produced at a
    ///   different width.
    /// - Any error raised while recomputing.
    pub fn verify(&self, data: &[u8], stored: &HardenedSaltedHash) -> Result<bool> {
        let salt = match &stored.salt {
            Some(salt) if !salt.master_salt.is_empty() => salt.clone(),
            _ => return Err(HashError::InvalidStoredHash),
        };
        if stored.digest_width != self.digest_width() {
            return Err(HashError::DigestWidthMismatch {
                expected: self.digest_width(),
                found: stored.digest_width,
            });
        }

        let fresh = self.compute_with_salt(data, salt)?;

        let digest_ok: bool = fresh.final_hash.ct_eq(&stored.final_hash).into();
        let checkpoints_ok = checkpoints_match(&fresh.checkpoints, &stored.checkpoints);

        debug!(digest_ok, checkpoints_ok, "verification finished");
        Ok(digest_ok && checkpoints_ok)
    }

    // =========================================================================
    // LEGACY VERIFICATION
    // =========================================================================

    /// Compare a bare digest against `compute_simple(data)` in constant time.
    ///
    /// A fresh salt is drawn for the recomputation, so this only succeeds
    /// for digests produced under that same salt.
    ///
    /// # Errors
    /// Any error raised by [`Self::compute_simple`].
    pub fn verify_digest(&self, data: &[u8], expected: &[u8]) -> Result<bool> {
        let computed = self.compute_simple(data)?;
        Ok(computed.ct_eq(expected).into())
    }

    /// [`Self::verify_digest`] with the expected digest as standard base64.
    ///
    /// # Errors
    /// [`HashError::Base64`] if `expected` is not valid base64.
    pub fn verify_digest_base64(&self, data: &[u8], expected: &str) -> Result<bool> {
        let expected = STANDARD.decode(expected.trim())?;
        self.verify_digest(data, &expected)
    }
}

fn checkpoints_match(fresh: &[TrajectoryCheckpoint], stored: &[TrajectoryCheckpoint]) -> bool {
    fresh.len() == stored.len()
        && fresh.iter().zip(stored).all(|(a, b)| {
            a.stage_index == b.stage_index
                && a.iterations == b.iterations
                && bool::from(a.digest.as_bytes().ct_eq(b.digest.as_bytes()))
        })
}
