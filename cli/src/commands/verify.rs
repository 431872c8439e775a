//! Verify Commands
//!
//! Check input against a stored result record or a bare digest.

use super::{hasher, Input};
use anyhow::{Context, Result};
use attractor::HardenedSaltedHash;

// =============================================================================
// HARDENED
// =============================================================================

/// Verify the input against a JSON or base64-wrapped JSON record.
///
/// Returns whether the record matched.
pub fn verify_hardened(size: u32, input: &Input, record: &str) -> Result<bool> {
    let data = input.read()?;
    let stored = HardenedSaltedHash::decode(record).context("Failed to decode record")?;

    let ok = hasher(size)?
        .verify(&data, &stored)
        .context("Verification failed")?;

    report(stored.algorithm.as_str(), ok);
    Ok(ok)
}

// =============================================================================
// LEGACY
// =============================================================================

/// Verify the input against a bare base64 digest.
///
/// The digest is recomputed under a fresh salt, so only digests produced
/// with that same salt match.
pub fn verify_legacy(size: u32, input: &Input, hash: &str) -> Result<bool> {
    let data = input.read()?;
    let ok = hasher(size)?
        .verify_digest_base64(&data, hash)
        .context("Verification failed")?;

    report(&format!("QHASH-{size}"), ok);
    Ok(ok)
}

fn report(algorithm: &str, ok: bool) {
    if ok {
        println!("{algorithm}: OK");
    } else {
        eprintln!("{algorithm}: FAILED");
    }
}
