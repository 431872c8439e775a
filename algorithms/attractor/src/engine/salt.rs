//! Salt hierarchy generation.
//!
//! Only the master salt is random. Stage salts chain from
//! `master || stage_index`, the timestamp salt chains from the current hour
//! bucket, and the meta salt chains over everything else.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::prelude::*;
use tracing::debug;

use crate::kernels::constants::{
    master_salt_len, meta_salt_len, stage_salt_len, timestamp_salt_len, MAX_DERIVED_SALT_LEN,
    MAX_STAGES, TIMESTAMP_BUCKET_SECS,
};
use crate::kernels::digest::sha256;
use crate::record::HierarchicalSalt;
use crate::types::{DigestWidth, HashError, Result};

/// Stretch `seed` into `len` bytes with a SHA-256 chain.
///
/// Each round hashes the running buffer, emits the first digest byte and
/// feeds the whole digest back as the next buffer.
///
/// # Errors
/// [`HashError::InvalidInput`] if `len` is outside `[1, 1024]`.
pub fn derive_chain(seed: &[u8], len: usize) -> Result<Vec<u8>> {
    if len == 0 || len > MAX_DERIVED_SALT_LEN {
        return Err(HashError::InvalidInput("derived salt length out of range"));
    }

    let mut out = Vec::with_capacity(len);
    let mut digest = sha256(&[seed]);
    out.push(digest[0]);
    while out.len() < len {
        digest = sha256(&[&digest]);
        out.push(digest[0]);
    }
    Ok(out)
}

/// Current Unix hour bucket.
#[must_use]
pub fn current_hour_bucket() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() / TIMESTAMP_BUCKET_SECS)
}

impl HierarchicalSalt {
    /// Fresh hierarchy with a random master salt and the current hour bucket.
    ///
    /// # Errors
    /// [`HashError::InvalidStageCount`] if `stage_count` is outside `[1, 10]`.
    pub fn generate(stage_count: usize, width: DigestWidth) -> Result<Self> {
        let mut master = vec![0u8; master_salt_len(width.bits())];
        rand::rng().fill(&mut master[..]);
        Self::derive(master, stage_count, width, current_hour_bucket())
    }

    /// Deterministic hierarchy from a given master salt and hour bucket.
    ///
    /// # Errors
    /// [`HashError::InvalidStageCount`] if `stage_count` is outside `[1, 10]`,
    /// [`HashError::InvalidInput`] if `master` is empty.
    pub fn derive(
        master: Vec<u8>,
        stage_count: usize,
        width: DigestWidth,
        hour_bucket: u64,
    ) -> Result<Self> {
        if stage_count == 0 || stage_count > MAX_STAGES {
            return Err(HashError::InvalidStageCount(stage_count));
        }
        if master.is_empty() {
            return Err(HashError::InvalidInput("empty master salt"));
        }
        let bits = width.bits();

        let stage_salts = (0..stage_count)
            .map(|i| {
                let mut seed = master.clone();
                #[allow(clippy::cast_possible_truncation)]
                seed.push(i as u8);
                derive_chain(&seed, stage_salt_len(bits))
            })
            .collect::<Result<Vec<_>>>()?;

        let timestamp_salt = derive_chain(&hour_bucket.to_be_bytes(), timestamp_salt_len(bits))?;

        let mut meta_seed = master.clone();
        meta_seed.extend_from_slice(&timestamp_salt);
        for stage_salt in &stage_salts {
            meta_seed.extend_from_slice(stage_salt);
        }
        let meta_salt = derive_chain(&meta_seed, meta_salt_len(bits))?;

        debug!(
            width = bits,
            stages = stage_count,
            master_len = master.len(),
            hour_bucket,
            "salt hierarchy derived"
        );

        Ok(Self {
            master_salt: master,
            stage_salts,
            timestamp_salt,
            meta_salt,
            digest_width: width,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_chain_matches_definition() {
        let out = derive_chain(b"seed", 3).unwrap();
        let d1 = sha256(&[b"seed"]);
        let d2 = sha256(&[&d1]);
        let d3 = sha256(&[&d2]);
        assert_eq!(out, vec![d1[0], d2[0], d3[0]]);
    }

    #[test]
    fn test_chain_length_bounds() {
        assert!(derive_chain(b"seed", 0).is_err());
        assert!(derive_chain(b"seed", 1025).is_err());
        assert_eq!(derive_chain(b"seed", 1024).unwrap().len(), 1024);
    }

    #[test]
    fn test_sizes_follow_width() {
        for width in DigestWidth::ALL {
            let salt = HierarchicalSalt::generate(4, width).unwrap();
            let bits = width.bits();
            assert_eq!(salt.master_salt.len(), master_salt_len(bits));
            assert_eq!(salt.stage_salts.len(), 4);
            assert!(salt
                .stage_salts
                .iter()
                .all(|s| s.len() == stage_salt_len(bits)));
            assert_eq!(salt.timestamp_salt.len(), timestamp_salt_len(bits));
            assert_eq!(salt.meta_salt.len(), meta_salt_len(bits));
            assert_eq!(salt.digest_width, width);
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = HierarchicalSalt::derive(vec![7; 32], 2, DigestWidth::W256, 480_000).unwrap();
        let b = HierarchicalSalt::derive(vec![7; 32], 2, DigestWidth::W256, 480_000).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.stage_salts[0], a.stage_salts[1]);

        let next_hour =
            HierarchicalSalt::derive(vec![7; 32], 2, DigestWidth::W256, 480_001).unwrap();
        assert_eq!(a.stage_salts, next_hour.stage_salts);
        assert_ne!(a.timestamp_salt, next_hour.timestamp_salt);
        assert_ne!(a.meta_salt, next_hour.meta_salt);
    }

    #[test]
    fn test_random_master_salts_differ() {
        let a = HierarchicalSalt::generate(2, DigestWidth::W256).unwrap();
        let b = HierarchicalSalt::generate(2, DigestWidth::W256).unwrap();
        assert_ne!(a.master_salt, b.master_salt);
    }

    #[test]
    fn test_stage_count_bounds() {
        assert!(matches!(
            HierarchicalSalt::generate(0, DigestWidth::W256),
            Err(HashError::InvalidStageCount(0))
        ));
        assert!(matches!(
            HierarchicalSalt::generate(11, DigestWidth::W256),
            Err(HashError::InvalidStageCount(11))
        ));
        assert!(HierarchicalSalt::generate(10, DigestWidth::W1024).is_ok());
    }
}
