//! Batch hashing.
//!
//! Each input runs its own sequential pipeline; only independent inputs are
//! spread across threads (via Rayon if `multithread` is enabled, otherwise
//! serially).

use super::hasher::HardenedLorenzHasher;
use crate::record::HardenedSaltedHash;
use crate::types::Result;

impl HardenedLorenzHasher {
    /// Hash every input independently, each under its own fresh salt.
    ///
    /// Results are returned in input order.
    #[must_use]
    pub fn compute_batch(&self, inputs: &[&[u8]]) -> Vec<Result<HardenedSaltedHash>> {
        inputs.process_each(|data| self.compute_hardened(data))
    }
}

// =============================================================================
// BATCH PROCESSOR
// =============================================================================

trait BatchProcessor {
    fn process_each<F, R>(self, f: F) -> Vec<R>
    where
        F: Fn(&[u8]) -> R + Sync + Send,
        R: Send;
}

impl BatchProcessor for &[&[u8]] {
    fn process_each<F, R>(self, f: F) -> Vec<R>
    where
        F: Fn(&[u8]) -> R + Sync + Send,
        R: Send,
    {
        #[cfg(feature = "multithread")]
        {
            use rayon::prelude::*;
            self.par_iter().map(|data| f(*data)).collect()
        }
        #[cfg(not(feature = "multithread"))]
        {
            self.iter().map(|data| f(*data)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use std::time::Duration;

    use super::*;
    use crate::types::HashError;

    #[test]
    fn test_batch_preserves_order_and_errors() {
        let hasher = HardenedLorenzHasher::new(256)
            .unwrap()
            .with_min_compute_time(Duration::ZERO);
        let inputs: [&[u8]; 3] = [b"first", b"", b"third"];
        let results = hasher.compute_batch(&inputs);

        assert_eq!(results.len(), 3);
        assert!(matches!(results[1], Err(HashError::EmptyInput)));
        for i in [0, 2] {
            let record = results[i].as_ref().unwrap();
            assert!(hasher.verify(inputs[i], record).unwrap());
        }
    }
}
