//! Stage orchestration.
//!
//! A computation runs every stage of the configured width in order. Stage
//! `i` appends `stage_salts[i]` to the running buffer, seeds a trajectory
//! from it, checkpoints the resulting block and hands the block to stage
//! `i + 1` as its buffer. The last block goes through finalization.

use std::thread;
use std::time::{Duration, Instant};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use super::adaptive::AdaptiveParameters;
use super::stages::{presets, LorenzStage};
use crate::kernels::constants::{
    DEFAULT_MEMORY_HARDNESS, FORMAT_VERSION, MAX_STAGES, MIN_COMPUTE_TIME,
};
use crate::kernels::digest::Primitive;
use crate::kernels::mixing::finalize;
use crate::kernels::seed::derive_seeds;
use crate::kernels::trajectory::{bytes_per_step, trajectory_block};
use crate::record::{HardenedSaltedHash, HierarchicalSalt, TrajectoryCheckpoint};
use crate::types::{DigestWidth, HashError, Result};

// =============================================================================
// HASHER
// =============================================================================

/// Configured hashing engine for one digest width.
///
/// Immutable after construction and safe to share across threads.
#[derive(Debug, Clone)]
pub struct HardenedLorenzHasher {
    width: DigestWidth,
    stages: Vec<LorenzStage>,
    memory_hardness: usize,
    min_compute_time: Duration,
}

impl HardenedLorenzHasher {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Hasher with the preset stages for `width_bits`.
    ///
    /// # Errors
    /// [`HashError::UnsupportedWidth`] for widths other than 256, 384, 512
    /// or 1024.
    pub fn new(width_bits: u32) -> Result<Self> {
        Self::for_width(DigestWidth::from_bits(width_bits)?)
    }

    /// Hasher with the preset stages for `width`.
    ///
    /// # Errors
    /// Only if a preset fails validation, which the preset table rules out.
    pub fn for_width(width: DigestWidth) -> Result<Self> {
        Self::with_stages(width, presets(width))
    }

    /// Hasher with a caller-supplied stage list.
    ///
    /// # Errors
    /// [`HashError::InvalidStageCount`] if the list is empty or longer than
    /// 10, otherwise the first validation error of any stage.
    pub fn with_stages(width: DigestWidth, stages: Vec<LorenzStage>) -> Result<Self> {
        if stages.is_empty() || stages.len() > MAX_STAGES {
            return Err(HashError::InvalidStageCount(stages.len()));
        }
        for (i, stage) in stages.iter().enumerate() {
            stage.validate().inspect_err(|e| {
                debug!(stage = i, error = %e, "stage rejected");
            })?;
        }

        Ok(Self {
            width,
            stages,
            memory_hardness: DEFAULT_MEMORY_HARDNESS,
            min_compute_time: MIN_COMPUTE_TIME,
        })
    }

    /// Replace the wall-clock floor (default 100 ms).
    #[must_use]
    pub const fn with_min_compute_time(mut self, floor: Duration) -> Self {
        self.min_compute_time = floor;
        self
    }

    /// Replace the memory-hardness target (default 512).
    #[must_use]
    pub const fn with_memory_hardness(mut self, hardness: usize) -> Self {
        self.memory_hardness = hardness;
        self
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Configured width.
    #[must_use]
    pub const fn digest_width(&self) -> DigestWidth {
        self.width
    }

    /// Stage list, in execution order.
    #[must_use]
    pub const fn stages(&self) -> &[LorenzStage] {
        self.stages.as_slice()
    }

    /// Wall-clock floor per computation.
    #[must_use]
    pub const fn min_compute_time(&self) -> Duration {
        self.min_compute_time
    }

    /// Memory-hardness target.
    #[must_use]
    pub const fn memory_hardness(&self) -> usize {
        self.memory_hardness
    }

    // =========================================================================
    // COMPUTATION
    // =========================================================================

    /// Hash `data` under a freshly generated salt hierarchy.
    ///
    /// # Errors
    /// [`HashError::EmptyInput`] for empty data; otherwise any stage or
    /// finalization error. In particular [`HashError::NumericOverflow`] can
    /// occur for valid input: from 384 bits up, a few percent of fresh salts
    /// seed a preset stage off the attractor. The call is not retried.
    pub fn compute_hardened(&self, data: &[u8]) -> Result<HardenedSaltedHash> {
        if data.is_empty() {
            return Err(HashError::EmptyInput);
        }
        let salt = HierarchicalSalt::generate(self.stages.len(), self.width)?;
        self.compute_with_salt(data, salt)
    }

    /// Final digest only. Equivalent to `compute_hardened(data)?.final_hash`.
    ///
    /// # Errors
    /// Same as [`Self::compute_hardened`].
    pub fn compute_simple(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.compute_hardened(data)?.final_hash)
    }

    /// Run the full pipeline under a given salt hierarchy.
    ///
    /// Used by verification, and by callers that need reproducible output.
    /// Blocks until the configured wall-clock floor has passed.
    ///
    /// # Errors
    /// [`HashError::InsufficientStageSalts`] if the hierarchy is short,
    /// otherwise any seed, trajectory or finalization error.
    pub fn compute_with_salt(
        &self,
        data: &[u8],
        salt: HierarchicalSalt,
    ) -> Result<HardenedSaltedHash> {
        let start = Instant::now();

        if salt.stage_salts.len() < self.stages.len() {
            return Err(HashError::InsufficientStageSalts {
                stages: self.stages.len(),
                salts: salt.stage_salts.len(),
            });
        }

        let parameters = AdaptiveParameters::derive(data, &salt.master_salt);
        let out_size = self.width.bytes();
        let discard = self.width.discard_steps();
        let primitive = Primitive::for_width(self.width);

        let mut buffer = data.to_vec();
        let mut checkpoints = Vec::with_capacity(self.stages.len());

        for (idx, (stage, stage_salt)) in self.stages.iter().zip(&salt.stage_salts).enumerate() {
            buffer.extend_from_slice(stage_salt);

            debug!(
                stage = idx,
                description = %stage.description,
                iterations = stage.iterations,
                discard,
                "running stage"
            );

            let seeds = derive_seeds(&buffer, &salt.master_salt)?;
            let block = trajectory_block(seeds, &stage.params, stage.iterations, discard, out_size)?;

            checkpoints.push(TrajectoryCheckpoint {
                stage_index: idx,
                iterations: stage.iterations,
                digest: STANDARD.encode(primitive.digest(&[&block])),
                digest_width: self.width,
            });

            buffer = block;
        }

        let final_hash = finalize(&buffer, &salt, self.width)?;

        let elapsed = start.elapsed();
        if elapsed < self.min_compute_time {
            let wait = self.min_compute_time - elapsed;
            debug!(wait_us = wait.as_micros(), "enforcing minimum compute time");
            thread::sleep(wait);
        }

        Ok(HardenedSaltedHash {
            final_hash,
            memory_used_kb: self.estimate_memory_kb(data.len(), &salt),
            salt: Some(salt),
            checkpoints,
            compute_time_ns: u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX),
            parameters,
            algorithm: self.width.algorithm_name(),
            version: FORMAT_VERSION.to_string(),
            digest_width: self.width,
        })
    }

    /// Working-set estimate in KiB, scaled by the memory-hardness target.
    fn estimate_memory_kb(&self, data_len: usize, salt: &HierarchicalSalt) -> u64 {
        let out_size = self.width.bytes();
        let largest_stream = self
            .stages
            .iter()
            .map(|s| s.iterations * bytes_per_step(out_size))
            .max()
            .unwrap_or(0);
        let salt_bytes = salt.master_salt.len()
            + salt.timestamp_salt.len()
            + salt.meta_salt.len()
            + salt.stage_salts.iter().map(Vec::len).sum::<usize>();
        let buffers = data_len + out_size * (self.stages.len() + 1);

        let bytes = (largest_stream + salt_bytes + buffers) * self.memory_hardness
            / DEFAULT_MEMORY_HARDNESS;
        u64::try_from(bytes.div_ceil(1024)).unwrap_or(u64::MAX)
    }
}
