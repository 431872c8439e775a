//! Stage descriptors.

use crate::kernels::constants::{stage_count, MAX_ITERATIONS, MIN_ITERATIONS, STAGE_PRESETS};
use crate::kernels::trajectory::LorenzParams;
use crate::types::{DigestWidth, HashError, Result};

/// One chained trajectory pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LorenzStage {
    /// System coefficients at 128-bit precision.
    pub params: LorenzParams,
    /// Extraction iterations after warm-up.
    pub iterations: usize,
    /// One-based stage id.
    pub stage_id: usize,
    /// Human-readable label, e.g. `Classic-256`.
    pub description: String,
}

impl LorenzStage {
    /// Build a stage from `f64` coefficients.
    #[must_use]
    pub fn new(
        sigma: f64,
        rho: f64,
        beta: f64,
        dt: f64,
        iterations: usize,
        stage_id: usize,
        description: impl Into<String>,
    ) -> Self {
        Self {
            params: LorenzParams::from_f64(sigma, rho, beta, dt),
            iterations,
            stage_id,
            description: description.into(),
        }
    }

    /// Check iteration bounds and coefficient ranges.
    ///
    /// # Errors
    /// [`HashError::IterationBounds`] or [`HashError::ParameterOutOfRange`].
    pub fn validate(&self) -> Result<()> {
        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&self.iterations) {
            return Err(HashError::IterationBounds(self.iterations));
        }
        self.params.validate()
    }
}

/// Preset stage list for a width.
#[must_use]
pub fn presets(width: DigestWidth) -> Vec<LorenzStage> {
    STAGE_PRESETS
        .iter()
        .take(stage_count(width.bits()))
        .enumerate()
        .map(|(i, p)| {
            LorenzStage::new(
                p.sigma,
                p.rho,
                p.beta,
                p.dt,
                p.iterations,
                i + 1,
                format!("{}-{}", p.label, width.bits()),
            )
        })
        .collect()
}
