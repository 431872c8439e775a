//! Input-derived descriptive parameters.
//!
//! These values are recorded on every result but never fed back into the
//! trajectory: stage physics always come from the fixed presets.

use serde::{Deserialize, Serialize};

use crate::kernels::digest::sha256;

/// Bounded scalars derived from `SHA-256(data || master_salt)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveParameters {
    /// In `[0.8, 1.2]`.
    pub iteration_multiplier: f64,
    /// In `[0.9, 1.1]`.
    pub dt_scale: f64,
    /// In `[1.0, 2.0]`.
    pub memory_multiplier: f64,
    /// In `[-0.5, 0.5]`.
    pub sigma_perturbation: f64,
    /// In `[-1.0, 1.0]`.
    pub rho_perturbation: f64,
    /// In `[-0.25, 0.25]`.
    pub beta_perturbation: f64,
    /// In `1..=4`.
    pub quantum_resistance_level: u8,
}

impl AdaptiveParameters {
    /// Derive parameters from the input and master salt.
    #[must_use]
    pub fn derive(data: &[u8], master_salt: &[u8]) -> Self {
        let h = sha256(&[data, master_salt]);
        let unit = |i: usize| f64::from(h[i]) / 255.0;

        Self {
            iteration_multiplier: 0.8 + unit(0) * 0.4,
            dt_scale: 0.9 + unit(1) * 0.2,
            memory_multiplier: 1.0 + unit(2),
            sigma_perturbation: (unit(3) - 0.5) * 1.0,
            rho_perturbation: (unit(4) - 0.5) * 2.0,
            beta_perturbation: (unit(5) - 0.5) * 0.5,
            quantum_resistance_level: h[6] % 4 + 1,
        }
    }
}
