//! Attractor Kernel Constants
//!
//! Stage presets, safety bounds and salt sizing rules.
//!
//! Every preset value is the IEEE-754 double nearest its decimal literal,
//! widened exactly to 128-bit precision when the hasher is built. Changing
//! any entry changes every digest of the affected width.

use core::time::Duration;

// =============================================================================
// SAFETY BOUNDS
// =============================================================================

/// Fewest iterations a stage may run.
pub const MIN_ITERATIONS: usize = 1000;

/// Most iterations a stage may run (bounds the work per call).
pub const MAX_ITERATIONS: usize = 100_000;

/// Largest trajectory block, in bytes (1024-bit digest).
pub const MAX_OUTPUT_SIZE: usize = 128;

/// Largest absolute coordinate tolerated during integration.
pub const OVERFLOW_LIMIT: f64 = 1e10;

/// Upper bound for sigma, rho and beta.
pub const MAX_SYSTEM_PARAMETER: f64 = 100.0;

/// Upper bound for the integration step.
pub const MAX_DT: f64 = 0.1;

/// Most stages a salt hierarchy may cover.
pub const MAX_STAGES: usize = 10;

// =============================================================================
// HASHER DEFAULTS
// =============================================================================

/// Wall-clock floor for one hardened computation.
pub const MIN_COMPUTE_TIME: Duration = Duration::from_millis(100);

/// Memory-hardness target (scales the reported memory estimate).
pub const DEFAULT_MEMORY_HARDNESS: usize = 512;

/// Format version written on every result.
pub const FORMAT_VERSION: &str = "2.0";

// =============================================================================
// STAGE PRESETS
// =============================================================================

/// One row of the preset table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagePreset {
    /// Prandtl number.
    pub sigma: f64,
    /// Rayleigh number.
    pub rho: f64,
    /// Geometric factor.
    pub beta: f64,
    /// Integration step.
    pub dt: f64,
    /// Extraction iterations.
    pub iterations: usize,
    /// Label; the width is appended at build time (`Classic-256`).
    pub label: &'static str,
}

const fn preset(
    sigma: f64,
    rho: f64,
    beta: f64,
    dt: f64,
    iterations: usize,
    label: &'static str,
) -> StagePreset {
    StagePreset {
        sigma,
        rho,
        beta,
        dt,
        iterations,
        label,
    }
}

/// Shared preset table. A width uses the first `stage_count(width)` rows.
#[rustfmt::skip]
pub const STAGE_PRESETS: [StagePreset; 8] = [
    preset(10.0, 28.0, 8.0 / 3.0, 0.01,  2000, "Classic"),
    preset(16.0, 45.6, 4.0,       0.008, 3000, "Energetic"),
    preset(12.5, 35.2, 2.5,       0.012, 2500, "Wide"),
    preset(8.5,  24.8, 6.2,       0.015, 1800, "Compact"),
    preset(14.2, 32.1, 3.8,       0.009, 3200, "Extended-1"),
    preset(11.7, 41.3, 5.1,       0.011, 2800, "Extended-2"),
    preset(9.3,  26.7, 7.4,       0.013, 2200, "Extended-3"),
    preset(13.8, 38.9, 2.9,       0.007, 3500, "Extended-4"),
];

/// Number of chained stages for a width in bits.
#[must_use]
pub const fn stage_count(width_bits: u32) -> usize {
    match width_bits {
        256 => 2,
        384 => 3,
        512 => 4,
        _ => 8,
    }
}

// =============================================================================
// SALT SIZING
// =============================================================================

// Sizes grow in whole 256-bit steps: 384 shares the 256 sizes.
const fn salt_len(width_bits: u32, base: usize, step: usize, cap: usize) -> usize {
    let steps = (width_bits.saturating_sub(256) / 256) as usize;
    let len = base + steps * step;
    if len > cap {
        cap
    } else {
        len
    }
}

/// Master salt length: 32..=80 bytes.
#[must_use]
pub const fn master_salt_len(width_bits: u32) -> usize {
    salt_len(width_bits, 32, 16, 80)
}

/// Per-stage salt length: 16..=48 bytes.
#[must_use]
pub const fn stage_salt_len(width_bits: u32) -> usize {
    salt_len(width_bits, 16, 8, 48)
}

/// Timestamp salt length: 12..=28 bytes.
#[must_use]
pub const fn timestamp_salt_len(width_bits: u32) -> usize {
    salt_len(width_bits, 12, 4, 28)
}

/// Meta salt length: 24..=56 bytes.
#[must_use]
pub const fn meta_salt_len(width_bits: u32) -> usize {
    salt_len(width_bits, 24, 8, 56)
}

/// Longest salt the hash chain will derive.
pub const MAX_DERIVED_SALT_LEN: usize = 1024;

/// Granularity of the timestamp salt, in seconds.
pub const TIMESTAMP_BUCKET_SECS: u64 = 3600;
