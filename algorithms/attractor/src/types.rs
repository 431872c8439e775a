//! Shared types used across the Attractor library.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// DIGEST WIDTH
// =============================================================================

/// Supported digest widths.
///
/// The width selects the stage presets, the salt sizes and the SHA-2
/// primitive used for checkpoints and finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum DigestWidth {
    /// 256-bit digest, 2 stages.
    W256,
    /// 384-bit digest, 3 stages.
    W384,
    /// 512-bit digest, 4 stages.
    W512,
    /// 1024-bit digest, 8 stages.
    W1024,
}

impl DigestWidth {
    /// Every supported width, narrowest first.
    pub const ALL: [Self; 4] = [Self::W256, Self::W384, Self::W512, Self::W1024];

    /// Width in bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::W256 => 256,
            Self::W384 => 384,
            Self::W512 => 512,
            Self::W1024 => 1024,
        }
    }

    /// Output length in bytes (`bits / 8`).
    #[must_use]
    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Parse a width given in bits.
    ///
    /// # Errors
    /// Returns [`HashError::UnsupportedWidth`] for anything other than
    /// 256, 384, 512 or 1024.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            256 => Ok(Self::W256),
            384 => Ok(Self::W384),
            512 => Ok(Self::W512),
            1024 => Ok(Self::W1024),
            other => Err(HashError::UnsupportedWidth(other)),
        }
    }

    /// Warm-up steps discarded before entropy extraction.
    #[must_use]
    pub const fn discard_steps(self) -> usize {
        1000 + self.bits() as usize / 4
    }

    /// Canonical algorithm name stored on results, e.g. `QHASH-256`.
    #[must_use]
    pub fn algorithm_name(self) -> String {
        format!("QHASH-{}", self.bits())
    }
}

impl fmt::Display for DigestWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl From<DigestWidth> for u32 {
    fn from(width: DigestWidth) -> Self {
        width.bits()
    }
}

impl TryFrom<u32> for DigestWidth {
    type Error = HashError;

    fn try_from(bits: u32) -> Result<Self> {
        Self::from_bits(bits)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, HashError>;

/// Coarse classification of a [`HashError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid width, stage parameter or stage/salt count.
    Configuration,
    /// Empty or malformed call input.
    Input,
    /// The trajectory diverged during integration.
    NumericInstability,
    /// A stored result is missing parts or belongs to another width.
    Structural,
    /// The serialized form of a result could not be read or written.
    Encoding,
}

/// Every failure the hashing engine can report.
///
/// A verification mismatch is not an error: `verify` returns `Ok(false)`.
#[derive(Debug, Error)]
pub enum HashError {
    /// Digest width outside {256, 384, 512, 1024}.
    #[error("unsupported digest width: {0}. Supported: 256, 384, 512, 1024")]
    UnsupportedWidth(u32),

    /// A Lorenz parameter is outside its admissible range.
    #[error("{name} parameter out of range: {value}")]
    ParameterOutOfRange {
        /// Parameter name (`sigma`, `rho`, `beta` or `dt`).
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Iteration count outside `[MIN_ITERATIONS, MAX_ITERATIONS]`.
    #[error("iterations out of safe range: {0}")]
    IterationBounds(usize),

    /// Trajectory output size outside `[1, 128]` bytes.
    #[error("invalid output size: {0}")]
    InvalidOutputSize(usize),

    /// Stage count outside `[1, 10]`.
    #[error("invalid number of stages: {0}")]
    InvalidStageCount(usize),

    /// The salt hierarchy carries fewer stage salts than there are stages.
    #[error("insufficient stage salts: {salts} for {stages} stages")]
    InsufficientStageSalts {
        /// Stages configured on the hasher.
        stages: usize,
        /// Stage salts present in the hierarchy.
        salts: usize,
    },

    /// Empty data where non-empty input is required.
    #[error("empty input data")]
    EmptyInput,

    /// Seed digest too short to provide three 8-byte windows.
    #[error("insufficient hash bytes: {0}")]
    InsufficientEntropy(usize),

    /// A trajectory coordinate left the finite range.
    #[error("{axis} coordinate overflow at step {step}: {value}")]
    NumericOverflow {
        /// Axis name.
        axis: char,
        /// Integration step (warm-up included).
        step: usize,
        /// Coordinate value, rounded to `f64`.
        value: f64,
    },

    /// The entropy stream came out empty.
    #[error("empty stream generated")]
    EmptyStream,

    /// Finalization called with an empty block or salt component.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Stored result without a usable salt hierarchy.
    #[error("invalid stored hash")]
    InvalidStoredHash,

    /// Stored result computed for a different width.
    #[error("hash size mismatch: expected {expected}, got {found}")]
    DigestWidthMismatch {
        /// Width configured on the hasher.
        expected: DigestWidth,
        /// Width recorded on the stored result.
        found: DigestWidth,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding failed.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl HashError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedWidth(_)
            | Self::ParameterOutOfRange { .. }
            | Self::IterationBounds(_)
            | Self::InvalidOutputSize(_)
            | Self::InvalidStageCount(_)
            | Self::InsufficientStageSalts { .. } => ErrorKind::Configuration,
            Self::EmptyInput
            | Self::InsufficientEntropy(_)
            | Self::EmptyStream
            | Self::InvalidInput(_) => ErrorKind::Input,
            Self::NumericOverflow { .. } => ErrorKind::NumericInstability,
            Self::InvalidStoredHash | Self::DigestWidthMismatch { .. } => ErrorKind::Structural,
            Self::Json(_) | Self::Base64(_) => ErrorKind::Encoding,
        }
    }
}
