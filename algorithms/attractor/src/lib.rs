//! # Attractor
//!
//! Salted, multi-stage hashing driven by Lorenz-attractor trajectories
//! integrated at 128-bit precision. Each digest width runs a fixed set of
//! chained stages, records a checkpoint per stage and finishes with five
//! SHA-2 based mixing rounds.

//! # Usage
//! ```rust,no_run
//! use std::time::Duration;
//! use attractor::{HardenedLorenzHasher, HardenedSaltedHash};
//!
//! // 1. Hardened hashing with a full result record
//! let hasher = HardenedLorenzHasher::new(256)?;
//! let record = hasher.compute_hardened(b"hello")?;
//! assert_eq!(record.final_hash.len(), 32);
//!
//! // 2. Store and verify later
//! let stored = HardenedSaltedHash::decode(&record.to_base64()?)?;
//! assert!(hasher.verify(b"hello", &stored)?);
//! assert!(!hasher.verify(b"hellp", &stored)?);
//!
//! // 3. Drop the timing floor for bulk work
//! let fast = HardenedLorenzHasher::new(512)?.with_min_compute_time(Duration::ZERO);
//! let digest = fast.compute_simple(b"bulk")?;
//! assert_eq!(digest.len(), 64);
//! # Ok::<(), attractor::HashError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

mod engine;
// Numeric kernels, exposed for tests and benchmarks only
#[doc(hidden)]
pub mod kernels;
mod oneshot;
mod record;
mod types;

// =============================================================================
// EXPORTS
// =============================================================================

pub use engine::salt::{current_hour_bucket, derive_chain};
pub use engine::{AdaptiveParameters, HardenedLorenzHasher, LorenzStage};
pub use oneshot::{hash, hash_hardened, verify, verify_digest};
pub use record::{HardenedSaltedHash, HierarchicalSalt, TrajectoryCheckpoint};
pub use types::{DigestWidth, ErrorKind, HashError, Result};
