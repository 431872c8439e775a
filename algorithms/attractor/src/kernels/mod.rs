//! Numeric and cryptographic kernels.
//!
//! Everything in here is deterministic and free of I/O: 128-bit
//! arithmetic, seed derivation, trajectory integration and the
//! finalization mixers.

pub mod constants;
pub mod digest;
pub mod float128;
pub mod mixing;
pub mod seed;
pub mod trajectory;
