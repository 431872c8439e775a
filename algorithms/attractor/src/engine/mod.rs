//! Hashing Engine
//!
//! Salt hierarchy, stage orchestration and verification.

pub mod adaptive;
pub mod hasher;
pub mod parallel;
pub mod salt;
pub mod stages;
pub mod verify;

pub use adaptive::AdaptiveParameters;
pub use hasher::HardenedLorenzHasher;
pub use stages::LorenzStage;
