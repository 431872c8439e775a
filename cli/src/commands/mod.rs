//! CLI Commands
//!
//! All attractor CLI commands organized as separate modules.

mod generate;
mod verify;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

pub use generate::{generate_hardened, generate_simple};
pub use verify::{verify_hardened, verify_legacy};

/// Data source for a command.
pub enum Input {
    Text(String),
    File(PathBuf),
}

impl Input {
    fn read(&self) -> Result<Vec<u8>> {
        let data = match self {
            Self::Text(text) => text.as_bytes().to_vec(),
            Self::File(path) => std::fs::read(path)
                .with_context(|| format!("Failed to read: {}", path.display()))?,
        };
        debug!(bytes = data.len(), "input loaded");
        Ok(data)
    }
}

fn hasher(size: u32) -> Result<attractor::HardenedLorenzHasher> {
    attractor::HardenedLorenzHasher::new(size).map_err(|e| anyhow::anyhow!("{}", e))
}
