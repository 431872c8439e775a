//! Generate Commands
//!
//! Simple digests and full hardened result records.

use super::{hasher, Input};
use anyhow::{Context, Result};
use attractor::DigestWidth;
use base64::{engine::general_purpose::STANDARD, Engine as _};

// =============================================================================
// SIMPLE
// =============================================================================

/// Print the digest of the input.
pub fn generate_simple(size: u32, input: &Input) -> Result<()> {
    let data = input.read()?;
    let digest = hasher(size)?
        .compute_simple(&data)
        .context("Hash computation failed")?;

    print_header(size);
    print_digest(&digest);
    Ok(())
}

// =============================================================================
// HARDENED
// =============================================================================

/// Print the full result record of the input.
pub fn generate_hardened(size: u32, input: &Input) -> Result<()> {
    let data = input.read()?;
    let record = hasher(size)?
        .compute_hardened(&data)
        .context("Hash computation failed")?;

    print_header(size);
    print_digest(&record.final_hash);
    println!("Memory:    {} KB", record.memory_used_kb);
    println!("Time:      {:.3} ms", record.compute_time_ns as f64 / 1e6);
    println!("Stages:    {}", record.checkpoints.len());
    println!();
    println!("{}", record.to_json().context("Failed to encode record")?);
    println!();
    println!("Record (base64):");
    println!("{}", record.to_base64().context("Failed to encode record")?);
    Ok(())
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_header(size: u32) {
    let name = DigestWidth::from_bits(size)
        .map(DigestWidth::algorithm_name)
        .unwrap_or_default();
    println!("Algorithm: {name}");
}

fn print_digest(digest: &[u8]) {
    println!("Hex:       {}", hex::encode(digest));
    println!("Base64:    {}", STANDARD.encode(digest));
}
