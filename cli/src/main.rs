//! Attractor CLI
//!
//! Generate and verify Lorenz-attractor salted hashes.

mod commands;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use commands::{generate_hardened, generate_simple, verify_hardened, verify_legacy, Input};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "attractor")]
#[command(about = "Salted multi-stage hashing over Lorenz-attractor trajectories", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Digest width in bits (256, 384, 512 or 1024)
    #[arg(short, long, global = true, default_value_t = 256, value_parser = parse_width)]
    size: u32,

    /// Log pipeline stages to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the final digest only
    GenerateSimple(InputArgs),
    /// Print the full result record (JSON and base64 envelope)
    GenerateHardened(InputArgs),
    /// Verify input against a stored result record
    VerifyHardened {
        #[command(flatten)]
        input: InputArgs,

        /// Result record as JSON or base64-wrapped JSON
        #[arg(short, long)]
        record: String,
    },
    /// Verify input against a bare base64 digest
    VerifyLegacy {
        #[command(flatten)]
        input: InputArgs,

        /// Expected digest, base64
        #[arg(long)]
        hash: String,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Text to hash
    #[arg(short, long)]
    input: Option<String>,

    /// File to hash
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
}

impl InputArgs {
    fn into_input(self) -> Result<Input> {
        match (self.input, self.file) {
            (Some(text), None) => Ok(Input::Text(text)),
            (None, Some(path)) => Ok(Input::File(path)),
            _ => bail!("exactly one of --input or --file is required"),
        }
    }
}

fn parse_width(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(bits @ (256 | 384 | 512 | 1024)) => Ok(bits),
        _ => Err(format!("invalid size {s}: must be one of 256, 384, 512, 1024")),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "attractor=debug" } else { "attractor=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ok = match cli.command {
        Commands::GenerateSimple(input) => {
            generate_simple(cli.size, &input.into_input()?)?;
            true
        }
        Commands::GenerateHardened(input) => {
            generate_hardened(cli.size, &input.into_input()?)?;
            true
        }
        Commands::VerifyHardened { input, record } => {
            verify_hardened(cli.size, &input.into_input()?, &record)?
        }
        Commands::VerifyLegacy { input, hash } => {
            verify_legacy(cli.size, &input.into_input()?, &hash)?
        }
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}
