//! # compact CLI entry point
//!
//! Parses command-line arguments, initializes logging and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use compact_cli::claim::{run_claim, ClaimArgs};
use compact_cli::claimant::{run_claimant, ClaimantArgs};
use compact_cli::lock_id::{run_lock_id, LockIdArgs};
use compact_cli::lock_tag::{run_lock_tag, LockTagArgs};

/// Compact claims toolchain.
///
/// Encodes and decodes lock tags, lock ids and claimants, and builds
/// claims with their claim hash and typed-data message.
#[derive(Parser, Debug)]
#[command(name = "compact", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// Ignored when RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to configuration file (default: compact.yaml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode or decode a 96-bit lock tag.
    LockTag(LockTagArgs),

    /// Encode or decode a 256-bit lock id.
    LockId(LockIdArgs),

    /// Decode a packed claimant.
    Claimant(ClaimantArgs),

    /// Build a claim from a request document.
    Claim(ClaimArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!("compact CLI starting");

    let result = match cli.command {
        Commands::LockTag(args) => run_lock_tag(&args),
        Commands::LockId(args) => run_lock_id(&args),
        Commands::Claimant(args) => run_claimant(&args),
        Commands::Claim(args) => run_claim(&args, cli.config.as_deref()),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
