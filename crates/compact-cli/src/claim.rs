//! # Claim Subcommand
//!
//! Builds a claim from a request document and prints the built claim as
//! JSON: `{"struct": ..., "hash": ..., "typedData": ...}`.
//!
//! Request documents may be YAML or JSON. The signing domain comes from
//! the CLI configuration (see [`crate::config`]).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use compact_claims::{AnyBuiltClaim, ClaimRequest, TypedDataDomain};

use crate::config::CompactConfig;

/// Arguments for the `compact claim` subcommand.
#[derive(Args, Debug)]
pub struct ClaimArgs {
    #[command(subcommand)]
    pub command: ClaimCommand,
}

/// Claim subcommands.
#[derive(Subcommand, Debug)]
pub enum ClaimCommand {
    /// Build a claim from a YAML or JSON request document.
    Build {
        /// Path to the request document.
        #[arg(value_name = "REQUEST_FILE")]
        request: PathBuf,
    },
}

/// Execute the claim subcommand.
pub fn run_claim(args: &ClaimArgs, config_path: Option<&Path>) -> Result<u8> {
    let ClaimCommand::Build { request } = &args.command;
    let config = CompactConfig::load(config_path)?;
    let built = build_request_file(request, &config.domain.to_domain())?;
    tracing::info!(shape = %built.kind(), hash = %built.hash(), "claim built");
    println!("{}", serde_json::to_string_pretty(&built)?);
    Ok(0)
}

/// Read, parse and build a request document.
pub fn build_request_file(path: &Path, domain: &TypedDataDomain) -> Result<AnyBuiltClaim> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request file: {}", path.display()))?;
    let request: ClaimRequest = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse request file: {}", path.display()))?;
    request
        .build(domain)
        .with_context(|| format!("failed to build {} claim", request.shape))
}
