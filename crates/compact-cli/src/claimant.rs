//! # Claimant Subcommand
//!
//! Unpacks a 256-bit claimant word and classifies its routing.
//!
//! Without `--lock-tag` every nonzero routing tag is reported as a
//! conversion, because a transfer is only distinguishable by comparison
//! with the claim's own lock tag.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use alloy_primitives::U256;
use compact_core::{decode_component, Component, DecodedComponent, LockTag};

/// Arguments for the `compact claimant` subcommand.
#[derive(Args, Debug)]
pub struct ClaimantArgs {
    #[command(subcommand)]
    pub command: ClaimantCommand,
}

/// Claimant subcommands.
#[derive(Subcommand, Debug)]
pub enum ClaimantCommand {
    /// Unpack a claimant into kind, recipient and routing tag.
    Decode {
        /// The packed claimant, decimal or 0x-prefixed hex.
        #[arg(value_name = "CLAIMANT")]
        claimant: String,
        /// Amount allocated to the claimant.
        #[arg(long)]
        amount: String,
        /// Lock tag of the claim the claimant belongs to.
        #[arg(long)]
        lock_tag: Option<String>,
    },
}

/// Execute the claimant subcommand.
pub fn run_claimant(args: &ClaimantArgs) -> Result<u8> {
    let decoded = claimant_report(&args.command)?;
    println!("{}", serde_json::to_string_pretty(&decoded)?);
    Ok(0)
}

/// Decode the claimant named by a claimant subcommand.
pub fn claimant_report(command: &ClaimantCommand) -> Result<DecodedComponent> {
    let ClaimantCommand::Decode {
        claimant,
        amount,
        lock_tag,
    } = command;

    let component = Component {
        claimant: parse_uint(claimant, "claimant")?,
        amount: parse_uint(amount, "amount")?,
    };
    let lock_tag = lock_tag
        .as_deref()
        .map(|tag| {
            tag.parse::<LockTag>()
                .with_context(|| format!("invalid lock tag {tag:?}"))
        })
        .transpose()?;
    Ok(decode_component(&component, lock_tag))
}

fn parse_uint(raw: &str, what: &str) -> Result<U256> {
    raw.trim()
        .parse::<U256>()
        .with_context(|| format!("invalid {what} {raw:?}"))
}
