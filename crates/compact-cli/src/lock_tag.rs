//! # Lock Tag Subcommand
//!
//! Packs and unpacks 96-bit lock tags.
//!
//! ```text
//! compact lock-tag encode --allocator-id 12345 --scope chain-specific --reset-period one-day
//! compact lock-tag decode 0xd00000000000000000003039
//! ```

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use compact_core::{AllocatorId, LockTag, ResetPeriod, Scope};

/// Arguments for the `compact lock-tag` subcommand.
#[derive(Args, Debug)]
pub struct LockTagArgs {
    #[command(subcommand)]
    pub command: LockTagCommand,
}

/// Lock tag subcommands.
#[derive(Subcommand, Debug)]
pub enum LockTagCommand {
    /// Pack an allocator id, scope and reset period into a lock tag.
    Encode {
        /// Allocator id, decimal or 0x-prefixed hex (< 2^92).
        #[arg(long)]
        allocator_id: String,
        /// `multichain` or `chain-specific`.
        #[arg(long)]
        scope: Scope,
        /// Reset period name, e.g. `ten-minutes` or `one-day`.
        #[arg(long)]
        reset_period: ResetPeriod,
    },

    /// Unpack a 0x-prefixed lock tag.
    Decode {
        /// The lock tag.
        #[arg(value_name = "TAG")]
        tag: String,
    },
}

/// The fields of a lock tag, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockTagReport {
    pub lock_tag: LockTag,
    pub allocator_id: String,
    pub scope: Scope,
    pub reset_period: ResetPeriod,
    pub reset_period_seconds: u64,
}

impl From<LockTag> for LockTagReport {
    fn from(tag: LockTag) -> Self {
        let (allocator_id, scope, reset_period) = tag.decode();
        Self {
            lock_tag: tag,
            allocator_id: allocator_id.to_string(),
            scope,
            reset_period,
            reset_period_seconds: reset_period.seconds(),
        }
    }
}

/// Execute the lock-tag subcommand.
pub fn run_lock_tag(args: &LockTagArgs) -> Result<u8> {
    let report = lock_tag_report(&args.command)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(0)
}

/// Compute the report a lock-tag subcommand prints.
pub fn lock_tag_report(command: &LockTagCommand) -> Result<LockTagReport> {
    let tag = match command {
        LockTagCommand::Encode {
            allocator_id,
            scope,
            reset_period,
        } => {
            let allocator_id: AllocatorId = allocator_id
                .parse()
                .with_context(|| format!("invalid allocator id {allocator_id:?}"))?;
            LockTag::new(allocator_id, *scope, *reset_period)
        }
        LockTagCommand::Decode { tag } => tag
            .parse::<LockTag>()
            .with_context(|| format!("invalid lock tag {tag:?}"))?,
    };
    Ok(LockTagReport::from(tag))
}
