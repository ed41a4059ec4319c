//! # Lock Id Subcommand
//!
//! Packs a lock tag and token into a 256-bit lock id, or splits one apart.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use alloy_primitives::{hex, Address, B256};
use compact_core::{parse_recipient, LockId, LockTag};

use crate::lock_tag::LockTagReport;

/// Arguments for the `compact lock-id` subcommand.
#[derive(Args, Debug)]
pub struct LockIdArgs {
    #[command(subcommand)]
    pub command: LockIdCommand,
}

/// Lock id subcommands.
#[derive(Subcommand, Debug)]
pub enum LockIdCommand {
    /// Combine a lock tag with a token address.
    Encode {
        /// 0x-prefixed lock tag.
        #[arg(long)]
        lock_tag: String,
        /// Token address; the zero address denotes the native asset.
        #[arg(long)]
        token: String,
    },

    /// Split a lock id into its lock tag and token.
    Decode {
        /// Lock id, decimal or 0x-prefixed hex.
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// A lock id and its parts, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockIdReport {
    /// Decimal form.
    pub id: String,
    /// 32-byte hex form.
    pub id_hex: String,
    pub token: Address,
    #[serde(flatten)]
    pub lock_tag: LockTagReport,
}

impl From<LockId> for LockIdReport {
    fn from(id: LockId) -> Self {
        let (lock_tag, token) = id.decode();
        Self {
            id: id.to_string(),
            id_hex: hex::encode_prefixed(B256::from(id.as_u256().to_be_bytes::<32>())),
            token,
            lock_tag: LockTagReport::from(lock_tag),
        }
    }
}

/// Execute the lock-id subcommand.
pub fn run_lock_id(args: &LockIdArgs) -> Result<u8> {
    let report = lock_id_report(&args.command)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(0)
}

/// Compute the report a lock-id subcommand prints.
pub fn lock_id_report(command: &LockIdCommand) -> Result<LockIdReport> {
    let id = match command {
        LockIdCommand::Encode { lock_tag, token } => {
            let lock_tag: LockTag = lock_tag
                .parse()
                .with_context(|| format!("invalid lock tag {lock_tag:?}"))?;
            let token = parse_recipient(token).context("invalid token")?;
            LockId::new(lock_tag, token)
        }
        LockIdCommand::Decode { id } => id
            .parse::<LockId>()
            .with_context(|| format!("invalid lock id {id:?}"))?,
    };
    Ok(LockIdReport::from(id))
}
