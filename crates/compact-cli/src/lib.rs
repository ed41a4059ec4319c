//! # compact-cli: Compact Claims Command-Line Interface
//!
//! Operator surface over the compact claim libraries.
//!
//! ## Subcommands
//!
//! - `lock-tag`: encode and decode 96-bit lock tags
//! - `lock-id`: encode and decode 256-bit lock ids
//! - `claimant`: decode packed claimants
//! - `claim`: build claims from request documents
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic; handlers delegate
//!   to `compact-core` and `compact-claims`.
//! - Results go to stdout as JSON. Logs go to stderr.

pub mod claim;
pub mod claimant;
pub mod config;
pub mod lock_id;
pub mod lock_tag;
