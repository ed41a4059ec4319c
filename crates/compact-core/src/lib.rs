//! # compact-core: Foundational Types for Compact Claims
//!
//! This crate defines the fixed-width identifiers shared by every other
//! crate in the workspace. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes enforce bit widths.** `AllocatorId` (92 bits) and `LockTag`
//!    (96 bits) can only be constructed through validating constructors.
//!    An out-of-range value is an `EncodingError`, never silently truncated.
//!
//! 2. **One packing layout.** Lock ids and claimants share the
//!    `(96-bit high word << 160) | address` layout, implemented once in a
//!    private module with logical shifts on `U256`.
//!
//! 3. **Closed claimant union.** `ClaimantInput` has exactly three variants
//!    and every consumer matches it exhaustively.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod claimant;
pub mod compact;
pub mod error;
pub mod lock;
mod packing;

// Re-export primary types for ergonomic imports.
pub use claimant::{
    build_component, decode_component, parse_recipient, ClaimantInput, ClaimantKind, Component,
    DecodedComponent,
};
pub use compact::{BatchCompact, Compact, Lock};
pub use error::{ClaimError, EncodingError};
pub use lock::{AllocatorId, LockId, LockTag, ResetPeriod, Scope, NATIVE_TOKEN};

pub use alloy_primitives::{Address, Bytes, B256, U256};
