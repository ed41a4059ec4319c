//! # compact-crypto: Digest Primitives
//!
//! Provides the digest building blocks for compact claims:
//!
//! - **Word encoding** (`AbiWords`): the only valid input to the keccak-256
//!   digest, laid out as 32-byte big-endian words.
//! - **Leaf folding**: one-level fold of `(uint256, uint256)` leaves, shared
//!   by claimant components and `(id, amount)` pairs.
//! - **Claim hash**: the single-id and multi-id preimages reproduced by the
//!   on-chain verifier.
//!
//! ## Crate Policy
//!
//! - Depends only on `compact-core` internally.
//! - Every function is pure. Malformed inputs are rejected upstream by the
//!   codecs and builders, never here.
//! - Known-answer vectors in tests are computed with an independent keccak
//!   implementation.

pub mod claim_hash;
pub mod tree;
pub mod words;

pub use claim_hash::{batch_claim_hash, single_claim_hash, ClaimHeader};
pub use tree::{components_hash, fold, ids_and_amounts_hash, leaf_hash, IdAndAmount};
pub use words::{keccak_digest, AbiWords};
