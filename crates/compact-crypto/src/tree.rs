//! # Leaf Folding
//!
//! Digests an ordered list of `(uint256, uint256)` leaves into one word.
//!
//! ## Algorithm
//!
//! - Leaf: `keccak256(abi.encode(a, b))`.
//! - Fold: `keccak256(leaf_0 || leaf_1 || ... || leaf_n)`.
//! - An empty list folds to `keccak256("")`.
//!
//! This is a single fold level, not a Merkle tree: there are no interior
//! nodes, and permuting the input changes the result. Claimant components
//! and `(id, amount)` pairs share the algorithm.

use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};

use compact_core::Component;

use crate::words::{keccak_digest, AbiWords};

/// One `(id, amount)` entry of a multi-lock claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdAndAmount {
    /// Lock id being claimed.
    pub id: U256,
    /// Amount allocated from that lock.
    pub amount: U256,
}

/// Compute a leaf digest: `keccak256(abi.encode(a, b))`.
pub fn leaf_hash(a: U256, b: U256) -> B256 {
    keccak_digest(&AbiWords::with_capacity(2).uint(a).uint(b))
}

/// Fold leaf digests, in order, into a single digest.
pub fn fold<I>(leaf_digests: I) -> B256
where
    I: IntoIterator<Item = B256>,
{
    let words = leaf_digests
        .into_iter()
        .fold(AbiWords::new(), |words, leaf| words.word(leaf));
    keccak_digest(&words)
}

/// Fold a claim's claimant components.
pub fn components_hash(components: &[Component]) -> B256 {
    fold(components.iter().map(|c| leaf_hash(c.claimant, c.amount)))
}

/// Fold a claim's `(id, amount)` pairs.
pub fn ids_and_amounts_hash(pairs: &[IdAndAmount]) -> B256 {
    fold(pairs.iter().map(|p| leaf_hash(p.id, p.amount)))
}
