//! # Claim Hash
//!
//! Computes the raw digest that identifies a claim. The same value is
//! computed independently by the on-chain verifier, so the field order and
//! word widths below are a frozen wire format.
//!
//! ## Preimages
//!
//! ```text
//! single-id:  keccak256(abi.encode(sponsor, nonce, expires, witness, id, allocatedAmount))
//! multi-id:   keccak256(abi.encode(sponsor, nonce, expires, witness, idsAndAmountsHash))
//! ```
//!
//! Claimants, additional chains, the exogenous chain slot, allocator data
//! and the sponsor signature do not participate. They travel in the signed
//! typed-data message instead.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::tree::{ids_and_amounts_hash, IdAndAmount};
use crate::words::{keccak_digest, AbiWords};

/// The fields common to every claim-hash preimage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimHeader {
    /// Account whose locked balance is claimed.
    pub sponsor: Address,
    /// Replay-protection nonce.
    pub nonce: U256,
    /// Expiry as a unix timestamp.
    pub expires: U256,
    /// Commitment to claim-specific context; zero when unused.
    pub witness: B256,
}

impl ClaimHeader {
    fn words(&self, extra_words: usize) -> AbiWords {
        AbiWords::with_capacity(4 + extra_words)
            .address(self.sponsor)
            .uint(self.nonce)
            .uint(self.expires)
            .word(self.witness)
    }
}

/// Hash a claim over a single lock id.
///
/// Used by single, multichain and exogenous multichain claims.
pub fn single_claim_hash(header: &ClaimHeader, id: U256, allocated_amount: U256) -> B256 {
    let words = header.words(2).uint(id).uint(allocated_amount);
    keccak_digest(&words)
}

/// Hash a claim over several lock ids.
///
/// Used by batch, batch multichain and exogenous batch multichain claims.
/// An empty pair list is accepted and hashes over `keccak256("")`.
pub fn batch_claim_hash(header: &ClaimHeader, pairs: &[IdAndAmount]) -> B256 {
    let words = header.words(1).word(ids_and_amounts_hash(pairs));
    keccak_digest(&words)
}
