//! # Claim Wire Structs
//!
//! The six payloads an arbiter submits to the verifying contract. They
//! differ only in id cardinality and cross-chain metadata; every shape
//! starts with the same seven common fields.
//!
//! ```text
//! common     allocatorData, sponsorSignature, sponsor, nonce, expires,
//!            witness, witnessTypestring
//! single-id  id, allocatedAmount, claimants
//! multi-id   claims (BatchClaimComponent[])
//! multichain additionalChains
//! exogenous  chainIndex, notarizedChainId
//! ```
//!
//! Field declaration order matches the typed-data schema of each shape.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use compact_core::Component;

/// One lock's share of a batch claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchClaimComponent {
    /// Lock id being claimed.
    pub id: U256,
    /// Amount originally allocated from the lock.
    pub allocated_amount: U256,
    /// Distribution of the allocated amount.
    pub portions: Vec<Component>,
}

/// A claim against one lock on the current chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub allocator_data: Bytes,
    pub sponsor_signature: Bytes,
    pub sponsor: Address,
    pub nonce: U256,
    pub expires: U256,
    pub witness: B256,
    pub witness_typestring: String,
    pub id: U256,
    pub allocated_amount: U256,
    pub claimants: Vec<Component>,
}

/// A claim against several locks on the current chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchClaim {
    pub allocator_data: Bytes,
    pub sponsor_signature: Bytes,
    pub sponsor: Address,
    pub nonce: U256,
    pub expires: U256,
    pub witness: B256,
    pub witness_typestring: String,
    pub claims: Vec<BatchClaimComponent>,
}

/// A single-lock claim that is part of a cross-chain claim set, processed
/// on the notarized chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultichainClaim {
    pub allocator_data: Bytes,
    pub sponsor_signature: Bytes,
    pub sponsor: Address,
    pub nonce: U256,
    pub expires: U256,
    pub witness: B256,
    pub witness_typestring: String,
    pub id: U256,
    pub allocated_amount: U256,
    pub claimants: Vec<Component>,
    /// Claim hashes of the other chains' elements, in set order.
    pub additional_chains: Vec<B256>,
}

/// A multi-lock claim that is part of a cross-chain claim set, processed on
/// the notarized chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMultichainClaim {
    pub allocator_data: Bytes,
    pub sponsor_signature: Bytes,
    pub sponsor: Address,
    pub nonce: U256,
    pub expires: U256,
    pub witness: B256,
    pub witness_typestring: String,
    pub claims: Vec<BatchClaimComponent>,
    /// Claim hashes of the other chains' elements, in set order.
    pub additional_chains: Vec<B256>,
}

/// A single-lock multichain claim processed on a chain other than the one
/// the sponsor's element was notarized on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExogenousMultichainClaim {
    pub allocator_data: Bytes,
    pub sponsor_signature: Bytes,
    pub sponsor: Address,
    pub nonce: U256,
    pub expires: U256,
    pub witness: B256,
    pub witness_typestring: String,
    pub id: U256,
    pub allocated_amount: U256,
    pub claimants: Vec<Component>,
    pub additional_chains: Vec<B256>,
    /// Position of this chain's element within the claim set.
    pub chain_index: U256,
    /// Chain id the sponsor's signature was notarized on.
    pub notarized_chain_id: U256,
}

/// A multi-lock multichain claim processed on a chain other than the one
/// the sponsor's element was notarized on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExogenousBatchMultichainClaim {
    pub allocator_data: Bytes,
    pub sponsor_signature: Bytes,
    pub sponsor: Address,
    pub nonce: U256,
    pub expires: U256,
    pub witness: B256,
    pub witness_typestring: String,
    pub claims: Vec<BatchClaimComponent>,
    pub additional_chains: Vec<B256>,
    /// Position of this chain's element within the claim set.
    pub chain_index: U256,
    /// Chain id the sponsor's signature was notarized on.
    pub notarized_chain_id: U256,
}
