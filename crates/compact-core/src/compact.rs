//! # Compact Authorization Records
//!
//! A compact is the sponsor-signed authorization from which a claim is
//! later built. These records are produced elsewhere (by the sponsor's
//! wallet flow) and are read here only to prefill claim builders.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::lock::{LockId, LockTag};

/// A single-lock compact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compact {
    /// Account permitted to process the claim.
    pub arbiter: Address,
    /// Account whose locked balance is claimed.
    pub sponsor: Address,
    /// Replay-protection nonce, scoped to the allocator.
    pub nonce: U256,
    /// Unix timestamp after which the compact is void.
    pub expires: U256,
    /// Tag of the lock being claimed.
    pub lock_tag: LockTag,
    /// Token held by the lock.
    pub token: Address,
    /// Maximum amount the claim may allocate.
    pub amount: U256,
}

impl Compact {
    /// The id of the lock this compact authorizes.
    pub fn lock_id(&self) -> LockId {
        LockId::new(self.lock_tag, self.token)
    }
}

/// One lock committed by a [`BatchCompact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lock {
    /// Tag of the committed lock.
    pub lock_tag: LockTag,
    /// Token held by the lock.
    pub token: Address,
    /// Maximum amount the claim may allocate from this lock.
    pub amount: U256,
}

impl Lock {
    /// The id of the committed lock.
    pub fn lock_id(&self) -> LockId {
        LockId::new(self.lock_tag, self.token)
    }
}

/// A compact spanning several locks on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCompact {
    /// Account permitted to process the claim.
    pub arbiter: Address,
    /// Account whose locked balances are claimed.
    pub sponsor: Address,
    /// Replay-protection nonce, scoped to the allocator.
    pub nonce: U256,
    /// Unix timestamp after which the compact is void.
    pub expires: U256,
    /// Committed locks, in claim order.
    pub commitments: Vec<Lock>,
}
