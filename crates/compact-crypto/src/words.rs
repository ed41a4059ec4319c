//! # Fixed-Width Word Encoding
//!
//! Defines `AbiWords`, the sole construction path for bytes fed to the
//! keccak-256 digest in this crate.
//!
//! ## Security Invariant
//!
//! The inner buffer is private and only grows in whole 32-byte words:
//! unsigned integers big-endian, addresses left-padded with 12 zero bytes,
//! digests verbatim. This matches `abi.encode` for static types, which is
//! what the on-chain verifier hashes. [`keccak_digest`] accepts only
//! `&AbiWords`, so no code path can hash a differently shaped preimage.

use alloy_primitives::{keccak256, Address, B256, U256};

/// Bytes produced exclusively by fixed-width 32-byte word encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AbiWords(Vec<u8>);

impl AbiWords {
    /// Size of one encoded word.
    pub const WORD_SIZE: usize = 32;

    /// An empty encoding.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// An empty encoding with room for `words` words.
    pub fn with_capacity(words: usize) -> Self {
        Self(Vec::with_capacity(words * Self::WORD_SIZE))
    }

    /// Append a `uint256`.
    pub fn uint(mut self, value: U256) -> Self {
        self.0.extend_from_slice(&value.to_be_bytes::<32>());
        self
    }

    /// Append an `address`, left-padded to 32 bytes.
    pub fn address(mut self, value: Address) -> Self {
        self.0.extend_from_slice(&[0u8; 12]);
        self.0.extend_from_slice(value.as_slice());
        self
    }

    /// Append a `bytes32`.
    pub fn word(mut self, value: B256) -> Self {
        self.0.extend_from_slice(value.as_slice());
        self
    }

    /// Access the encoded bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of encoded words.
    pub fn word_count(&self) -> usize {
        self.0.len() / Self::WORD_SIZE
    }

    /// Returns true if no word has been appended.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for AbiWords {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Compute the keccak-256 digest of an encoded word sequence.
pub fn keccak_digest(words: &AbiWords) -> B256 {
    keccak256(words.as_bytes())
}
