//! Shared shift/mask helpers for the `(96-bit high word, 160-bit address)`
//! layout used by both lock ids and claimants.
//!
//! All arithmetic happens on `U256`, which is unsigned, so every right
//! shift is logical.

use alloy_primitives::{Address, U256};

/// Width of the low address slot.
pub(crate) const ADDRESS_BITS: usize = 160;

/// Mask selecting the low 160 bits of a word.
fn address_mask() -> U256 {
    U256::MAX >> (256 - ADDRESS_BITS)
}

/// Place `high` above a 160-bit address: `(high << 160) | address`.
///
/// Callers guarantee `high < 2^96`.
pub(crate) fn pack(high: u128, low: Address) -> U256 {
    (U256::from(high) << ADDRESS_BITS) | address_to_word(low)
}

/// Split a word into `(value >> 160, value & (2^160 - 1))`.
pub(crate) fn unpack(value: U256) -> (u128, Address) {
    let high = low_u128(value >> ADDRESS_BITS);
    let low = word_to_address(value & address_mask());
    (high, low)
}

pub(crate) fn address_to_word(address: Address) -> U256 {
    U256::from_be_slice(address.as_slice())
}

fn word_to_address(value: U256) -> Address {
    let bytes = value.to_be_bytes::<32>();
    Address::from_slice(&bytes[12..])
}

/// The low 128 bits of a word.
pub(crate) fn low_u128(value: U256) -> u128 {
    let limbs = value.as_limbs();
    u128::from(limbs[0]) | (u128::from(limbs[1]) << 64)
}
