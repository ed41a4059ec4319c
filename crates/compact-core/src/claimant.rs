//! # Claimant Codec
//!
//! Packs a claim recipient and its routing instruction into a single
//! 256-bit `claimant` word:
//!
//! ```text
//! claimant = (routing tag << 160) | recipient
//! ```
//!
//! The routing tag is the claim's own lock tag for a transfer, the target
//! lock tag for a conversion, and zero for a withdrawal.
//!
//! ## Decode Ambiguity
//!
//! A transfer and a conversion both carry a nonzero routing tag. Without the
//! claim's own lock tag they cannot be told apart, and [`decode_component`]
//! reports every nonzero tag as a conversion in that case. The on-chain
//! verifier reads the word the same way.

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::ClaimError;
use crate::lock::LockTag;
use crate::packing;

/// How a claimant's funds leave the claimed lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimantKind {
    /// Stay within the claim's own lock tag.
    Transfer,
    /// Move into a lock with a different tag.
    Convert,
    /// Leave the protocol as the underlying token.
    Withdraw,
}

impl ClaimantKind {
    /// Returns the kebab-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Convert => "convert",
            Self::Withdraw => "withdraw",
        }
    }
}

impl std::fmt::Display for ClaimantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unpacked claimant as supplied by application code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClaimantInput {
    /// Route within the claim's lock tag.
    Transfer {
        /// Receiving account.
        recipient: Address,
        /// Amount to allocate.
        amount: U256,
    },
    /// Route into `target_lock_tag`.
    Convert {
        /// Receiving account.
        recipient: Address,
        /// Amount to allocate.
        amount: U256,
        /// Lock tag of the destination lock.
        target_lock_tag: LockTag,
    },
    /// Route out of the protocol (zero tag).
    Withdraw {
        /// Receiving account.
        recipient: Address,
        /// Amount to allocate.
        amount: U256,
    },
}

impl ClaimantInput {
    /// The routing kind of this claimant.
    pub fn kind(&self) -> ClaimantKind {
        match self {
            Self::Transfer { .. } => ClaimantKind::Transfer,
            Self::Convert { .. } => ClaimantKind::Convert,
            Self::Withdraw { .. } => ClaimantKind::Withdraw,
        }
    }

    /// The receiving account.
    pub fn recipient(&self) -> Address {
        match self {
            Self::Transfer { recipient, .. }
            | Self::Convert { recipient, .. }
            | Self::Withdraw { recipient, .. } => *recipient,
        }
    }

    /// The allocated amount.
    pub fn amount(&self) -> U256 {
        match self {
            Self::Transfer { amount, .. }
            | Self::Convert { amount, .. }
            | Self::Withdraw { amount, .. } => *amount,
        }
    }
}

/// A packed `(claimant, amount)` leaf of a claim's distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// `(routing tag << 160) | recipient`.
    pub claimant: U256,
    /// Amount allocated to this claimant.
    pub amount: U256,
}

impl Component {
    /// Reject a component whose amount is zero.
    pub fn validate(&self) -> Result<(), ClaimError> {
        if self.amount.is_zero() {
            return Err(ClaimError::InvalidClaimant(
                "component amount must be nonzero".to_string(),
            ));
        }
        Ok(())
    }

    /// The recipient in the low 160 bits.
    pub fn recipient(&self) -> Address {
        packing::unpack(self.claimant).1
    }

    /// The routing tag in the high 96 bits.
    pub fn routing_tag(&self) -> LockTag {
        LockTag::from_bits_truncate(packing::unpack(self.claimant).0)
    }
}

/// The result of unpacking a [`Component`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedComponent {
    /// Routing kind inferred from the routing tag.
    pub kind: ClaimantKind,
    /// Receiving account.
    pub recipient: Address,
    /// Destination lock tag; present for conversions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_tag: Option<LockTag>,
    /// Allocated amount.
    pub amount: U256,
}

/// Pack a claimant input against the claim's lock tag.
///
/// # Errors
///
/// Returns `ClaimError::InvalidClaimant` if the amount is zero.
pub fn build_component(
    claim_lock_tag: LockTag,
    input: &ClaimantInput,
) -> Result<Component, ClaimError> {
    if input.amount().is_zero() {
        return Err(ClaimError::InvalidClaimant(format!(
            "{} amount must be nonzero",
            input.kind()
        )));
    }
    let routing_tag = match input {
        ClaimantInput::Transfer { .. } => claim_lock_tag,
        ClaimantInput::Convert {
            target_lock_tag, ..
        } => *target_lock_tag,
        ClaimantInput::Withdraw { .. } => LockTag::ZERO,
    };
    Ok(Component {
        claimant: packing::pack(routing_tag.as_u128(), input.recipient()),
        amount: input.amount(),
    })
}

/// Unpack a component, classifying it against the claim's lock tag if known.
///
/// - A zero routing tag is a withdrawal.
/// - A routing tag equal to `claim_lock_tag` is a transfer.
/// - Any other tag is a conversion into that tag.
pub fn decode_component(
    component: &Component,
    claim_lock_tag: Option<LockTag>,
) -> DecodedComponent {
    let routing_tag = component.routing_tag();
    let (kind, lock_tag) = if routing_tag.is_zero() {
        (ClaimantKind::Withdraw, None)
    } else if claim_lock_tag == Some(routing_tag) {
        (ClaimantKind::Transfer, None)
    } else {
        (ClaimantKind::Convert, Some(routing_tag))
    };
    DecodedComponent {
        kind,
        recipient: component.recipient(),
        lock_tag,
        amount: component.amount,
    }
}

/// Parse a recipient address.
///
/// # Errors
///
/// Returns `ClaimError::InvalidClaimant` if `s` is not a 20-byte hex address.
pub fn parse_recipient(s: &str) -> Result<Address, ClaimError> {
    Address::from_str(s.trim())
        .map_err(|e| ClaimError::InvalidClaimant(format!("malformed recipient {s:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::{ResetPeriod, Scope};

    fn claim_tag() -> LockTag {
        LockTag::encode(7, Scope::ChainSpecific, ResetPeriod::TenMinutes).unwrap()
    }

    fn other_tag() -> LockTag {
        LockTag::encode(9, Scope::Multichain, ResetPeriod::OneDay).unwrap()
    }

    #[test]
    fn transfer_routes_by_claim_tag() {
        let recipient = Address::repeat_byte(0xaa);
        let c = build_component(
            claim_tag(),
            &ClaimantInput::Transfer {
                recipient,
                amount: U256::from(100u64),
            },
        )
        .unwrap();
        assert_eq!(c.routing_tag(), claim_tag());
        assert_eq!(c.recipient(), recipient);
        assert_eq!(
            c.claimant,
            (claim_tag().to_u256() << 160usize) | U256::from_be_slice(recipient.as_slice())
        );
    }

    #[test]
    fn convert_routes_by_target_tag() {
        let c = build_component(
            claim_tag(),
            &ClaimantInput::Convert {
                recipient: Address::repeat_byte(0x01),
                amount: U256::from(5u64),
                target_lock_tag: other_tag(),
            },
        )
        .unwrap();
        assert_eq!(c.routing_tag(), other_tag());
        let decoded = decode_component(&c, Some(claim_tag()));
        assert_eq!(decoded.kind, ClaimantKind::Convert);
        assert_eq!(decoded.lock_tag, Some(other_tag()));
    }

    #[test]
    fn withdraw_has_zero_tag() {
        let recipient = Address::repeat_byte(0x02);
        let c = build_component(
            claim_tag(),
            &ClaimantInput::Withdraw {
                recipient,
                amount: U256::from(1u64),
            },
        )
        .unwrap();
        assert_eq!(c.claimant, U256::from_be_slice(recipient.as_slice()));
        let decoded = decode_component(&c, None);
        assert_eq!(decoded.kind, ClaimantKind::Withdraw);
        assert_eq!(decoded.recipient, recipient);
        assert_eq!(decoded.lock_tag, None);
    }

    #[test]
    fn zero_amount_rejected() {
        let err = build_component(
            claim_tag(),
            &ClaimantInput::Transfer {
                recipient: Address::ZERO,
                amount: U256::ZERO,
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ClaimError::InvalidClaimant("transfer amount must be nonzero".to_string())
        );
    }

    #[test]
    fn transfer_without_claim_tag_decodes_as_convert() {
        let c = build_component(
            claim_tag(),
            &ClaimantInput::Transfer {
                recipient: Address::repeat_byte(0x03),
                amount: U256::from(9u64),
            },
        )
        .unwrap();
        let decoded = decode_component(&c, None);
        assert_eq!(decoded.kind, ClaimantKind::Convert);
        assert_eq!(decoded.lock_tag, Some(claim_tag()));
    }

    #[test]
    fn parse_recipient_rejects_malformed() {
        assert!(parse_recipient("0x1234").is_err());
        assert!(parse_recipient("not an address").is_err());
        let ok = parse_recipient("0x00000000000000000000000000000000000000aa").unwrap();
        assert_eq!(ok.as_slice()[19], 0xaa);
    }

    #[test]
    fn component_validate_rejects_zero_amount() {
        let c = Component {
            claimant: U256::from(1u64),
            amount: U256::ZERO,
        };
        assert!(matches!(c.validate(), Err(ClaimError::InvalidClaimant(_))));
    }

    #[test]
    fn claimant_input_serde_shape() {
        let json = serde_json::json!({
            "kind": "convert",
            "recipient": "0x0000000000000000000000000000000000000001",
            "amount": "0x64",
            "targetLockTag": "0x300000000000000000000007"
        });
        let input: ClaimantInput = serde_json::from_value(json).unwrap();
        assert_eq!(input.kind(), ClaimantKind::Convert);
        assert_eq!(input.amount(), U256::from(100u64));
        match input {
            ClaimantInput::Convert {
                target_lock_tag, ..
            } => assert_eq!(target_lock_tag.allocator_id().get(), 7),
            other => panic!("expected convert, got {other:?}"),
        }
    }
}
