//! Bit-layout vectors for the lock and claimant codecs, checked against
//! values computed outside Rust.

use compact_core::{
    build_component, decode_component, Address, ClaimantInput, ClaimantKind, LockId, LockTag,
    ResetPeriod, Scope, U256, NATIVE_TOKEN,
};

#[test]
fn lock_tag_bit_positions() {
    let scope_only = LockTag::encode(0, Scope::ChainSpecific, ResetPeriod::OneSecond).unwrap();
    assert_eq!(scope_only.as_u128(), 1u128 << 95);

    let period_only = LockTag::encode(0, Scope::Multichain, ResetPeriod::ThirtyDays).unwrap();
    assert_eq!(period_only.as_u128(), 7u128 << 92);

    let tag = LockTag::encode(12345, Scope::ChainSpecific, ResetPeriod::OneDay).unwrap();
    assert_eq!(tag.to_string(), "0xd00000000000000000003039");
    assert_eq!(tag.allocator_id().get(), 12345);
    assert_eq!(tag.scope(), Scope::ChainSpecific);
    assert_eq!(tag.reset_period(), ResetPeriod::OneDay);
    assert_eq!(tag.reset_period().seconds(), 86_400);
}

#[test]
fn lock_id_decimal_vector() {
    let tag = LockTag::encode(12345, Scope::ChainSpecific, ResetPeriod::OneDay).unwrap();
    let id = LockId::new(tag, NATIVE_TOKEN);
    assert_eq!(
        id.to_string(),
        "94081072505319408781651443361796637980778387765322218164573164658916660871168"
    );
    assert_eq!(id.lock_tag(), tag);
    assert_eq!(id.token(), NATIVE_TOKEN);
}

#[test]
fn lock_id_keeps_token_in_low_bits() {
    let token = Address::repeat_byte(0xff);
    let id = LockId::new(LockTag::ZERO, token);
    assert_eq!(id.as_u256(), (U256::from(1u64) << 160usize) - U256::from(1u64));
    assert_eq!(id.decode(), (LockTag::ZERO, token));
}

#[test]
fn claimant_routing_layout() {
    let claim_tag = LockTag::encode(12345, Scope::ChainSpecific, ResetPeriod::OneDay).unwrap();
    let recipient = Address::repeat_byte(0x22);

    let transfer = build_component(
        claim_tag,
        &ClaimantInput::Transfer {
            recipient,
            amount: U256::from(1000u64),
        },
    )
    .unwrap();
    assert_eq!(
        transfer.claimant,
        LockId::new(claim_tag, recipient).as_u256()
    );

    let withdraw = build_component(
        claim_tag,
        &ClaimantInput::Withdraw {
            recipient,
            amount: U256::from(1u64),
        },
    )
    .unwrap();
    assert_eq!(withdraw.claimant, U256::from_be_slice(recipient.as_slice()));

    let decoded = decode_component(&withdraw, None);
    assert_eq!(decoded.kind, ClaimantKind::Withdraw);
    assert_eq!(decoded.recipient, recipient);
    assert_eq!(decoded.lock_tag, None);
}
