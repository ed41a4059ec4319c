//! # Claim Builder Scenarios
//!
//! End-to-end builder behavior across shapes: validation order, hash
//! agreement with the digest crate, typed-data schema conformance and
//! isolation of built claims from later builder mutation.

use alloy_primitives::{Address, Bytes, B256, U256};
use compact_claims::{
    BatchClaimBuilder, BatchMultichainClaimBuilder, ClaimShape, ExogenousBatchMultichainClaimBuilder,
    ExogenousMultichainClaimBuilder, MultichainClaimBuilder, SingleClaimBuilder, TypedData,
    TypedDataDomain,
};
use compact_core::{
    decode_component, ClaimError, ClaimantKind, LockId, LockTag, ResetPeriod, Scope, NATIVE_TOKEN,
};
use compact_crypto::{batch_claim_hash, single_claim_hash, ClaimHeader, IdAndAmount};

fn tag() -> LockTag {
    LockTag::encode(12345, Scope::ChainSpecific, ResetPeriod::OneDay).unwrap()
}

fn other_tag() -> LockTag {
    LockTag::encode(7, Scope::Multichain, ResetPeriod::TenMinutes).unwrap()
}

fn id() -> U256 {
    LockId::new(tag(), NATIVE_TOKEN).as_u256()
}

fn sponsor() -> Address {
    Address::repeat_byte(0x11)
}

fn recipient() -> Address {
    Address::repeat_byte(0x22)
}

fn header() -> ClaimHeader {
    ClaimHeader {
        sponsor: sponsor(),
        nonce: U256::from(1u64),
        expires: U256::from(1_700_000_000u64),
        witness: B256::ZERO,
    }
}

fn domain() -> TypedDataDomain {
    TypedDataDomain::new(1, Address::repeat_byte(0x99))
}

fn assert_message_matches_schema(typed_data: &TypedData) {
    let keys: Vec<&str> = typed_data.message.keys().map(String::as_str).collect();
    let names: Vec<&str> = typed_data
        .primary_fields()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(keys, names);
}

#[test]
fn single_claim_known_hash() {
    let mut builder = SingleClaimBuilder::new(domain());
    builder
        .sponsor(sponsor())
        .nonce(U256::from(1u64))
        .expires(U256::from(1_700_000_000u64))
        .lock_tag(tag())
        .id(id())
        .allocated_amount(U256::from(1000u64))
        .add_transfer(recipient(), U256::from(1000u64))
        .unwrap();
    let built = builder.build().unwrap();

    assert_eq!(
        built.hash.to_string(),
        "0xf7fae1db3f5a4efc8a9fb52bf09aa384b38e9317e961d11903c7ee2fabc937dc"
    );
    assert_eq!(
        built.hash,
        single_claim_hash(&header(), id(), U256::from(1000u64))
    );
    assert_eq!(built.claim.claimants.len(), 1);
    assert_eq!(built.typed_data.primary_type, "Claim");
    assert_eq!(built.typed_data.domain, domain());
    assert_message_matches_schema(&built.typed_data);
}

#[test]
fn invariant_ordering_sponsor_then_claimant() {
    let mut builder = SingleClaimBuilder::default();
    builder
        .nonce(U256::from(1u64))
        .expires(U256::from(1_700_000_000u64))
        .lock_tag(tag())
        .id(id())
        .allocated_amount(U256::from(1000u64))
        .add_transfer(recipient(), U256::from(1000u64))
        .unwrap();
    let err = builder.build().unwrap_err();
    assert_eq!(err.to_string(), "sponsor is required");

    let mut builder = SingleClaimBuilder::default();
    builder
        .sponsor(sponsor())
        .nonce(U256::from(1u64))
        .expires(U256::from(1_700_000_000u64))
        .lock_tag(tag())
        .id(id())
        .allocated_amount(U256::from(1000u64));
    let err = builder.build().unwrap_err();
    assert_eq!(err.to_string(), "at least one claimant is required");
}

#[test]
fn common_fields_checked_before_id_section() {
    let mut builder = SingleClaimBuilder::default();
    builder.sponsor(sponsor());
    assert_eq!(builder.build().unwrap_err(), ClaimError::MissingField("nonce"));
    builder.nonce(U256::ZERO);
    assert_eq!(builder.build().unwrap_err(), ClaimError::MissingField("expires"));
    builder.expires(U256::ZERO);
    assert_eq!(builder.build().unwrap_err(), ClaimError::MissingField("id"));
    builder.id(id());
    assert_eq!(
        builder.build().unwrap_err(),
        ClaimError::MissingField("allocatedAmount")
    );
}

#[test]
fn built_claim_is_isolated_from_builder() {
    let mut builder = SingleClaimBuilder::default();
    builder
        .sponsor(sponsor())
        .nonce(U256::from(1u64))
        .expires(U256::from(1_700_000_000u64))
        .lock_tag(tag())
        .id(id())
        .allocated_amount(U256::from(1000u64))
        .add_transfer(recipient(), U256::from(600u64))
        .unwrap();
    let first = builder.build().unwrap();

    builder
        .add_withdraw(recipient(), U256::from(400u64))
        .unwrap()
        .nonce(U256::from(2u64));
    let second = builder.build().unwrap();

    assert_eq!(first.claim.claimants.len(), 1);
    assert_eq!(first.claim.nonce, U256::from(1u64));
    assert_eq!(second.claim.claimants.len(), 2);
    assert_ne!(first.hash, second.hash);
}

#[test]
fn claimants_decode_by_kind() {
    let mut builder = SingleClaimBuilder::default();
    builder
        .lock_tag(tag())
        .add_transfer(recipient(), U256::from(1u64))
        .unwrap()
        .add_convert(recipient(), U256::from(2u64), other_tag())
        .unwrap()
        .add_withdraw(recipient(), U256::from(3u64))
        .unwrap();
    let kinds: Vec<ClaimantKind> = builder
        .claimants()
        .iter()
        .map(|c| decode_component(c, Some(tag())).kind)
        .collect();
    assert_eq!(
        kinds,
        vec![ClaimantKind::Transfer, ClaimantKind::Convert, ClaimantKind::Withdraw]
    );
}

#[test]
fn batch_claim_matches_batch_hash() {
    let second_id = LockId::new(other_tag(), Address::repeat_byte(0x44)).as_u256();
    let mut builder = BatchClaimBuilder::new(domain());
    builder
        .sponsor(sponsor())
        .nonce(U256::from(1u64))
        .expires(U256::from(1_700_000_000u64));
    builder
        .add_claim()
        .lock_tag(tag())
        .id(id())
        .allocated_amount(U256::from(1000u64))
        .add_transfer(recipient(), U256::from(1000u64))
        .unwrap()
        .done()
        .unwrap()
        .add_claim()
        .lock_tag(other_tag())
        .id(second_id)
        .allocated_amount(U256::from(50u64))
        .add_withdraw(recipient(), U256::from(50u64))
        .unwrap();
    let built = builder.build().unwrap();

    let pairs = [
        IdAndAmount {
            id: id(),
            amount: U256::from(1000u64),
        },
        IdAndAmount {
            id: second_id,
            amount: U256::from(50u64),
        },
    ];
    assert_eq!(built.hash, batch_claim_hash(&header(), &pairs));
    assert_eq!(built.claim.claims.len(), 2);
    assert_eq!(built.typed_data.primary_type, "BatchClaim");
    assert_message_matches_schema(&built.typed_data);
}

#[test]
fn batch_single_component_known_hash() {
    let mut builder = BatchClaimBuilder::default();
    builder
        .sponsor(sponsor())
        .nonce(U256::from(1u64))
        .expires(U256::from(1_700_000_000u64))
        .add_claim()
        .lock_tag(tag())
        .id(id())
        .allocated_amount(U256::from(1000u64))
        .add_transfer(recipient(), U256::from(1000u64))
        .unwrap();
    assert_eq!(
        builder.build().unwrap().hash.to_string(),
        "0x655753fc9943b7660c12173dc4d8ec30db893a434f511484ca30f34c9eaf0cb2"
    );
}

#[test]
fn batch_requires_claims_and_validates_pending_components() {
    let mut builder = BatchClaimBuilder::default();
    builder
        .sponsor(sponsor())
        .nonce(U256::ZERO)
        .expires(U256::ZERO);
    assert_eq!(
        builder.build().unwrap_err().to_string(),
        "at least one claim is required"
    );

    builder.add_claim().id(id()).allocated_amount(U256::from(1u64));
    assert_eq!(
        builder.build().unwrap_err().to_string(),
        "at least one portion is required"
    );
}

#[test]
fn component_mutation_after_build_does_not_leak() {
    let mut builder = BatchClaimBuilder::default();
    builder
        .sponsor(sponsor())
        .nonce(U256::ZERO)
        .expires(U256::ZERO)
        .add_claim()
        .lock_tag(tag())
        .id(id())
        .allocated_amount(U256::from(10u64))
        .add_transfer(recipient(), U256::from(10u64))
        .unwrap();
    let built = builder.build().unwrap();

    builder
        .claim(0)
        .unwrap()
        .add_withdraw(recipient(), U256::from(5u64))
        .unwrap();
    assert_eq!(built.claim.claims[0].portions.len(), 1);
    assert_eq!(builder.build().unwrap().claim.claims[0].portions.len(), 2);
}

#[test]
fn multichain_carries_additional_chains_outside_hash() {
    let mut builder = MultichainClaimBuilder::default();
    builder
        .sponsor(sponsor())
        .nonce(U256::from(1u64))
        .expires(U256::from(1_700_000_000u64))
        .lock_tag(tag())
        .id(id())
        .allocated_amount(U256::from(1000u64))
        .add_transfer(recipient(), U256::from(1000u64))
        .unwrap();
    let without = builder.build().unwrap();
    builder.add_additional_chain(B256::repeat_byte(0xaa));
    let with = builder.build().unwrap();

    assert_eq!(without.hash, with.hash);
    assert_eq!(with.claim.additional_chains, vec![B256::repeat_byte(0xaa)]);
    assert_eq!(with.typed_data.primary_type, "MultichainClaim");
    assert_message_matches_schema(&with.typed_data);
}

#[test]
fn batch_multichain_builds() {
    let mut builder = BatchMultichainClaimBuilder::default();
    builder
        .sponsor(sponsor())
        .nonce(U256::from(1u64))
        .expires(U256::from(1_700_000_000u64))
        .additional_chains([B256::repeat_byte(0x01), B256::repeat_byte(0x02)])
        .add_claim()
        .lock_tag(tag())
        .id(id())
        .allocated_amount(U256::from(1000u64))
        .add_transfer(recipient(), U256::from(1000u64))
        .unwrap();
    let built = builder.build().unwrap();
    assert_eq!(built.claim.additional_chains.len(), 2);
    assert_eq!(
        built.hash.to_string(),
        "0x655753fc9943b7660c12173dc4d8ec30db893a434f511484ca30f34c9eaf0cb2"
    );
    assert_message_matches_schema(&built.typed_data);
}

#[test]
fn exogenous_requires_chain_index_then_notarized_chain() {
    let mut builder = ExogenousMultichainClaimBuilder::default();
    builder
        .sponsor(sponsor())
        .nonce(U256::from(1u64))
        .expires(U256::from(1_700_000_000u64))
        .lock_tag(tag())
        .id(id())
        .allocated_amount(U256::from(1000u64))
        .add_transfer(recipient(), U256::from(1000u64))
        .unwrap();
    assert_eq!(
        builder.build().unwrap_err(),
        ClaimError::MissingField("chainIndex")
    );
    builder.chain_index(U256::from(1u64));
    assert_eq!(
        builder.build().unwrap_err(),
        ClaimError::MissingField("notarizedChainId")
    );
    builder.notarized_chain_id(U256::from(10u64));
    let built = builder.build().unwrap();
    assert_eq!(built.claim.chain_index, U256::from(1u64));
    assert_eq!(
        built.hash,
        single_claim_hash(&header(), id(), U256::from(1000u64))
    );
    assert_message_matches_schema(&built.typed_data);
}

#[test]
fn exogenous_batch_builds() {
    let mut builder = ExogenousBatchMultichainClaimBuilder::default();
    builder
        .sponsor(sponsor())
        .nonce(U256::from(1u64))
        .expires(U256::from(1_700_000_000u64))
        .chain_index(U256::ZERO)
        .notarized_chain_id(U256::from(8453u64))
        .sponsor_signature(Bytes::from_static(&[0x01, 0x02]))
        .add_claim()
        .lock_tag(tag())
        .id(id())
        .allocated_amount(U256::from(1000u64))
        .add_transfer(recipient(), U256::from(1000u64))
        .unwrap();
    let built = builder.build().unwrap();
    assert_eq!(built.typed_data.primary_type, "ExogenousBatchMultichainClaim");
    assert_eq!(
        built.typed_data.message["sponsorSignature"],
        serde_json::json!("0x0102")
    );
    assert_eq!(
        built.typed_data.message["notarizedChainId"],
        serde_json::json!("8453")
    );
    assert_message_matches_schema(&built.typed_data);
}

#[test]
fn built_claim_serializes_struct_hash_typed_data() {
    let mut builder = SingleClaimBuilder::default();
    builder
        .sponsor(sponsor())
        .nonce(U256::from(1u64))
        .expires(U256::from(1_700_000_000u64))
        .lock_tag(tag())
        .id(id())
        .allocated_amount(U256::from(1000u64))
        .add_transfer(recipient(), U256::from(1000u64))
        .unwrap();
    let json = serde_json::to_value(builder.build().unwrap()).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["struct", "hash", "typedData"]);
    assert_eq!(json["typedData"]["primaryType"], "Claim");
    assert_eq!(
        json["typedData"]["message"]["sponsor"],
        serde_json::json!(sponsor().to_checksum(None))
    );
}

#[test]
fn type_strings_are_derived_from_schema() {
    let built_type = {
        let mut builder = SingleClaimBuilder::default();
        builder
            .sponsor(sponsor())
            .nonce(U256::ZERO)
            .expires(U256::ZERO)
            .lock_tag(tag())
            .id(id())
            .allocated_amount(U256::from(1u64))
            .add_withdraw(recipient(), U256::from(1u64))
            .unwrap();
        builder.build().unwrap().typed_data.type_string()
    };
    assert_eq!(built_type, compact_claims::Single::type_string());
    assert!(compact_claims::ExogenousMultichain::type_string().starts_with(
        "ExogenousMultichainClaim(bytes allocatorData,"
    ));
    assert!(compact_claims::ExogenousMultichain::type_string()
        .ends_with("uint256 notarizedChainId)Component(uint256 claimant,uint256 amount)"));
}
