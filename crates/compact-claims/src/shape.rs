//! # Claim Shapes
//!
//! A claim shape is described by three orthogonal choices:
//!
//! - **Id layout**: one `(id, allocatedAmount, claimants)` triple
//!   ([`SingleId`]) or a list of batch components ([`MultiId`]).
//! - **Extension**: nothing, cross-chain `additionalChains`, or cross-chain
//!   plus the exogenous `chainIndex` / `notarizedChainId` slot.
//! - **Wire struct**: the payload the shape assembles into.
//!
//! Each marker type below fixes those choices once, and the single builder
//! engine in [`crate::builder`] is instantiated with it. Validation,
//! hashing and typed-data assembly are written once per layout and once per
//! extension, so the six shapes cannot drift apart.
//!
//! ## Validation Order
//!
//! ```text
//! sponsor → nonce → expires
//!   → SingleId: id → allocatedAmount → at least one claimant
//!   → MultiId:  at least one claim → per component: id → allocatedAmount → at least one portion
//!   → Exogenous: chainIndex → notarizedChainId
//! ```
//!
//! The first unmet requirement is reported.

use std::fmt::Debug;

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use compact_core::{ClaimError, Component};
use compact_crypto::{batch_claim_hash, single_claim_hash, ClaimHeader, IdAndAmount};

use crate::builder::ClaimDraft;
use crate::claim::{
    BatchClaim, BatchClaimComponent, BatchMultichainClaim, Claim, ExogenousBatchMultichainClaim,
    ExogenousMultichainClaim, MultichainClaim,
};
use crate::typed_data::{
    address_value, bytes32_value, bytes_value, components_value, encode_type, uint_value,
    TypeSchema, TypedDataField,
};

// ─── Shape Kind ──────────────────────────────────────────────────────

/// Runtime identifier of a claim shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Single,
    Batch,
    Multichain,
    BatchMultichain,
    ExogenousMultichain,
    ExogenousBatchMultichain,
}

impl ShapeKind {
    /// Name of the shape's top-level typed-data struct.
    pub fn primary_type(&self) -> &'static str {
        match self {
            Self::Single => "Claim",
            Self::Batch => "BatchClaim",
            Self::Multichain => "MultichainClaim",
            Self::BatchMultichain => "BatchMultichainClaim",
            Self::ExogenousMultichain => "ExogenousMultichainClaim",
            Self::ExogenousBatchMultichain => "ExogenousBatchMultichainClaim",
        }
    }

    /// Returns the kebab-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Batch => "batch",
            Self::Multichain => "multichain",
            Self::BatchMultichain => "batch-multichain",
            Self::ExogenousMultichain => "exogenous-multichain",
            Self::ExogenousBatchMultichain => "exogenous-batch-multichain",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Sealed Traits ───────────────────────────────────────────────────

mod private {
    pub trait Sealed {}
    impl Sealed for super::SingleId {}
    impl Sealed for super::MultiId {}
    impl Sealed for super::NoExtension {}
    impl Sealed for super::CrossChainFields {}
    impl Sealed for super::ExogenousFields {}
    impl Sealed for super::Single {}
    impl Sealed for super::Batch {}
    impl Sealed for super::Multichain {}
    impl Sealed for super::BatchMultichain {}
    impl Sealed for super::ExogenousMultichain {}
    impl Sealed for super::ExogenousBatchMultichain {}
}

// ─── Common Fields ───────────────────────────────────────────────────

/// The validated fields every shape starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonFields {
    /// Opaque allocator authorization.
    pub allocator_data: Bytes,
    /// Sponsor's signature over the compact.
    pub sponsor_signature: Bytes,
    /// Account whose resources are claimed.
    pub sponsor: Address,
    /// Allocator-scoped replay nonce.
    pub nonce: U256,
    /// Expiry timestamp in seconds.
    pub expires: U256,
    /// Witness hash; zero when unused.
    pub witness: B256,
    /// Witness type fragment; empty when unused.
    pub witness_typestring: String,
}

impl CommonFields {
    pub(crate) fn validate(draft: &ClaimDraft) -> Result<Self, ClaimError> {
        let sponsor = draft.sponsor.ok_or(ClaimError::MissingField("sponsor"))?;
        let nonce = draft.nonce.ok_or(ClaimError::MissingField("nonce"))?;
        let expires = draft.expires.ok_or(ClaimError::MissingField("expires"))?;
        Ok(Self {
            allocator_data: draft.allocator_data.clone(),
            sponsor_signature: draft.sponsor_signature.clone(),
            sponsor,
            nonce,
            expires,
            witness: draft.witness,
            witness_typestring: draft.witness_typestring.clone(),
        })
    }

    /// The claim-hash preimage header.
    pub fn header(&self) -> ClaimHeader {
        ClaimHeader {
            sponsor: self.sponsor,
            nonce: self.nonce,
            expires: self.expires,
            witness: self.witness,
        }
    }

    fn schema_fields() -> Vec<TypedDataField> {
        vec![
            TypedDataField::new("allocatorData", "bytes"),
            TypedDataField::new("sponsorSignature", "bytes"),
            TypedDataField::new("sponsor", "address"),
            TypedDataField::new("nonce", "uint256"),
            TypedDataField::new("expires", "uint256"),
            TypedDataField::new("witness", "bytes32"),
            TypedDataField::new("witnessTypestring", "string"),
        ]
    }

    fn write_message(&self, message: &mut Map<String, Value>) {
        message.insert("allocatorData".into(), bytes_value(&self.allocator_data));
        message.insert("sponsorSignature".into(), bytes_value(&self.sponsor_signature));
        message.insert("sponsor".into(), address_value(self.sponsor));
        message.insert("nonce".into(), uint_value(self.nonce));
        message.insert("expires".into(), uint_value(self.expires));
        message.insert("witness".into(), bytes32_value(self.witness));
        message.insert(
            "witnessTypestring".into(),
            Value::String(self.witness_typestring.clone()),
        );
    }
}

// ─── Id Layouts ──────────────────────────────────────────────────────

/// How a shape carries its lock ids and amounts.
pub trait IdLayout: private::Sealed + Debug {
    /// The validated id section.
    type Payload: Clone + Debug + PartialEq;

    /// Validate the id section of a draft.
    fn validate(draft: &ClaimDraft) -> Result<Self::Payload, ClaimError>;

    /// Compute the raw claim hash.
    fn claim_hash(header: &ClaimHeader, payload: &Self::Payload) -> B256;

    /// Fields appended to the primary struct after the common fields.
    fn schema_fields() -> Vec<TypedDataField>;

    /// Struct types referenced by [`IdLayout::schema_fields`].
    fn struct_types() -> Vec<(&'static str, Vec<TypedDataField>)>;

    /// Append the id section to a typed-data message.
    fn write_message(payload: &Self::Payload, message: &mut Map<String, Value>);
}

fn component_struct() -> (&'static str, Vec<TypedDataField>) {
    (
        "Component",
        vec![
            TypedDataField::new("claimant", "uint256"),
            TypedDataField::new("amount", "uint256"),
        ],
    )
}

/// One lock id per claim.
#[derive(Debug, Clone, Copy)]
pub struct SingleId;

/// The validated id section of a single-id claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleIdPayload {
    pub id: U256,
    pub allocated_amount: U256,
    pub claimants: Vec<Component>,
}

impl IdLayout for SingleId {
    type Payload = SingleIdPayload;

    fn validate(draft: &ClaimDraft) -> Result<SingleIdPayload, ClaimError> {
        let id = draft.id.ok_or(ClaimError::MissingField("id"))?;
        let allocated_amount = draft
            .allocated_amount
            .filter(|amount| !amount.is_zero())
            .ok_or(ClaimError::MissingField("allocatedAmount"))?;
        if draft.claimants.is_empty() {
            return Err(ClaimError::MissingField("at least one claimant"));
        }
        Ok(SingleIdPayload {
            id,
            allocated_amount,
            claimants: draft.claimants.clone(),
        })
    }

    fn claim_hash(header: &ClaimHeader, payload: &SingleIdPayload) -> B256 {
        single_claim_hash(header, payload.id, payload.allocated_amount)
    }

    fn schema_fields() -> Vec<TypedDataField> {
        vec![
            TypedDataField::new("id", "uint256"),
            TypedDataField::new("allocatedAmount", "uint256"),
            TypedDataField::new("claimants", "Component[]"),
        ]
    }

    fn struct_types() -> Vec<(&'static str, Vec<TypedDataField>)> {
        vec![component_struct()]
    }

    fn write_message(payload: &SingleIdPayload, message: &mut Map<String, Value>) {
        message.insert("id".into(), uint_value(payload.id));
        message.insert("allocatedAmount".into(), uint_value(payload.allocated_amount));
        message.insert("claimants".into(), components_value(&payload.claimants));
    }
}

/// A list of batch components per claim.
#[derive(Debug, Clone, Copy)]
pub struct MultiId;

impl IdLayout for MultiId {
    type Payload = Vec<BatchClaimComponent>;

    fn validate(draft: &ClaimDraft) -> Result<Vec<BatchClaimComponent>, ClaimError> {
        if draft.claims.is_empty() {
            return Err(ClaimError::MissingField("at least one claim"));
        }
        draft.claims.iter().map(|c| c.finalize()).collect()
    }

    fn claim_hash(header: &ClaimHeader, payload: &Vec<BatchClaimComponent>) -> B256 {
        let pairs: Vec<IdAndAmount> = payload
            .iter()
            .map(|c| IdAndAmount {
                id: c.id,
                amount: c.allocated_amount,
            })
            .collect();
        batch_claim_hash(header, &pairs)
    }

    fn schema_fields() -> Vec<TypedDataField> {
        vec![TypedDataField::new("claims", "BatchClaimComponent[]")]
    }

    fn struct_types() -> Vec<(&'static str, Vec<TypedDataField>)> {
        vec![
            (
                "BatchClaimComponent",
                vec![
                    TypedDataField::new("id", "uint256"),
                    TypedDataField::new("allocatedAmount", "uint256"),
                    TypedDataField::new("portions", "Component[]"),
                ],
            ),
            component_struct(),
        ]
    }

    fn write_message(payload: &Vec<BatchClaimComponent>, message: &mut Map<String, Value>) {
        let claims = payload
            .iter()
            .map(|c| {
                let mut object = Map::new();
                object.insert("id".into(), uint_value(c.id));
                object.insert("allocatedAmount".into(), uint_value(c.allocated_amount));
                object.insert("portions".into(), components_value(&c.portions));
                Value::Object(object)
            })
            .collect();
        message.insert("claims".into(), Value::Array(claims));
    }
}

// ─── Extensions ──────────────────────────────────────────────────────

/// Fields a shape carries after its id section.
pub trait ShapeExtension: private::Sealed + Debug + Sized {
    /// Validate the extension fields of a draft.
    fn validate(draft: &ClaimDraft) -> Result<Self, ClaimError>;

    /// Fields appended to the primary struct after the id section.
    fn schema_fields() -> Vec<TypedDataField>;

    /// Append the extension fields to a typed-data message.
    fn write_message(&self, message: &mut Map<String, Value>);
}

/// Same-chain shapes carry no extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoExtension;

impl ShapeExtension for NoExtension {
    fn validate(_draft: &ClaimDraft) -> Result<Self, ClaimError> {
        Ok(Self)
    }

    fn schema_fields() -> Vec<TypedDataField> {
        Vec::new()
    }

    fn write_message(&self, _message: &mut Map<String, Value>) {}
}

/// Claim hashes of the other elements of a cross-chain claim set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossChainFields {
    pub additional_chains: Vec<B256>,
}

impl ShapeExtension for CrossChainFields {
    fn validate(draft: &ClaimDraft) -> Result<Self, ClaimError> {
        Ok(Self {
            additional_chains: draft.additional_chains.clone(),
        })
    }

    fn schema_fields() -> Vec<TypedDataField> {
        vec![TypedDataField::new("additionalChains", "bytes32[]")]
    }

    fn write_message(&self, message: &mut Map<String, Value>) {
        let chains = self
            .additional_chains
            .iter()
            .map(|hash| bytes32_value(*hash))
            .collect();
        message.insert("additionalChains".into(), Value::Array(chains));
    }
}

/// Cross-chain fields plus this chain's slot in the claim set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExogenousFields {
    pub additional_chains: Vec<B256>,
    pub chain_index: U256,
    pub notarized_chain_id: U256,
}

impl ShapeExtension for ExogenousFields {
    fn validate(draft: &ClaimDraft) -> Result<Self, ClaimError> {
        let CrossChainFields { additional_chains } = CrossChainFields::validate(draft)?;
        let chain_index = draft
            .chain_index
            .ok_or(ClaimError::MissingField("chainIndex"))?;
        let notarized_chain_id = draft
            .notarized_chain_id
            .ok_or(ClaimError::MissingField("notarizedChainId"))?;
        Ok(Self {
            additional_chains,
            chain_index,
            notarized_chain_id,
        })
    }

    fn schema_fields() -> Vec<TypedDataField> {
        let mut fields = CrossChainFields::schema_fields();
        fields.push(TypedDataField::new("chainIndex", "uint256"));
        fields.push(TypedDataField::new("notarizedChainId", "uint256"));
        fields
    }

    fn write_message(&self, message: &mut Map<String, Value>) {
        CrossChainFields {
            additional_chains: self.additional_chains.clone(),
        }
        .write_message(message);
        message.insert("chainIndex".into(), uint_value(self.chain_index));
        message.insert("notarizedChainId".into(), uint_value(self.notarized_chain_id));
    }
}

// ─── Claim Shapes ────────────────────────────────────────────────────

/// A concrete claim shape: id layout, extension and wire struct.
///
/// Sealed: only the six shapes defined in this module implement it.
pub trait ClaimShape: private::Sealed + Debug + Sized {
    /// Runtime identifier.
    const KIND: ShapeKind;

    /// How ids and amounts are carried.
    type Ids: IdLayout;

    /// Fields after the id section.
    type Extension: ShapeExtension;

    /// The assembled wire struct.
    type Claim: Clone + Debug + PartialEq + Serialize;

    /// Assemble the wire struct from validated parts.
    fn assemble(
        common: CommonFields,
        ids: <Self::Ids as IdLayout>::Payload,
        extension: Self::Extension,
    ) -> Self::Claim;

    /// The typed-data struct definitions of this shape.
    fn schema() -> TypeSchema {
        let mut fields = CommonFields::schema_fields();
        fields.extend(Self::Ids::schema_fields());
        fields.extend(Self::Extension::schema_fields());

        let mut types = TypeSchema::new();
        types.insert(Self::KIND.primary_type().to_string(), fields);
        for (name, members) in Self::Ids::struct_types() {
            types.insert(name.to_string(), members);
        }
        types
    }

    /// The encoded type string of this shape's primary struct.
    fn type_string() -> String {
        encode_type(Self::KIND.primary_type(), &Self::schema())
    }

    /// The typed-data message for validated parts, in schema order.
    fn message(
        common: &CommonFields,
        ids: &<Self::Ids as IdLayout>::Payload,
        extension: &Self::Extension,
    ) -> Map<String, Value> {
        let mut message = Map::new();
        common.write_message(&mut message);
        Self::Ids::write_message(ids, &mut message);
        extension.write_message(&mut message);
        message
    }
}

/// Shapes that reference other chains' claim hashes.
pub trait CrossChainShape: ClaimShape {}

/// Shapes processed outside the chain their element was notarized on.
pub trait ExogenousShape: CrossChainShape {}

/// Single-lock, same-chain claim.
#[derive(Debug, Clone, Copy)]
pub struct Single;

/// Multi-lock, same-chain claim.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

/// Single-lock element of a cross-chain claim set.
#[derive(Debug, Clone, Copy)]
pub struct Multichain;

/// Multi-lock element of a cross-chain claim set.
#[derive(Debug, Clone, Copy)]
pub struct BatchMultichain;

/// Single-lock element processed off its notarized chain.
#[derive(Debug, Clone, Copy)]
pub struct ExogenousMultichain;

/// Multi-lock element processed off its notarized chain.
#[derive(Debug, Clone, Copy)]
pub struct ExogenousBatchMultichain;

impl ClaimShape for Single {
    const KIND: ShapeKind = ShapeKind::Single;
    type Ids = SingleId;
    type Extension = NoExtension;
    type Claim = Claim;

    fn assemble(c: CommonFields, ids: SingleIdPayload, _: NoExtension) -> Claim {
        Claim {
            allocator_data: c.allocator_data,
            sponsor_signature: c.sponsor_signature,
            sponsor: c.sponsor,
            nonce: c.nonce,
            expires: c.expires,
            witness: c.witness,
            witness_typestring: c.witness_typestring,
            id: ids.id,
            allocated_amount: ids.allocated_amount,
            claimants: ids.claimants,
        }
    }
}

impl ClaimShape for Batch {
    const KIND: ShapeKind = ShapeKind::Batch;
    type Ids = MultiId;
    type Extension = NoExtension;
    type Claim = BatchClaim;

    fn assemble(c: CommonFields, claims: Vec<BatchClaimComponent>, _: NoExtension) -> BatchClaim {
        BatchClaim {
            allocator_data: c.allocator_data,
            sponsor_signature: c.sponsor_signature,
            sponsor: c.sponsor,
            nonce: c.nonce,
            expires: c.expires,
            witness: c.witness,
            witness_typestring: c.witness_typestring,
            claims,
        }
    }
}

impl ClaimShape for Multichain {
    const KIND: ShapeKind = ShapeKind::Multichain;
    type Ids = SingleId;
    type Extension = CrossChainFields;
    type Claim = MultichainClaim;

    fn assemble(c: CommonFields, ids: SingleIdPayload, x: CrossChainFields) -> MultichainClaim {
        MultichainClaim {
            allocator_data: c.allocator_data,
            sponsor_signature: c.sponsor_signature,
            sponsor: c.sponsor,
            nonce: c.nonce,
            expires: c.expires,
            witness: c.witness,
            witness_typestring: c.witness_typestring,
            id: ids.id,
            allocated_amount: ids.allocated_amount,
            claimants: ids.claimants,
            additional_chains: x.additional_chains,
        }
    }
}

impl ClaimShape for BatchMultichain {
    const KIND: ShapeKind = ShapeKind::BatchMultichain;
    type Ids = MultiId;
    type Extension = CrossChainFields;
    type Claim = BatchMultichainClaim;

    fn assemble(
        c: CommonFields,
        claims: Vec<BatchClaimComponent>,
        x: CrossChainFields,
    ) -> BatchMultichainClaim {
        BatchMultichainClaim {
            allocator_data: c.allocator_data,
            sponsor_signature: c.sponsor_signature,
            sponsor: c.sponsor,
            nonce: c.nonce,
            expires: c.expires,
            witness: c.witness,
            witness_typestring: c.witness_typestring,
            claims,
            additional_chains: x.additional_chains,
        }
    }
}

impl ClaimShape for ExogenousMultichain {
    const KIND: ShapeKind = ShapeKind::ExogenousMultichain;
    type Ids = SingleId;
    type Extension = ExogenousFields;
    type Claim = ExogenousMultichainClaim;

    fn assemble(
        c: CommonFields,
        ids: SingleIdPayload,
        x: ExogenousFields,
    ) -> ExogenousMultichainClaim {
        ExogenousMultichainClaim {
            allocator_data: c.allocator_data,
            sponsor_signature: c.sponsor_signature,
            sponsor: c.sponsor,
            nonce: c.nonce,
            expires: c.expires,
            witness: c.witness,
            witness_typestring: c.witness_typestring,
            id: ids.id,
            allocated_amount: ids.allocated_amount,
            claimants: ids.claimants,
            additional_chains: x.additional_chains,
            chain_index: x.chain_index,
            notarized_chain_id: x.notarized_chain_id,
        }
    }
}

impl ClaimShape for ExogenousBatchMultichain {
    const KIND: ShapeKind = ShapeKind::ExogenousBatchMultichain;
    type Ids = MultiId;
    type Extension = ExogenousFields;
    type Claim = ExogenousBatchMultichainClaim;

    fn assemble(
        c: CommonFields,
        claims: Vec<BatchClaimComponent>,
        x: ExogenousFields,
    ) -> ExogenousBatchMultichainClaim {
        ExogenousBatchMultichainClaim {
            allocator_data: c.allocator_data,
            sponsor_signature: c.sponsor_signature,
            sponsor: c.sponsor,
            nonce: c.nonce,
            expires: c.expires,
            witness: c.witness,
            witness_typestring: c.witness_typestring,
            claims,
            additional_chains: x.additional_chains,
            chain_index: x.chain_index,
            notarized_chain_id: x.notarized_chain_id,
        }
    }
}

impl CrossChainShape for Multichain {}
impl CrossChainShape for BatchMultichain {}
impl CrossChainShape for ExogenousMultichain {}
impl CrossChainShape for ExogenousBatchMultichain {}
impl ExogenousShape for ExogenousMultichain {}
impl ExogenousShape for ExogenousBatchMultichain {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_type_string() {
        assert_eq!(
            Single::type_string(),
            "Claim(bytes allocatorData,bytes sponsorSignature,address sponsor,uint256 nonce,\
             uint256 expires,bytes32 witness,string witnessTypestring,uint256 id,\
             uint256 allocatedAmount,Component[] claimants)\
             Component(uint256 claimant,uint256 amount)"
        );
    }

    #[test]
    fn batch_type_string_orders_referenced_structs() {
        assert_eq!(
            Batch::type_string(),
            "BatchClaim(bytes allocatorData,bytes sponsorSignature,address sponsor,\
             uint256 nonce,uint256 expires,bytes32 witness,string witnessTypestring,\
             BatchClaimComponent[] claims)\
             BatchClaimComponent(uint256 id,uint256 allocatedAmount,Component[] portions)\
             Component(uint256 claimant,uint256 amount)"
        );
    }

    #[test]
    fn exogenous_schema_appends_chain_slot() {
        let schema = ExogenousBatchMultichain::schema();
        let names: Vec<&str> = schema["ExogenousBatchMultichainClaim"]
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(
            &names[7..],
            &["claims", "additionalChains", "chainIndex", "notarizedChainId"]
        );
        assert!(schema.contains_key("BatchClaimComponent"));
        assert!(schema.contains_key("Component"));
    }

    #[test]
    fn multichain_schema() {
        let schema = Multichain::schema();
        let fields = &schema["MultichainClaim"];
        assert_eq!(fields.len(), 11);
        assert_eq!(fields[10], TypedDataField::new("additionalChains", "bytes32[]"));
        assert!(!schema.contains_key("BatchClaimComponent"));
    }

    #[test]
    fn shape_kind_names() {
        let kinds = [
            ShapeKind::Single,
            ShapeKind::Batch,
            ShapeKind::Multichain,
            ShapeKind::BatchMultichain,
            ShapeKind::ExogenousMultichain,
            ShapeKind::ExogenousBatchMultichain,
        ];
        for kind in kinds {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert!(kind.primary_type().ends_with("Claim"));
        }
    }
}
