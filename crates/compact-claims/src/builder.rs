//! # Claim Builder Engine
//!
//! One accumulator, [`ClaimBuilder`], instantiated per claim shape through
//! the [`ClaimShape`] type parameter. Setters are available on every shape;
//! id-section and extension setters are gated by the shape's layout and
//! marker traits, so a batch builder has no `add_transfer` and a same-chain
//! builder has no `add_additional_chain`.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty ──(any setter)──▶ Accumulating ──build()──▶ BuiltClaim
//! ```
//!
//! `build()` borrows the builder and clones every collection into the
//! result, so later mutation of the builder (or of one of its component
//! builders) never reaches a claim that has already been built. A builder
//! can therefore be reused as a template.
//!
//! ## Routing
//!
//! Transfer claimants route by the lock tag set with `lock_tag()`. The id
//! is never consulted, so setter order cannot change the routing. Adding a
//! routed claimant before the lock tag is set fails with
//! `ClaimError::PreconditionViolation`. `from_compact` and
//! `from_batch_compact` set the lock tag from the compact.

use std::marker::PhantomData;

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use compact_core::{
    build_component, BatchCompact, ClaimError, ClaimantInput, Compact, Component, LockId, LockTag,
};

use crate::component::{ComponentBuilder, ComponentDraft};
use crate::shape::{
    Batch, BatchMultichain, ClaimShape, CommonFields, CrossChainShape, ExogenousBatchMultichain,
    ExogenousMultichain, ExogenousShape, IdLayout, MultiId, Multichain, ShapeExtension,
    ShapeKind, Single, SingleId,
};
use crate::typed_data::{TypedData, TypedDataDomain};

/// Builder for [`crate::Claim`].
pub type SingleClaimBuilder = ClaimBuilder<Single>;
/// Builder for [`crate::BatchClaim`].
pub type BatchClaimBuilder = ClaimBuilder<Batch>;
/// Builder for [`crate::MultichainClaim`].
pub type MultichainClaimBuilder = ClaimBuilder<Multichain>;
/// Builder for [`crate::BatchMultichainClaim`].
pub type BatchMultichainClaimBuilder = ClaimBuilder<BatchMultichain>;
/// Builder for [`crate::ExogenousMultichainClaim`].
pub type ExogenousMultichainClaimBuilder = ClaimBuilder<ExogenousMultichain>;
/// Builder for [`crate::ExogenousBatchMultichainClaim`].
pub type ExogenousBatchMultichainClaimBuilder = ClaimBuilder<ExogenousBatchMultichain>;

pub(crate) const LOCK_TAG_UNSET: &str = "lock tag must be set before adding a claimant";

// ─── Draft ───────────────────────────────────────────────────────────

/// Unvalidated builder state shared by every shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimDraft {
    pub(crate) allocator_data: Bytes,
    pub(crate) sponsor_signature: Bytes,
    pub(crate) sponsor: Option<Address>,
    pub(crate) nonce: Option<U256>,
    pub(crate) expires: Option<U256>,
    pub(crate) witness: B256,
    pub(crate) witness_typestring: String,
    pub(crate) lock_tag: Option<LockTag>,
    pub(crate) id: Option<U256>,
    pub(crate) allocated_amount: Option<U256>,
    pub(crate) claimants: Vec<Component>,
    pub(crate) claims: Vec<ComponentDraft>,
    pub(crate) additional_chains: Vec<B256>,
    pub(crate) chain_index: Option<U256>,
    pub(crate) notarized_chain_id: Option<U256>,
}

impl ClaimDraft {
    fn routing_tag(&self) -> Result<LockTag, ClaimError> {
        self.lock_tag
            .ok_or_else(|| ClaimError::PreconditionViolation(LOCK_TAG_UNSET.to_string()))
    }
}

/// Whether a builder has been touched yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuilderState {
    /// No field has been set.
    Empty,
    /// At least one field has been set; nothing validated yet.
    Accumulating,
}

/// Overrides applied by [`ClaimBuilder::from_compact`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FromCompactOptions {
    /// Sponsor's signature over the compact.
    pub sponsor_signature: Bytes,
    /// Explicit claim id. Takes precedence over `token`.
    pub id: Option<U256>,
    /// Alternate token to derive the claim id with.
    pub token: Option<Address>,
}

// ─── Built Claim ─────────────────────────────────────────────────────

/// The frozen output of a successful `build()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltClaim<C> {
    /// The wire struct submitted to the verifying contract.
    #[serde(rename = "struct")]
    pub claim: C,
    /// The raw claim hash.
    pub hash: B256,
    /// The message handed to the external typed-data signer.
    pub typed_data: TypedData,
}

// ─── Engine ──────────────────────────────────────────────────────────

/// Fluent accumulator for a claim of shape `S`.
#[derive(Debug, Clone)]
pub struct ClaimBuilder<S: ClaimShape> {
    pub(crate) domain: TypedDataDomain,
    pub(crate) draft: ClaimDraft,
    touched: bool,
    _shape: PhantomData<S>,
}

impl<S: ClaimShape> ClaimBuilder<S> {
    /// An empty builder signing against `domain`.
    pub fn new(domain: TypedDataDomain) -> Self {
        Self {
            domain,
            draft: ClaimDraft::default(),
            touched: false,
            _shape: PhantomData,
        }
    }

    /// The shape this builder produces.
    pub fn kind(&self) -> ShapeKind {
        S::KIND
    }

    /// The signing domain.
    pub fn domain(&self) -> &TypedDataDomain {
        &self.domain
    }

    /// `Empty` until the first setter call, whatever value it sets.
    pub fn state(&self) -> BuilderState {
        if self.touched {
            BuilderState::Accumulating
        } else {
            BuilderState::Empty
        }
    }

    /// Mutable draft access for setters; marks the builder touched.
    pub(crate) fn draft_mut(&mut self) -> &mut ClaimDraft {
        self.touched = true;
        &mut self.draft
    }

    /// Set the account whose resources are claimed.
    pub fn sponsor(&mut self, sponsor: Address) -> &mut Self {
        self.draft_mut().sponsor = Some(sponsor);
        self
    }

    /// Set the replay nonce.
    pub fn nonce(&mut self, nonce: U256) -> &mut Self {
        self.draft_mut().nonce = Some(nonce);
        self
    }

    /// Set the expiry timestamp.
    pub fn expires(&mut self, expires: U256) -> &mut Self {
        self.draft_mut().expires = Some(expires);
        self
    }

    /// Set the witness hash.
    pub fn witness(&mut self, witness: B256) -> &mut Self {
        self.draft_mut().witness = witness;
        self
    }

    /// Set the witness type fragment.
    pub fn witness_typestring(&mut self, typestring: impl Into<String>) -> &mut Self {
        self.draft_mut().witness_typestring = typestring.into();
        self
    }

    /// Set the opaque allocator authorization.
    pub fn allocator_data(&mut self, data: impl Into<Bytes>) -> &mut Self {
        self.draft_mut().allocator_data = data.into();
        self
    }

    /// Set the sponsor's signature.
    pub fn sponsor_signature(&mut self, signature: impl Into<Bytes>) -> &mut Self {
        self.draft_mut().sponsor_signature = signature.into();
        self
    }

    /// Validate the accumulated state and freeze it.
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::MissingField` naming the first unmet requirement,
    /// or `ClaimError::InvalidClaimant` for a zero-amount component.
    pub fn build(&self) -> Result<BuiltClaim<S::Claim>, ClaimError> {
        let common = CommonFields::validate(&self.draft)?;
        let ids = <S::Ids as IdLayout>::validate(&self.draft)?;
        let extension = <S::Extension as ShapeExtension>::validate(&self.draft)?;

        let hash = <S::Ids as IdLayout>::claim_hash(&common.header(), &ids);
        let typed_data = TypedData {
            domain: self.domain.clone(),
            types: S::schema(),
            primary_type: S::KIND.primary_type().to_string(),
            message: S::message(&common, &ids, &extension),
        };
        let claim = S::assemble(common, ids, extension);

        tracing::debug!(shape = %S::KIND, claim_hash = %hash, "claim built");
        Ok(BuiltClaim {
            claim,
            hash,
            typed_data,
        })
    }
}

impl<S: ClaimShape> Default for ClaimBuilder<S> {
    fn default() -> Self {
        Self::new(TypedDataDomain::default())
    }
}

// ─── Single-id Shapes ────────────────────────────────────────────────

impl<S: ClaimShape<Ids = SingleId>> ClaimBuilder<S> {
    /// Set the tag transfer claimants route by.
    pub fn lock_tag(&mut self, lock_tag: LockTag) -> &mut Self {
        self.draft_mut().lock_tag = Some(lock_tag);
        self
    }

    /// Set the resource lock id.
    pub fn id(&mut self, id: U256) -> &mut Self {
        self.draft_mut().id = Some(id);
        self
    }

    /// Set the amount committed from the lock. Zero counts as unset.
    pub fn allocated_amount(&mut self, amount: U256) -> &mut Self {
        self.draft_mut().allocated_amount = Some(amount);
        self
    }

    /// Pack and append a claimant.
    ///
    /// # Errors
    ///
    /// `PreconditionViolation` if no lock tag is known yet;
    /// `InvalidClaimant` if the amount is zero.
    pub fn add_claimant(&mut self, input: &ClaimantInput) -> Result<&mut Self, ClaimError> {
        let routing_tag = self.draft.routing_tag()?;
        let component = build_component(routing_tag, input)?;
        self.draft_mut().claimants.push(component);
        Ok(self)
    }

    /// Append a transfer to `recipient` under the claim's lock tag.
    pub fn add_transfer(
        &mut self,
        recipient: Address,
        amount: U256,
    ) -> Result<&mut Self, ClaimError> {
        self.add_claimant(&ClaimantInput::Transfer { recipient, amount })
    }

    /// Append a conversion into the lock identified by `target_lock_tag`.
    pub fn add_convert(
        &mut self,
        recipient: Address,
        amount: U256,
        target_lock_tag: LockTag,
    ) -> Result<&mut Self, ClaimError> {
        self.add_claimant(&ClaimantInput::Convert {
            recipient,
            amount,
            target_lock_tag,
        })
    }

    /// Append a withdrawal of the underlying token.
    pub fn add_withdraw(
        &mut self,
        recipient: Address,
        amount: U256,
    ) -> Result<&mut Self, ClaimError> {
        self.add_claimant(&ClaimantInput::Withdraw { recipient, amount })
    }

    /// Append an already-packed component without routing it.
    pub fn add_component(&mut self, component: Component) -> Result<&mut Self, ClaimError> {
        component.validate()?;
        self.draft_mut().claimants.push(component);
        Ok(self)
    }

    /// Components appended so far.
    pub fn claimants(&self) -> &[Component] {
        &self.draft.claimants
    }

    /// Prefill from a sponsor-signed compact.
    ///
    /// Copies sponsor, nonce, expires and lock tag, sets the allocated
    /// amount to the compact's amount, and derives the id from the lock tag
    /// and token. `options.id` replaces the derived id outright;
    /// `options.token` replaces the compact's token in the derivation.
    pub fn from_compact(&mut self, compact: &Compact, options: FromCompactOptions) -> &mut Self {
        let id = options.id.unwrap_or_else(|| {
            let token = options.token.unwrap_or(compact.token);
            LockId::new(compact.lock_tag, token).as_u256()
        });
        let draft = self.draft_mut();
        draft.sponsor = Some(compact.sponsor);
        draft.nonce = Some(compact.nonce);
        draft.expires = Some(compact.expires);
        draft.sponsor_signature = options.sponsor_signature;
        draft.lock_tag = Some(compact.lock_tag);
        draft.id = Some(id);
        draft.allocated_amount = Some(compact.amount);
        self
    }
}

// ─── Multi-id Shapes ─────────────────────────────────────────────────

impl<S: ClaimShape<Ids = MultiId>> ClaimBuilder<S> {
    /// Open a new claim component.
    ///
    /// The component is registered with the builder immediately; calling
    /// `done()` on it is optional because `build()` validates every
    /// pending component.
    pub fn add_claim(&mut self) -> ComponentBuilder<'_, S> {
        self.draft_mut().claims.push(ComponentDraft::default());
        let index = self.draft.claims.len() - 1;
        ComponentBuilder::new(self, index)
    }

    /// Reopen an existing claim component.
    pub fn claim(&mut self, index: usize) -> Option<ComponentBuilder<'_, S>> {
        if index < self.draft.claims.len() {
            Some(ComponentBuilder::new(self, index))
        } else {
            None
        }
    }

    /// Number of claim components opened so far.
    pub fn claim_count(&self) -> usize {
        self.draft.claims.len()
    }

    /// Prefill from a sponsor-signed batch compact.
    ///
    /// Replaces any pending claim components with one per commitment, each
    /// with its id derived from the commitment and its allocated amount set
    /// to the committed amount. Portions are added afterwards via
    /// [`ClaimBuilder::claim`].
    pub fn from_batch_compact(
        &mut self,
        compact: &BatchCompact,
        sponsor_signature: impl Into<Bytes>,
    ) -> &mut Self {
        let draft = self.draft_mut();
        draft.sponsor = Some(compact.sponsor);
        draft.nonce = Some(compact.nonce);
        draft.expires = Some(compact.expires);
        draft.sponsor_signature = sponsor_signature.into();
        draft.claims = compact
            .commitments
            .iter()
            .map(|lock| ComponentDraft {
                lock_tag: Some(lock.lock_tag),
                id: Some(lock.lock_id().as_u256()),
                allocated_amount: Some(lock.amount),
                portions: Vec::new(),
            })
            .collect();
        self
    }
}

// ─── Cross-chain Shapes ──────────────────────────────────────────────

impl<S: CrossChainShape> ClaimBuilder<S> {
    /// Append the claim hash of another element of the claim set.
    pub fn add_additional_chain(&mut self, claim_hash: B256) -> &mut Self {
        self.draft_mut().additional_chains.push(claim_hash);
        self
    }

    /// Replace the additional chain hashes.
    pub fn additional_chains(&mut self, hashes: impl IntoIterator<Item = B256>) -> &mut Self {
        self.draft_mut().additional_chains = hashes.into_iter().collect();
        self
    }
}

impl<S: ExogenousShape> ClaimBuilder<S> {
    /// Set this chain's position in the claim set.
    pub fn chain_index(&mut self, index: U256) -> &mut Self {
        self.draft_mut().chain_index = Some(index);
        self
    }

    /// Set the chain id of the notarizing chain.
    pub fn notarized_chain_id(&mut self, chain_id: U256) -> &mut Self {
        self.draft_mut().notarized_chain_id = Some(chain_id);
        self
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use compact_core::{ResetPeriod, Scope};
    use compact_crypto::{batch_claim_hash, single_claim_hash, ClaimHeader, IdAndAmount};
    use proptest::prelude::*;

    fn word() -> impl Strategy<Value = U256> {
        any::<[u8; 32]>().prop_map(|bytes| U256::from_be_bytes(bytes))
    }

    fn nonzero() -> impl Strategy<Value = U256> {
        (1u64..).prop_map(|n| U256::from(n))
    }

    fn tag() -> LockTag {
        LockTag::encode(1, Scope::Multichain, ResetPeriod::OneMinute).unwrap()
    }

    proptest! {
        /// A single claim hashes exactly as the digest crate does.
        #[test]
        fn single_build_agrees_with_digest(
            nonce in word(),
            expires in word(),
            id in word(),
            amount in nonzero(),
        ) {
            let sponsor = Address::repeat_byte(0x11);
            let mut builder = SingleClaimBuilder::default();
            builder
                .sponsor(sponsor)
                .nonce(nonce)
                .expires(expires)
                .lock_tag(tag())
                .id(id)
                .allocated_amount(amount)
                .add_withdraw(Address::repeat_byte(0x22), amount)
                .unwrap();
            let header = ClaimHeader { sponsor, nonce, expires, witness: B256::ZERO };
            prop_assert_eq!(builder.build().unwrap().hash, single_claim_hash(&header, id, amount));
        }

        /// Batch components hash in insertion order.
        #[test]
        fn batch_build_agrees_with_digest(amounts in prop::collection::vec(nonzero(), 1..5)) {
            let sponsor = Address::repeat_byte(0x11);
            let mut builder = BatchClaimBuilder::default();
            builder.sponsor(sponsor).nonce(U256::ZERO).expires(U256::ZERO);
            let mut pairs = Vec::new();
            for (i, amount) in amounts.iter().enumerate() {
                let id = LockId::new(tag(), Address::with_last_byte(i as u8)).as_u256();
                builder
                    .add_claim()
                    .lock_tag(tag())
                    .id(id)
                    .allocated_amount(*amount)
                    .add_transfer(Address::repeat_byte(0x22), *amount)
                    .unwrap();
                pairs.push(IdAndAmount { id, amount: *amount });
            }
            let header = ClaimHeader {
                sponsor,
                nonce: U256::ZERO,
                expires: U256::ZERO,
                witness: B256::ZERO,
            };
            prop_assert_eq!(builder.build().unwrap().hash, batch_claim_hash(&header, &pairs));
        }
    }
}
