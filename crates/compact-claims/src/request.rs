//! # Claim Request Documents
//!
//! A serializable description of a claim that drives the matching builder.
//! Requests are how claims are assembled from files (YAML or JSON) rather
//! than from Rust code.
//!
//! ```yaml
//! shape: single
//! sponsor: "0x1111111111111111111111111111111111111111"
//! nonce: "0x1"
//! expires: "0x6553f100"
//! lockTag: "0xd00000000000000000003039"
//! id: "0xd000000000000000000030390000000000000000000000000000000000000000"
//! allocatedAmount: "0x3e8"
//! claimants:
//!   - kind: transfer
//!     recipient: "0x2222222222222222222222222222222222222222"
//!     amount: "0x3e8"
//! ```
//!
//! Fields that do not apply to the requested shape are ignored with a
//! warning.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use compact_core::{ClaimError, ClaimantInput, LockTag};

use crate::builder::{BuiltClaim, ClaimBuilder};
use crate::claim::{
    BatchClaim, BatchMultichainClaim, Claim, ExogenousBatchMultichainClaim,
    ExogenousMultichainClaim, MultichainClaim,
};
use crate::shape::{
    Batch, BatchMultichain, ClaimShape, CrossChainShape, ExogenousBatchMultichain,
    ExogenousMultichain, ExogenousShape, MultiId, Multichain, ShapeKind, Single, SingleId,
};
use crate::typed_data::TypedDataDomain;

/// One claim component of a multi-id request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentRequest {
    /// Tag transfer portions route by.
    pub lock_tag: Option<LockTag>,
    /// Resource lock id.
    pub id: Option<U256>,
    /// Amount committed from the lock.
    pub allocated_amount: Option<U256>,
    /// Portions, in claim order.
    pub portions: Vec<ClaimantInput>,
}

/// A claim of any shape, described as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    /// Which builder to drive.
    pub shape: ShapeKind,
    /// Opaque allocator authorization.
    #[serde(default)]
    pub allocator_data: Bytes,
    /// Sponsor's signature over the compact.
    #[serde(default)]
    pub sponsor_signature: Bytes,
    /// Account whose resources are claimed.
    pub sponsor: Option<Address>,
    /// Allocator-scoped replay nonce.
    pub nonce: Option<U256>,
    /// Expiry timestamp in seconds.
    pub expires: Option<U256>,
    /// Witness hash; zero when unused.
    #[serde(default)]
    pub witness: B256,
    /// Witness type fragment; empty when unused.
    #[serde(default)]
    pub witness_typestring: String,
    /// Single-id shapes: tag transfer claimants route by.
    pub lock_tag: Option<LockTag>,
    /// Single-id shapes: resource lock id.
    pub id: Option<U256>,
    /// Single-id shapes: amount committed from the lock.
    pub allocated_amount: Option<U256>,
    /// Single-id shapes: claimants, in claim order.
    #[serde(default)]
    pub claimants: Vec<ClaimantInput>,
    /// Multi-id shapes: one entry per resource lock.
    #[serde(default)]
    pub claims: Vec<ComponentRequest>,
    /// Cross-chain shapes: claim hashes of the other chains.
    #[serde(default)]
    pub additional_chains: Vec<B256>,
    /// Exogenous shapes: position of this chain in the claim set.
    pub chain_index: Option<U256>,
    /// Exogenous shapes: chain id of the notarizing chain.
    pub notarized_chain_id: Option<U256>,
}

/// The result of building a [`ClaimRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyBuiltClaim {
    /// A built [`Claim`].
    Single(BuiltClaim<Claim>),
    /// A built [`BatchClaim`].
    Batch(BuiltClaim<BatchClaim>),
    /// A built [`MultichainClaim`].
    Multichain(BuiltClaim<MultichainClaim>),
    /// A built [`BatchMultichainClaim`].
    BatchMultichain(BuiltClaim<BatchMultichainClaim>),
    /// A built [`ExogenousMultichainClaim`].
    ExogenousMultichain(BuiltClaim<ExogenousMultichainClaim>),
    /// A built [`ExogenousBatchMultichainClaim`].
    ExogenousBatchMultichain(BuiltClaim<ExogenousBatchMultichainClaim>),
}

impl AnyBuiltClaim {
    /// The raw claim hash.
    pub fn hash(&self) -> B256 {
        match self {
            Self::Single(b) => b.hash,
            Self::Batch(b) => b.hash,
            Self::Multichain(b) => b.hash,
            Self::BatchMultichain(b) => b.hash,
            Self::ExogenousMultichain(b) => b.hash,
            Self::ExogenousBatchMultichain(b) => b.hash,
        }
    }

    /// The shape that was built.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Single(_) => ShapeKind::Single,
            Self::Batch(_) => ShapeKind::Batch,
            Self::Multichain(_) => ShapeKind::Multichain,
            Self::BatchMultichain(_) => ShapeKind::BatchMultichain,
            Self::ExogenousMultichain(_) => ShapeKind::ExogenousMultichain,
            Self::ExogenousBatchMultichain(_) => ShapeKind::ExogenousBatchMultichain,
        }
    }
}

impl ClaimRequest {
    /// Drive the builder for `self.shape` and build the claim.
    ///
    /// # Errors
    ///
    /// Any error the builder reports while adding claimants or building.
    pub fn build(&self, domain: &TypedDataDomain) -> Result<AnyBuiltClaim, ClaimError> {
        tracing::debug!(shape = %self.shape, "building claim request");
        Ok(match self.shape {
            ShapeKind::Single => AnyBuiltClaim::Single(self.single::<Single>(domain)?.build()?),
            ShapeKind::Batch => AnyBuiltClaim::Batch(self.multi::<Batch>(domain)?.build()?),
            ShapeKind::Multichain => {
                let mut builder = self.single::<Multichain>(domain)?;
                self.cross_chain(&mut builder);
                AnyBuiltClaim::Multichain(builder.build()?)
            }
            ShapeKind::BatchMultichain => {
                let mut builder = self.multi::<BatchMultichain>(domain)?;
                self.cross_chain(&mut builder);
                AnyBuiltClaim::BatchMultichain(builder.build()?)
            }
            ShapeKind::ExogenousMultichain => {
                let mut builder = self.single::<ExogenousMultichain>(domain)?;
                self.exogenous(&mut builder);
                AnyBuiltClaim::ExogenousMultichain(builder.build()?)
            }
            ShapeKind::ExogenousBatchMultichain => {
                let mut builder = self.multi::<ExogenousBatchMultichain>(domain)?;
                self.exogenous(&mut builder);
                AnyBuiltClaim::ExogenousBatchMultichain(builder.build()?)
            }
        })
    }

    fn common<S: ClaimShape>(&self, domain: &TypedDataDomain) -> ClaimBuilder<S> {
        let mut builder = ClaimBuilder::<S>::new(domain.clone());
        builder
            .allocator_data(self.allocator_data.clone())
            .sponsor_signature(self.sponsor_signature.clone())
            .witness(self.witness)
            .witness_typestring(self.witness_typestring.clone());
        if let Some(sponsor) = self.sponsor {
            builder.sponsor(sponsor);
        }
        if let Some(nonce) = self.nonce {
            builder.nonce(nonce);
        }
        if let Some(expires) = self.expires {
            builder.expires(expires);
        }

        let cross_chain = matches!(
            S::KIND,
            ShapeKind::Multichain
                | ShapeKind::BatchMultichain
                | ShapeKind::ExogenousMultichain
                | ShapeKind::ExogenousBatchMultichain
        );
        let exogenous = matches!(
            S::KIND,
            ShapeKind::ExogenousMultichain | ShapeKind::ExogenousBatchMultichain
        );
        if !cross_chain && !self.additional_chains.is_empty() {
            ignored(S::KIND, "additionalChains");
        }
        if !exogenous && (self.chain_index.is_some() || self.notarized_chain_id.is_some()) {
            ignored(S::KIND, "chainIndex/notarizedChainId");
        }
        builder
    }

    fn single<S: ClaimShape<Ids = SingleId>>(
        &self,
        domain: &TypedDataDomain,
    ) -> Result<ClaimBuilder<S>, ClaimError> {
        let mut builder = self.common::<S>(domain);
        if let Some(lock_tag) = self.lock_tag {
            builder.lock_tag(lock_tag);
        }
        if let Some(id) = self.id {
            builder.id(id);
        }
        if let Some(amount) = self.allocated_amount {
            builder.allocated_amount(amount);
        }
        for claimant in &self.claimants {
            builder.add_claimant(claimant)?;
        }
        if !self.claims.is_empty() {
            ignored(S::KIND, "claims");
        }
        Ok(builder)
    }

    fn multi<S: ClaimShape<Ids = MultiId>>(
        &self,
        domain: &TypedDataDomain,
    ) -> Result<ClaimBuilder<S>, ClaimError> {
        let mut builder = self.common::<S>(domain);
        for request in &self.claims {
            let mut component = builder.add_claim();
            if let Some(lock_tag) = request.lock_tag {
                component = component.lock_tag(lock_tag);
            }
            if let Some(id) = request.id {
                component = component.id(id);
            }
            if let Some(amount) = request.allocated_amount {
                component = component.allocated_amount(amount);
            }
            for portion in &request.portions {
                component = component.add_portion(portion)?;
            }
        }
        if self.lock_tag.is_some()
            || self.id.is_some()
            || self.allocated_amount.is_some()
            || !self.claimants.is_empty()
        {
            ignored(S::KIND, "lockTag/id/allocatedAmount/claimants");
        }
        Ok(builder)
    }

    fn cross_chain<S: CrossChainShape>(&self, builder: &mut ClaimBuilder<S>) {
        builder.additional_chains(self.additional_chains.iter().copied());
    }

    fn exogenous<S: ExogenousShape>(&self, builder: &mut ClaimBuilder<S>) {
        self.cross_chain(builder);
        if let Some(index) = self.chain_index {
            builder.chain_index(index);
        }
        if let Some(chain_id) = self.notarized_chain_id {
            builder.notarized_chain_id(chain_id);
        }
    }
}

fn ignored(shape: ShapeKind, fields: &str) {
    tracing::warn!(%shape, fields, "request fields do not apply to this shape, ignoring");
}
