//! # compact-claims: Claim Assembly
//!
//! Assembles validated claims for every claim shape and returns, for each,
//! the wire struct, the raw claim hash and the typed-data message a sponsor
//! or arbiter signs.
//!
//! ## Architecture
//!
//! ```text
//! ClaimBuilder<S: ClaimShape>
//!   ├── CommonFields       sponsor, nonce, expires, witness, ...
//!   ├── S::Ids             SingleId (id, allocatedAmount, claimants)
//!   │                      MultiId  (claims, via ComponentBuilder)
//!   └── S::Extension       NoExtension | CrossChainFields | ExogenousFields
//!          │
//!          ▼ build()
//!   BuiltClaim { struct, hash, typedData }
//! ```
//!
//! The six shapes are zero-sized markers; validation order, hashing and
//! schema assembly live in one place per concern and are shared by every
//! shape that uses them.
//!
//! ## Crate Policy
//!
//! - Builders never sign, submit or hash typed data. Those belong to the
//!   caller's signing stack.
//! - `build()` reports the first unmet requirement only.
//! - Signatures are never logged.

pub mod builder;
pub mod claim;
pub mod component;
pub mod request;
pub mod shape;
pub mod typed_data;

pub use builder::{
    BatchClaimBuilder, BatchMultichainClaimBuilder, BuilderState, BuiltClaim, ClaimBuilder,
    ExogenousBatchMultichainClaimBuilder, ExogenousMultichainClaimBuilder, FromCompactOptions,
    MultichainClaimBuilder, SingleClaimBuilder,
};
pub use claim::{
    BatchClaim, BatchClaimComponent, BatchMultichainClaim, Claim, ExogenousBatchMultichainClaim,
    ExogenousMultichainClaim, MultichainClaim,
};
pub use component::ComponentBuilder;
pub use request::{AnyBuiltClaim, ClaimRequest, ComponentRequest};
pub use shape::{
    Batch, BatchMultichain, ClaimShape, CrossChainShape, ExogenousBatchMultichain,
    ExogenousMultichain, ExogenousShape, MultiId, Multichain, ShapeKind, Single, SingleId,
};
pub use typed_data::{
    encode_type, TypeSchema, TypedData, TypedDataDomain, TypedDataField, DEFAULT_DOMAIN_NAME,
    DEFAULT_DOMAIN_VERSION,
};
