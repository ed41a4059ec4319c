//! # Component Builder
//!
//! Accumulates one [`BatchClaimComponent`] of a multi-id claim. The parent
//! builder owns every component draft; a [`ComponentBuilder`] is only a
//! mutable handle to one of them, so there is no ownership cycle between
//! parent and child.
//!
//! `done()` validates the component early and hands the parent back. It is
//! optional: the parent's `build()` validates every pending component in
//! order, reporting the first failure.

use alloy_primitives::{Address, U256};

use compact_core::{build_component, ClaimError, ClaimantInput, Component, LockTag};

use crate::builder::{ClaimBuilder, LOCK_TAG_UNSET};
use crate::claim::BatchClaimComponent;
use crate::shape::{ClaimShape, MultiId};

/// Unvalidated state of one claim component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentDraft {
    pub(crate) lock_tag: Option<LockTag>,
    pub(crate) id: Option<U256>,
    pub(crate) allocated_amount: Option<U256>,
    pub(crate) portions: Vec<Component>,
}

impl ComponentDraft {
    fn routing_tag(&self) -> Result<LockTag, ClaimError> {
        self.lock_tag
            .ok_or_else(|| ClaimError::PreconditionViolation(LOCK_TAG_UNSET.to_string()))
    }

    /// Validate in order: id, allocatedAmount, at least one portion.
    pub(crate) fn finalize(&self) -> Result<BatchClaimComponent, ClaimError> {
        let id = self.id.ok_or(ClaimError::MissingField("id"))?;
        let allocated_amount = self
            .allocated_amount
            .filter(|amount| !amount.is_zero())
            .ok_or(ClaimError::MissingField("allocatedAmount"))?;
        if self.portions.is_empty() {
            return Err(ClaimError::MissingField("at least one portion"));
        }
        Ok(BatchClaimComponent {
            id,
            allocated_amount,
            portions: self.portions.clone(),
        })
    }
}

/// Mutable handle to one pending component of a multi-id claim builder.
#[derive(Debug)]
pub struct ComponentBuilder<'a, S: ClaimShape<Ids = MultiId>> {
    parent: &'a mut ClaimBuilder<S>,
    index: usize,
}

impl<'a, S: ClaimShape<Ids = MultiId>> ComponentBuilder<'a, S> {
    pub(crate) fn new(parent: &'a mut ClaimBuilder<S>, index: usize) -> Self {
        Self { parent, index }
    }

    fn draft(&mut self) -> &mut ComponentDraft {
        &mut self.parent.draft.claims[self.index]
    }

    /// Position of this component within the parent's claims.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Set the tag transfer portions route by.
    pub fn lock_tag(mut self, lock_tag: LockTag) -> Self {
        self.draft().lock_tag = Some(lock_tag);
        self
    }

    /// Set the resource lock id.
    pub fn id(mut self, id: U256) -> Self {
        self.draft().id = Some(id);
        self
    }

    /// Set the amount committed from the lock. Zero counts as unset.
    pub fn allocated_amount(mut self, amount: U256) -> Self {
        self.draft().allocated_amount = Some(amount);
        self
    }

    /// Pack and append a portion.
    ///
    /// # Errors
    ///
    /// `PreconditionViolation` if no lock tag is set;
    /// `InvalidClaimant` if the amount is zero.
    pub fn add_portion(mut self, input: &ClaimantInput) -> Result<Self, ClaimError> {
        let routing_tag = self.draft().routing_tag()?;
        let component = build_component(routing_tag, input)?;
        self.draft().portions.push(component);
        Ok(self)
    }

    /// Append a transfer portion under this component's lock tag.
    pub fn add_transfer(self, recipient: Address, amount: U256) -> Result<Self, ClaimError> {
        self.add_portion(&ClaimantInput::Transfer { recipient, amount })
    }

    /// Append a conversion into the lock identified by `target_lock_tag`.
    pub fn add_convert(
        self,
        recipient: Address,
        amount: U256,
        target_lock_tag: LockTag,
    ) -> Result<Self, ClaimError> {
        self.add_portion(&ClaimantInput::Convert {
            recipient,
            amount,
            target_lock_tag,
        })
    }

    /// Append a withdrawal of the underlying token.
    pub fn add_withdraw(self, recipient: Address, amount: U256) -> Result<Self, ClaimError> {
        self.add_portion(&ClaimantInput::Withdraw { recipient, amount })
    }

    /// Append an already-packed portion without routing it.
    pub fn add_component(mut self, component: Component) -> Result<Self, ClaimError> {
        component.validate()?;
        self.draft().portions.push(component);
        Ok(self)
    }

    /// Validate this component and return the parent builder.
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::MissingField` for the first of id,
    /// allocatedAmount or portions that is unset.
    pub fn done(self) -> Result<&'a mut ClaimBuilder<S>, ClaimError> {
        let component = self.parent.draft.claims[self.index].finalize()?;
        tracing::debug!(
            index = self.index,
            id = %component.id,
            portions = component.portions.len(),
            "claim component finalized"
        );
        Ok(self.parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BatchClaimBuilder;
    use compact_core::{LockId, ResetPeriod, Scope, NATIVE_TOKEN};

    fn tag() -> LockTag {
        LockTag::encode(12345, Scope::ChainSpecific, ResetPeriod::OneDay).unwrap()
    }

    #[test]
    fn done_reports_missing_fields_in_order() {
        let mut builder = BatchClaimBuilder::default();
        let err = builder.add_claim().done().unwrap_err();
        assert_eq!(err, ClaimError::MissingField("id"));

        let err = builder
            .claim(0)
            .unwrap()
            .id(LockId::new(tag(), NATIVE_TOKEN).as_u256())
            .done()
            .unwrap_err();
        assert_eq!(err, ClaimError::MissingField("allocatedAmount"));

        let err = builder
            .claim(0)
            .unwrap()
            .allocated_amount(U256::from(5u64))
            .done()
            .unwrap_err();
        assert_eq!(err, ClaimError::MissingField("at least one portion"));
    }

    #[test]
    fn done_returns_parent() {
        let mut builder = BatchClaimBuilder::default();
        let parent = builder
            .add_claim()
            .lock_tag(tag())
            .id(LockId::new(tag(), NATIVE_TOKEN).as_u256())
            .allocated_amount(U256::from(5u64))
            .add_transfer(Address::repeat_byte(0x22), U256::from(5u64))
            .unwrap()
            .done()
            .unwrap();
        assert_eq!(parent.claim_count(), 1);
        parent.add_claim();
        assert_eq!(builder.claim_count(), 2);
    }

    #[test]
    fn portion_needs_explicit_tag() {
        let mut builder = BatchClaimBuilder::default();
        let err = builder
            .add_claim()
            .add_withdraw(Address::repeat_byte(0x22), U256::from(1u64))
            .unwrap_err();
        assert!(matches!(err, ClaimError::PreconditionViolation(_)));

        let err = builder
            .claim(0)
            .unwrap()
            .id(LockId::new(tag(), NATIVE_TOKEN).as_u256())
            .add_transfer(Address::repeat_byte(0x22), U256::from(1u64))
            .unwrap_err();
        assert!(matches!(err, ClaimError::PreconditionViolation(_)));
        assert!(builder.draft.claims[0].portions.is_empty());
    }

    #[test]
    fn batch_compact_components_route_by_commitment_tag() {
        use compact_core::{BatchCompact, Lock};

        let compact = BatchCompact {
            arbiter: Address::repeat_byte(0x33),
            sponsor: Address::repeat_byte(0x11),
            nonce: U256::from(1u64),
            expires: U256::from(2u64),
            commitments: vec![Lock {
                lock_tag: tag(),
                token: NATIVE_TOKEN,
                amount: U256::from(10u64),
            }],
        };
        let mut builder = BatchClaimBuilder::default();
        builder.from_batch_compact(&compact, alloy_primitives::Bytes::new());
        builder
            .claim(0)
            .unwrap()
            .add_transfer(Address::repeat_byte(0x22), U256::from(10u64))
            .unwrap();
        assert_eq!(builder.draft.claims[0].portions[0].routing_tag(), tag());
    }

    #[test]
    fn explicit_tag_routes_transfers() {
        let other = LockTag::encode(1, Scope::Multichain, ResetPeriod::OneSecond).unwrap();
        let mut builder = BatchClaimBuilder::default();
        builder
            .add_claim()
            .id(LockId::new(tag(), NATIVE_TOKEN).as_u256())
            .lock_tag(other)
            .add_transfer(Address::repeat_byte(0x22), U256::from(1u64))
            .unwrap();
        assert_eq!(builder.draft.claims[0].portions[0].routing_tag(), other);
    }
}
