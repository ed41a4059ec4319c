//! # Lock Tags and Lock Ids
//!
//! A resource lock is identified by a 256-bit [`LockId`] whose high 96 bits
//! are a [`LockTag`] and whose low 160 bits are the token address.
//!
//! ## Bit Layout
//!
//! ```text
//! LockTag (96 bits)
//!   bit  95      scope          (0 = multichain, 1 = chain-specific)
//!   bits 94..92  reset period   (ordinal 0..=7)
//!   bits 91..0   allocator id
//!
//! LockId (256 bits)
//!   bits 255..160  lock tag
//!   bits 159..0    token address
//! ```
//!
//! ## Invariants
//!
//! - An allocator id wider than 92 bits is an encoding error, never
//!   silently truncated.
//! - `LockTag` can only hold values below 2^96. Any such value decodes to
//!   some valid `(allocator id, scope, reset period)` triple.
//! - `LockId` is bijective with `(LockTag, token)`.
//!
//! This layout is a frozen wire format shared with the on-chain verifier.

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::EncodingError;
use crate::packing;

/// The token address used for the chain's native asset.
pub const NATIVE_TOKEN: Address = Address::ZERO;

// ─── Scope ───────────────────────────────────────────────────────────

/// Whether a lock's authorization is valid on one chain or portable across
/// chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Scope {
    /// Authorization is portable across chains.
    Multichain = 0,
    /// Authorization is valid on a single chain only.
    ChainSpecific = 1,
}

impl Scope {
    /// The single-bit ordinal of this scope.
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Parse a scope from its ordinal.
    pub fn from_index(index: u8) -> Result<Self, EncodingError> {
        match index {
            0 => Ok(Self::Multichain),
            1 => Ok(Self::ChainSpecific),
            other => Err(EncodingError::OutOfRange {
                field: "scope",
                value: u64::from(other),
                max: 1,
            }),
        }
    }

    /// Returns the kebab-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Multichain => "multichain",
            Self::ChainSpecific => "chain-specific",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multichain" => Ok(Self::Multichain),
            "chain-specific" => Ok(Self::ChainSpecific),
            other => Err(EncodingError::Parse {
                field: "scope",
                reason: format!("unknown scope {other:?}"),
            }),
        }
    }
}

// ─── Reset Period ────────────────────────────────────────────────────

/// Minimum waiting time before a sponsor may force-withdraw without the
/// allocator's cooperation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum ResetPeriod {
    /// 1 second.
    OneSecond = 0,
    /// 15 seconds.
    FifteenSeconds = 1,
    /// 1 minute.
    OneMinute = 2,
    /// 10 minutes.
    TenMinutes = 3,
    /// 1 hour and 5 minutes.
    OneHourAndFiveMinutes = 4,
    /// 1 day.
    OneDay = 5,
    /// 7 days and 1 hour.
    SevenDaysAndOneHour = 6,
    /// 30 days.
    ThirtyDays = 7,
}

impl ResetPeriod {
    /// Every reset period in ordinal order.
    pub const ALL: [ResetPeriod; 8] = [
        Self::OneSecond,
        Self::FifteenSeconds,
        Self::OneMinute,
        Self::TenMinutes,
        Self::OneHourAndFiveMinutes,
        Self::OneDay,
        Self::SevenDaysAndOneHour,
        Self::ThirtyDays,
    ];

    /// The 3-bit ordinal of this period.
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Parse a reset period from its ordinal.
    pub fn from_index(index: u8) -> Result<Self, EncodingError> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(EncodingError::OutOfRange {
                field: "resetPeriod",
                value: u64::from(index),
                max: 7,
            })
    }

    /// Duration of the period in seconds.
    pub fn seconds(&self) -> u64 {
        match self {
            Self::OneSecond => 1,
            Self::FifteenSeconds => 15,
            Self::OneMinute => 60,
            Self::TenMinutes => 600,
            Self::OneHourAndFiveMinutes => 3_900,
            Self::OneDay => 86_400,
            Self::SevenDaysAndOneHour => 608_400,
            Self::ThirtyDays => 2_592_000,
        }
    }

    /// Returns the kebab-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneSecond => "one-second",
            Self::FifteenSeconds => "fifteen-seconds",
            Self::OneMinute => "one-minute",
            Self::TenMinutes => "ten-minutes",
            Self::OneHourAndFiveMinutes => "one-hour-and-five-minutes",
            Self::OneDay => "one-day",
            Self::SevenDaysAndOneHour => "seven-days-and-one-hour",
            Self::ThirtyDays => "thirty-days",
        }
    }
}

impl std::fmt::Display for ResetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResetPeriod {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| EncodingError::Parse {
                field: "resetPeriod",
                reason: format!("unknown reset period {s:?}"),
            })
    }
}

// ─── Allocator Id ────────────────────────────────────────────────────

/// A registered allocator's identifier, guaranteed to fit in 92 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "U256", into = "U256")]
pub struct AllocatorId(u128);

impl AllocatorId {
    /// Width of the allocator id slot inside a lock tag.
    pub const BITS: u32 = 92;

    /// Largest representable allocator id, `2^92 - 1`.
    pub const MAX: AllocatorId = AllocatorId((1u128 << Self::BITS) - 1);

    /// Validate that `value` fits in 92 bits.
    pub fn new(value: u128) -> Result<Self, EncodingError> {
        if value > Self::MAX.0 {
            return Err(EncodingError::FieldOverflow {
                field: "allocatorId",
                bits: Self::BITS,
            });
        }
        Ok(Self(value))
    }

    /// Validate a 256-bit value as an allocator id.
    pub fn from_u256(value: U256) -> Result<Self, EncodingError> {
        if value.bit_len() > Self::BITS as usize {
            return Err(EncodingError::FieldOverflow {
                field: "allocatorId",
                bits: Self::BITS,
            });
        }
        Ok(Self(packing::low_u128(value)))
    }

    /// The raw integer value.
    pub fn get(&self) -> u128 {
        self.0
    }
}

impl TryFrom<U256> for AllocatorId {
    type Error = EncodingError;

    fn try_from(value: U256) -> Result<Self, Self::Error> {
        Self::from_u256(value)
    }
}

impl From<AllocatorId> for U256 {
    fn from(id: AllocatorId) -> Self {
        U256::from(id.0)
    }
}

impl std::fmt::Display for AllocatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AllocatorId {
    type Err = EncodingError;

    /// Accepts decimal or `0x`-prefixed hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = U256::from_str(s.trim()).map_err(|e| EncodingError::Parse {
            field: "allocatorId",
            reason: e.to_string(),
        })?;
        Self::from_u256(value)
    }
}

// ─── Lock Tag ────────────────────────────────────────────────────────

/// A 96-bit lock descriptor: scope, reset period and allocator id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LockTag(u128);

impl LockTag {
    /// Width of a lock tag in bits.
    pub const BITS: u32 = 96;

    /// The all-zero tag, used as the routing tag of withdrawals.
    pub const ZERO: LockTag = LockTag(0);

    const SCOPE_SHIFT: u32 = 95;
    const RESET_PERIOD_SHIFT: u32 = 92;
    const RESET_PERIOD_MASK: u128 = 0b111;
    const MASK: u128 = (1u128 << Self::BITS) - 1;

    /// Pack a validated allocator id with a scope and reset period.
    pub fn new(allocator_id: AllocatorId, scope: Scope, reset_period: ResetPeriod) -> Self {
        let scope_bit = u128::from(scope.index()) << Self::SCOPE_SHIFT;
        let period_bits = u128::from(reset_period.index()) << Self::RESET_PERIOD_SHIFT;
        Self(scope_bit | period_bits | allocator_id.get())
    }

    /// Pack a raw allocator id with a scope and reset period.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError::FieldOverflow` if `allocator_id >= 2^92`.
    pub fn encode(
        allocator_id: u128,
        scope: Scope,
        reset_period: ResetPeriod,
    ) -> Result<Self, EncodingError> {
        Ok(Self::new(AllocatorId::new(allocator_id)?, scope, reset_period))
    }

    /// Unpack the tag into `(allocator id, scope, reset period)`.
    pub fn decode(&self) -> (AllocatorId, Scope, ResetPeriod) {
        (self.allocator_id(), self.scope(), self.reset_period())
    }

    /// The allocator id held in bits 91..0.
    pub fn allocator_id(&self) -> AllocatorId {
        AllocatorId(self.0 & AllocatorId::MAX.0)
    }

    /// The scope held in bit 95.
    pub fn scope(&self) -> Scope {
        if (self.0 >> Self::SCOPE_SHIFT) & 1 == 1 {
            Scope::ChainSpecific
        } else {
            Scope::Multichain
        }
    }

    /// The reset period held in bits 94..92.
    pub fn reset_period(&self) -> ResetPeriod {
        let index = (self.0 >> Self::RESET_PERIOD_SHIFT) & Self::RESET_PERIOD_MASK;
        // The mask leaves a 3-bit value, and all eight ordinals are defined.
        ResetPeriod::ALL[index as usize]
    }

    /// Validate that a raw value fits in 96 bits.
    pub fn from_u128(value: u128) -> Result<Self, EncodingError> {
        if value > Self::MASK {
            return Err(EncodingError::FieldOverflow {
                field: "lockTag",
                bits: Self::BITS,
            });
        }
        Ok(Self(value))
    }

    /// Validate that a 256-bit value fits in 96 bits.
    pub fn from_u256(value: U256) -> Result<Self, EncodingError> {
        if value.bit_len() > Self::BITS as usize {
            return Err(EncodingError::FieldOverflow {
                field: "lockTag",
                bits: Self::BITS,
            });
        }
        Ok(Self(packing::low_u128(value)))
    }

    /// Keep only the low 96 bits of `value`.
    pub(crate) fn from_bits_truncate(value: u128) -> Self {
        Self(value & Self::MASK)
    }

    /// The raw 96-bit value.
    pub fn as_u128(&self) -> u128 {
        self.0
    }

    /// The tag widened to 256 bits.
    pub fn to_u256(&self) -> U256 {
        U256::from(self.0)
    }

    /// Whether this is the all-zero tag.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for LockTag {
    /// Renders as `0x` followed by exactly 24 hex digits.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#026x}", self.0)
    }
}

impl FromStr for LockTag {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() || digits.len() > 32 {
            return Err(EncodingError::Parse {
                field: "lockTag",
                reason: format!("expected 1 to 32 hex digits, got {}", digits.len()),
            });
        }
        let value = u128::from_str_radix(digits, 16).map_err(|e| EncodingError::Parse {
            field: "lockTag",
            reason: e.to_string(),
        })?;
        Self::from_u128(value)
    }
}

impl TryFrom<String> for LockTag {
    type Error = EncodingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LockTag> for String {
    fn from(tag: LockTag) -> Self {
        tag.to_string()
    }
}

// ─── Lock Id ─────────────────────────────────────────────────────────

/// A 256-bit resource lock identifier: `(lock tag << 160) | token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockId(U256);

impl LockId {
    /// Combine a lock tag and a token address into a lock id.
    pub fn new(lock_tag: LockTag, token: Address) -> Self {
        Self(packing::pack(lock_tag.as_u128(), token))
    }

    /// Reinterpret any 256-bit value as a lock id.
    pub fn from_u256(value: U256) -> Self {
        Self(value)
    }

    /// Split the id back into `(lock tag, token)`.
    pub fn decode(&self) -> (LockTag, Address) {
        let (high, token) = packing::unpack(self.0);
        (LockTag::from_bits_truncate(high), token)
    }

    /// The lock tag in the high 96 bits.
    pub fn lock_tag(&self) -> LockTag {
        self.decode().0
    }

    /// The token address in the low 160 bits.
    pub fn token(&self) -> Address {
        self.decode().1
    }

    /// The allocator id of the lock tag.
    pub fn allocator_id(&self) -> AllocatorId {
        self.lock_tag().allocator_id()
    }

    /// The scope of the lock tag.
    pub fn scope(&self) -> Scope {
        self.lock_tag().scope()
    }

    /// The reset period of the lock tag.
    pub fn reset_period(&self) -> ResetPeriod {
        self.lock_tag().reset_period()
    }

    /// The raw 256-bit value.
    pub fn as_u256(&self) -> U256 {
        self.0
    }
}

impl From<LockId> for U256 {
    fn from(id: LockId) -> Self {
        id.0
    }
}

impl From<U256> for LockId {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for LockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LockId {
    type Err = EncodingError;

    /// Accepts decimal or `0x`-prefixed hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        U256::from_str(s.trim())
            .map(Self)
            .map_err(|e| EncodingError::Parse {
                field: "lockId",
                reason: e.to_string(),
            })
    }
}
