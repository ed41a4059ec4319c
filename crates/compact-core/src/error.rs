//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types raised by the codecs and claim builders. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Every error is raised synchronously at the point of violation.
//! - Builders are fail-fast: the first unmet requirement wins and no
//!   attempt is made to batch several violations into one report.
//! - An unknown claimant kind has no variant here. `ClaimantInput` and
//!   `ClaimantKind` are closed enums matched exhaustively, so that defect
//!   class is rejected by the compiler.

use thiserror::Error;

/// A value does not fit the bit width allotted to it in a packed layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The value needs more bits than its slot provides.
    #[error("{field} exceeds {bits} bits")]
    FieldOverflow {
        /// Name of the packed field (e.g. `allocatorId`).
        field: &'static str,
        /// Width of the slot in bits.
        bits: u32,
    },

    /// An ordinal-encoded enum received an ordinal outside its range.
    #[error("{field} ordinal {value} is out of range (max {max})")]
    OutOfRange {
        /// Name of the enum field.
        field: &'static str,
        /// The rejected ordinal.
        value: u64,
        /// The largest accepted ordinal.
        max: u64,
    },

    /// A textual representation could not be parsed.
    #[error("invalid {field}: {reason}")]
    Parse {
        /// Name of the field being parsed.
        field: &'static str,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Errors raised while packing claimants or assembling a claim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    /// A field exceeds its allotted bit width.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Zero amount or malformed recipient passed to the claimant codec.
    #[error("invalid claimant: {0}")]
    InvalidClaimant(String),

    /// A required field or collection is absent at build time.
    ///
    /// Carries the first unmet requirement, e.g. `sponsor` or
    /// `at least one claimant`.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// An operation was attempted before the state it depends on was set.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
}
