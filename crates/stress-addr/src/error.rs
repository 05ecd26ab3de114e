//! Error types for address decoding and derivation.

use thiserror::Error;

/// Errors produced while decoding or deriving addresses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty address string")]
    Empty,

    #[error("invalid address prefix in {segment:?}: expected {expected:?}")]
    InvalidPrefix { segment: String, expected: char },

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A mutation address was applied to an address it was not derived from.
    #[error("mutation address belongs to {actual}, not {expected}")]
    ParentMismatch { expected: String, actual: String },
}

/// Convenience type alias for address operations.
pub type Result<T> = std::result::Result<T, AddressError>;
