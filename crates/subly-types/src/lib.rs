//! # subly-types
//!
//! Fixed-size identifiers shared across the Subly workspace, plus the
//! byte-layout helpers used to build the protocol's fixed-width buffers.
//!
//! Nothing in here is variable length on the wire. Ledger account layouts
//! depend on every field keeping its width.

pub mod ids;
pub mod layout;
pub mod operation;
pub mod secret;

pub use ids::{Commitment, ContextId, Nullifier};
pub use operation::OperationTag;
pub use secret::Secret;

/// Width of secrets, identifiers, commitments and nullifiers.
pub const ID_SIZE: usize = 32;

/// Raw 32-byte array alias.
pub type Bytes32 = [u8; ID_SIZE];

/// Error types for boundary validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    /// A buffer did not have the fixed length its layout requires.
    #[error("invalid input length: expected {expected}, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },

    /// An operation tag outside the closed set.
    #[error("invalid operation tag: {0}")]
    InvalidOperationTag(String),
}

/// Convenience result type for boundary validation.
pub type Result<T> = std::result::Result<T, TypesError>;

/// Copy `data` into a fixed array, rejecting any other length.
///
/// Never truncates or pads.
pub fn to_array<const N: usize>(data: &[u8]) -> Result<[u8; N]> {
    <[u8; N]>::try_from(data).map_err(|_| TypesError::InvalidInputLength {
        expected: N,
        actual: data.len(),
    })
}
