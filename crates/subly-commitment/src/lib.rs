//! # subly-commitment
//!
//! Deterministic one-way bindings of a user secret.
//!
//! - [`commitment`] — `hash(secret ∥ context_id)`: proves a relationship to
//!   a plan, pool or business without revealing the secret.
//! - [`nullifier`] — `hash(secret ∥ operation_label ∥ nonce_le)`: marks a
//!   withdraw or transfer as spent.
//!
//! The two preimages have different lengths (64 bytes versus 48), so a
//! commitment can never be replayed as a nullifier. Rejecting a repeated
//! nullifier is the ledger's job; this crate only computes the value.

pub mod commitment;
pub mod nullifier;

pub use commitment::{commit, commit_bytes, membership_commitment, verify_commitment};
pub use nullifier::{nullify, nullify_bytes};

use subly_crypto::random::{self, CryptoRng, OsRng, RngCore};
use subly_types::{Secret, TypesError};

/// Error types for commitment and nullifier derivation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitmentError {
    /// A secret or identifier was not exactly 32 bytes.
    #[error("invalid input length: expected {expected}, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },

    /// The operation tag is not one of the known labels.
    #[error("invalid operation tag: {0}")]
    InvalidOperationTag(String),

    /// The OS random source could not be read.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),
}

impl From<TypesError> for CommitmentError {
    fn from(err: TypesError) -> Self {
        match err {
            TypesError::InvalidInputLength { expected, actual } => {
                CommitmentError::InvalidInputLength { expected, actual }
            }
            TypesError::InvalidOperationTag(tag) => CommitmentError::InvalidOperationTag(tag),
        }
    }
}

/// Convenience result type for this crate.
pub type Result<T> = std::result::Result<T, CommitmentError>;

/// Generate a fresh user secret from the OS CSPRNG.
///
/// Fails closed with [`CommitmentError::EntropyUnavailable`].
pub fn generate_secret() -> Result<Secret> {
    generate_secret_from(&mut OsRng)
}

/// Generate a user secret from a caller-supplied CSPRNG.
pub fn generate_secret_from<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Secret> {
    let bytes = random::random_array_from::<R, 32>(rng)
        .map_err(|e| CommitmentError::EntropyUnavailable(e.to_string()))?;
    Ok(Secret::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_secret_unique() {
        let a = generate_secret().expect("entropy");
        let b = generate_secret().expect("entropy");
        assert_ne!(a.expose(), b.expose());
    }

    #[test]
    fn test_generate_secret_fails_closed() {
        assert!(matches!(
            generate_secret_from(&mut random::FailingRng),
            Err(CommitmentError::EntropyUnavailable(_))
        ));
    }

    #[test]
    fn test_types_error_conversion() {
        let err: CommitmentError = TypesError::InvalidInputLength {
            expected: 32,
            actual: 5,
        }
        .into();
        assert_eq!(
            err,
            CommitmentError::InvalidInputLength {
                expected: 32,
                actual: 5
            }
        );
    }
}
