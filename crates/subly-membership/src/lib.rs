//! # subly-membership
//!
//! Time-bound, replay-protected membership proofs.
//!
//! A proof is a signed assertion that the holder of a membership commitment
//! has an active relationship to a plan until `valid_until`. The signature
//! covers a fixed 104-byte message:
//!
//! ```text
//! plan_id (32) ∥ membership_commitment (32) ∥ nonce (32) ∥ valid_until (i64 LE)
//! ```
//!
//! Each issuance draws a fresh 32-byte nonce, so two proofs for the same
//! membership never share a message.
//!
//! Verification never returns `Err`: the outcome is a [`VerificationResult`]
//! whose `error` names the first failing check.
//!
//! ## Modules
//!
//! - [`clock`] — Source of "now" (system or fixed)
//! - [`signer`] — Detached-signature capability
//! - [`proof`] — Proof record, signed message and 312-byte wire layout
//! - [`issuer`] — Proof issuance
//! - [`verifier`] — Proof verification and expiry helpers
//! - [`config`] — Validity window configuration

pub mod clock;
pub mod config;
pub mod issuer;
pub mod proof;
pub mod signer;
pub mod verifier;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, MembershipConfig, ProofConfig};
pub use issuer::{issue_proof, ProofIssuer, ProofRequest};
pub use proof::{proof_message, MembershipProof, ValidityProof};
pub use signer::DetachedSigner;
pub use verifier::{
    verify_proof, verify_proof_signature, ProofVerifier, VerificationError, VerificationResult,
};

use subly_types::TypesError;

/// Error types for proof issuance and decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MembershipError {
    /// A buffer did not match its fixed layout.
    #[error(transparent)]
    Layout(#[from] TypesError),

    /// The requested validity window exceeds the configured maximum.
    #[error("validity of {requested}s exceeds maximum of {max}s")]
    InvalidValidity { requested: u32, max: u32 },

    /// The signing capability refused or failed to sign.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// The OS random source could not be read.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Convenience result type for membership operations.
pub type Result<T> = std::result::Result<T, MembershipError>;
