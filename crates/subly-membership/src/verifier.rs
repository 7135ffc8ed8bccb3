//! Proof verification.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. expiry (`now > valid_until`)
//! 2. plan match
//! 3. Ed25519 signature over the 104-byte message
//! 4. non-zero membership commitment

use serde::{Deserialize, Serialize};
use subly_crypto::ed25519::{verify_detached, PUBLIC_KEY_SIZE};
use subly_types::ContextId;

use crate::clock::{Clock, SystemClock};
use crate::proof::MembershipProof;

/// Why a proof was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum VerificationError {
    #[error("proof has expired")]
    Expired,
    #[error("proof is for a different plan")]
    PlanMismatch,
    #[error("proof signature does not verify")]
    InvalidSignature,
    #[error("proof carries an empty membership commitment")]
    EmptyCommitment,
}

/// Outcome of [`ProofVerifier::verify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub is_valid: bool,
    pub error: Option<VerificationError>,
    /// Unix seconds at which the checks ran.
    pub verified_at: i64,
    /// Plan named by the proof.
    pub plan_id: ContextId,
}

impl VerificationResult {
    fn valid(verified_at: i64, plan_id: ContextId) -> Self {
        Self {
            is_valid: true,
            error: None,
            verified_at,
            plan_id,
        }
    }

    fn invalid(error: VerificationError, verified_at: i64, plan_id: ContextId) -> Self {
        Self {
            is_valid: false,
            error: Some(error),
            verified_at,
            plan_id,
        }
    }
}

/// Verifies membership proofs against a clock.
#[derive(Debug, Clone, Default)]
pub struct ProofVerifier<C: Clock = SystemClock> {
    clock: C,
}

impl ProofVerifier<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> ProofVerifier<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Verify `proof` for `expected_plan_id` against the issuer's public key.
    pub fn verify(
        &self,
        proof: &MembershipProof,
        expected_plan_id: &ContextId,
        verifier_public_key: &[u8; PUBLIC_KEY_SIZE],
    ) -> VerificationResult {
        let now = self.clock.now();
        let result = match check(proof, expected_plan_id, verifier_public_key, now) {
            Ok(()) => VerificationResult::valid(now, proof.plan_id),
            Err(error) => VerificationResult::invalid(error, now, proof.plan_id),
        };

        tracing::debug!(
            is_valid = result.is_valid,
            error = ?result.error,
            valid_until = proof.valid_until,
            verified_at = now,
            "membership proof verified"
        );

        result
    }

    /// Whether `proof` has passed its `valid_until`.
    pub fn is_expired(&self, proof: &MembershipProof) -> bool {
        self.clock.now() > proof.valid_until
    }

    /// Seconds until `proof` expires, clamped to `[0, u32::MAX]`.
    pub fn remaining_validity(&self, proof: &MembershipProof) -> u32 {
        let remaining = proof
            .valid_until
            .saturating_sub(self.clock.now())
            .clamp(0, i64::from(u32::MAX));
        u32::try_from(remaining).unwrap_or(u32::MAX)
    }
}

fn check(
    proof: &MembershipProof,
    expected_plan_id: &ContextId,
    verifier_public_key: &[u8; PUBLIC_KEY_SIZE],
    now: i64,
) -> std::result::Result<(), VerificationError> {
    if now > proof.valid_until {
        return Err(VerificationError::Expired);
    }
    if proof.plan_id != *expected_plan_id {
        return Err(VerificationError::PlanMismatch);
    }
    if !verify_proof_signature(proof, verifier_public_key) {
        return Err(VerificationError::InvalidSignature);
    }
    if proof.membership_commitment.is_zero() {
        return Err(VerificationError::EmptyCommitment);
    }
    Ok(())
}

/// Check only the signature of `proof`, ignoring expiry and plan.
pub fn verify_proof_signature(
    proof: &MembershipProof,
    verifier_public_key: &[u8; PUBLIC_KEY_SIZE],
) -> bool {
    verify_detached(verifier_public_key, &proof.message(), &proof.signature).is_ok()
}

/// Verify `proof` against the system clock.
pub fn verify_proof(
    proof: &MembershipProof,
    expected_plan_id: &ContextId,
    verifier_public_key: &[u8; PUBLIC_KEY_SIZE],
) -> VerificationResult {
    ProofVerifier::new().verify(proof, expected_plan_id, verifier_public_key)
}
