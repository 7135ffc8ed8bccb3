//! Commitments.
//!
//! ```text
//! commitment = SHA-512(secret ∥ context_id)[..32]
//! ```
//!
//! The order `secret` then `context_id` is part of the binding contract with
//! every commitment already stored on-chain and must not change.

use subly_crypto::sha512;
use subly_types::{Commitment, ContextId, Secret};

use crate::Result;

/// Length of the commitment preimage.
pub const COMMITMENT_PREIMAGE_LEN: usize = 64;

/// Commit a secret to a context (plan, pool or business address).
pub fn commit(secret: &Secret, context: &ContextId) -> Commitment {
    Commitment::from_bytes(sha512::hash32_parts(&[secret.expose(), context.as_bytes()]))
}

/// [`commit`] over raw buffers, for callers holding bytes read from elsewhere.
///
/// Both buffers must be exactly 32 bytes; nothing is truncated or padded.
pub fn commit_bytes(secret: &[u8], context: &[u8]) -> Result<Commitment> {
    let secret = Secret::from_slice(secret)?;
    let context = ContextId::from_slice(context)?;
    Ok(commit(&secret, &context))
}

/// The membership commitment a subscription proof carries for `plan_id`.
pub fn membership_commitment(secret: &Secret, plan_id: &ContextId) -> Commitment {
    commit(secret, plan_id)
}

/// Recompute the commitment for `secret` and `context` and compare.
///
/// The comparison visits every byte regardless of where the first mismatch is.
pub fn verify_commitment(commitment: &Commitment, secret: &Secret, context: &ContextId) -> bool {
    let expected = commit(secret, context);
    let diff = expected
        .as_bytes()
        .iter()
        .zip(commitment.as_bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));
    let matches = diff == 0;
    tracing::trace!(matches, "commitment verification");
    matches
}
