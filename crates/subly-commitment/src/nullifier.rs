//! Nullifiers.
//!
//! ```text
//! nullifier = SHA-512(secret ∥ label(operation) ∥ nonce_le64)[..32]
//! ```
//!
//! `nonce` is unique per operation instance, typically a sequence number the
//! pool maintains. The same triple always yields the same nullifier, which is
//! how the ledger detects a replay.

use subly_crypto::sha512;
use subly_types::{Nullifier, OperationTag, Secret};

use crate::Result;

/// Length of the nullifier preimage for `tag`.
pub fn preimage_len(tag: OperationTag) -> usize {
    32 + tag.as_bytes().len() + 8
}

/// Derive the nullifier for one operation instance.
pub fn nullify(secret: &Secret, tag: OperationTag, nonce: u64) -> Nullifier {
    let nonce_bytes = nonce.to_le_bytes();
    Nullifier::from_bytes(sha512::hash32_parts(&[
        secret.expose(),
        tag.as_bytes(),
        &nonce_bytes,
    ]))
}

/// [`nullify`] with a raw secret and a textual tag, as received at an API
/// boundary.
///
/// The tag is validated before anything is hashed.
pub fn nullify_bytes(secret: &[u8], tag: &str, nonce: u64) -> Result<Nullifier> {
    let tag: OperationTag = tag.parse()?;
    let secret = Secret::from_slice(secret)?;
    Ok(nullify(&secret, tag, nonce))
}
