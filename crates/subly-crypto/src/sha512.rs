//! SHA-512 hashing for commitments, nullifiers and key derivation.
//!
//! Every 32-byte value the protocol publishes is the first half of a SHA-512
//! digest. The deployed clients fixed this choice, so changing it would orphan
//! every commitment already recorded on-chain.

use sha2::{Digest, Sha512};

/// Full SHA-512 digest size.
pub const DIGEST_SIZE: usize = 64;

/// Size of the truncated output used throughout the protocol.
pub const OUTPUT_SIZE: usize = 32;

/// Compute the full 64-byte SHA-512 digest.
pub fn hash(data: &[u8]) -> [u8; DIGEST_SIZE] {
    Sha512::digest(data).into()
}

/// Compute SHA-512 and keep the first 32 bytes.
pub fn hash32(data: &[u8]) -> [u8; OUTPUT_SIZE] {
    hash32_parts(&[data])
}

/// Hash the concatenation of `parts` without allocating the joined buffer.
///
/// `hash32_parts(&[a, b]) == hash32(&[a, b].concat())`.
pub fn hash32_parts(parts: &[&[u8]]) -> [u8; OUTPUT_SIZE] {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; OUTPUT_SIZE];
    out.copy_from_slice(&digest[..OUTPUT_SIZE]);
    out
}
