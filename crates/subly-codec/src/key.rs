//! Symmetric key derivation.
//!
//! ```text
//! key = SHA-512(signature)[..32]        wallet contexts
//! key = SHA-512(utf8(password))[..32]   non-wallet contexts
//! ```
//!
//! The wallet signs [`KEY_DERIVATION_MESSAGE`]; Ed25519 signatures are
//! deterministic, so the same wallet always recovers the same key.

use subly_crypto::sha512;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::Result;

/// The message a wallet signs to produce key material.
pub const KEY_DERIVATION_MESSAGE: &str = "Sign this message to derive your Subly Vault encryption key.\n\nThis signature will be used to encrypt and decrypt your private balance.\n\nIt will not trigger any blockchain transaction or cost any fees.";

/// Key size in bytes.
pub const KEY_SIZE: usize = subly_crypto::xchacha20::KEY_SIZE;

/// A 32-byte symmetric key, held in memory for the session only.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey([u8; KEY_SIZE]);

impl EncryptionKey {
    /// Derive a key from a detached wallet signature of any length.
    pub fn from_signature(signature: &[u8]) -> Self {
        Self(sha512::hash32(signature))
    }

    /// Derive a key from a password.
    pub fn from_password(password: &str) -> Self {
        Self(sha512::hash32(password.as_bytes()))
    }

    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Wrap a slice that must be exactly 32 bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(Self(subly_types::to_array(data)?))
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncryptionKey([REDACTED])")
    }
}
