//! # subly-crypto
//!
//! Cryptographic primitives shared by every Subly client crate.
//!
//! The suite is fixed. Nothing here negotiates algorithms or versions, since
//! the byte outputs end up verbatim in ledger account fields.
//!
//! ## Modules
//!
//! - [`sha512`] — SHA-512 hashing, truncated to 32-byte outputs
//! - [`xchacha20`] — XChaCha20-Poly1305 AEAD with 24-byte nonces
//! - [`ed25519`] — Ed25519 signing and detached-signature verification
//! - [`random`] — Fail-closed access to the OS CSPRNG

pub mod ed25519;
pub mod random;
pub mod sha512;
pub mod xchacha20;

/// Error types for cryptographic operations.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// Ed25519 signature verification failed.
    #[error("signature verification failed")]
    SignatureVerification,

    /// AEAD decryption failed (authentication tag mismatch).
    #[error("AEAD decryption failed")]
    AeadDecryption,

    /// AEAD encryption failed.
    #[error("AEAD encryption failed")]
    AeadEncryption,

    /// The OS random source could not be read.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),

    /// Invalid input data.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
