//! # subly-codec
//!
//! Authenticated encryption of the small mutable values that sit next to
//! commitments in ledger accounts: balances, share counts, transfer
//! recipients and plan metadata.
//!
//! Every value is sealed into a fixed-size envelope:
//!
//! ```text
//! envelope[N] = nonce (24) ∥ XChaCha20-Poly1305(key, nonce, window[N - 40]) ∥ tag (16)
//! ```
//!
//! The size never depends on the payload, so account layouts stay constant
//! and ciphertext length leaks nothing. Each seal draws a fresh nonce, so
//! re-encrypting an unchanged balance still produces a new envelope.
//!
//! ## Modules
//!
//! - [`key`] — Key derivation from a wallet signature or a password
//! - [`envelope`] — Generic fixed-size seal / open
//! - [`integer`] — 64-byte `u64` envelopes (balances, shares)
//! - [`record`] — 128-byte `{recipient, memo}` envelopes
//! - [`label`] — Plan name / description envelopes

pub mod envelope;
pub mod integer;
pub mod key;
pub mod label;
pub mod record;

pub use integer::{decrypt_u64, encrypt_u64, EncryptedInteger};
pub use key::{EncryptionKey, KEY_DERIVATION_MESSAGE};
pub use record::{decrypt_record, encrypt_record, EncryptedRecord, TransferRecord};

use subly_types::TypesError;

/// Error types for the encrypted state codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// A key, envelope or payload did not fit its fixed layout.
    #[error("invalid input length: expected {expected}, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },

    /// Authentication failed: wrong key or modified envelope.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Authentication succeeded but the plaintext is not a valid payload.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Text that cannot be represented in a zero-padded window.
    #[error("invalid text: {0}")]
    InvalidText(String),

    /// The AEAD refused to encrypt.
    #[error("encryption failed")]
    EncryptionFailed,

    /// The OS random source could not be read.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),
}

impl From<TypesError> for CodecError {
    fn from(err: TypesError) -> Self {
        match err {
            TypesError::InvalidInputLength { expected, actual } => {
                CodecError::InvalidInputLength { expected, actual }
            }
            TypesError::InvalidOperationTag(tag) => CodecError::MalformedRecord(tag),
        }
    }
}

/// Convenience result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Strip the zero padding that follows a payload in its window.
pub(crate) fn trim_padding(window: &[u8]) -> &[u8] {
    let end = window
        .iter()
        .rposition(|b| *b != 0)
        .map_or(0, |last| last + 1);
    &window[..end]
}
