//! Encrypted unsigned integers.
//!
//! A `u64` is written little-endian into the first 8 bytes of a 24-byte
//! window; the remaining 16 bytes must be zero. The sealed result is always
//! 64 bytes.

use zeroize::Zeroizing;

use crate::envelope::{self, window_len};
use crate::key::EncryptionKey;
use crate::{CodecError, Result};

/// Size of an encrypted integer.
pub const INTEGER_ENVELOPE_LEN: usize = 64;

/// Plaintext window inside an integer envelope.
pub const INTEGER_WINDOW_LEN: usize = window_len(INTEGER_ENVELOPE_LEN);

/// An encrypted balance or share count as stored in an account.
pub type EncryptedInteger = [u8; INTEGER_ENVELOPE_LEN];

const VALUE_LEN: usize = 8;

/// Encrypt `value` under `key` with a fresh nonce.
pub fn encrypt_u64(value: u64, key: &EncryptionKey) -> Result<EncryptedInteger> {
    envelope::seal(key, window_for(value).as_slice())
}

/// Decrypt a 64-byte integer envelope.
///
/// Fails with [`CodecError::DecryptionFailed`] if the envelope does not
/// authenticate, or [`CodecError::MalformedRecord`] if the padding is not
/// zero.
pub fn decrypt_u64(data: &[u8], key: &EncryptionKey) -> Result<u64> {
    let window = envelope::open(key, data, INTEGER_ENVELOPE_LEN)?;
    let (value, padding) = window.split_at(VALUE_LEN);

    if padding.iter().any(|b| *b != 0) {
        return Err(CodecError::MalformedRecord(
            "non-zero integer padding".to_string(),
        ));
    }

    Ok(u64::from_le_bytes(subly_types::to_array(value)?))
}

fn window_for(value: u64) -> Zeroizing<[u8; INTEGER_WINDOW_LEN]> {
    let mut window = Zeroizing::new([0u8; INTEGER_WINDOW_LEN]);
    window[..VALUE_LEN].copy_from_slice(&value.to_le_bytes());
    window
}
