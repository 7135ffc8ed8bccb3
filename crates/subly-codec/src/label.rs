//! Encrypted plan labels.
//!
//! Plan names travel in 64-byte envelopes and descriptions in 128-byte
//! ones. The UTF-8 text is zero-padded to the window, so a label may not
//! itself contain a NUL.
//!
//! A 32-byte envelope has no window after the 40 bytes of nonce and tag, so
//! names need at least 64 bytes.

use zeroize::Zeroizing;

use crate::envelope::{self, window_len};
use crate::key::EncryptionKey;
use crate::{trim_padding, CodecError, Result};

/// Envelope size for a plan name.
pub const NAME_ENVELOPE_LEN: usize = 64;

/// Envelope size for a plan description.
pub const DESCRIPTION_ENVELOPE_LEN: usize = 128;

/// Encrypt `text` into an `N`-byte envelope.
pub fn encrypt_label<const N: usize>(text: &str, key: &EncryptionKey) -> Result<[u8; N]> {
    let bytes = text.as_bytes();
    let capacity = window_len(N);

    if bytes.contains(&0) {
        return Err(CodecError::InvalidText("label contains NUL".to_string()));
    }
    if bytes.len() > capacity {
        return Err(CodecError::InvalidInputLength {
            expected: capacity,
            actual: bytes.len(),
        });
    }

    let mut window = Zeroizing::new(vec![0u8; capacity]);
    window[..bytes.len()].copy_from_slice(bytes);
    envelope::seal(key, &window)
}

/// Decrypt an `N`-byte label envelope.
pub fn decrypt_label<const N: usize>(data: &[u8], key: &EncryptionKey) -> Result<String> {
    let window = envelope::open(key, data, N)?;
    std::str::from_utf8(trim_padding(&window))
        .map(str::to_owned)
        .map_err(|e| CodecError::MalformedRecord(e.to_string()))
}
