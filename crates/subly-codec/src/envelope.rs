//! Fixed-size authenticated envelopes.

use subly_crypto::random::{self, CryptoRng, OsRng, RngCore};
use subly_crypto::xchacha20;
use subly_types::layout::FixedWriter;
use zeroize::Zeroizing;

use crate::key::EncryptionKey;
use crate::{CodecError, Result};

/// Nonce bytes at the front of every envelope.
pub const NONCE_SIZE: usize = xchacha20::NONCE_SIZE;

/// Bytes an envelope spends on nonce and tag.
pub const OVERHEAD: usize = NONCE_SIZE + xchacha20::TAG_SIZE;

/// Plaintext window available inside an envelope of `envelope_len` bytes.
pub const fn window_len(envelope_len: usize) -> usize {
    envelope_len.saturating_sub(OVERHEAD)
}

/// Seal a full plaintext window into an `N`-byte envelope under a fresh nonce.
///
/// `window` must be exactly `N - 40` bytes; callers pad before sealing.
pub fn seal<const N: usize>(key: &EncryptionKey, window: &[u8]) -> Result<[u8; N]> {
    seal_from(&mut OsRng, key, window)
}

/// [`seal`] drawing the nonce from `rng`.
pub fn seal_from<R: RngCore + CryptoRng + ?Sized, const N: usize>(
    rng: &mut R,
    key: &EncryptionKey,
    window: &[u8],
) -> Result<[u8; N]> {
    let nonce = random::random_array_from::<R, NONCE_SIZE>(rng)
        .map_err(|e| CodecError::EntropyUnavailable(e.to_string()))?;
    seal_with_nonce(key, &nonce, window)
}

/// Seal with a caller-chosen nonce. Only for known-answer tests.
pub(crate) fn seal_with_nonce<const N: usize>(
    key: &EncryptionKey,
    nonce: &[u8; NONCE_SIZE],
    window: &[u8],
) -> Result<[u8; N]> {
    if N < OVERHEAD || window.len() != window_len(N) {
        return Err(CodecError::InvalidInputLength {
            expected: window_len(N),
            actual: window.len(),
        });
    }

    let ciphertext = xchacha20::encrypt_no_aad(key.as_bytes(), nonce, window)
        .map_err(|_| CodecError::EncryptionFailed)?;

    let mut writer = FixedWriter::<N>::new();
    writer.put(nonce).put(&ciphertext);
    Ok(writer.finish()?)
}

/// Authenticate and decrypt an envelope of exactly `envelope_len` bytes.
///
/// Returns the full plaintext window, padding included.
pub fn open(
    key: &EncryptionKey,
    envelope: &[u8],
    envelope_len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    if envelope.len() != envelope_len || envelope_len < OVERHEAD {
        return Err(CodecError::InvalidInputLength {
            expected: envelope_len,
            actual: envelope.len(),
        });
    }

    let (nonce, ciphertext) = envelope.split_at(NONCE_SIZE);
    let nonce: [u8; NONCE_SIZE] = subly_types::to_array(nonce)?;

    let window = xchacha20::decrypt_no_aad(key.as_bytes(), &nonce, ciphertext).map_err(|_| {
        tracing::debug!(envelope_len, "envelope failed authentication");
        CodecError::DecryptionFailed
    })?;

    Ok(Zeroizing::new(window))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> EncryptionKey {
        EncryptionKey::from_bytes([0x42u8; 32])
    }

    #[test]
    fn test_window_len() {
        assert_eq!(window_len(64), 24);
        assert_eq!(window_len(128), 88);
        assert_eq!(window_len(10), 0);
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let window = [0x5au8; 24];
        let env: [u8; 64] = seal(&key(), &window).expect("seal");
        let opened = open(&key(), &env, 64).expect("open");
        assert_eq!(opened.as_slice(), &window);
    }

    #[test]
    fn test_layout_is_nonce_then_ciphertext() {
        let nonce = [0x07u8; NONCE_SIZE];
        let env: [u8; 64] = seal_with_nonce(&key(), &nonce, &[0u8; 24]).expect("seal");
        assert_eq!(&env[..NONCE_SIZE], &nonce);

        let ct = xchacha20::encrypt_no_aad(key().as_bytes(), &nonce, &[0u8; 24]).expect("encrypt");
        assert_eq!(&env[NONCE_SIZE..], ct.as_slice());
    }

    #[test]
    fn test_seal_rejects_wrong_window() {
        let result: Result<[u8; 64]> = seal(&key(), &[0u8; 25]);
        assert_eq!(
            result.map(|_| ()),
            Err(CodecError::InvalidInputLength {
                expected: 24,
                actual: 25
            })
        );
    }

    #[test]
    fn test_seal_fails_closed_without_entropy() {
        let result: Result<[u8; 64]> = seal_from(&mut random::FailingRng, &key(), &[0u8; 24]);
        assert!(matches!(result, Err(CodecError::EntropyUnavailable(_))));
    }

    #[test]
    fn test_open_rejects_wrong_length() {
        assert!(matches!(
            open(&key(), &[0u8; 63], 64),
            Err(CodecError::InvalidInputLength {
                expected: 64,
                actual: 63
            })
        ));
    }

    #[test]
    fn test_every_byte_is_authenticated() {
        let env: [u8; 64] = seal(&key(), &[1u8; 24]).expect("seal");
        for i in 0..env.len() {
            let mut tampered = env;
            tampered[i] ^= 0x80;
            assert_eq!(
                open(&key(), &tampered, 64).map(|_| ()),
                Err(CodecError::DecryptionFailed),
                "flip at byte {i} went undetected"
            );
        }
    }
}
