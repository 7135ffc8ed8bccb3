//! Ed25519 signing and verification (RFC 8032).
//!
//! Ed25519 signs membership proofs. Wallets hold their own keys; this module
//! covers the verifier side and service-held issuer keys.
//!
//! This module wraps `ed25519-dalek` with Subly-specific types.

use ed25519_dalek::{Signer, Verifier};
use serde::{Deserialize, Serialize};

use crate::{CryptoError, Result};

/// Public key size in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Detached signature size in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// An Ed25519 signing key (private key).
///
/// The inner `ed25519_dalek` key zeroizes itself on drop.
#[derive(Clone)]
pub struct SigningKey {
    inner: ed25519_dalek::SigningKey,
}

/// An Ed25519 verification key (public key).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKey {
    inner: ed25519_dalek::VerifyingKey,
}

/// An Ed25519 signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    inner: ed25519_dalek::Signature,
}

/// An Ed25519 keypair.
pub struct KeyPair {
    pub signing_key: SigningKey,
    pub verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Generate a new random signing key from the OS CSPRNG.
    ///
    /// Fails closed with [`CryptoError::EntropyUnavailable`].
    pub fn generate() -> Result<Self> {
        let seed = zeroize::Zeroizing::new(crate::random::random_array::<32>()?);
        Ok(Self::from_bytes(&seed))
    }

    /// Create a signing key from raw bytes.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self {
            inner: ed25519_dalek::SigningKey::from_bytes(bytes),
        }
    }

    /// Get the raw bytes of this signing key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes()
    }

    /// Get the corresponding verifying key.
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey {
            inner: self.inner.verifying_key(),
        }
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature {
            inner: self.inner.sign(message),
        }
    }
}

impl VerifyingKey {
    /// Create a verifying key from raw bytes.
    ///
    /// Fails if the bytes are not a valid compressed Edwards point.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_SIZE]) -> Result<Self> {
        let inner = ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map_err(|e| CryptoError::InvalidInput(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Get the raw bytes of this verifying key.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.inner.to_bytes()
    }

    /// Get the raw bytes as a slice.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        self.inner.as_bytes()
    }

    /// Verify a signature on a message.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        self.inner
            .verify(message, &signature.inner)
            .map_err(|_| CryptoError::SignatureVerification)
    }
}

impl Signature {
    /// Create a signature from raw bytes.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_SIZE]) -> Self {
        Self {
            inner: ed25519_dalek::Signature::from_bytes(bytes),
        }
    }

    /// Get the raw bytes of this signature.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        self.inner.to_bytes()
    }
}

impl KeyPair {
    /// Generate a new random Ed25519 keypair.
    pub fn generate() -> Result<Self> {
        let signing_key = SigningKey::generate()?;
        let verifying_key = signing_key.verifying_key();
        Ok(Self {
            signing_key,
            verifying_key,
        })
    }

    /// Create a keypair from a signing key's raw bytes.
    pub fn from_bytes(secret: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(secret);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }
}

/// Verify a detached signature given only raw byte buffers.
///
/// Any malformed public key is reported as a verification failure.
pub fn verify_detached(
    public_key: &[u8; PUBLIC_KEY_SIZE],
    message: &[u8],
    signature: &[u8; SIGNATURE_SIZE],
) -> Result<()> {
    let key = VerifyingKey::from_bytes(public_key).map_err(|_| CryptoError::SignatureVerification)?;
    key.verify(message, &Signature::from_bytes(signature))
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("public", &self.verifying_key())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_sign_verify_roundtrip() {
        let kp = KeyPair::generate().expect("keypair");
        let msg = b"Subly membership";
        let sig = kp.signing_key.sign(msg);
        assert!(kp.verifying_key.verify(msg, &sig).is_ok());
    }

    #[test]
    fn test_wrong_message_fails() {
        let kp = KeyPair::generate().expect("keypair");
        let sig = kp.signing_key.sign(b"correct message");
        assert!(kp.verifying_key.verify(b"wrong message", &sig).is_err());
    }

    #[test]
    fn test_wrong_key_fails() {
        let kp1 = KeyPair::generate().expect("keypair");
        let kp2 = KeyPair::generate().expect("keypair");
        let sig = kp1.signing_key.sign(b"test");
        assert!(kp2.verifying_key.verify(b"test", &sig).is_err());
    }

    #[test]
    fn test_rfc8032_test1() {
        // RFC 8032 Section 7.1, TEST 1
        let kp = KeyPair::from_bytes(&hex!(
            "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60"
        ));
        assert_eq!(
            kp.verifying_key.to_bytes(),
            hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a")
        );
        let sig = kp.signing_key.sign(b"");
        assert_eq!(
            sig.to_bytes(),
            hex!(
                "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155"
                "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
            )
        );
    }

    #[test]
    fn test_verify_detached_raw_bytes() {
        let kp = KeyPair::from_bytes(&[7u8; 32]);
        let sig = kp.signing_key.sign(b"payload").to_bytes();
        assert!(verify_detached(&kp.verifying_key.to_bytes(), b"payload", &sig).is_ok());
        assert!(verify_detached(&kp.verifying_key.to_bytes(), b"other", &sig).is_err());
    }

    #[test]
    fn test_verify_detached_rejects_invalid_point() {
        // y = 2 does not decompress to a curve point.
        let mut bad_key = [0u8; 32];
        bad_key[0] = 2;
        let result = verify_detached(&bad_key, b"payload", &[0u8; 64]);
        assert!(matches!(result, Err(CryptoError::SignatureVerification)));
    }

    #[test]
    fn test_deterministic_key_derivation() {
        let kp1 = KeyPair::from_bytes(&[42u8; 32]);
        let kp2 = KeyPair::from_bytes(&[42u8; 32]);
        assert_eq!(kp1.verifying_key.to_bytes(), kp2.verifying_key.to_bytes());

        let kp3 = KeyPair::from_bytes(&[43u8; 32]);
        assert_ne!(kp1.verifying_key.to_bytes(), kp3.verifying_key.to_bytes());
    }

    #[test]
    fn test_signature_serialization() {
        let kp = KeyPair::from_bytes(&[1u8; 32]);
        let sig = kp.signing_key.sign(b"test");
        assert_eq!(Signature::from_bytes(&sig.to_bytes()), sig);
    }
}
