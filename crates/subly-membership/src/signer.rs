//! The signing capability proofs are issued with.
//!
//! A wallet adapter or a service-held key implements [`DetachedSigner`];
//! the issuer only ever sees the public key and detached signatures.

use subly_crypto::ed25519::{KeyPair, SigningKey, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};

use crate::Result;

/// Produces detached Ed25519 signatures over arbitrary messages.
pub trait DetachedSigner {
    /// The public key signatures verify against.
    fn public_key(&self) -> [u8; PUBLIC_KEY_SIZE];

    /// Sign `message`, returning the 64-byte detached signature.
    fn sign_detached(&self, message: &[u8]) -> Result<[u8; SIGNATURE_SIZE]>;
}

impl DetachedSigner for SigningKey {
    fn public_key(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.verifying_key().to_bytes()
    }

    fn sign_detached(&self, message: &[u8]) -> Result<[u8; SIGNATURE_SIZE]> {
        Ok(self.sign(message).to_bytes())
    }
}

impl DetachedSigner for KeyPair {
    fn public_key(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.verifying_key.to_bytes()
    }

    fn sign_detached(&self, message: &[u8]) -> Result<[u8; SIGNATURE_SIZE]> {
        self.signing_key.sign_detached(message)
    }
}

impl<S: DetachedSigner + ?Sized> DetachedSigner for &S {
    fn public_key(&self) -> [u8; PUBLIC_KEY_SIZE] {
        (**self).public_key()
    }

    fn sign_detached(&self, message: &[u8]) -> Result<[u8; SIGNATURE_SIZE]> {
        (**self).sign_detached(message)
    }
}
