//! Fail-closed access to the operating system CSPRNG.
//!
//! Nonces and secrets come from `OsRng` unless a caller passes its own
//! generator to a `*_from` variant. If the source cannot be read the caller
//! gets [`CryptoError::EntropyUnavailable`]; there is no fallback generator.

pub use rand::rngs::OsRng;
pub use rand::{CryptoRng, RngCore};

use crate::{CryptoError, Result};

/// Fill `buf` with bytes from the OS CSPRNG.
pub fn fill_random(buf: &mut [u8]) -> Result<()> {
    fill_random_from(&mut OsRng, buf)
}

/// Fill `buf` from `rng`.
pub fn fill_random_from<R: RngCore + CryptoRng + ?Sized>(rng: &mut R, buf: &mut [u8]) -> Result<()> {
    rng.try_fill_bytes(buf).map_err(|e| {
        tracing::warn!(len = buf.len(), "random source unavailable");
        CryptoError::EntropyUnavailable(e.to_string())
    })
}

/// Draw a fresh random byte array of length `N`.
pub fn random_array<const N: usize>() -> Result<[u8; N]> {
    random_array_from(&mut OsRng)
}

/// Draw a random byte array of length `N` from `rng`.
pub fn random_array_from<R: RngCore + CryptoRng + ?Sized, const N: usize>(
    rng: &mut R,
) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    fill_random_from(rng, &mut out)?;
    Ok(out)
}

/// A generator whose every read fails.
///
/// Lets dependent crates exercise their fail-closed paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        Err(rand::Error::new("random source offline"))
    }
}

impl CryptoRng for FailingRng {}
