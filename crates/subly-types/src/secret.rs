//! The user's 32-byte secret.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{to_array, Bytes32, Result};

/// A user secret.
///
/// Owned by the user and persisted only by the caller. Zeroized on drop;
/// `Debug` never prints the bytes and the type does not implement `Serialize`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret([u8; 32]);

impl Secret {
    /// Wrap raw secret bytes.
    pub fn from_bytes(bytes: Bytes32) -> Self {
        Self(bytes)
    }

    /// Wrap a slice that must be exactly 32 bytes long.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        to_array(data).map(Self)
    }

    /// Borrow the raw bytes.
    pub fn expose(&self) -> &Bytes32 {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}
