//! Public 32-byte identifiers.
//!
//! [`Commitment`] and [`Nullifier`] are distinct types even though both are
//! 32 hash bytes, so a value of one kind cannot be passed where the other is
//! expected.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

use crate::{to_array, Bytes32, Result};

/// Opaque caller-supplied context: a plan, pool or business address.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(#[serde_as(as = "Hex")] pub Bytes32);

/// `hash(secret ∥ context_id)`, published without revealing the secret.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment(#[serde_as(as = "Hex")] pub Bytes32);

/// `hash(secret ∥ operation_label ∥ nonce_le)`, recorded on-chain once used.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nullifier(#[serde_as(as = "Hex")] pub Bytes32);

impl ContextId {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: Bytes32) -> Self {
        Self(bytes)
    }

    /// Create from a slice that must be exactly 32 bytes long.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        to_array(data).map(Self)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &Bytes32 {
        &self.0
    }
}

impl Commitment {
    /// Create from raw bytes, e.g. read back from an account field.
    pub fn from_bytes(bytes: Bytes32) -> Self {
        Self(bytes)
    }

    /// Create from a slice that must be exactly 32 bytes long.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        to_array(data).map(Self)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &Bytes32 {
        &self.0
    }

    /// All-zero commitments are what an uninitialized account field holds.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl Nullifier {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: Bytes32) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &Bytes32 {
        &self.0
    }
}

impl AsRef<[u8]> for ContextId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Commitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Nullifier {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Bytes32> for ContextId {
    fn from(bytes: Bytes32) -> Self {
        Self(bytes)
    }
}
