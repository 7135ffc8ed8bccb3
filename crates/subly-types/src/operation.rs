//! Operation tags for nullifier derivation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// The closed set of operations that consume a nullifier.
///
/// Nullifiers hash the tag's UTF-8 label, not its discriminant, so adding a
/// variant can never collide with a numeric encoding used elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationTag {
    Withdraw,
    Transfer,
}

impl OperationTag {
    /// Every tag, in discriminant order.
    pub const ALL: [OperationTag; 2] = [OperationTag::Withdraw, OperationTag::Transfer];

    /// The label hashed into the nullifier.
    pub fn label(self) -> &'static str {
        match self {
            OperationTag::Withdraw => "withdraw",
            OperationTag::Transfer => "transfer",
        }
    }

    /// Label bytes, as they appear in the nullifier preimage.
    pub fn as_bytes(self) -> &'static [u8] {
        self.label().as_bytes()
    }

    /// One-byte discriminant used by the vault program's account layout.
    pub fn discriminant(self) -> u8 {
        match self {
            OperationTag::Withdraw => 0,
            OperationTag::Transfer => 1,
        }
    }
}

impl fmt::Display for OperationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OperationTag {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationTag::ALL
            .into_iter()
            .find(|tag| tag.label() == s)
            .ok_or_else(|| TypesError::InvalidOperationTag(s.to_string()))
    }
}

impl TryFrom<u8> for OperationTag {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        OperationTag::ALL
            .into_iter()
            .find(|tag| tag.discriminant() == value)
            .ok_or_else(|| TypesError::InvalidOperationTag(format!("discriminant {value}")))
    }
}
