//! The membership proof record and its byte layouts.
//!
//! Two layouts matter:
//!
//! - the **signed message** ([`proof_message`], 104 bytes), which binds plan,
//!   commitment, nonce and expiry;
//! - the **wire layout** ([`MembershipProof::to_bytes`], 312 bytes), the
//!   fixed-width form embedded in ledger instructions.
//!
//! Both are binding contracts: reordering a field invalidates every proof
//! already issued.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use subly_crypto::ed25519::SIGNATURE_SIZE;
use subly_types::layout::{FixedReader, FixedWriter};
use subly_types::{Commitment, ContextId, ID_SIZE};

use crate::Result;

/// Length of the per-proof random nonce.
pub const PROOF_NONCE_LEN: usize = 32;

/// Length of the opaque validity proof.
pub const VALIDITY_PROOF_LEN: usize = 128;

/// Length of the signed message.
pub const PROOF_MESSAGE_LEN: usize = ID_SIZE + ID_SIZE + PROOF_NONCE_LEN + 8;

/// Length of the wire encoding.
pub const PROOF_WIRE_LEN: usize =
    ID_SIZE + ID_SIZE + VALIDITY_PROOF_LEN + 4 + 4 + 8 + 8 + SIGNATURE_SIZE + PROOF_NONCE_LEN;

/// Opaque tree-membership proof produced and checked by the ledger side.
///
/// Carried through unchanged; nothing here interprets its contents.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityProof(#[serde_as(as = "Hex")] pub [u8; VALIDITY_PROOF_LEN]);

impl ValidityProof {
    pub fn from_bytes(bytes: [u8; VALIDITY_PROOF_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(Self(subly_types::to_array(data)?))
    }

    pub fn as_bytes(&self) -> &[u8; VALIDITY_PROOF_LEN] {
        &self.0
    }
}

impl Default for ValidityProof {
    fn default() -> Self {
        Self([0u8; VALIDITY_PROOF_LEN])
    }
}

/// A signed, time-bound membership assertion.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipProof {
    pub plan_id: ContextId,
    pub membership_commitment: Commitment,
    pub validity_proof: ValidityProof,
    pub root_index: u32,
    pub leaf_index: u32,
    /// Unix seconds at issuance.
    pub proof_timestamp: i64,
    /// Unix seconds after which the proof is expired.
    pub valid_until: i64,
    #[serde_as(as = "Hex")]
    pub signature: [u8; SIGNATURE_SIZE],
    #[serde_as(as = "Hex")]
    pub nonce: [u8; PROOF_NONCE_LEN],
}

/// Build the 104-byte message a proof signature covers.
///
/// # Arguments
///
/// * `plan_id` - Plan the membership is for
/// * `commitment` - Membership commitment
/// * `nonce` - Fresh per-proof nonce
/// * `valid_until` - Expiry, Unix seconds
pub fn proof_message(
    plan_id: &ContextId,
    commitment: &Commitment,
    nonce: &[u8; PROOF_NONCE_LEN],
    valid_until: i64,
) -> [u8; PROOF_MESSAGE_LEN] {
    let mut message = [0u8; PROOF_MESSAGE_LEN];
    message[..32].copy_from_slice(plan_id.as_bytes());
    message[32..64].copy_from_slice(commitment.as_bytes());
    message[64..96].copy_from_slice(nonce);
    message[96..].copy_from_slice(&valid_until.to_le_bytes());
    message
}

impl MembershipProof {
    /// The message this proof's signature covers.
    pub fn message(&self) -> [u8; PROOF_MESSAGE_LEN] {
        proof_message(
            &self.plan_id,
            &self.membership_commitment,
            &self.nonce,
            self.valid_until,
        )
    }

    /// Encode to the fixed 312-byte wire layout.
    pub fn to_bytes(&self) -> Result<[u8; PROOF_WIRE_LEN]> {
        let mut writer = FixedWriter::<PROOF_WIRE_LEN>::new();
        writer
            .put(self.plan_id.as_bytes())
            .put(self.membership_commitment.as_bytes())
            .put(self.validity_proof.as_bytes())
            .put_u32_le(self.root_index)
            .put_u32_le(self.leaf_index)
            .put_i64_le(self.proof_timestamp)
            .put_i64_le(self.valid_until)
            .put(&self.signature)
            .put(&self.nonce);
        Ok(writer.finish()?)
    }

    /// Decode from the 312-byte wire layout.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = FixedReader::new(data, PROOF_WIRE_LEN)?;
        Ok(Self {
            plan_id: ContextId::from_bytes(reader.take()?),
            membership_commitment: Commitment::from_bytes(reader.take()?),
            validity_proof: ValidityProof::from_bytes(reader.take()?),
            root_index: reader.u32_le()?,
            leaf_index: reader.u32_le()?,
            proof_timestamp: reader.i64_le()?,
            valid_until: reader.i64_le()?,
            signature: reader.take()?,
            nonce: reader.take()?,
        })
    }
}
