//! Proof issuance.

use subly_crypto::random::{self, CryptoRng, OsRng, RngCore};
use subly_types::{Commitment, ContextId};

use crate::clock::{Clock, SystemClock};
use crate::config::ProofConfig;
use crate::proof::{proof_message, MembershipProof, ValidityProof, PROOF_NONCE_LEN};
use crate::signer::DetachedSigner;
use crate::{MembershipError, Result};

/// What to issue a proof for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofRequest {
    pub plan_id: ContextId,
    pub membership_commitment: Commitment,
    /// Validity window in seconds; `None` uses the configured default.
    pub validity_seconds: Option<u32>,
    pub validity_proof: ValidityProof,
    pub root_index: u32,
    pub leaf_index: u32,
}

impl ProofRequest {
    pub fn new(plan_id: ContextId, membership_commitment: Commitment) -> Self {
        Self {
            plan_id,
            membership_commitment,
            validity_seconds: None,
            validity_proof: ValidityProof::default(),
            root_index: 0,
            leaf_index: 0,
        }
    }

    pub fn with_validity(mut self, seconds: u32) -> Self {
        self.validity_seconds = Some(seconds);
        self
    }

    /// Attach the ledger-side tree proof and position.
    pub fn with_tree_position(
        mut self,
        validity_proof: ValidityProof,
        root_index: u32,
        leaf_index: u32,
    ) -> Self {
        self.validity_proof = validity_proof;
        self.root_index = root_index;
        self.leaf_index = leaf_index;
        self
    }
}

/// Issues membership proofs against a clock and a validity policy.
#[derive(Debug, Clone)]
pub struct ProofIssuer<C: Clock = SystemClock> {
    config: ProofConfig,
    clock: C,
}

impl ProofIssuer<SystemClock> {
    pub fn new(config: ProofConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for ProofIssuer<SystemClock> {
    fn default() -> Self {
        Self::new(ProofConfig::default())
    }
}

impl<C: Clock> ProofIssuer<C> {
    pub fn with_clock(config: ProofConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &ProofConfig {
        &self.config
    }

    /// Issue a proof for `request`, signed by `signer`.
    ///
    /// # Errors
    ///
    /// * [`MembershipError::InvalidValidity`] if a configured maximum is exceeded
    /// * [`MembershipError::EntropyUnavailable`] if no nonce can be drawn
    /// * [`MembershipError::SigningFailed`] if the signer fails
    pub fn issue<S: DetachedSigner + ?Sized>(
        &self,
        request: ProofRequest,
        signer: &S,
    ) -> Result<MembershipProof> {
        self.issue_with_rng(request, signer, &mut OsRng)
    }

    /// [`ProofIssuer::issue`] drawing the proof nonce from `rng`.
    pub fn issue_with_rng<S, R>(
        &self,
        request: ProofRequest,
        signer: &S,
        rng: &mut R,
    ) -> Result<MembershipProof>
    where
        S: DetachedSigner + ?Sized,
        R: RngCore + CryptoRng + ?Sized,
    {
        let validity = request
            .validity_seconds
            .unwrap_or(self.config.default_validity_seconds);
        if validity > self.config.max_validity_seconds {
            return Err(MembershipError::InvalidValidity {
                requested: validity,
                max: self.config.max_validity_seconds,
            });
        }

        let nonce = random::random_array_from::<R, PROOF_NONCE_LEN>(rng)
            .map_err(|e| MembershipError::EntropyUnavailable(e.to_string()))?;

        let now = self.clock.now();
        let valid_until = now.saturating_add(i64::from(validity));

        let message = proof_message(
            &request.plan_id,
            &request.membership_commitment,
            &nonce,
            valid_until,
        );
        let signature = signer.sign_detached(&message)?;

        tracing::debug!(
            proof_timestamp = now,
            valid_until,
            validity_seconds = validity,
            "membership proof issued"
        );

        Ok(MembershipProof {
            plan_id: request.plan_id,
            membership_commitment: request.membership_commitment,
            validity_proof: request.validity_proof,
            root_index: request.root_index,
            leaf_index: request.leaf_index,
            proof_timestamp: now,
            valid_until,
            signature,
            nonce,
        })
    }
}

/// Issue a proof with the default policy and the system clock.
///
/// `validity_seconds` of `None` means one hour.
pub fn issue_proof<S: DetachedSigner + ?Sized>(
    plan_id: ContextId,
    membership_commitment: Commitment,
    signer: &S,
    validity_seconds: Option<u32>,
) -> Result<MembershipProof> {
    let mut request = ProofRequest::new(plan_id, membership_commitment);
    request.validity_seconds = validity_seconds;
    ProofIssuer::default().issue(request, signer)
}
