//! Approval verification for governed actions.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. caller is a signer (`Unauthorized`)
//! 2. deadline has not passed (`AfterDeadline`)
//! 3. nonce matches the current nonce (`InvalidSignature`)
//! 4. each approval, in order: recovers to a signer (`InvalidSignature`), is
//!    not the caller (`CannotSelfSign`), differs from the previous approver
//!    (`DuplicateSignature`) and sorts above it (`SignaturesOutOfOrder`)
//! 5. approvals plus the caller's implicit approval reach the threshold
//!    (`NotEnoughSignatures`)

use feevault_crypto::SignerRecovery;
use feevault_hash::{approval_digest, DomainSeparator};
use feevault_types::{Address, GovernedAction, Timestamp};

use crate::error::TreasuryError;
use crate::signers::SignerRegistry;

/// Caller-supplied authorization for one governed action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Authorization {
    /// Signer submitting the action. Approves implicitly.
    pub caller: Address,
    pub nonce: u64,
    /// Absolute expiry; the action is accepted while `now <= deadline`.
    pub deadline: Timestamp,
    /// Approval envelopes, ascending by recovered signer.
    pub signatures: Vec<Vec<u8>>,
}

impl Authorization {
    pub fn new(caller: Address, nonce: u64, deadline: Timestamp) -> Self {
        Authorization {
            caller,
            nonce,
            deadline,
            signatures: Vec::new(),
        }
    }

    pub fn with_signatures(mut self, signatures: Vec<Vec<u8>>) -> Self {
        self.signatures = signatures;
        self
    }
}

/// Read-only view over the state an approval is checked against.
pub struct ApprovalVerifier<'a> {
    pub domain: &'a DomainSeparator,
    pub registry: &'a SignerRegistry,
    pub recovery: &'a dyn SignerRecovery,
    pub now: Timestamp,
    pub current_nonce: u64,
}

impl<'a> ApprovalVerifier<'a> {
    pub fn verify(&self, auth: &Authorization, action: &GovernedAction) -> Result<(), TreasuryError> {
        if !self.registry.is_signer(&auth.caller) {
            return Err(TreasuryError::Unauthorized);
        }
        if auth.deadline < self.now {
            return Err(TreasuryError::AfterDeadline);
        }
        if auth.nonce != self.current_nonce {
            return Err(TreasuryError::InvalidSignature);
        }

        let digest = approval_digest(self.domain, &auth.caller, action, auth.nonce, auth.deadline);

        let mut previous: Option<Address> = None;
        for signature in &auth.signatures {
            let signer = self
                .recovery
                .recover(&digest, signature)
                .map_err(|_| TreasuryError::InvalidSignature)?;
            if !self.registry.is_signer(&signer) {
                return Err(TreasuryError::InvalidSignature);
            }
            if signer == auth.caller {
                return Err(TreasuryError::CannotSelfSign);
            }
            if let Some(prev) = previous {
                if signer == prev {
                    return Err(TreasuryError::DuplicateSignature);
                }
                if signer < prev {
                    return Err(TreasuryError::SignaturesOutOfOrder);
                }
            }
            previous = Some(signer);
        }

        if auth.signatures.len() + 1 < self.registry.threshold() {
            return Err(TreasuryError::NotEnoughSignatures);
        }
        Ok(())
    }
}
