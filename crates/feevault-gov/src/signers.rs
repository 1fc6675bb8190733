//! Authorized signer set and approval threshold.

use std::collections::BTreeSet;

use feevault_types::Address;

use crate::error::TreasuryError;

/// Ascending, duplicate-free set of non-zero signer addresses.
///
/// Invariant: `signer_count() > threshold()`. Construction enforces it and
/// `replace` keeps the set size fixed, so it holds for the registry's whole
/// lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignerRegistry {
    signers: BTreeSet<Address>,
    signatures_required: usize,
}

impl SignerRegistry {
    /// Validate `signers` in a single pass and build the registry.
    ///
    /// Per element: zero address, then equality with the previous element,
    /// then ordering. The size check runs last.
    pub fn new(signers: &[Address], signatures_required: usize) -> Result<Self, TreasuryError> {
        let mut previous: Option<&Address> = None;
        for signer in signers {
            if signer.is_zero() {
                return Err(TreasuryError::InvalidSigner);
            }
            if let Some(prev) = previous {
                if signer == prev {
                    return Err(TreasuryError::DuplicateSigner);
                }
                if signer < prev {
                    return Err(TreasuryError::SignersOutOfOrder);
                }
            }
            previous = Some(signer);
        }
        if signers.len() <= signatures_required {
            return Err(TreasuryError::NotEnoughSigners);
        }

        Ok(SignerRegistry {
            signers: signers.iter().copied().collect(),
            signatures_required,
        })
    }

    pub fn is_signer(&self, address: &Address) -> bool {
        self.signers.contains(address)
    }

    pub fn signer_count(&self) -> usize {
        self.signers.len()
    }

    pub fn threshold(&self) -> usize {
        self.signatures_required
    }

    /// Signers in ascending order.
    pub fn signers(&self) -> Vec<Address> {
        self.signers.iter().copied().collect()
    }

    /// Check a swap without applying it.
    pub fn check_replace(&self, remove: &Address, add: &Address) -> Result<(), TreasuryError> {
        if !self.is_signer(remove) {
            return Err(TreasuryError::InvalidSigner);
        }
        if add.is_zero() {
            return Err(TreasuryError::InvalidSigner);
        }
        if self.is_signer(add) {
            return Err(TreasuryError::DuplicateSigner);
        }
        Ok(())
    }

    /// Swap `remove` for `add`. Set size and threshold are unchanged.
    pub fn replace(&mut self, remove: &Address, add: &Address) -> Result<(), TreasuryError> {
        self.check_replace(remove, add)?;
        self.signers.remove(remove);
        self.signers.insert(*add);
        Ok(())
    }
}
