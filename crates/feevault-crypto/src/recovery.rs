//! Signer recovery from approval envelopes.
//!
//! Envelope layout:
//!
//! ```text
//! suite_id:u8 || public_key:[u8; 1312] || signature:[u8; 2420]
//! ```

use feevault_hash::sha3_256_tagged;
use feevault_types::{Address, Hash32};

use crate::error::CryptoError;
use crate::ml_dsa44::{MlDsa44Backend, ML_DSA_44_PUBLIC_KEY_SIZE, ML_DSA_44_SIGNATURE_SIZE};

pub const SUITE_ML_DSA_44: u8 = 0x01;

pub const ADDRESS_DOMAIN_TAG: &str = "FEEVAULT:ADDR:v1";

/// Maps `(message, signature)` to the identity that produced it.
///
/// Implementations must be pure: the same inputs always recover the same
/// address or fail the same way.
pub trait SignerRecovery: Send + Sync {
    fn recover(&self, digest: &Hash32, signature: &[u8]) -> Result<Address, CryptoError>;
}

/// Last 20 bytes of H("FEEVAULT:ADDR:v1" || public_key).
pub fn address_from_public_key(public_key: &[u8]) -> Address {
    Address::from_hash_tail(&sha3_256_tagged(ADDRESS_DOMAIN_TAG, public_key))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApprovalSignature {
    pub suite_id: u8,
    pub public_key: Vec<u8>,
    pub signature: Vec<u8>,
}

impl ApprovalSignature {
    pub const ENCODED_LEN: usize = 1 + ML_DSA_44_PUBLIC_KEY_SIZE + ML_DSA_44_SIGNATURE_SIZE;

    pub fn new(public_key: Vec<u8>, signature: Vec<u8>) -> Self {
        ApprovalSignature {
            suite_id: SUITE_ML_DSA_44,
            public_key,
            signature,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.public_key.len() + self.signature.len());
        out.push(self.suite_id);
        out.extend_from_slice(&self.public_key);
        out.extend_from_slice(&self.signature);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let (&suite_id, rest) = bytes
            .split_first()
            .ok_or_else(|| CryptoError::MalformedSignature("empty envelope".to_string()))?;
        if suite_id != SUITE_ML_DSA_44 {
            return Err(CryptoError::UnsupportedSuite(suite_id));
        }
        if bytes.len() != Self::ENCODED_LEN {
            return Err(CryptoError::MalformedSignature(format!(
                "envelope must be {} bytes, got {}",
                Self::ENCODED_LEN,
                bytes.len()
            )));
        }
        let (public_key, signature) = rest.split_at(ML_DSA_44_PUBLIC_KEY_SIZE);
        Ok(ApprovalSignature {
            suite_id,
            public_key: public_key.to_vec(),
            signature: signature.to_vec(),
        })
    }

    pub fn signer(&self) -> Address {
        address_from_public_key(&self.public_key)
    }
}

/// Recovers ML-DSA-44 approvers: parse, verify, derive address.
#[derive(Debug, Clone, Copy, Default)]
pub struct MlDsa44Recovery;

impl SignerRecovery for MlDsa44Recovery {
    fn recover(&self, digest: &Hash32, signature: &[u8]) -> Result<Address, CryptoError> {
        let envelope = ApprovalSignature::from_bytes(signature)?;
        MlDsa44Backend::verify(&envelope.public_key, digest, &envelope.signature)?;
        Ok(envelope.signer())
    }
}
