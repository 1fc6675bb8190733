//! Approval signing and signer recovery for the FeeVault treasury.
//!
//! Approvals are ML-DSA-44 (FIPS 204) signatures over a 32-byte approval
//! digest. Since lattice signatures do not support public-key recovery, an
//! approval travels as an envelope carrying the signer's public key next to
//! the signature; the signer address is derived from that key once the
//! signature verifies.

pub mod approval;
pub mod error;
pub mod ml_dsa44;
pub mod recovery;

pub use approval::collect_approvals;
pub use error::CryptoError;
pub use ml_dsa44::{
    ApprovalSigningKey, MlDsa44Backend, ML_DSA_44_PUBLIC_KEY_SIZE, ML_DSA_44_SECRET_KEY_SIZE,
    ML_DSA_44_SIGNATURE_SIZE,
};
pub use recovery::{
    address_from_public_key, ApprovalSignature, MlDsa44Recovery, SignerRecovery,
    ADDRESS_DOMAIN_TAG, SUITE_ML_DSA_44,
};
