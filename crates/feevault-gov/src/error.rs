use thiserror::Error;

use crate::runtime::CallFailure;

/// Rejection reasons for treasury construction and governed actions.
///
/// A governed action that returns any of these has left the treasury state
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreasuryError {
    #[error("caller is not a signer")]
    Unauthorized,

    #[error("invalid approval signature")]
    InvalidSignature,

    #[error("caller cannot approve its own action")]
    CannotSelfSign,

    #[error("duplicate approval signature")]
    DuplicateSignature,

    #[error("approval signatures are not in ascending signer order")]
    SignaturesOutOfOrder,

    #[error("not enough approval signatures")]
    NotEnoughSignatures,

    #[error("approval deadline has passed")]
    AfterDeadline,

    #[error("invalid signer")]
    InvalidSigner,

    #[error("duplicate signer")]
    DuplicateSigner,

    #[error("signers are not in ascending order")]
    SignersOutOfOrder,

    #[error("signer count must exceed the approval threshold")]
    NotEnoughSigners,

    #[error("fee exceeds the protocol maximum")]
    InvalidFee,

    #[error("fee change is not scheduled, not yet executable, or above the scheduled fee")]
    CannotChangeFee,

    #[error("call to {} failed: {}", .0.target, .0.reason)]
    CallFailed(CallFailure),
}
