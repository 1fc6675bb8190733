use thiserror::Error;

/// Errors from key handling and approval signature processing.
///
/// Messages never include key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("malformed key: {0}")]
    MalformedKey(&'static str),

    #[error("malformed signature envelope: {0}")]
    MalformedSignature(String),

    #[error("unsupported signature suite {0}")]
    UnsupportedSuite(u8),

    #[error("signature does not verify")]
    InvalidSignature,

    #[error("key file: {0}")]
    KeyFile(String),

    #[error("ML-DSA-44 {0} failed")]
    Backend(&'static str),
}
