pub mod approval;
pub mod encode;
pub mod hash;

pub use approval::{
    approval_digest, approval_preimage, domain_separator_hash, DomainSeparator,
    DOMAIN_SEPARATOR_TAG,
};
pub use hash::{sha3_256, sha3_256_tagged};
