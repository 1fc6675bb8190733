use feevault_types::Hash32;
use sha3::{Digest, Sha3_256};

/// Compute SHA3-256 over arbitrary bytes.
pub fn sha3_256(data: &[u8]) -> Hash32 {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Domain-separated hashing: H(tag || body)
pub fn sha3_256_tagged(tag: &str, body: &[u8]) -> Hash32 {
    let mut hasher = Sha3_256::new();
    hasher.update(tag.as_bytes());
    hasher.update(body);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_changes_digest() {
        assert_ne!(sha3_256_tagged("A", b"body"), sha3_256_tagged("B", b"body"));
        assert_eq!(sha3_256_tagged("A", b"body"), sha3_256(b"Abody"));
    }
}
