use feevault_types::Hash32;

use crate::error::CryptoError;
use crate::ml_dsa44::ApprovalSigningKey;

/// Sign `digest` with every key and return the envelopes in ascending
/// signer-address order, the order the treasury requires.
pub fn collect_approvals(
    keys: &[&ApprovalSigningKey],
    digest: &Hash32,
) -> Result<Vec<Vec<u8>>, CryptoError> {
    let mut ordered: Vec<&ApprovalSigningKey> = keys.to_vec();
    ordered.sort_by_key(|key| key.address());
    ordered
        .into_iter()
        .map(|key| key.sign_approval(digest))
        .collect()
}
