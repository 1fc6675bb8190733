//! Approval digests for governed treasury actions.
//!
//! The digest an approver signs binds, in order:
//!
//! ```text
//! domain_prefix(chain_id, kind)     "FEEVAULT:<SCOPE>:<KIND>:v1"
//! domain_separator_hash             H(tag || name || version || chain_id || authority)
//! executor                          20 bytes, the submitting signer
//! action fields                     per GovernedAction variant
//! nonce                             u64 LE
//! deadline                          u64 LE
//! ```
//!
//! Variable-length fields (call data, domain name and version, call lists) are
//! length-prefixed so distinct actions never share a preimage.

use serde::{Deserialize, Serialize};

use feevault_types::{domain_prefix, Address, Call, ChainId, GovernedAction, Hash32, Timestamp};

use crate::encode::{put_bytes, put_u32, put_u64, put_var_bytes};
use crate::hash::{sha3_256, sha3_256_tagged};

pub const DOMAIN_SEPARATOR_TAG: &str = "FEEVAULT:DOMAIN:v1";

/// Per-deployment identity mixed into every approval digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSeparator {
    pub name: String,
    pub version: String,
    pub chain_id: ChainId,
    /// Address of the treasury instance the approvals are for.
    pub authority: Address,
}

impl DomainSeparator {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: ChainId,
        authority: Address,
    ) -> Self {
        DomainSeparator {
            name: name.into(),
            version: version.into(),
            chain_id,
            authority,
        }
    }
}

pub fn domain_separator_hash(domain: &DomainSeparator) -> Hash32 {
    let mut out = Vec::new();
    put_var_bytes(&mut out, domain.name.as_bytes());
    put_var_bytes(&mut out, domain.version.as_bytes());
    put_u64(&mut out, domain.chain_id.as_u64());
    put_bytes(&mut out, domain.authority.as_bytes());
    sha3_256_tagged(DOMAIN_SEPARATOR_TAG, &out)
}

fn put_call(out: &mut Vec<u8>, call: &Call) {
    put_bytes(out, call.target.as_bytes());
    put_var_bytes(out, &call.data);
    put_bytes(out, call.value.as_bytes());
}

fn put_action(out: &mut Vec<u8>, action: &GovernedAction) {
    match action {
        GovernedAction::ReplaceSigner {
            signer_to_remove,
            signer_to_add,
        } => {
            put_bytes(out, signer_to_remove.as_bytes());
            put_bytes(out, signer_to_add.as_bytes());
        }
        GovernedAction::Call(call) => put_call(out, call),
        GovernedAction::Multicall { calls } => {
            put_u32(out, calls.len() as u32);
            for call in calls {
                put_call(out, call);
            }
        }
        GovernedAction::ScheduleChangeFee { version, fee }
        | GovernedAction::ChangeFee { version, fee } => {
            put_u32(out, *version);
            put_bytes(out, fee.as_bytes());
        }
    }
}

/// Canonical bytes an approval commits to.
pub fn approval_preimage(
    domain: &DomainSeparator,
    executor: &Address,
    action: &GovernedAction,
    nonce: u64,
    deadline: Timestamp,
) -> Vec<u8> {
    let mut out = domain_prefix(domain.chain_id, action.kind());
    put_bytes(&mut out, &domain_separator_hash(domain));
    put_bytes(&mut out, executor.as_bytes());
    put_action(&mut out, action);
    put_u64(&mut out, nonce);
    put_u64(&mut out, deadline);
    out
}

/// The 32-byte message every approval signature is checked against.
pub fn approval_digest(
    domain: &DomainSeparator,
    executor: &Address,
    action: &GovernedAction,
    nonce: u64,
    deadline: Timestamp,
) -> Hash32 {
    sha3_256(&approval_preimage(domain, executor, action, nonce, deadline))
}
