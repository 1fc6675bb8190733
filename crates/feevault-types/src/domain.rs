//! Domain separation helpers for FeeVault approval preimages.
//!
//! Every approval digest starts with a chain-aware domain tag:
//!
//! ```text
//! FEEVAULT:<SCOPE>:<KIND>:v1
//! ```
//!
//! - `SCOPE` is derived from the chain ID: "DEV", "TST", "MAIN", or "UNK"
//! - `KIND` identifies the governed action being approved
//!
//! ```text
//! FEEVAULT:DEV:CALL:v1           - single call on DevNet
//! FEEVAULT:MAIN:MULTICALL:v1     - call batch on MainNet
//! FEEVAULT:TST:SCHEDULE_FEE:v1   - fee schedule on TestNet
//! ```
//!
//! An approval for one action kind can never verify as an approval for
//! another, and approvals gathered on one network never verify on another.

use crate::{ChainId, FEEVAULT_DEVNET_CHAIN_ID, FEEVAULT_MAINNET_CHAIN_ID, FEEVAULT_TESTNET_CHAIN_ID};

/// The governed action kinds that carry approvals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DomainKind {
    /// Signer-set swap. Domain tag: `FEEVAULT:<SCOPE>:REPLACE_SIGNER:v1`
    ReplaceSigner,
    /// Single outgoing call. Domain tag: `FEEVAULT:<SCOPE>:CALL:v1`
    Call,
    /// Atomic call batch. Domain tag: `FEEVAULT:<SCOPE>:MULTICALL:v1`
    Multicall,
    /// Fee-change proposal. Domain tag: `FEEVAULT:<SCOPE>:SCHEDULE_FEE:v1`
    ScheduleChangeFee,
    /// Fee-change commit. Domain tag: `FEEVAULT:<SCOPE>:CHANGE_FEE:v1`
    ChangeFee,
}

impl DomainKind {
    pub const ALL: [DomainKind; 5] = [
        DomainKind::ReplaceSigner,
        DomainKind::Call,
        DomainKind::Multicall,
        DomainKind::ScheduleChangeFee,
        DomainKind::ChangeFee,
    ];

    /// The kind portion of the domain tag.
    pub const fn kind_str(&self) -> &'static str {
        match self {
            DomainKind::ReplaceSigner => "REPLACE_SIGNER",
            DomainKind::Call => "CALL",
            DomainKind::Multicall => "MULTICALL",
            DomainKind::ScheduleChangeFee => "SCHEDULE_FEE",
            DomainKind::ChangeFee => "CHANGE_FEE",
        }
    }
}

/// Chain scope string for a ChainId; "UNK" for private networks.
pub fn chain_scope(chain_id: ChainId) -> &'static str {
    if chain_id == FEEVAULT_DEVNET_CHAIN_ID {
        "DEV"
    } else if chain_id == FEEVAULT_TESTNET_CHAIN_ID {
        "TST"
    } else if chain_id == FEEVAULT_MAINNET_CHAIN_ID {
        "MAIN"
    } else {
        "UNK"
    }
}

/// Domain-separation prefix prepended to every approval preimage.
pub fn domain_prefix(chain_id: ChainId, kind: DomainKind) -> Vec<u8> {
    format!("FEEVAULT:{}:{}:v1", chain_scope(chain_id), kind.kind_str()).into_bytes()
}
