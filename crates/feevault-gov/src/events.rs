use serde::{Deserialize, Serialize};

use feevault_types::{Address, FeeVersion, Timestamp, U256};

/// Structured record of an effect applied by the treasury.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TreasuryEvent {
    SignerRemoved {
        signer: Address,
    },
    SignerAdded {
        signer: Address,
    },
    Called {
        target: Address,
        value: U256,
        return_data: Vec<u8>,
    },
    FeeChangeScheduled {
        version: FeeVersion,
        fee: U256,
        executable_at: Timestamp,
    },
    FeeChanged {
        version: FeeVersion,
        fee: U256,
    },
    FeesClaimed {
        source: Address,
        amount: U256,
    },
    /// A fee source failed; the claim run continued past it.
    FeeClaimFailed {
        source: Address,
        reason: String,
    },
}

/// Result of a successful treasury operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub authority: Address,
    /// Nonce consumed by the action; `None` for operations outside the
    /// nonce sequence.
    pub nonce: Option<u64>,
    pub events: Vec<TreasuryEvent>,
}
