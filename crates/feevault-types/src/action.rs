//! Governed actions and outgoing calls.
//!
//! A [`GovernedAction`] is everything the approval set signs over besides the
//! nonce, deadline and executor. Serialized form is tagged JSON so actions can
//! be carried in request files:
//!
//! ```json
//! { "action": "schedule_change_fee", "version": 0, "fee": "1000000000000000" }
//! ```

use serde::{Deserialize, Serialize};

use crate::{Address, DomainKind, FeeVersion, U256};

/// A single outgoing call issued by the treasury.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub target: Address,
    #[serde(with = "hex_bytes", default)]
    pub data: Vec<u8>,
    #[serde(default)]
    pub value: U256,
}

impl Call {
    pub fn new(target: Address, data: Vec<u8>) -> Self {
        Call {
            target,
            data,
            value: U256::zero(),
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GovernedAction {
    ReplaceSigner {
        signer_to_remove: Address,
        signer_to_add: Address,
    },
    Call(Call),
    Multicall {
        calls: Vec<Call>,
    },
    ScheduleChangeFee {
        version: FeeVersion,
        fee: U256,
    },
    ChangeFee {
        version: FeeVersion,
        fee: U256,
    },
}

impl GovernedAction {
    pub fn kind(&self) -> DomainKind {
        match self {
            GovernedAction::ReplaceSigner { .. } => DomainKind::ReplaceSigner,
            GovernedAction::Call(_) => DomainKind::Call,
            GovernedAction::Multicall { .. } => DomainKind::Multicall,
            GovernedAction::ScheduleChangeFee { .. } => DomainKind::ScheduleChangeFee,
            GovernedAction::ChangeFee { .. } => DomainKind::ChangeFee,
        }
    }

    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            GovernedAction::ReplaceSigner { .. } => "replace_signer",
            GovernedAction::Call(_) => "call",
            GovernedAction::Multicall { .. } => "multicall",
            GovernedAction::ScheduleChangeFee { .. } => "schedule_change_fee",
            GovernedAction::ChangeFee { .. } => "change_fee",
        }
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(digits).map_err(serde::de::Error::custom)
    }
}
