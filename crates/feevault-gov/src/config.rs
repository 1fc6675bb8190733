//! Treasury deployment configuration.
//!
//! ```json
//! {
//!   "network": "devnet",
//!   "authority": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
//!   "signers": ["0x1111...", "0x2222..."],
//!   "signatures_required": 1,
//!   "execution_delay_secs": 60
//! }
//! ```
//!
//! `chain_id`, when present, overrides the network's canonical chain id.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use feevault_crypto::SignerRecovery;
use feevault_hash::DomainSeparator;
use feevault_types::{Address, ChainId, NetworkEnvironment, U256};

use crate::clock::Clock;
use crate::error::TreasuryError;
use crate::fees::DEFAULT_MAX_FEE;
use crate::signers::SignerRegistry;
use crate::treasury::{Treasury, TreasuryParams};

pub const DEFAULT_DOMAIN_NAME: &str = "FeeVault";
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parse error: {0}")]
    ParseError(String),

    #[error("serialize error: {0}")]
    SerializeError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid treasury configuration: {0}")]
    Invalid(#[from] TreasuryError),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryConfig {
    #[serde(default)]
    pub network: NetworkEnvironment,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    /// Address the treasury is deployed at.
    pub authority: Address,

    #[serde(default = "default_domain_name")]
    pub domain_name: String,

    #[serde(default = "default_domain_version")]
    pub domain_version: String,

    /// Signer addresses, ascending.
    pub signers: Vec<Address>,

    pub signatures_required: usize,

    #[serde(default)]
    pub execution_delay_secs: u64,

    #[serde(default = "default_max_fee")]
    pub max_fee: U256,
}

fn default_domain_name() -> String {
    DEFAULT_DOMAIN_NAME.to_string()
}

fn default_domain_version() -> String {
    DEFAULT_DOMAIN_VERSION.to_string()
}

fn default_max_fee() -> U256 {
    U256::from_u128(DEFAULT_MAX_FEE)
}

impl TreasuryConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("read {}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
            .map(ChainId::new)
            .unwrap_or_else(|| self.network.chain_id())
    }

    pub fn domain(&self) -> DomainSeparator {
        DomainSeparator::new(
            self.domain_name.clone(),
            self.domain_version.clone(),
            self.chain_id(),
            self.authority,
        )
    }

    /// Apply the same checks treasury construction does, without building one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.authority.is_zero() {
            return Err(ConfigError::MissingField("authority".to_string()));
        }
        if self.domain_name.is_empty() {
            return Err(ConfigError::MissingField("domain_name".to_string()));
        }
        SignerRegistry::new(&self.signers, self.signatures_required)?;
        Ok(())
    }

    pub fn to_params(&self) -> TreasuryParams {
        TreasuryParams {
            domain: self.domain(),
            signers: self.signers.clone(),
            signatures_required: self.signatures_required,
            execution_delay: self.execution_delay_secs,
            max_fee: self.max_fee,
        }
    }

    pub fn build(
        &self,
        clock: Arc<dyn Clock>,
        recovery: Arc<dyn SignerRecovery>,
    ) -> Result<Treasury, ConfigError> {
        self.validate()?;
        Ok(Treasury::new(self.to_params(), clock, recovery)?)
    }
}
