#![allow(dead_code)]

use std::sync::Arc;

use feevault_crypto::{ApprovalSigningKey, MlDsa44Recovery};
use feevault_gov::{Authorization, Clock, InMemoryLedger, ManualClock, Treasury, TreasuryParams};
use feevault_hash::{approval_digest, DomainSeparator};
use feevault_types::{Address, GovernedAction, Timestamp, U256, FEEVAULT_DEVNET_CHAIN_ID};

pub const START: Timestamp = 1_700_000_000;
pub const AUTHORITY: Address = Address([0xAA; 20]);
pub const MAX_FEE: u128 = 5_000_000_000_000_000;

pub fn domain() -> DomainSeparator {
    DomainSeparator::new("FeeVault", "1", FEEVAULT_DEVNET_CHAIN_ID, AUTHORITY)
}

/// `n` fresh approver keys, ascending by address.
pub fn sorted_keys(n: usize) -> Vec<ApprovalSigningKey> {
    let mut keys: Vec<ApprovalSigningKey> = (0..n)
        .map(|_| ApprovalSigningKey::generate().expect("keygen failed"))
        .collect();
    keys.sort_by_key(|k| k.address());
    keys
}

pub struct Harness {
    pub treasury: Treasury,
    pub ledger: InMemoryLedger,
    pub clock: Arc<ManualClock>,
    pub keys: Vec<ApprovalSigningKey>,
}

pub fn harness(signers: usize, threshold: usize, delay: u64) -> Harness {
    let keys = sorted_keys(signers);
    let clock = Arc::new(ManualClock::new(START));
    let params = TreasuryParams {
        domain: domain(),
        signers: keys.iter().map(|k| k.address()).collect(),
        signatures_required: threshold,
        execution_delay: delay,
        max_fee: U256::from_u128(MAX_FEE),
    };
    let treasury = Treasury::new(params, clock.clone() as Arc<dyn Clock>, Arc::new(MlDsa44Recovery))
        .expect("valid treasury");
    Harness {
        treasury,
        ledger: InMemoryLedger::new(),
        clock,
        keys,
    }
}

impl Harness {
    pub fn signer(&self, index: usize) -> Address {
        self.keys[index].address()
    }

    pub fn deadline(&self) -> Timestamp {
        self.clock.now() + 3_600
    }

    /// Authorization at the current nonce, approvals in the order given.
    pub fn authorize(
        &self,
        caller: usize,
        approvers: &[usize],
        action: &GovernedAction,
    ) -> Authorization {
        self.authorize_with(
            self.signer(caller),
            self.treasury.nonce(),
            self.deadline(),
            approvers,
            action,
        )
    }

    pub fn authorize_with(
        &self,
        caller: Address,
        nonce: u64,
        deadline: Timestamp,
        approvers: &[usize],
        action: &GovernedAction,
    ) -> Authorization {
        let digest = approval_digest(&domain(), &caller, action, nonce, deadline);
        let signatures = approvers
            .iter()
            .map(|&i| self.keys[i].sign_approval(&digest).expect("signing failed"))
            .collect();
        Authorization::new(caller, nonce, deadline).with_signatures(signatures)
    }
}
