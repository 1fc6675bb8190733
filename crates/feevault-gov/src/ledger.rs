//! In-memory ledger implementing [`CallRuntime`].
//!
//! Balances, scripted callees and fee sources live in ordered maps so the
//! whole state clones cheaply into a snapshot.

use std::collections::BTreeMap;

use feevault_types::{Address, Call, U256};

use crate::runtime::{CallFailure, CallReceipt, CallRuntime};

/// How a registered callee responds to calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalleeBehavior {
    /// Accept and echo the call data back.
    Accept,
    /// Reject every call with the given reason.
    Revert(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeeSource {
    /// Holds this much claimable fee.
    Accrued(U256),
    /// Fails every claim with the given reason.
    Failing(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallRecord {
    pub from: Address,
    pub target: Address,
    pub data: Vec<u8>,
    pub value: U256,
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryLedger {
    balances: BTreeMap<Address, U256>,
    callees: BTreeMap<Address, CalleeBehavior>,
    fee_sources: BTreeMap<Address, FeeSource>,
    call_log: Vec<CallRecord>,
}

#[derive(Clone, Debug)]
pub struct InMemoryLedgerSnapshot {
    balances: BTreeMap<Address, U256>,
    fee_sources: BTreeMap<Address, FeeSource>,
    call_log: Vec<CallRecord>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, address: &Address) -> U256 {
        self.balances.get(address).copied().unwrap_or_default()
    }

    /// Credit `amount` to `address`. Returns false on overflow.
    pub fn deposit(&mut self, address: Address, amount: U256) -> bool {
        match self.balance(&address).checked_add(&amount) {
            Some(total) => {
                self.balances.insert(address, total);
                true
            }
            None => false,
        }
    }

    pub fn set_callee(&mut self, address: Address, behavior: CalleeBehavior) {
        self.callees.insert(address, behavior);
    }

    pub fn set_fee_source(&mut self, address: Address, source: FeeSource) {
        self.fee_sources.insert(address, source);
    }

    /// Successful calls, oldest first.
    pub fn call_log(&self) -> &[CallRecord] {
        &self.call_log
    }

    fn transfer(&mut self, from: &Address, to: &Address, amount: &U256) -> Result<(), String> {
        if amount.is_zero() {
            return Ok(());
        }
        let remaining = self
            .balance(from)
            .checked_sub(amount)
            .ok_or_else(|| "insufficient balance".to_string())?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or_else(|| "balance overflow".to_string())?;
        self.balances.insert(*from, remaining);
        self.balances.insert(*to, credited);
        Ok(())
    }
}

impl CallRuntime for InMemoryLedger {
    type Snapshot = InMemoryLedgerSnapshot;

    fn snapshot(&self) -> InMemoryLedgerSnapshot {
        InMemoryLedgerSnapshot {
            balances: self.balances.clone(),
            fee_sources: self.fee_sources.clone(),
            call_log: self.call_log.clone(),
        }
    }

    fn restore(&mut self, snapshot: InMemoryLedgerSnapshot) {
        self.balances = snapshot.balances;
        self.fee_sources = snapshot.fee_sources;
        self.call_log = snapshot.call_log;
    }

    fn call(&mut self, from: &Address, call: &Call) -> Result<CallReceipt, CallFailure> {
        if let Some(CalleeBehavior::Revert(reason)) = self.callees.get(&call.target) {
            return Err(CallFailure::new(call.target, reason.clone()));
        }
        self.transfer(from, &call.target, &call.value)
            .map_err(|reason| CallFailure::new(call.target, reason))?;
        self.call_log.push(CallRecord {
            from: *from,
            target: call.target,
            data: call.data.clone(),
            value: call.value,
        });
        Ok(CallReceipt {
            target: call.target,
            value: call.value,
            return_data: call.data.clone(),
        })
    }

    fn claim_fees(&mut self, to: &Address, source: &Address) -> Result<U256, CallFailure> {
        let amount = match self.fee_sources.get(source) {
            Some(FeeSource::Accrued(amount)) => *amount,
            Some(FeeSource::Failing(reason)) => {
                return Err(CallFailure::new(*source, reason.clone()))
            }
            None => return Err(CallFailure::new(*source, "not a fee source")),
        };
        if !self.deposit(*to, amount) {
            return Err(CallFailure::new(*source, "balance overflow"));
        }
        self.fee_sources
            .insert(*source, FeeSource::Accrued(U256::zero()));
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address([b; 20])
    }

    #[test]
    fn value_call_moves_balance() {
        let mut ledger = InMemoryLedger::new();
        ledger.deposit(addr(1), U256::from_u64(100));
        let call = Call::new(addr(2), vec![0xAB]).with_value(U256::from_u64(40));
        let receipt = ledger.call(&addr(1), &call).unwrap();
        assert_eq!(receipt.return_data, vec![0xAB]);
        assert_eq!(ledger.balance(&addr(1)), U256::from_u64(60));
        assert_eq!(ledger.balance(&addr(2)), U256::from_u64(40));
        assert_eq!(ledger.call_log().len(), 1);
    }

    #[test]
    fn self_transfer_keeps_balance() {
        let mut ledger = InMemoryLedger::new();
        ledger.deposit(addr(1), U256::from_u64(100));
        let call = Call::new(addr(1), vec![]).with_value(U256::from_u64(40));
        ledger.call(&addr(1), &call).unwrap();
        assert_eq!(ledger.balance(&addr(1)), U256::from_u64(100));

        // Still bounded by the balance it holds.
        let over = Call::new(addr(1), vec![]).with_value(U256::from_u64(101));
        assert_eq!(ledger.call(&addr(1), &over).unwrap_err().reason, "insufficient balance");
        assert_eq!(ledger.balance(&addr(1)), U256::from_u64(100));
    }

    #[test]
    fn underfunded_call_fails_without_effect() {
        let mut ledger = InMemoryLedger::new();
        let call = Call::new(addr(2), vec![]).with_value(U256::from_u64(1));
        let err = ledger.call(&addr(1), &call).unwrap_err();
        assert_eq!(err.reason, "insufficient balance");
        assert!(ledger.call_log().is_empty());
    }

    #[test]
    fn reverting_callee_fails() {
        let mut ledger = InMemoryLedger::new();
        ledger.set_callee(addr(2), CalleeBehavior::Revert("Fail".to_string()));
        let err = ledger.call(&addr(1), &Call::new(addr(2), vec![])).unwrap_err();
        assert_eq!(err, CallFailure::new(addr(2), "Fail"));
    }

    #[test]
    fn restore_undoes_calls() {
        let mut ledger = InMemoryLedger::new();
        ledger.deposit(addr(1), U256::from_u64(10));
        let snapshot = ledger.snapshot();
        ledger
            .call(&addr(1), &Call::new(addr(2), vec![]).with_value(U256::from_u64(10)))
            .unwrap();
        ledger.restore(snapshot);
        assert_eq!(ledger.balance(&addr(1)), U256::from_u64(10));
        assert!(ledger.balance(&addr(2)).is_zero());
        assert!(ledger.call_log().is_empty());
    }

    #[test]
    fn claim_drains_accrued_fees() {
        let mut ledger = InMemoryLedger::new();
        ledger.set_fee_source(addr(5), FeeSource::Accrued(U256::from_u64(7)));
        assert_eq!(ledger.claim_fees(&addr(1), &addr(5)), Ok(U256::from_u64(7)));
        assert_eq!(ledger.balance(&addr(1)), U256::from_u64(7));
        assert_eq!(ledger.claim_fees(&addr(1), &addr(5)), Ok(U256::zero()));
        assert!(ledger.claim_fees(&addr(1), &addr(6)).is_err());
    }
}
