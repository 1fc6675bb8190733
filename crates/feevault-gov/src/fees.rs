//! Fee table and schedule/commit time-lock.
//!
//! A fee change is proposed with `schedule`, becomes executable once the
//! execution delay has elapsed, and is applied with `apply_change`. A commit
//! may lower the scheduled value but never raise it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use feevault_types::{FeeVersion, Timestamp, U256};

use crate::error::TreasuryError;

/// 0.005 in 18-decimal fixed point.
pub const DEFAULT_MAX_FEE: u128 = 5_000_000_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledFee {
    pub fee: U256,
    pub executable_at: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeSchedule {
    fees: BTreeMap<FeeVersion, U256>,
    scheduled: BTreeMap<FeeVersion, ScheduledFee>,
    execution_delay: u64,
    max_fee: U256,
}

impl FeeSchedule {
    pub fn new(execution_delay: u64, max_fee: U256) -> Self {
        FeeSchedule {
            fees: BTreeMap::new(),
            scheduled: BTreeMap::new(),
            execution_delay,
            max_fee,
        }
    }

    /// Active fee; unset versions read as zero.
    pub fn fee(&self, version: FeeVersion) -> U256 {
        self.fees.get(&version).copied().unwrap_or_default()
    }

    pub fn scheduled_fee(&self, version: FeeVersion) -> Option<ScheduledFee> {
        self.scheduled.get(&version).copied()
    }

    pub fn execution_delay(&self) -> u64 {
        self.execution_delay
    }

    pub fn max_fee(&self) -> U256 {
        self.max_fee
    }

    pub fn check_schedule(&self, fee: &U256) -> Result<(), TreasuryError> {
        if *fee > self.max_fee {
            return Err(TreasuryError::InvalidFee);
        }
        Ok(())
    }

    /// Record a pending change, replacing any earlier one for `version`.
    pub fn schedule(&mut self, version: FeeVersion, fee: U256, now: Timestamp) -> ScheduledFee {
        let pending = ScheduledFee {
            fee,
            executable_at: now.saturating_add(self.execution_delay),
        };
        self.scheduled.insert(version, pending);
        pending
    }

    pub fn check_change(
        &self,
        version: FeeVersion,
        fee: &U256,
        now: Timestamp,
    ) -> Result<(), TreasuryError> {
        match self.scheduled.get(&version) {
            Some(pending) if now >= pending.executable_at && *fee <= pending.fee => Ok(()),
            _ => Err(TreasuryError::CannotChangeFee),
        }
    }

    /// Commit `fee` and clear the pending entry.
    pub fn apply_change(&mut self, version: FeeVersion, fee: U256) {
        self.fees.insert(version, fee);
        self.scheduled.remove(&version);
    }
}
