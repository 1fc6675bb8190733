//! The treasury authority: one owned aggregate with `&mut self` transitions.
//!
//! Every governed entry point follows the same shape: verify the approvals,
//! validate the action's own preconditions, apply the effect, then consume
//! the nonce. Nothing is mutated until every check has passed, so a rejected
//! action leaves the treasury exactly as it was.

use std::sync::Arc;

use tracing::{debug, info, warn};

use feevault_crypto::SignerRecovery;
use feevault_hash::{approval_digest, DomainSeparator};
use feevault_types::{Address, Call, FeeVersion, GovernedAction, Hash32, Timestamp, U256};

use crate::clock::Clock;
use crate::error::TreasuryError;
use crate::events::{ActionOutcome, TreasuryEvent};
use crate::fees::{FeeSchedule, ScheduledFee};
use crate::nonce::NonceSequencer;
use crate::runtime::CallRuntime;
use crate::signers::SignerRegistry;
use crate::verify::{ApprovalVerifier, Authorization};

/// Construction parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreasuryParams {
    pub domain: DomainSeparator,
    pub signers: Vec<Address>,
    pub signatures_required: usize,
    pub execution_delay: u64,
    pub max_fee: U256,
}

pub struct Treasury {
    domain: DomainSeparator,
    registry: SignerRegistry,
    nonce: NonceSequencer,
    fees: FeeSchedule,
    clock: Arc<dyn Clock>,
    recovery: Arc<dyn SignerRecovery>,
}

impl std::fmt::Debug for Treasury {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Treasury")
            .field("authority", &self.domain.authority)
            .field("signers", &self.registry.signer_count())
            .field("threshold", &self.registry.threshold())
            .field("nonce", &self.nonce.current())
            .finish()
    }
}

impl Treasury {
    pub fn new(
        params: TreasuryParams,
        clock: Arc<dyn Clock>,
        recovery: Arc<dyn SignerRecovery>,
    ) -> Result<Self, TreasuryError> {
        let registry = SignerRegistry::new(&params.signers, params.signatures_required)?;
        info!(
            authority = %params.domain.authority,
            chain_id = %params.domain.chain_id,
            signers = registry.signer_count(),
            threshold = registry.threshold(),
            execution_delay = params.execution_delay,
            "treasury constructed"
        );
        Ok(Treasury {
            domain: params.domain,
            registry,
            nonce: NonceSequencer::new(),
            fees: FeeSchedule::new(params.execution_delay, params.max_fee),
            clock,
            recovery,
        })
    }

    // ------------------------------------------------------------------
    // Read-only accessors
    // ------------------------------------------------------------------

    pub fn domain(&self) -> &DomainSeparator {
        &self.domain
    }

    pub fn authority(&self) -> Address {
        self.domain.authority
    }

    pub fn nonce(&self) -> u64 {
        self.nonce.current()
    }

    pub fn threshold(&self) -> usize {
        self.registry.threshold()
    }

    pub fn is_signer(&self, address: &Address) -> bool {
        self.registry.is_signer(address)
    }

    pub fn signers(&self) -> Vec<Address> {
        self.registry.signers()
    }

    pub fn signer_count(&self) -> usize {
        self.registry.signer_count()
    }

    pub fn fee(&self, version: FeeVersion) -> U256 {
        self.fees.fee(version)
    }

    pub fn scheduled_fee(&self, version: FeeVersion) -> Option<ScheduledFee> {
        self.fees.scheduled_fee(version)
    }

    pub fn execution_delay(&self) -> u64 {
        self.fees.execution_delay()
    }

    pub fn max_fee(&self) -> U256 {
        self.fees.max_fee()
    }

    /// Digest approvers sign for `action` submitted by `executor` at the
    /// current nonce.
    pub fn approval_digest(
        &self,
        executor: &Address,
        action: &GovernedAction,
        deadline: Timestamp,
    ) -> Hash32 {
        approval_digest(&self.domain, executor, action, self.nonce.current(), deadline)
    }

    // ------------------------------------------------------------------
    // Governed actions
    // ------------------------------------------------------------------

    fn authorize(&self, auth: &Authorization, action: &GovernedAction) -> Result<(), TreasuryError> {
        let verifier = ApprovalVerifier {
            domain: &self.domain,
            registry: &self.registry,
            recovery: self.recovery.as_ref(),
            now: self.clock.now(),
            current_nonce: self.nonce.current(),
        };
        verifier.verify(auth, action).map_err(|err| {
            debug!(
                action = action.name(),
                caller = %auth.caller,
                nonce = auth.nonce,
                error = %err,
                "approval rejected"
            );
            err
        })
    }

    fn finish(&mut self, action: &GovernedAction, events: Vec<TreasuryEvent>) -> ActionOutcome {
        let nonce = self.nonce.advance();
        info!(
            action = action.name(),
            nonce,
            events = events.len(),
            "governed action executed"
        );
        ActionOutcome {
            authority: self.domain.authority,
            nonce: Some(nonce),
            events,
        }
    }

    fn reject(&self, action: &GovernedAction, err: TreasuryError) -> TreasuryError {
        debug!(action = action.name(), error = %err, "governed action rejected");
        err
    }

    pub fn replace_signer(
        &mut self,
        auth: &Authorization,
        signer_to_remove: Address,
        signer_to_add: Address,
    ) -> Result<ActionOutcome, TreasuryError> {
        let action = GovernedAction::ReplaceSigner {
            signer_to_remove,
            signer_to_add,
        };
        self.authorize(auth, &action)?;
        self.registry
            .replace(&signer_to_remove, &signer_to_add)
            .map_err(|err| self.reject(&action, err))?;

        Ok(self.finish(
            &action,
            vec![
                TreasuryEvent::SignerRemoved {
                    signer: signer_to_remove,
                },
                TreasuryEvent::SignerAdded {
                    signer: signer_to_add,
                },
            ],
        ))
    }

    pub fn call<R: CallRuntime>(
        &mut self,
        runtime: &mut R,
        auth: &Authorization,
        call: Call,
    ) -> Result<ActionOutcome, TreasuryError> {
        let action = GovernedAction::Call(call.clone());
        self.authorize(auth, &action)?;
        let events = self.run_calls(runtime, std::slice::from_ref(&call))?;
        Ok(self.finish(&action, events))
    }

    /// Execute `calls` in order; the first failure undoes all of them.
    pub fn multicall<R: CallRuntime>(
        &mut self,
        runtime: &mut R,
        auth: &Authorization,
        calls: Vec<Call>,
    ) -> Result<ActionOutcome, TreasuryError> {
        let action = GovernedAction::Multicall {
            calls: calls.clone(),
        };
        self.authorize(auth, &action)?;
        let events = self.run_calls(runtime, &calls)?;
        Ok(self.finish(&action, events))
    }

    fn run_calls<R: CallRuntime>(
        &self,
        runtime: &mut R,
        calls: &[Call],
    ) -> Result<Vec<TreasuryEvent>, TreasuryError> {
        let snapshot = runtime.snapshot();
        let mut events = Vec::with_capacity(calls.len());
        for (index, call) in calls.iter().enumerate() {
            match runtime.call(&self.domain.authority, call) {
                Ok(receipt) => events.push(TreasuryEvent::Called {
                    target: receipt.target,
                    value: receipt.value,
                    return_data: receipt.return_data,
                }),
                Err(failure) => {
                    runtime.restore(snapshot);
                    debug!(
                        index,
                        target = %failure.target,
                        reason = %failure.reason,
                        "call failed, batch rolled back"
                    );
                    return Err(TreasuryError::CallFailed(failure));
                }
            }
        }
        Ok(events)
    }

    pub fn schedule_change_fee(
        &mut self,
        auth: &Authorization,
        version: FeeVersion,
        fee: U256,
    ) -> Result<ActionOutcome, TreasuryError> {
        let action = GovernedAction::ScheduleChangeFee { version, fee };
        self.authorize(auth, &action)?;
        self.fees
            .check_schedule(&fee)
            .map_err(|err| self.reject(&action, err))?;

        let pending = self.fees.schedule(version, fee, self.clock.now());
        Ok(self.finish(
            &action,
            vec![TreasuryEvent::FeeChangeScheduled {
                version,
                fee,
                executable_at: pending.executable_at,
            }],
        ))
    }

    pub fn change_fee(
        &mut self,
        auth: &Authorization,
        version: FeeVersion,
        fee: U256,
    ) -> Result<ActionOutcome, TreasuryError> {
        let action = GovernedAction::ChangeFee { version, fee };
        self.authorize(auth, &action)?;
        self.fees
            .check_change(version, &fee, self.clock.now())
            .map_err(|err| self.reject(&action, err))?;

        self.fees.apply_change(version, fee);
        Ok(self.finish(&action, vec![TreasuryEvent::FeeChanged { version, fee }]))
    }

    /// Dispatch any governed action.
    pub fn execute<R: CallRuntime>(
        &mut self,
        runtime: &mut R,
        auth: &Authorization,
        action: GovernedAction,
    ) -> Result<ActionOutcome, TreasuryError> {
        match action {
            GovernedAction::ReplaceSigner {
                signer_to_remove,
                signer_to_add,
            } => self.replace_signer(auth, signer_to_remove, signer_to_add),
            GovernedAction::Call(call) => self.call(runtime, auth, call),
            GovernedAction::Multicall { calls } => self.multicall(runtime, auth, calls),
            GovernedAction::ScheduleChangeFee { version, fee } => {
                self.schedule_change_fee(auth, version, fee)
            }
            GovernedAction::ChangeFee { version, fee } => self.change_fee(auth, version, fee),
        }
    }

    // ------------------------------------------------------------------
    // Fee collection
    // ------------------------------------------------------------------

    /// Pull accrued fees from each source into the treasury.
    ///
    /// Only the caller's signer status is checked. Zero entries are skipped
    /// and a failing source never stops the run.
    pub fn claim_fees<R: CallRuntime>(
        &self,
        runtime: &mut R,
        caller: &Address,
        sources: &[Address],
    ) -> Result<ActionOutcome, TreasuryError> {
        if !self.registry.is_signer(caller) {
            debug!(caller = %caller, "claim_fees rejected: caller is not a signer");
            return Err(TreasuryError::Unauthorized);
        }

        let mut events = Vec::new();
        for source in sources.iter().filter(|s| !s.is_zero()) {
            match runtime.claim_fees(&self.domain.authority, source) {
                Ok(amount) => events.push(TreasuryEvent::FeesClaimed {
                    source: *source,
                    amount,
                }),
                Err(failure) => {
                    warn!(source = %source, reason = %failure.reason, "fee claim failed");
                    events.push(TreasuryEvent::FeeClaimFailed {
                        source: *source,
                        reason: failure.reason,
                    });
                }
            }
        }

        info!(caller = %caller, sources = sources.len(), "fees claimed");
        Ok(ActionOutcome {
            authority: self.domain.authority,
            nonce: None,
            events,
        })
    }
}
