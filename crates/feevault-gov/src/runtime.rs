//! Interface to the ledger that executes the treasury's outgoing calls.

use feevault_types::{Address, Call, U256};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallReceipt {
    pub target: Address,
    pub value: U256,
    pub return_data: Vec<u8>,
}

/// A callee rejected or failed a call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFailure {
    pub target: Address,
    pub reason: String,
}

impl CallFailure {
    pub fn new(target: Address, reason: impl Into<String>) -> Self {
        CallFailure {
            target,
            reason: reason.into(),
        }
    }
}

/// Call execution with snapshot/restore for atomic batches.
///
/// A failed `call` or `claim_fees` must not leave partial effects of that
/// single call behind; effects of earlier calls in a batch are undone by the
/// treasury through `restore`.
pub trait CallRuntime {
    type Snapshot;

    fn snapshot(&self) -> Self::Snapshot;

    fn restore(&mut self, snapshot: Self::Snapshot);

    /// Execute `call` on behalf of `from`, moving `call.value` along with it.
    fn call(&mut self, from: &Address, call: &Call) -> Result<CallReceipt, CallFailure>;

    /// Ask fee source `source` to pay its accrued fees to `to`. Returns the
    /// amount paid.
    fn claim_fees(&mut self, to: &Address, source: &Address) -> Result<U256, CallFailure>;
}
