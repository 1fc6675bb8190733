//! FeeVault treasury governance engine.
//!
//! A multisig custody authority for a protocol's fee treasury. Outgoing calls,
//! fee-rate changes and signer-set changes execute only with a threshold of
//! signer approvals, bound to a nonce and deadline; fee changes additionally
//! wait out a fixed execution delay between schedule and commit.
//!
//! # Example
//!
//! ```ignore
//! use feevault_gov::{Authorization, TreasuryConfig, SystemClock, InMemoryLedger};
//! use feevault_crypto::{collect_approvals, MlDsa44Recovery};
//!
//! let config = TreasuryConfig::from_file("treasury.json".as_ref())?;
//! let mut treasury = config.build(Arc::new(SystemClock), Arc::new(MlDsa44Recovery))?;
//!
//! let digest = treasury.approval_digest(&caller, &action, deadline);
//! let signatures = collect_approvals(&[&approver_key], &digest)?;
//! let auth = Authorization::new(caller, treasury.nonce(), deadline).with_signatures(signatures);
//! let outcome = treasury.execute(&mut ledger, &auth, action)?;
//! ```
//!
//! # CLI Tool
//!
//! ```bash
//! feevault keygen --out approver.key
//! feevault inspect treasury.json
//! feevault digest --config treasury.json --action action.json \
//!     --executor 0x11.. --nonce 0 --deadline 1800000000
//! feevault sign --key approver.key --digest 0x...
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod fees;
pub mod ledger;
pub mod nonce;
pub mod runtime;
pub mod signers;
pub mod treasury;
pub mod verify;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, TreasuryConfig, DEFAULT_DOMAIN_NAME, DEFAULT_DOMAIN_VERSION};
pub use error::TreasuryError;
pub use events::{ActionOutcome, TreasuryEvent};
pub use fees::{FeeSchedule, ScheduledFee, DEFAULT_MAX_FEE};
pub use ledger::{CallRecord, CalleeBehavior, FeeSource, InMemoryLedger, InMemoryLedgerSnapshot};
pub use nonce::NonceSequencer;
pub use runtime::{CallFailure, CallReceipt, CallRuntime};
pub use signers::SignerRegistry;
pub use treasury::{Treasury, TreasuryParams};
pub use verify::{ApprovalVerifier, Authorization};
