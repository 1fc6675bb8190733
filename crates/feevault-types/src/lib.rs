//! Core types for the FeeVault treasury authority.

pub mod action;
pub mod domain;
pub mod primitives;

pub use action::*;
pub use domain::{chain_scope, domain_prefix, DomainKind};
pub use primitives::*;
