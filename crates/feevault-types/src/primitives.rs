//! Core primitives for the FeeVault treasury authority.
//!
//! Addresses and 256-bit values follow the Ethereum-compatible layout used by
//! the ledgers the treasury is deployed on: addresses are 20 raw bytes,
//! amounts are big-endian 32-byte integers. Both orderings are byte-wise, so
//! `Address` ordering is the canonical signer ordering and `U256` ordering is
//! numeric.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub type Hash32 = [u8; 32];

/// Seconds since the Unix epoch, as reported by the ledger clock.
pub type Timestamp = u64;

/// Fee category identifier ("version") keyed in the fee tables.
pub type FeeVersion = u32;

// ============================================================================
// ChainId
// ============================================================================

/// Identifier of the network a treasury is deployed on.
///
/// Every approval digest binds the chain id, so approvals gathered on one
/// network cannot be replayed on another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    pub const fn new(id: u64) -> Self {
        ChainId(id)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain_{:016x}", self.0)
    }
}

/// ChainId for FeeVault DevNet ("FVLT" + "DEV" + null byte).
pub const FEEVAULT_DEVNET_CHAIN_ID: ChainId = ChainId(0x46564C54_44455600);

/// ChainId for FeeVault TestNet ("FVLT" + "TST" + null byte).
pub const FEEVAULT_TESTNET_CHAIN_ID: ChainId = ChainId(0x46564C54_54535400);

/// ChainId for FeeVault MainNet ("FVLT" + "MAIN").
pub const FEEVAULT_MAINNET_CHAIN_ID: ChainId = ChainId(0x46564C54_4D41494E);

/// Network environment a treasury is configured for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkEnvironment {
    #[default]
    Devnet,
    Testnet,
    Mainnet,
}

impl NetworkEnvironment {
    /// Canonical ChainId for this environment.
    pub const fn chain_id(&self) -> ChainId {
        match self {
            NetworkEnvironment::Devnet => FEEVAULT_DEVNET_CHAIN_ID,
            NetworkEnvironment::Testnet => FEEVAULT_TESTNET_CHAIN_ID,
            NetworkEnvironment::Mainnet => FEEVAULT_MAINNET_CHAIN_ID,
        }
    }

    /// Short ASCII scope used in domain tags.
    pub const fn scope(&self) -> &'static str {
        match self {
            NetworkEnvironment::Devnet => "DEV",
            NetworkEnvironment::Testnet => "TST",
            NetworkEnvironment::Mainnet => "MAIN",
        }
    }
}

impl fmt::Display for NetworkEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkEnvironment::Devnet => write!(f, "DevNet"),
            NetworkEnvironment::Testnet => write!(f, "TestNet"),
            NetworkEnvironment::Mainnet => write!(f, "MainNet"),
        }
    }
}

// ============================================================================
// Address
// ============================================================================

/// 20-byte account identifier.
///
/// The all-zero address is the null identity: it is never a valid signer and
/// marks an empty slot in fee-claim lists.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const LEN: usize = 20;

    pub const fn zero() -> Self {
        Address([0u8; 20])
    }

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Build an address from the trailing 20 bytes of a 32-byte hash.
    pub fn from_hash_tail(hash: &Hash32) -> Self {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash[12..]);
        Address(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

/// Error returned when parsing an [`Address`] or [`U256`] from text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePrimitiveError(pub String);

impl fmt::Display for ParsePrimitiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParsePrimitiveError {}

impl FromStr for Address {
    type Err = ParsePrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| ParsePrimitiveError(format!("address hex: {}", e)))?;
        let array: [u8; 20] = bytes.try_into().map_err(|b: Vec<u8>| {
            ParsePrimitiveError(format!("address must be 20 bytes, got {}", b.len()))
        })?;
        Ok(Address(array))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// U256
// ============================================================================

/// 256-bit unsigned integer for call values and fee rates.
///
/// Stored as a big-endian 32-byte array; the derived ordering is numeric.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub struct U256(pub [u8; 32]);

impl U256 {
    pub const MAX: U256 = U256([0xFF; 32]);

    pub const fn zero() -> Self {
        U256([0u8; 32])
    }

    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..32].copy_from_slice(&value.to_be_bytes());
        U256(bytes)
    }

    pub fn from_u128(value: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[16..32].copy_from_slice(&value.to_be_bytes());
        U256(bytes)
    }

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        U256(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Convert to u128. Returns None if the value exceeds u128::MAX.
    pub fn to_u128(&self) -> Option<u128> {
        if self.0[0..16].iter().any(|&b| b != 0) {
            return None;
        }
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&self.0[16..32]);
        Some(u128::from_be_bytes(bytes))
    }

    /// Checked subtraction. Returns None on underflow.
    pub fn checked_sub(&self, other: &U256) -> Option<U256> {
        let mut result = [0u8; 32];
        let mut borrow: u16 = 0;
        for i in (0..32).rev() {
            let a = self.0[i] as u16;
            let b = other.0[i] as u16 + borrow;
            if a < b {
                result[i] = (256 + a - b) as u8;
                borrow = 1;
            } else {
                result[i] = (a - b) as u8;
                borrow = 0;
            }
        }
        if borrow != 0 {
            None
        } else {
            Some(U256(result))
        }
    }

    /// Checked addition. Returns None on overflow.
    pub fn checked_add(&self, other: &U256) -> Option<U256> {
        let mut result = [0u8; 32];
        let mut carry: u16 = 0;
        for i in (0..32).rev() {
            let sum = self.0[i] as u16 + other.0[i] as u16 + carry;
            result[i] = sum as u8;
            carry = sum >> 8;
        }
        if carry != 0 {
            None
        } else {
            Some(U256(result))
        }
    }

    /// Multiply by a small factor and add a small term, returning None on overflow.
    fn checked_mul_add_small(&self, factor: u8, term: u8) -> Option<U256> {
        let mut result = [0u8; 32];
        let mut carry: u32 = term as u32;
        for i in (0..32).rev() {
            let product = self.0[i] as u32 * factor as u32 + carry;
            result[i] = product as u8;
            carry = product >> 8;
        }
        if carry != 0 {
            None
        } else {
            Some(U256(result))
        }
    }

    /// Divide by a small divisor in place, returning the remainder.
    fn div_rem_small(&mut self, divisor: u8) -> u8 {
        let mut rem: u32 = 0;
        for byte in self.0.iter_mut() {
            let cur = (rem << 8) | *byte as u32;
            *byte = (cur / divisor as u32) as u8;
            rem = cur % divisor as u32;
        }
        rem as u8
    }

    fn to_decimal_string(self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut value = self;
        let mut digits = Vec::new();
        while !value.is_zero() {
            digits.push(b'0' + value.div_rem_small(10));
        }
        digits.reverse();
        String::from_utf8(digits).unwrap_or_default()
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        U256::from_u64(value)
    }
}

impl From<u128> for U256 {
    fn from(value: u128) -> Self {
        U256::from_u128(value)
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256({})", self.to_decimal_string())
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

/// Parses decimal digits, or big-endian hex when prefixed with `0x`.
impl FromStr for U256 {
    type Err = ParsePrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(digits) = s.strip_prefix("0x") {
            if digits.is_empty() || digits.len() > 64 {
                return Err(ParsePrimitiveError(format!(
                    "hex value must have 1..=64 digits, got {}",
                    digits.len()
                )));
            }
            let padded = format!("{:0>64}", digits);
            let bytes = hex::decode(padded)
                .map_err(|e| ParsePrimitiveError(format!("value hex: {}", e)))?;
            let mut out = [0u8; 32];
            out.copy_from_slice(&bytes);
            return Ok(U256(out));
        }

        if s.is_empty() {
            return Err(ParsePrimitiveError("empty value".to_string()));
        }
        let mut acc = U256::zero();
        for c in s.chars() {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| ParsePrimitiveError(format!("invalid digit '{}' in value", c)))?;
            acc = acc
                .checked_mul_add_small(10, digit as u8)
                .ok_or_else(|| ParsePrimitiveError("value overflows 256 bits".to_string()))?;
        }
        Ok(acc)
    }
}

impl Serialize for U256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
