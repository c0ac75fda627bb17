//! Shared type definitions for the Daolette settlement engine
//!
//! Account identities, the per-transaction context handed to every call, and
//! the serde helper used for 128-bit currency amounts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Length of the raw account identifier in bytes
pub const ADDRESS_LEN: usize = 20;

/// Whether an account is controlled by an end user or by deployed code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccountKind {
    /// Externally owned account (`hx` prefix)
    EndUser,
    /// Programmatic account (`cx` prefix)
    Contract,
}

impl AccountKind {
    fn prefix(self) -> &'static str {
        match self {
            AccountKind::EndUser => "hx",
            AccountKind::Contract => "cx",
        }
    }
}

/// Account identity: kind plus 20-byte identifier, rendered as `hx…` / `cx…`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    kind: AccountKind,
    id: [u8; ADDRESS_LEN],
}

impl Address {
    pub const fn new(kind: AccountKind, id: [u8; ADDRESS_LEN]) -> Self {
        Self { kind, id }
    }

    pub const fn end_user(id: [u8; ADDRESS_LEN]) -> Self {
        Self::new(AccountKind::EndUser, id)
    }

    pub const fn contract(id: [u8; ADDRESS_LEN]) -> Self {
        Self::new(AccountKind::Contract, id)
    }

    /// Derive a deterministic address from a label (handy for fixtures and the CLI)
    pub fn derive(kind: AccountKind, label: &str) -> Self {
        let digest = Sha256::digest(label.as_bytes());
        let mut id = [0u8; ADDRESS_LEN];
        id.copy_from_slice(&digest[..ADDRESS_LEN]);
        Self::new(kind, id)
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn is_contract(&self) -> bool {
        self.kind == AccountKind::Contract
    }

    pub fn id(&self) -> &[u8; ADDRESS_LEN] {
        &self.id
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), hex::encode(self.id))
    }
}

/// Address parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    #[error("unknown address prefix in '{0}' (expected hx or cx)")]
    UnknownPrefix(String),

    #[error("invalid address body in '{0}': expected {ADDRESS_LEN} hex-encoded bytes")]
    InvalidBody(String),
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = if s.starts_with("hx") {
            AccountKind::EndUser
        } else if s.starts_with("cx") {
            AccountKind::Contract
        } else {
            return Err(AddressParseError::UnknownPrefix(s.to_string()));
        };

        let body = hex::decode(&s[2..]).map_err(|_| AddressParseError::InvalidBody(s.to_string()))?;
        let id: [u8; ADDRESS_LEN] = body
            .try_into()
            .map_err(|_| AddressParseError::InvalidBody(s.to_string()))?;

        Ok(Self::new(kind, id))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Context of the transaction that triggered a call
///
/// The hash and block timestamp are fixed only once the enclosing block is
/// assembled; together with the caller seed they feed the outcome draw. The
/// transaction timestamp is chosen and signed by the sender and is only
/// recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxContext {
    /// Unique transaction hash
    #[serde(with = "hex_hash")]
    pub hash: [u8; 32],
    /// Timestamp the sender signed into the transaction, in microseconds
    pub tx_timestamp: u64,
    /// Timestamp of the including block, in microseconds
    pub block_timestamp: u64,
    /// Account that signed the transaction
    pub origin: Address,
    /// Immediate caller (differs from `origin` when routed through a contract)
    pub sender: Address,
    /// Value attached to the call, in the smallest currency unit
    #[serde(with = "amount")]
    pub value: u128,
}

impl TxContext {
    /// Direct call from an end-user account, signed at the block's timestamp
    pub fn direct(hash: [u8; 32], block_timestamp: u64, from: Address, value: u128) -> Self {
        Self {
            hash,
            tx_timestamp: block_timestamp,
            block_timestamp,
            origin: from,
            sender: from,
            value,
        }
    }

    pub fn with_tx_timestamp(mut self, tx_timestamp: u64) -> Self {
        self.tx_timestamp = tx_timestamp;
        self
    }

    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

mod hex_hash {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(hash: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let raw = String::deserialize(deserializer)?;
        let bytes = hex::decode(raw.trim_start_matches("0x")).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("transaction hash must be 32 bytes"))
    }
}

/// Serialize u128 amounts as decimal strings; accept strings or integers.
///
/// TOML integers are 64-bit and JSON consumers routinely lose precision past
/// 2^53, while treasury capital is well above both.
pub mod amount {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text
                .replace('_', "")
                .parse::<u128>()
                .map_err(|e| de::Error::custom(format!("invalid amount '{}': {}", text, e))),
            Raw::Number(n) => Ok(u128::from(n)),
        }
    }
}
