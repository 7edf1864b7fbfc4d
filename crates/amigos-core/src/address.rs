//! TRON account addresses.
//!
//! A TRON address is 21 bytes: the `0x41` network prefix followed by the
//! 20-byte account id. Wallets show it as base58check (`T...`), the node API
//! and ABI payloads use hex.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Mainnet address prefix byte.
pub const ADDRESS_PREFIX: u8 = 0x41;

/// Length of the full address including the prefix byte.
pub const ADDRESS_LEN: usize = 21;

const CHECKSUM_LEN: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid base58 '{0}'")]
    InvalidBase58(String),

    #[error("invalid hex '{0}'")]
    InvalidHex(String),

    #[error("expected 21 address bytes, got {0}")]
    InvalidLength(usize),

    #[error("unexpected address prefix 0x{0:02x}")]
    InvalidPrefix(u8),

    #[error("checksum mismatch for '{0}'")]
    ChecksumMismatch(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TronAddress([u8; ADDRESS_LEN]);

impl TronAddress {
    /// Builds an address from its full 21-byte form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let bytes: [u8; ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength(bytes.len()))?;
        if bytes[0] != ADDRESS_PREFIX {
            return Err(AddressError::InvalidPrefix(bytes[0]));
        }
        Ok(Self(bytes))
    }

    /// Builds an address from the 20-byte account id carried in ABI words.
    pub fn from_account_id(id: [u8; 20]) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[0] = ADDRESS_PREFIX;
        bytes[1..].copy_from_slice(&id);
        Self(bytes)
    }

    /// The all-zero account, returned by the contract for "no sponsor".
    pub fn zero() -> Self {
        Self::from_account_id([0u8; 20])
    }

    pub fn is_zero(&self) -> bool {
        self.0[1..].iter().all(|b| *b == 0)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// The 20-byte account id without the network prefix.
    pub fn account_id(&self) -> [u8; 20] {
        let mut id = [0u8; 20];
        id.copy_from_slice(&self.0[1..]);
        id
    }

    pub fn from_base58(input: &str) -> Result<Self, AddressError> {
        let decoded = bs58::decode(input)
            .into_vec()
            .map_err(|_| AddressError::InvalidBase58(input.to_string()))?;
        if decoded.len() != ADDRESS_LEN + CHECKSUM_LEN {
            return Err(AddressError::InvalidLength(
                decoded.len().saturating_sub(CHECKSUM_LEN),
            ));
        }

        let (payload, checksum) = decoded.split_at(ADDRESS_LEN);
        if checksum_of(payload).as_slice() != checksum {
            return Err(AddressError::ChecksumMismatch(input.to_string()));
        }
        Self::from_bytes(payload)
    }

    pub fn to_base58(&self) -> String {
        let mut buf = Vec::with_capacity(ADDRESS_LEN + CHECKSUM_LEN);
        buf.extend_from_slice(&self.0);
        buf.extend_from_slice(&checksum_of(&self.0));
        bs58::encode(buf).into_string()
    }

    /// Accepts `41`-prefixed hex (42 chars) or a bare/`0x` account id (40 chars).
    pub fn from_hex(input: &str) -> Result<Self, AddressError> {
        let stripped = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);
        let bytes =
            hex::decode(stripped).map_err(|_| AddressError::InvalidHex(input.to_string()))?;

        match bytes.len() {
            ADDRESS_LEN => Self::from_bytes(&bytes),
            20 => {
                let mut id = [0u8; 20];
                id.copy_from_slice(&bytes);
                Ok(Self::from_account_id(id))
            }
            other => Err(AddressError::InvalidLength(other)),
        }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Abbreviated base58 form for tables ("TR7NHq...Lj6t").
    pub fn short(&self) -> String {
        let full = self.to_base58();
        if full.len() <= 10 {
            return full;
        }
        format!("{}...{}", &full[..6], &full[full.len() - 4..])
    }

    /// Block explorer page for this address.
    pub fn explorer_url(&self) -> String {
        format!("https://tronscan.org/#/address/{}", self.to_base58())
    }
}

fn checksum_of(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let first = Sha256::digest(payload);
    let second = Sha256::digest(first);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&second[..CHECKSUM_LEN]);
    out
}

impl FromStr for TronAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('T') {
            Self::from_base58(s)
        } else {
            Self::from_hex(s)
        }
    }
}

impl fmt::Display for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TronAddress({})", self.to_base58())
    }
}

impl Serialize for TronAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for TronAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
