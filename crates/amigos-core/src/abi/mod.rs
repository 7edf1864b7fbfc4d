//! Minimal contract ABI support.
//!
//! Only the types the Amigos contract actually exchanges are modelled:
//! `address`, `uint256`, `bool` and `address[]`. Encoding follows the
//! standard 32-byte word layout; TRON addresses travel as their 20-byte
//! account id.

mod codec;

use thiserror::Error;

use crate::address::TronAddress;

pub use codec::{WORD_LEN, decode, decode_revert_reason, encode};

/// Static description of an ABI parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiType {
    Address,
    Uint256,
    Bool,
    AddressArray,
}

impl AbiType {
    /// Canonical name used in function signatures.
    pub fn canonical_name(self) -> &'static str {
        match self {
            AbiType::Address => "address",
            AbiType::Uint256 => "uint256",
            AbiType::Bool => "bool",
            AbiType::AddressArray => "address[]",
        }
    }

    pub fn is_dynamic(self) -> bool {
        matches!(self, AbiType::AddressArray)
    }
}

/// A decoded (or to-be-encoded) ABI value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Address(TronAddress),
    Uint(u128),
    Bool(bool),
    AddressArray(Vec<TronAddress>),
}

impl AbiValue {
    pub fn abi_type(&self) -> AbiType {
        match self {
            AbiValue::Address(_) => AbiType::Address,
            AbiValue::Uint(_) => AbiType::Uint256,
            AbiValue::Bool(_) => AbiType::Bool,
            AbiValue::AddressArray(_) => AbiType::AddressArray,
        }
    }

    pub fn as_address(&self) -> Result<TronAddress, AbiError> {
        match self {
            AbiValue::Address(addr) => Ok(*addr),
            other => Err(AbiError::type_mismatch(AbiType::Address, other)),
        }
    }

    pub fn as_uint(&self) -> Result<u128, AbiError> {
        match self {
            AbiValue::Uint(value) => Ok(*value),
            other => Err(AbiError::type_mismatch(AbiType::Uint256, other)),
        }
    }

    /// Narrows a `uint256` that is known to hold a small count or timestamp.
    pub fn as_u64(&self) -> Result<u64, AbiError> {
        let value = self.as_uint()?;
        u64::try_from(value).map_err(|_| AbiError::Overflow(value.to_string()))
    }

    pub fn as_bool(&self) -> Result<bool, AbiError> {
        match self {
            AbiValue::Bool(value) => Ok(*value),
            other => Err(AbiError::type_mismatch(AbiType::Bool, other)),
        }
    }

    pub fn as_address_array(&self) -> Result<&[TronAddress], AbiError> {
        match self {
            AbiValue::AddressArray(values) => Ok(values),
            other => Err(AbiError::type_mismatch(AbiType::AddressArray, other)),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("payload too short: need {needed} bytes at offset {offset}, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("payload length {0} is not a multiple of 32")]
    Misaligned(usize),

    #[error("value does not fit: {0}")]
    Overflow(String),

    #[error("invalid bool word")]
    InvalidBool,

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected {expected} values, found {found}")]
    Arity { expected: usize, found: usize },

    #[error("invalid address word: {0}")]
    InvalidAddress(String),
}

impl AbiError {
    fn type_mismatch(expected: AbiType, found: &AbiValue) -> Self {
        Self::TypeMismatch {
            expected: expected.canonical_name(),
            found: found.abi_type().canonical_name(),
        }
    }
}

/// Cursor over a decoded output tuple, used by the snapshot models to read
/// fields in declaration order.
pub struct AbiReader<'a> {
    values: std::slice::Iter<'a, AbiValue>,
}

impl<'a> AbiReader<'a> {
    pub fn new(values: &'a [AbiValue]) -> Self {
        Self {
            values: values.iter(),
        }
    }

    fn next(&mut self) -> Result<&'a AbiValue, AbiError> {
        let remaining = self.values.len();
        self.values.next().ok_or(AbiError::Arity {
            expected: remaining + 1,
            found: remaining,
        })
    }

    pub fn address(&mut self) -> Result<TronAddress, AbiError> {
        self.next()?.as_address()
    }

    pub fn uint(&mut self) -> Result<u128, AbiError> {
        self.next()?.as_uint()
    }

    pub fn u64(&mut self) -> Result<u64, AbiError> {
        self.next()?.as_u64()
    }

    pub fn bool(&mut self) -> Result<bool, AbiError> {
        self.next()?.as_bool()
    }

    pub fn address_array(&mut self) -> Result<Vec<TronAddress>, AbiError> {
        Ok(self.next()?.as_address_array()?.to_vec())
    }
}
