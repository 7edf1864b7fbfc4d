use std::fmt;

use serde::{Deserialize, Serialize};

use crate::abi::{self, AbiValue};
use crate::address::TronAddress;
use crate::currency::Sun;

use super::error::ContractCallError;
use super::method::ContractMethod;

/// A fully specified contract call, ready to be evaluated (view) or signed
/// and broadcast (write).
#[derive(Debug, Clone, PartialEq)]
pub struct ContractInvocation {
    pub contract: TronAddress,
    pub method: ContractMethod,
    pub arguments: Vec<AbiValue>,
    /// Account the call is made from. View calls without one are made from
    /// the zero address.
    pub owner: Option<TronAddress>,
    pub call_value: Sun,
    pub fee_limit: Sun,
}

impl ContractInvocation {
    /// Builds an invocation, checking the arguments against the method ABI.
    pub fn new(
        contract: TronAddress,
        method: ContractMethod,
        arguments: Vec<AbiValue>,
    ) -> Result<Self, ContractCallError> {
        if arguments.len() != method.inputs.len() {
            return Err(ContractCallError::InvalidArguments {
                method: method.name.to_string(),
                message: format!(
                    "expected {} arguments, got {}",
                    method.inputs.len(),
                    arguments.len()
                ),
            });
        }
        for (index, (arg, expected)) in arguments.iter().zip(method.inputs).enumerate() {
            if arg.abi_type() != *expected {
                return Err(ContractCallError::InvalidArguments {
                    method: method.name.to_string(),
                    message: format!(
                        "argument {index} must be {}, got {}",
                        expected.canonical_name(),
                        arg.abi_type().canonical_name()
                    ),
                });
            }
        }

        Ok(Self {
            contract,
            method,
            arguments,
            owner: None,
            call_value: Sun::ZERO,
            fee_limit: Sun::ZERO,
        })
    }

    pub fn with_owner(mut self, owner: Option<TronAddress>) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_call_value(mut self, value: Sun) -> Self {
        self.call_value = value;
        self
    }

    pub fn with_fee_limit(mut self, fee_limit: Sun) -> Self {
        self.fee_limit = fee_limit;
        self
    }

    pub fn signature(&self) -> String {
        self.method.signature()
    }

    /// ABI-encoded arguments as hex, without selector.
    pub fn parameter_hex(&self) -> String {
        hex::encode(abi::encode(&self.arguments))
    }
}

/// Transaction id as returned by the wallet after broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(String);

impl TxId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn explorer_url(&self) -> String {
        format!("https://tronscan.org/#/transaction/{}", self.0)
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Success,
    Failed,
}

/// Outcome of a transaction once it has been included in a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub tx_id: TxId,
    pub block_number: Option<u64>,
    pub status: ReceiptStatus,
    pub fee: Sun,
    /// Revert message reported by the node, if any.
    pub revert_reason: Option<String>,
}

impl TxReceipt {
    pub fn success(tx_id: TxId, block_number: u64) -> Self {
        Self {
            tx_id,
            block_number: Some(block_number),
            status: ReceiptStatus::Success,
            fee: Sun::ZERO,
            revert_reason: None,
        }
    }

    pub fn failed(tx_id: TxId, reason: Option<String>) -> Self {
        Self {
            tx_id,
            block_number: None,
            status: ReceiptStatus::Failed,
            fee: Sun::ZERO,
            revert_reason: reason,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ReceiptStatus::Success
    }

    /// Converts a failed receipt into the adapter's revert error.
    pub fn into_result(self) -> Result<Self, ContractCallError> {
        if self.is_success() {
            return Ok(self);
        }
        let reason = self
            .revert_reason
            .clone()
            .unwrap_or_else(|| format!("transaction {} failed", self.tx_id));
        Err(ContractCallError::reverted(reason))
    }
}
