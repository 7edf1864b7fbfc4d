use thiserror::Error;

use crate::abi::AbiError;
use crate::wallet::WalletError;

/// Failure of a single contract call.
///
/// Carries the underlying client message so it can be surfaced as-is. The
/// adapter never retries; whether the user should try again is answered by
/// [`ContractCallError::is_retryable`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractCallError {
    /// No blockchain client or no signing wallet is available
    #[error("Blockchain client not initialized: {0}")]
    NotInitialized(String),

    /// The contract address has not been configured
    #[error("Contract address not configured")]
    NotConfigured,

    /// The user declined the request in the wallet
    #[error("Request rejected by user: {0}")]
    Rejected(String),

    /// The contract reverted
    #[error("Contract reverted: {reason}")]
    Reverted { reason: String },

    /// Transport or node failure
    #[error("Network error: {0}")]
    Network(String),

    /// The client gave up waiting
    #[error("Timed out: {0}")]
    Timeout(String),

    /// The node answered but the payload could not be decoded
    #[error("Failed to decode {method} response: {message}")]
    Decode { method: String, message: String },

    /// Arguments did not match the method's ABI
    #[error("Invalid arguments for {method}: {message}")]
    InvalidArguments { method: String, message: String },
}

impl ContractCallError {
    pub fn reverted(reason: impl Into<String>) -> Self {
        Self::Reverted {
            reason: reason.into(),
        }
    }

    pub fn decode(method: &str, err: AbiError) -> Self {
        Self::Decode {
            method: method.to_string(),
            message: err.to_string(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn is_reverted(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }

    /// Network and timeout failures may succeed if the user triggers the
    /// action again; everything else will fail the same way.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}

impl From<WalletError> for ContractCallError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::ProviderUnavailable => {
                Self::NotInitialized("wallet provider unavailable".to_string())
            }
            WalletError::SigningUnavailable(message) => Self::NotInitialized(message),
            WalletError::UserRejected(message) => Self::Rejected(message),
            WalletError::Network(message) => Self::Network(message),
            WalletError::Provider(message) => Self::Network(message),
        }
    }
}
