//! Error types for the Amigos workspace.

use thiserror::Error;

use crate::address::AddressError;
use crate::contract::ContractCallError;
use crate::currency::CurrencyError;
use crate::wallet::WalletError;

/// Workspace-wide error type.
///
/// Contract and wallet failures that reach a UI action are normally folded
/// into an `ActionOutcome`; this type is what escapes when the caller got the
/// lifecycle wrong (session disposed, action before connect) or when the
/// host fails to bootstrap (config, IO).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmigosError {
    /// A connected session was required but none is established
    #[error("Wallet session is not connected")]
    NotConnected,

    /// The session was disposed and can no longer be used
    #[error("Wallet session has been disposed")]
    Disposed,

    /// Contract call failure
    #[error("Contract call failed: {0}")]
    Contract(#[from] ContractCallError),

    /// Wallet provider failure
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    /// Malformed TRON address
    #[error("Invalid address: {0}")]
    Address(#[from] AddressError),

    /// Malformed currency amount
    #[error("Invalid amount: {0}")]
    Currency(#[from] CurrencyError),

    /// Referral code that is not a positive integer
    #[error("Invalid referral code: '{0}'")]
    InvalidReferralCode(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AmigosError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_not_connected(&self) -> bool {
        matches!(self, Self::NotConnected)
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self, Self::Disposed)
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// True when the failure is a lifecycle bug on the caller's side rather
    /// than something the remote side did.
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::NotConnected | Self::Disposed)
    }
}

impl From<std::io::Error> for AmigosError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AmigosError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AmigosError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for AmigosError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, AmigosError>`.
pub type Result<T> = std::result::Result<T, AmigosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_predicates() {
        assert!(AmigosError::NotConnected.is_lifecycle());
        assert!(AmigosError::Disposed.is_lifecycle());
        assert!(!AmigosError::config("missing").is_lifecycle());
        assert!(AmigosError::config("missing").is_config());
    }

    #[test]
    fn test_contract_error_conversion() {
        let err: AmigosError = ContractCallError::NotConfigured.into();
        assert!(matches!(err, AmigosError::Contract(ContractCallError::NotConfigured)));
        assert_eq!(
            err.to_string(),
            "Contract call failed: Contract address not configured"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
        let err: AmigosError = io.into();
        match err {
            AmigosError::Io { message } => assert!(message.contains("NotFound")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
