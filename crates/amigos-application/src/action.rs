//! Results of user-triggered session actions.

use amigos_core::contract::{ContractCallError, TxId};
use amigos_core::wallet::TRONLINK_INSTALL_URL;
use amigos_core::Trx;
use serde::Serialize;
use strum::Display;

/// Why an action did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No wallet installed, or it cannot sign
    ProviderAbsent,
    /// The user declined in the wallet
    UserRejected,
    /// The contract reverted
    Reverted,
    /// Transport, node or confirmation timeout
    Network,
    /// The same write is already running
    InFlight,
    /// A local check failed (not registered, balance too low, not owner)
    Precondition,
    /// No contract address configured
    NotConfigured,
}

/// What the UI shows after an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<TxId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Trx>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    /// Set when the user should be sent to install a wallet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_url: Option<String>,
}

impl ActionOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            tx_id: None,
            amount: None,
            failure: None,
            install_url: None,
        }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            tx_id: None,
            amount: None,
            failure: Some(kind),
            install_url: None,
        }
    }

    /// Failure that asks the user to install a wallet.
    pub fn install_prompt(message: impl Into<String>) -> Self {
        Self {
            install_url: Some(TRONLINK_INSTALL_URL.to_string()),
            ..Self::failure(FailureKind::ProviderAbsent, message)
        }
    }

    /// Folds an adapter error into a failed outcome carrying its message.
    pub fn from_contract_error(err: &ContractCallError) -> Self {
        let kind = match err {
            ContractCallError::NotInitialized(_) => FailureKind::ProviderAbsent,
            ContractCallError::NotConfigured => FailureKind::NotConfigured,
            ContractCallError::Rejected(_) => FailureKind::UserRejected,
            ContractCallError::Reverted { .. } => FailureKind::Reverted,
            ContractCallError::Network(_)
            | ContractCallError::Timeout(_)
            | ContractCallError::Decode { .. } => FailureKind::Network,
            ContractCallError::InvalidArguments { .. } => FailureKind::Precondition,
        };
        Self::failure(kind, err.to_string())
    }

    pub fn with_tx_id(mut self, tx_id: TxId) -> Self {
        self.tx_id = Some(tx_id);
        self
    }

    pub fn with_amount(mut self, amount: Trx) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Network failures may go through if the user tries again.
    pub fn is_retryable(&self) -> bool {
        self.failure == Some(FailureKind::Network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_error_kinds() {
        let cases = [
            (ContractCallError::NotConfigured, FailureKind::NotConfigured),
            (ContractCallError::Rejected("no".into()), FailureKind::UserRejected),
            (ContractCallError::reverted("Already registered"), FailureKind::Reverted),
            (ContractCallError::Timeout("20 attempts".into()), FailureKind::Network),
            (
                ContractCallError::NotInitialized("no wallet".into()),
                FailureKind::ProviderAbsent,
            ),
        ];
        for (err, kind) in cases {
            let outcome = ActionOutcome::from_contract_error(&err);
            assert!(!outcome.success);
            assert_eq!(outcome.failure, Some(kind));
            assert_eq!(outcome.message, err.to_string());
        }
    }

    #[test]
    fn test_install_prompt() {
        let outcome = ActionOutcome::install_prompt("Please install TronLink");
        assert_eq!(outcome.failure, Some(FailureKind::ProviderAbsent));
        assert_eq!(outcome.install_url.as_deref(), Some(TRONLINK_INSTALL_URL));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let outcome = ActionOutcome::success("ok").with_amount(Trx::new(2.5));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["amount"], 2.5);
        assert!(json.get("txId").is_none());
        assert!(json.get("failure").is_none());
    }

    #[test]
    fn test_retryable() {
        assert!(ActionOutcome::failure(FailureKind::Network, "reset").is_retryable());
        assert!(!ActionOutcome::failure(FailureKind::Reverted, "no").is_retryable());
    }
}
