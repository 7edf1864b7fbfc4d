use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::address::TronAddress;
use crate::contract::{ContractInvocation, TxId};
use crate::currency::Sun;

use super::error::WalletError;
use super::event::AccountEvent;

/// Where users are sent when no wallet provider is installed.
pub const TRONLINK_INSTALL_URL: &str = "https://www.tronlink.org/";

/// Response to a `tron_requestAccounts` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsResponse {
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

impl AccountsResponse {
    pub const ACCEPTED: u16 = 200;
    pub const REJECTED: u16 = 4001;

    pub fn accepted() -> Self {
        Self {
            code: Self::ACCEPTED,
            message: String::new(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            code: Self::REJECTED,
            message: message.into(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.code == Self::ACCEPTED
    }
}

/// Host-provided wallet.
///
/// Mirrors what the browser extension exposes: a presence check, an account
/// request handshake, the default address, balances, signing, and a stream
/// of account changes.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether a wallet is installed at all.
    fn is_present(&self) -> bool;

    /// Whether the wallet is unlocked and already exposes an account.
    fn is_ready(&self) -> bool;

    /// The currently selected account, if any.
    fn default_address(&self) -> Option<TronAddress>;

    /// Asks the user to grant account access.
    ///
    /// # Returns
    ///
    /// - `Ok(response)`: The wallet answered; check [`AccountsResponse::is_accepted`]
    /// - `Err(_)`: The request could not be delivered
    async fn request_accounts(&self) -> Result<AccountsResponse, WalletError>;

    async fn get_balance(&self, address: &TronAddress) -> Result<Sun, WalletError>;

    /// Signs and broadcasts a contract call.
    ///
    /// # Arguments
    ///
    /// * `invocation` - Fully built call including call value and fee limit
    ///
    /// # Returns
    ///
    /// - `Ok(tx_id)`: Broadcast accepted by the node; not yet confirmed
    /// - `Err(_)`: The user declined, the wallet cannot sign, or broadcast failed
    async fn send_transaction(&self, invocation: &ContractInvocation) -> Result<TxId, WalletError>;

    /// Opens a new stream of account-change events.
    ///
    /// Each call returns an independent receiver; the stream ends when the
    /// provider is dropped.
    fn subscribe(&self) -> UnboundedReceiver<AccountEvent>;
}
