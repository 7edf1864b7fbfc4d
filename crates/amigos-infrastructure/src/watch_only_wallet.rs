//! Wallet provider for hosts that can observe an account but not sign.
//!
//! The CLI uses it to run the session against a configured address: reads
//! and balances work, every write is refused with `SigningUnavailable`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use amigos_core::contract::{ChainClient, ContractInvocation, TxId};
use amigos_core::wallet::{AccountEvent, AccountsResponse, WalletError, WalletProvider};
use amigos_core::{Sun, TronAddress};
use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub struct WatchOnlyWallet {
    client: Arc<dyn ChainClient>,
    address: Mutex<Option<TronAddress>>,
    subscribers: Mutex<Vec<UnboundedSender<AccountEvent>>>,
}

impl WatchOnlyWallet {
    pub fn new(client: Arc<dyn ChainClient>, address: Option<TronAddress>) -> Self {
        Self {
            client,
            address: Mutex::new(address),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Selects another account (or none) and notifies subscribers.
    pub fn switch_account(&self, address: Option<TronAddress>) {
        *lock(&self.address) = address;
        tracing::info!("[Wallet] Watching {:?}", address.map(|a| a.to_base58()));

        let event = match address {
            Some(_) => AccountEvent::AccountChanged { address },
            None => AccountEvent::Disconnected,
        };
        // Closed receivers are dropped from the list.
        lock(&self.subscribers).retain(|tx| tx.send(event).is_ok());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl WalletProvider for WatchOnlyWallet {
    fn is_present(&self) -> bool {
        true
    }

    fn is_ready(&self) -> bool {
        lock(&self.address).is_some()
    }

    fn default_address(&self) -> Option<TronAddress> {
        *lock(&self.address)
    }

    async fn request_accounts(&self) -> Result<AccountsResponse, WalletError> {
        Ok(if self.is_ready() {
            AccountsResponse::accepted()
        } else {
            AccountsResponse::rejected("No account configured")
        })
    }

    async fn get_balance(&self, address: &TronAddress) -> Result<Sun, WalletError> {
        self.client
            .get_balance(address)
            .await
            .map_err(|e| WalletError::Network(e.to_string()))
    }

    async fn send_transaction(&self, invocation: &ContractInvocation) -> Result<TxId, WalletError> {
        tracing::warn!("[Wallet] Refusing to sign {}", invocation.signature());
        Err(WalletError::SigningUnavailable(
            "watch-only wallet cannot sign transactions".to_string(),
        ))
    }

    fn subscribe(&self) -> UnboundedReceiver<AccountEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.subscribers).push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amigos_core::contract::{ContractCallError, TxReceipt, method};

    struct FixedBalance(Sun);

    #[async_trait]
    impl ChainClient for FixedBalance {
        async fn trigger_constant(
            &self,
            _invocation: &ContractInvocation,
        ) -> Result<Vec<u8>, ContractCallError> {
            Err(ContractCallError::Network("unused".into()))
        }

        async fn await_receipt(&self, tx_id: &TxId) -> Result<TxReceipt, ContractCallError> {
            Ok(TxReceipt::success(tx_id.clone(), 1))
        }

        async fn get_balance(&self, _address: &TronAddress) -> Result<Sun, ContractCallError> {
            Ok(self.0)
        }
    }

    fn address(byte: u8) -> TronAddress {
        TronAddress::from_account_id([byte; 20])
    }

    fn wallet(address: Option<TronAddress>) -> WatchOnlyWallet {
        WatchOnlyWallet::new(Arc::new(FixedBalance(Sun::from_whole_trx(42))), address)
    }

    #[tokio::test]
    async fn test_account_request_depends_on_configured_address() {
        let configured = wallet(Some(address(1)));
        assert!(configured.request_accounts().await.unwrap().is_accepted());

        let empty = wallet(None);
        let response = empty.request_accounts().await.unwrap();
        assert_eq!(response.code, AccountsResponse::REJECTED);
        assert!(!empty.is_ready());
    }

    #[tokio::test]
    async fn test_balance_comes_from_chain() {
        let wallet = wallet(Some(address(1)));
        let balance = wallet.get_balance(&address(1)).await.unwrap();
        assert_eq!(balance, Sun::from_whole_trx(42));
    }

    #[tokio::test]
    async fn test_signing_is_refused() {
        let wallet = wallet(Some(address(1)));
        let invocation =
            ContractInvocation::new(address(0xcc), method::CLAIM_DIVIDENDS, vec![]).unwrap();

        let err = wallet.send_transaction(&invocation).await.unwrap_err();
        assert!(matches!(err, WalletError::SigningUnavailable(_)));
    }

    #[tokio::test]
    async fn test_switch_account_notifies_subscribers() {
        let wallet = wallet(Some(address(1)));
        let mut events = wallet.subscribe();

        wallet.switch_account(Some(address(2)));
        wallet.switch_account(None);

        assert_eq!(events.recv().await.unwrap().address(), Some(address(2)));
        assert_eq!(events.recv().await.unwrap(), AccountEvent::Disconnected);
        assert_eq!(wallet.default_address(), None);
    }
}
