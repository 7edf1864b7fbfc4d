//! Hand-written collaborators shared by the application tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use amigos_application::ContractAdapter;
use amigos_core::abi::{self, AbiValue};
use amigos_core::contract::{
    ChainClient, ContractCallError, ContractInvocation, ContractMethod, TxId, TxReceipt,
};
use amigos_core::wallet::{AccountEvent, AccountsResponse, WalletError, WalletProvider};
use amigos_core::{Sun, TronAddress};
use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub fn addr(byte: u8) -> TronAddress {
    TronAddress::from_account_id([byte; 20])
}

pub fn contract_address() -> TronAddress {
    addr(0xcc)
}

/// `getUserInfo` output for `user`.
pub fn user_info_values(user: TronAddress, active: bool, earned_sun: u128) -> Vec<AbiValue> {
    vec![
        AbiValue::Address(user),
        AbiValue::Address(addr(0x01)),
        AbiValue::Uint(if active { 1001 } else { 0 }),
        AbiValue::Uint(if active { 1_700_000_000 } else { 0 }),
        AbiValue::Bool(active),
        AbiValue::Uint(earned_sun),
        AbiValue::Uint(2),
        AbiValue::Bool(active),
        AbiValue::Bool(false),
        AbiValue::Bool(false),
        AbiValue::Bool(false),
        AbiValue::Uint(0),
    ]
}

pub fn matrix_values(upline: TronAddress, children: Vec<TronAddress>) -> Vec<AbiValue> {
    vec![
        AbiValue::Uint(1),
        AbiValue::Address(upline),
        AbiValue::AddressArray(children),
        AbiValue::Uint(0),
        AbiValue::Bool(true),
    ]
}

pub fn stats_values(users: u128, burned_sun: u128) -> Vec<AbiValue> {
    let mut values = vec![AbiValue::Uint(users), AbiValue::Uint(burned_sun)];
    values.extend((0..10).map(|_| AbiValue::Uint(0)));
    values
}

/// Chain client answering view calls from a table keyed by method name.
#[derive(Default)]
pub struct MockChainClient {
    responses: Mutex<HashMap<&'static str, Result<Vec<u8>, ContractCallError>>>,
    receipt: Mutex<Option<TxReceipt>>,
    calls: Mutex<Vec<ContractInvocation>>,
    balance: Mutex<Sun>,
}

impl MockChainClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: ContractMethod, values: Vec<AbiValue>) {
        self.responses
            .lock()
            .unwrap()
            .insert(method.name, Ok(abi::encode(&values)));
    }

    pub fn fail(&self, method: ContractMethod, err: ContractCallError) {
        self.responses.lock().unwrap().insert(method.name, Err(err));
    }

    /// Receipt returned by the next confirmations; success by default.
    pub fn set_receipt(&self, receipt: TxReceipt) {
        *self.receipt.lock().unwrap() = Some(receipt);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.method.name.to_string())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn trigger_constant(
        &self,
        invocation: &ContractInvocation,
    ) -> Result<Vec<u8>, ContractCallError> {
        self.calls.lock().unwrap().push(invocation.clone());
        self.responses
            .lock()
            .unwrap()
            .get(invocation.method.name)
            .cloned()
            .unwrap_or_else(|| Err(ContractCallError::Network("no response".into())))
    }

    async fn await_receipt(&self, tx_id: &TxId) -> Result<TxReceipt, ContractCallError> {
        let receipt = self.receipt.lock().unwrap().clone();
        Ok(receipt.unwrap_or_else(|| TxReceipt::success(tx_id.clone(), 100)))
    }

    async fn get_balance(&self, _address: &TronAddress) -> Result<Sun, ContractCallError> {
        Ok(*self.balance.lock().unwrap())
    }
}

/// Wallet with scripted answers. Sends, account requests and a single
/// balance read can be held open to exercise overlapping calls.
pub struct MockWallet {
    present: bool,
    ready: Mutex<bool>,
    address: Mutex<Option<TronAddress>>,
    accounts_response: Mutex<Result<AccountsResponse, WalletError>>,
    balance: Mutex<Sun>,
    send_result: Mutex<Result<TxId, WalletError>>,
    sent: Mutex<Vec<ContractInvocation>>,
    sends: AtomicUsize,
    gate: Option<Notify>,
    accounts_gate: Option<Notify>,
    account_requests: AtomicUsize,
    hold_balance: AtomicBool,
    balance_gate: Notify,
    balance_reads: AtomicUsize,
    subscribers: Mutex<Vec<UnboundedSender<AccountEvent>>>,
}

impl MockWallet {
    /// Unlocked wallet with `address` selected.
    pub fn connected(address: TronAddress, balance: Sun) -> Self {
        Self {
            present: true,
            ready: Mutex::new(true),
            address: Mutex::new(Some(address)),
            accounts_response: Mutex::new(Ok(AccountsResponse::accepted())),
            balance: Mutex::new(balance),
            send_result: Mutex::new(Ok(TxId::new("tx-1"))),
            sent: Mutex::new(Vec::new()),
            sends: AtomicUsize::new(0),
            gate: None,
            accounts_gate: None,
            account_requests: AtomicUsize::new(0),
            hold_balance: AtomicBool::new(false),
            balance_gate: Notify::new(),
            balance_reads: AtomicUsize::new(0),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Locked wallet that answers the account request with `response`.
    pub fn locked(address: TronAddress, response: Result<AccountsResponse, WalletError>) -> Self {
        let wallet = Self::connected(address, Sun::ZERO);
        *wallet.ready.lock().unwrap() = false;
        *wallet.accounts_response.lock().unwrap() = response;
        wallet
    }

    /// Extension not installed.
    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::connected(addr(0), Sun::ZERO)
        }
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Notify::new());
        self
    }

    pub fn open_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Holds account requests until [`Self::open_accounts_gate`].
    pub fn gated_accounts(mut self) -> Self {
        self.accounts_gate = Some(Notify::new());
        self
    }

    pub fn open_accounts_gate(&self) {
        if let Some(gate) = &self.accounts_gate {
            gate.notify_one();
        }
    }

    pub fn account_requests(&self) -> usize {
        self.account_requests.load(Ordering::SeqCst)
    }

    /// The next balance read captures the current balance, then waits for
    /// [`Self::release_balance`] before answering with it.
    pub fn hold_next_balance(&self) {
        self.hold_balance.store(true, Ordering::SeqCst);
    }

    pub fn release_balance(&self) {
        self.balance_gate.notify_one();
    }

    pub fn balance_reads(&self) -> usize {
        self.balance_reads.load(Ordering::SeqCst)
    }

    pub fn set_balance(&self, balance: Sun) {
        *self.balance.lock().unwrap() = balance;
    }

    pub fn set_send_result(&self, result: Result<TxId, WalletError>) {
        *self.send_result.lock().unwrap() = result;
    }

    pub fn set_address(&self, address: Option<TronAddress>) {
        *self.address.lock().unwrap() = address;
    }

    pub fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<ContractInvocation> {
        self.sent.lock().unwrap().clone()
    }

    pub fn emit(&self, event: AccountEvent) {
        self.subscribers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(event).is_ok());
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    fn is_present(&self) -> bool {
        self.present
    }

    fn is_ready(&self) -> bool {
        *self.ready.lock().unwrap()
    }

    fn default_address(&self) -> Option<TronAddress> {
        *self.address.lock().unwrap()
    }

    async fn request_accounts(&self) -> Result<AccountsResponse, WalletError> {
        self.account_requests.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.accounts_gate {
            gate.notified().await;
        }
        let response = self.accounts_response.lock().unwrap().clone();
        if matches!(&response, Ok(r) if r.is_accepted()) {
            *self.ready.lock().unwrap() = true;
        }
        response
    }

    async fn get_balance(&self, _address: &TronAddress) -> Result<Sun, WalletError> {
        let balance = *self.balance.lock().unwrap();
        self.balance_reads.fetch_add(1, Ordering::SeqCst);
        if self.hold_balance.swap(false, Ordering::SeqCst) {
            self.balance_gate.notified().await;
        }
        Ok(balance)
    }

    async fn send_transaction(&self, invocation: &ContractInvocation) -> Result<TxId, WalletError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(invocation.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.send_result.lock().unwrap().clone()
    }

    fn subscribe(&self) -> UnboundedReceiver<AccountEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap().push(tx);
        rx
    }
}

/// Adapter wired to `client` and `wallet` for the standard test contract.
pub fn adapter(client: &Arc<MockChainClient>, wallet: &Arc<MockWallet>) -> Arc<ContractAdapter> {
    Arc::new(
        ContractAdapter::new(client.clone(), Some(contract_address())).with_wallet(wallet.clone()),
    )
}
