//! Wallet session context.
//!
//! `WalletSession` is the single owner of the connected address, balance and
//! cached contract snapshots. Hosts share it behind an `Arc` and drive it
//! through `connect` / `disconnect` / `refresh` and the write actions.
//!
//! # State machine
//!
//! ```text
//! Disconnected --connect--> Connecting --ok--> Connected
//!      ^                        |                  |
//!      +-------- error ---------+                  |
//!      +------ disconnect / account gone ----------+
//! ```
//!
//! Every connect, disconnect and account switch bumps an epoch counter.
//! Slow responses are only applied if the epoch they were started under is
//! still current, so data for a previous account never leaks into the new
//! one.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use amigos_core::contract::{ContractCallError, GlobalStats, MatrixInfo, PlanTier, TxReceipt};
use amigos_core::i18n::{Language, Translator};
use amigos_core::referral::ReferralCode;
use amigos_core::session::{ConnectionState, Session};
use amigos_core::wallet::{AccountEvent, WalletError, WalletProvider};
use amigos_core::{AmigosError, Result, TronAddress, Trx};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::action::{ActionOutcome, FailureKind};
use crate::contract_adapter::ContractAdapter;
use crate::in_flight::{InFlightTracker, WriteOperation};

/// Confirmed write plus an optional amount to report (claimed dividends).
type WriteResult = std::result::Result<(TxReceipt, Option<Trx>), ContractCallError>;

pub struct WalletSession {
    provider: Option<Arc<dyn WalletProvider>>,
    adapter: Arc<ContractAdapter>,
    state: RwLock<Session>,
    epoch: AtomicU64,
    in_flight: InFlightTracker,
    disposed: AtomicBool,
    translator: Translator,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl WalletSession {
    /// Creates a disconnected session. `provider` is `None` when the host
    /// has no wallet at all.
    pub fn new(provider: Option<Arc<dyn WalletProvider>>, adapter: Arc<ContractAdapter>) -> Self {
        Self {
            provider,
            adapter,
            state: RwLock::new(Session::new()),
            epoch: AtomicU64::new(0),
            in_flight: InFlightTracker::new(),
            disposed: AtomicBool::new(false),
            translator: Translator::default(),
            listener: Mutex::new(None),
        }
    }

    /// Language used for outcome messages.
    pub fn with_language(mut self, language: Language) -> Self {
        self.translator = Translator::new(language);
        self
    }

    pub fn adapter(&self) -> &Arc<ContractAdapter> {
        &self.adapter
    }

    pub fn language(&self) -> Language {
        self.translator.language()
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> Session {
        self.state.read().await.clone()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    // ---- lifecycle ----

    /// Connects to the wallet's active account and loads its data.
    ///
    /// Never leaves the session in `Connecting`: any failure drops back to
    /// `Disconnected` (keeping global stats) and is reported in the outcome.
    pub async fn connect(&self) -> Result<ActionOutcome> {
        self.ensure_alive()?;

        let Some(provider) = self.provider.clone().filter(|p| p.is_present()) else {
            tracing::warn!("[Session] No wallet provider available");
            return Ok(ActionOutcome::install_prompt(self.t("installWallet")));
        };

        let epoch = {
            let mut state = self.state.write().await;
            if state.is_connected() {
                return Ok(ActionOutcome::success(self.t("walletConnected")));
            }
            state.mark_connecting();
            self.next_epoch()
        };
        tracing::info!("[Session] Connecting (epoch {})", epoch);

        match self.request_address(provider.as_ref()).await {
            Ok(address) => {
                {
                    let mut state = self.state.write().await;
                    if self.epoch() != epoch {
                        tracing::debug!("[Session] Connect superseded (epoch {})", epoch);
                        // Report whatever the newer transition left behind.
                        return Ok(if state.is_connected() {
                            ActionOutcome::success(self.t("walletConnected"))
                        } else {
                            ActionOutcome::failure(
                                FailureKind::UserRejected,
                                self.t("connectionCancelled"),
                            )
                        });
                    }
                    state.mark_connected(address);
                }
                tracing::info!("[Session] Connected as {}", address);
                self.reload(address, epoch).await;
                Ok(ActionOutcome::success(self.t("walletConnected")))
            }
            Err(outcome) => {
                let mut state = self.state.write().await;
                if self.epoch() == epoch {
                    state.mark_disconnected();
                }
                tracing::warn!("[Session] Connect failed: {}", outcome.message);
                Ok(outcome)
            }
        }
    }

    /// Drops the connection and every cached value.
    pub async fn disconnect(&self) -> Result<()> {
        self.ensure_alive()?;
        let mut state = self.state.write().await;
        self.next_epoch();
        state.reset();
        tracing::info!("[Session] Disconnected");
        Ok(())
    }

    /// Re-fetches balance and user data. Does nothing while disconnected.
    pub async fn refresh(&self) -> Result<()> {
        self.ensure_alive()?;
        let (address, epoch) = {
            let state = self.state.read().await;
            match state.address() {
                Some(address) => (address, self.epoch()),
                None => return Ok(()),
            }
        };
        self.reload(address, epoch).await;
        Ok(())
    }

    /// Fetches public contract statistics. A failed read keeps the previous
    /// cache and returns `None`.
    pub async fn refresh_global_stats(&self) -> Result<Option<GlobalStats>> {
        self.ensure_alive()?;
        match self.adapter.get_global_stats().await {
            Ok(stats) => {
                self.state.write().await.apply_global_stats(stats.clone());
                Ok(Some(stats))
            }
            Err(e) => {
                tracing::warn!("[Session] Failed to load global stats: {}", e);
                Ok(None)
            }
        }
    }

    /// Follows an account change reported by the wallet: a new address
    /// reconnects to it, no address disconnects.
    pub async fn handle_account_event(&self, event: AccountEvent) -> Result<()> {
        self.ensure_alive()?;
        let Some(address) = event.address() else {
            if self.state.read().await.connection_state() == ConnectionState::Disconnected {
                return Ok(());
            }
            tracing::info!("[Session] Wallet reported no account");
            return self.disconnect().await;
        };

        let epoch = {
            let mut state = self.state.write().await;
            if state.address() == Some(address) {
                return Ok(());
            }
            state.mark_connected(address);
            self.next_epoch()
        };
        tracing::info!("[Session] Account switched to {}", address);
        self.reload(address, epoch).await;
        Ok(())
    }

    /// Starts forwarding the provider's account events into
    /// [`Self::handle_account_event`]. Replaces any previous listener.
    ///
    /// The task holds only a weak reference and stops when the session is
    /// dropped or disposed.
    pub fn spawn_account_listener(self: &Arc<Self>) -> Result<()> {
        self.ensure_alive()?;
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| AmigosError::Wallet(WalletError::ProviderUnavailable))?;

        let mut events = provider.subscribe();
        let session: Weak<Self> = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let Some(session) = session.upgrade() else {
                    break;
                };
                if let Err(e) = session.handle_account_event(event).await {
                    if e.is_disposed() {
                        break;
                    }
                    tracing::warn!("[Session] Account event not applied: {}", e);
                }
            }
            tracing::debug!("[Session] Account listener stopped");
        });

        if let Some(previous) = self.lock_listener().replace(handle) {
            previous.abort();
        }
        Ok(())
    }

    /// Tears the session down. Every later call fails with `Disposed`.
    pub async fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(listener) = self.lock_listener().take() {
            listener.abort();
        }
        let mut state = self.state.write().await;
        self.next_epoch();
        state.reset();
        tracing::info!("[Session] Disposed");
    }

    // ---- write actions ----

    pub async fn register(&self, sponsor: ReferralCode) -> Result<ActionOutcome> {
        let adapter = &self.adapter;
        self.run_write(
            WriteOperation::Register,
            "registrationSuccess",
            |_| None,
            async { adapter.register(sponsor).await.map(|r| (r, None)) },
        )
        .await
    }

    /// Requires a registered account and a balance of at least the plan
    /// price.
    pub async fn activate_plan(&self, tier: PlanTier) -> Result<ActionOutcome> {
        let adapter = &self.adapter;
        self.run_write(
            WriteOperation::ActivatePlan(tier),
            "planActivated",
            |state| {
                if !state.is_registered() {
                    Some("registerFirst")
                } else if state.balance() < tier.price().to_trx() {
                    Some("insufficientBalance")
                } else {
                    None
                }
            },
            async { adapter.activate_plan(tier).await.map(|r| (r, None)) },
        )
        .await
    }

    /// The outcome carries the claimed amount.
    pub async fn claim_dividends(&self) -> Result<ActionOutcome> {
        let adapter = &self.adapter;
        self.run_write(
            WriteOperation::ClaimDividends,
            "dividendsClaimed",
            |state| (!state.is_registered()).then_some("registerFirst"),
            async {
                adapter
                    .claim_dividends()
                    .await
                    .map(|claim| (claim.receipt, Some(claim.amount)))
            },
        )
        .await
    }

    /// Admin action; only the contract owner passes the local check.
    pub async fn update_service_address(&self, new_address: TronAddress) -> Result<ActionOutcome> {
        let adapter = &self.adapter;
        self.run_write(
            WriteOperation::UpdateServiceAddress,
            "addressUpdated",
            |state| (!state.is_owner()).then_some("onlyOwner"),
            async {
                adapter
                    .update_service_address(new_address)
                    .await
                    .map(|r| (r, None))
            },
        )
        .await
    }

    // ---- internals ----

    /// Shared shape of every write: lifecycle check, local preconditions,
    /// in-flight de-duplication, submit, then reload on success. `submit` is
    /// not polled unless all checks pass.
    async fn run_write<P, F>(
        &self,
        operation: WriteOperation,
        success_key: &str,
        precondition: P,
        submit: F,
    ) -> Result<ActionOutcome>
    where
        P: FnOnce(&Session) -> Option<&'static str>,
        F: Future<Output = WriteResult>,
    {
        self.ensure_alive()?;

        let (address, epoch) = {
            let state = self.state.read().await;
            let address = state.address().ok_or(AmigosError::NotConnected)?;
            if let Some(key) = precondition(&*state) {
                tracing::debug!("[Session] {} blocked: {}", operation, key);
                return Ok(ActionOutcome::failure(FailureKind::Precondition, self.t(key)));
            }
            (address, self.epoch())
        };

        let Some(_guard) = self.in_flight.try_acquire(operation) else {
            tracing::warn!("[Session] {} already in flight, rejecting duplicate", operation);
            return Ok(ActionOutcome::failure(
                FailureKind::InFlight,
                self.t("actionInProgress"),
            ));
        };

        match submit.await {
            Ok((receipt, amount)) => {
                tracing::info!("[Session] {} succeeded ({})", operation, receipt.tx_id);
                self.reload(address, epoch).await;
                let outcome = ActionOutcome::success(self.t(success_key)).with_tx_id(receipt.tx_id);
                Ok(match amount {
                    Some(amount) => outcome.with_amount(amount),
                    None => outcome,
                })
            }
            Err(e) => {
                tracing::warn!("[Session] {} failed: {}", operation, e);
                Ok(ActionOutcome::from_contract_error(&e))
            }
        }
    }

    /// Runs the account handshake. Errors are already user-facing outcomes.
    async fn request_address(
        &self,
        provider: &dyn WalletProvider,
    ) -> std::result::Result<TronAddress, ActionOutcome> {
        if !provider.is_ready() {
            let response = provider.request_accounts().await.map_err(|e| {
                let kind = match e {
                    WalletError::UserRejected(_) => FailureKind::UserRejected,
                    WalletError::Network(_) => FailureKind::Network,
                    _ => FailureKind::ProviderAbsent,
                };
                ActionOutcome::failure(kind, format!("{}: {}", self.t("connectionError"), e))
            })?;
            if !response.is_accepted() {
                tracing::info!("[Session] Account request declined (code {})", response.code);
                return Err(ActionOutcome::failure(
                    FailureKind::UserRejected,
                    self.t("connectionRejected"),
                ));
            }
        }

        provider.default_address().ok_or_else(|| {
            ActionOutcome::failure(FailureKind::ProviderAbsent, self.t("connectionError"))
        })
    }

    /// Loads balance, user, matrix and owner data for `address` and applies
    /// whatever succeeded, provided `epoch` is still current. Failed reads
    /// keep the previous values.
    async fn reload(&self, address: TronAddress, epoch: u64) {
        let balance = match &self.provider {
            Some(provider) => provider
                .get_balance(&address)
                .await
                .inspect_err(|e| tracing::warn!("[Session] Failed to load balance: {}", e))
                .ok(),
            None => None,
        };

        let user = self
            .adapter
            .get_user_info(address)
            .await
            .inspect_err(|e| tracing::warn!("[Session] Failed to load user info: {}", e))
            .ok();

        let matrix: Option<Option<MatrixInfo>> = match &user {
            Some(info) if info.is_registered() => self
                .adapter
                .get_user_matrix_info(address)
                .await
                .inspect_err(|e| tracing::warn!("[Session] Failed to load matrix info: {}", e))
                .ok()
                .map(Some),
            Some(_) => Some(None),
            None => None,
        };

        let is_owner = self
            .adapter
            .get_owner()
            .await
            .inspect_err(|e| tracing::debug!("[Session] Owner check failed: {}", e))
            .ok()
            .map(|owner| owner == address);

        let mut state = self.state.write().await;
        if self.epoch() != epoch || state.address() != Some(address) {
            tracing::debug!("[Session] Discarding stale reload for {}", address);
            return;
        }
        if let Some(balance) = balance {
            state.apply_balance(balance.to_trx());
        }
        if let Some(user) = user {
            let matrix = matrix.unwrap_or_else(|| state.matrix_info().cloned());
            state.apply_user_snapshot(Some(user), matrix);
        }
        if let Some(is_owner) = is_owner {
            state.set_owner(is_owner);
        }
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.is_disposed() {
            return Err(AmigosError::Disposed);
        }
        Ok(())
    }

    /// Bumps the epoch and returns the new value.
    fn next_epoch(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn lock_listener(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.listener.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn t(&self, key: &str) -> String {
        self.translator.t(key)
    }
}

impl Drop for WalletSession {
    fn drop(&mut self) {
        if let Some(listener) = self.lock_listener().take() {
            listener.abort();
        }
    }
}
