//! Typed access to the Amigos contract.
//!
//! Every public method maps to exactly one contract function (plus the
//! accumulated-dividend read that precedes a claim). Reads go through the
//! injected [`ChainClient`]; writes are signed by the [`WalletProvider`] and
//! then confirmed through the client. Failures come back as
//! [`ContractCallError`] with the underlying message intact and are never
//! retried here.

use std::sync::Arc;

use amigos_core::abi::{self, AbiValue};
use amigos_core::config::{ContractConfig, DEFAULT_FEE_LIMIT};
use amigos_core::contract::{
    ChainClient, ContractCallError, ContractInvocation, ContractMethod, DividendInfo, GlobalStats,
    MatrixInfo, PlanTier, TxReceipt, UserInfo, method,
};
use amigos_core::referral::ReferralCode;
use amigos_core::wallet::WalletProvider;
use amigos_core::{Sun, TronAddress, Trx};

type CallResult<T> = std::result::Result<T, ContractCallError>;

/// Receipt of a successful `claimDividends` plus the amount that was
/// accumulated right before it.
#[derive(Debug, Clone, PartialEq)]
pub struct DividendClaim {
    pub receipt: TxReceipt,
    pub amount: Trx,
}

pub struct ContractAdapter {
    client: Option<Arc<dyn ChainClient>>,
    wallet: Option<Arc<dyn WalletProvider>>,
    contract: Option<TronAddress>,
    fee_limit: Sun,
}

impl ContractAdapter {
    /// Creates an adapter for `contract`. Without a wallet only reads work.
    pub fn new(client: Arc<dyn ChainClient>, contract: Option<TronAddress>) -> Self {
        Self {
            client: Some(client),
            wallet: None,
            contract,
            fee_limit: DEFAULT_FEE_LIMIT,
        }
    }

    /// An adapter with no client at all; every call fails with
    /// `NotInitialized`.
    pub fn uninitialized() -> Self {
        Self {
            client: None,
            wallet: None,
            contract: None,
            fee_limit: DEFAULT_FEE_LIMIT,
        }
    }

    pub fn from_config(
        client: Arc<dyn ChainClient>,
        wallet: Option<Arc<dyn WalletProvider>>,
        config: &ContractConfig,
    ) -> amigos_core::Result<Self> {
        let contract = config.parsed_address()?;
        if contract.is_none() {
            tracing::warn!("[Adapter] Contract address not configured");
        }
        let adapter = Self::new(client, contract).with_fee_limit(config.fee_limit());
        Ok(match wallet {
            Some(wallet) => adapter.with_wallet(wallet),
            None => adapter,
        })
    }

    pub fn with_wallet(mut self, wallet: Arc<dyn WalletProvider>) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn with_fee_limit(mut self, fee_limit: Sun) -> Self {
        self.fee_limit = fee_limit;
        self
    }

    /// True when both a client and a contract address are present.
    pub fn is_configured(&self) -> bool {
        self.client.is_some() && self.contract.is_some()
    }

    pub fn contract_address(&self) -> Option<TronAddress> {
        self.contract
    }

    pub fn fee_limit(&self) -> Sun {
        self.fee_limit
    }

    // ---- reads ----

    pub async fn get_owner(&self) -> CallResult<TronAddress> {
        let out = self.call(method::OWNER, vec![]).await?;
        self.single(method::OWNER, &out, AbiValue::as_address)
    }

    pub async fn get_service_address(&self) -> CallResult<TronAddress> {
        let out = self.call(method::SERVICE_COMPANY_ADDRESS, vec![]).await?;
        self.single(method::SERVICE_COMPANY_ADDRESS, &out, AbiValue::as_address)
    }

    pub async fn get_user_info(&self, address: TronAddress) -> CallResult<UserInfo> {
        let out = self
            .call(method::GET_USER_INFO, vec![AbiValue::Address(address)])
            .await?;
        UserInfo::from_abi(&out).map_err(|e| ContractCallError::decode(method::GET_USER_INFO.name, e))
    }

    pub async fn get_user_matrix_info(&self, address: TronAddress) -> CallResult<MatrixInfo> {
        let out = self
            .call(method::GET_USER_MATRIX_INFO, vec![AbiValue::Address(address)])
            .await?;
        MatrixInfo::from_abi(&out)
            .map_err(|e| ContractCallError::decode(method::GET_USER_MATRIX_INFO.name, e))
    }

    pub async fn get_global_stats(&self) -> CallResult<GlobalStats> {
        let out = self.call(method::GET_GLOBAL_STATS, vec![]).await?;
        GlobalStats::from_abi(&out)
            .map_err(|e| ContractCallError::decode(method::GET_GLOBAL_STATS.name, e))
    }

    pub async fn get_user_referrals(&self, address: TronAddress) -> CallResult<Vec<TronAddress>> {
        let out = self
            .call(method::GET_USER_REFERRALS, vec![AbiValue::Address(address)])
            .await?;
        self.single(method::GET_USER_REFERRALS, &out, |v| {
            v.as_address_array().map(<[TronAddress]>::to_vec)
        })
    }

    /// Accumulated dividend, qualification, pool size and qualified-user
    /// count for `address`.
    pub async fn get_user_dividend_info(&self, address: TronAddress) -> CallResult<DividendInfo> {
        let accumulated = self.accumulated_dividend(address).await?;

        let out = self
            .call(method::IS_QUALIFIED_FOR_DIVIDENDS, vec![AbiValue::Address(address)])
            .await?;
        let is_qualified = self.single(method::IS_QUALIFIED_FOR_DIVIDENDS, &out, AbiValue::as_bool)?;

        let out = self.call(method::DIVIDEND_POOL, vec![]).await?;
        let pool = self.single(method::DIVIDEND_POOL, &out, AbiValue::as_uint)?;

        let out = self.call(method::TOTAL_QUALIFIED_USERS, vec![]).await?;
        let total_qualified_users = self.single(method::TOTAL_QUALIFIED_USERS, &out, AbiValue::as_u64)?;

        Ok(DividendInfo {
            accumulated_dividend: accumulated.to_trx(),
            is_qualified,
            dividend_pool: sun_from(method::DIVIDEND_POOL, pool)?.to_trx(),
            total_qualified_users,
        })
    }

    // ---- writes ----

    pub async fn register(&self, sponsor: ReferralCode) -> CallResult<TxReceipt> {
        self.send(
            method::REGISTER,
            vec![AbiValue::Uint(u128::from(sponsor.value()))],
            Sun::ZERO,
        )
        .await
    }

    /// Pays the tier's price as call value.
    pub async fn activate_plan(&self, tier: PlanTier) -> CallResult<TxReceipt> {
        self.send(tier.method(), vec![], tier.price()).await
    }

    /// Reads the caller's accumulated dividend, then claims it.
    pub async fn claim_dividends(&self) -> CallResult<DividendClaim> {
        let owner = self.signer()?;
        let amount = self.accumulated_dividend(owner).await?.to_trx();
        let receipt = self.send(method::CLAIM_DIVIDENDS, vec![], Sun::ZERO).await?;
        Ok(DividendClaim { receipt, amount })
    }

    pub async fn burn_trx(&self, amount: Sun) -> CallResult<TxReceipt> {
        if amount.is_zero() {
            return Err(ContractCallError::InvalidArguments {
                method: method::BURN_TRX.name.to_string(),
                message: "amount must be greater than zero".to_string(),
            });
        }
        self.send(method::BURN_TRX, vec![], amount).await
    }

    /// Owner-only on the contract side; a non-owner caller gets a revert.
    pub async fn update_service_address(&self, new_address: TronAddress) -> CallResult<TxReceipt> {
        self.send(
            method::UPDATE_SERVICE_ADDRESS,
            vec![AbiValue::Address(new_address)],
            Sun::ZERO,
        )
        .await
    }

    // ---- plumbing ----

    fn client(&self) -> CallResult<&Arc<dyn ChainClient>> {
        self.client
            .as_ref()
            .ok_or_else(|| ContractCallError::NotInitialized("blockchain client unavailable".into()))
    }

    fn contract(&self) -> CallResult<TronAddress> {
        self.contract.ok_or(ContractCallError::NotConfigured)
    }

    fn wallet(&self) -> CallResult<&Arc<dyn WalletProvider>> {
        self.wallet
            .as_ref()
            .ok_or_else(|| ContractCallError::NotInitialized("no signing wallet".into()))
    }

    /// Account that signs writes.
    fn signer(&self) -> CallResult<TronAddress> {
        self.wallet()?
            .default_address()
            .ok_or_else(|| ContractCallError::NotInitialized("wallet has no active account".into()))
    }

    async fn accumulated_dividend(&self, address: TronAddress) -> CallResult<Sun> {
        let out = self
            .call(method::USER_ACCUMULATED_DIVIDEND, vec![AbiValue::Address(address)])
            .await?;
        let raw = self.single(method::USER_ACCUMULATED_DIVIDEND, &out, AbiValue::as_uint)?;
        sun_from(method::USER_ACCUMULATED_DIVIDEND, raw)
    }

    async fn call(&self, method: ContractMethod, args: Vec<AbiValue>) -> CallResult<Vec<AbiValue>> {
        let client = self.client()?;
        let contract = self.contract()?;
        let owner = self.wallet.as_ref().and_then(|w| w.default_address());
        let invocation = ContractInvocation::new(contract, method, args)?.with_owner(owner);

        tracing::debug!("[Adapter] Calling {}", invocation.signature());
        let raw = client.trigger_constant(&invocation).await.inspect_err(|e| {
            tracing::warn!("[Adapter] {} failed: {}", method.name, e);
        })?;
        abi::decode(method.outputs, &raw).map_err(|e| ContractCallError::decode(method.name, e))
    }

    async fn send(
        &self,
        method: ContractMethod,
        args: Vec<AbiValue>,
        call_value: Sun,
    ) -> CallResult<TxReceipt> {
        let client = self.client()?;
        let contract = self.contract()?;
        let wallet = self.wallet()?;
        let signer = self.signer()?;
        let invocation = ContractInvocation::new(contract, method, args)?
            .with_owner(Some(signer))
            .with_call_value(call_value)
            .with_fee_limit(self.fee_limit);

        tracing::info!(
            "[Adapter] Sending {} from {} (value: {})",
            invocation.signature(),
            signer,
            call_value
        );
        let tx_id = wallet.send_transaction(&invocation).await.map_err(|e| {
            tracing::warn!("[Adapter] {} not sent: {}", method.name, e);
            ContractCallError::from(e)
        })?;

        let receipt = client.await_receipt(&tx_id).await?.into_result();
        match &receipt {
            Ok(r) => tracing::info!(
                "[Adapter] {} confirmed in block {:?}",
                r.tx_id,
                r.block_number
            ),
            Err(e) => tracing::warn!("[Adapter] {} failed: {}", tx_id, e),
        }
        receipt
    }

    fn single<T>(
        &self,
        method: ContractMethod,
        out: &[AbiValue],
        read: impl FnOnce(&AbiValue) -> Result<T, abi::AbiError>,
    ) -> CallResult<T> {
        let value = out.first().ok_or_else(|| ContractCallError::Decode {
            method: method.name.to_string(),
            message: "empty result".to_string(),
        })?;
        read(value).map_err(|e| ContractCallError::decode(method.name, e))
    }
}

fn sun_from(method: ContractMethod, raw: u128) -> CallResult<Sun> {
    Sun::try_from_u128(raw).map_err(|e| ContractCallError::Decode {
        method: method.name.to_string(),
        message: e.to_string(),
    })
}
