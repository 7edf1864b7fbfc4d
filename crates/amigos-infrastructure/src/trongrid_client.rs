//! TronGrid HTTP implementation of [`ChainClient`].
//!
//! Talks to a TRON full node through the `/wallet/*` JSON endpoints:
//!
//! - `triggerconstantcontract` for view calls
//! - `getaccount` for balances
//! - `gettransactioninfobyid` polled until a transaction is included
//!
//! Addresses are sent in base58 (`visible: true`).

use std::time::Duration;

use amigos_core::abi;
use amigos_core::config::{ConfirmationConfig, NetworkConfig};
use amigos_core::contract::{ChainClient, ContractCallError, ContractInvocation, TxId, TxReceipt};
use amigos_core::{Sun, TronAddress};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const API_KEY_HEADER: &str = "TRON-PRO-API-KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type CallResult<T> = std::result::Result<T, ContractCallError>;

#[derive(Debug, Serialize)]
struct TriggerConstantRequest {
    owner_address: String,
    contract_address: String,
    function_selector: String,
    parameter: String,
    visible: bool,
}

#[derive(Debug, Deserialize, Default)]
struct TriggerConstantResponse {
    #[serde(default)]
    result: CallStatus,
    #[serde(default)]
    constant_result: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct CallStatus {
    #[serde(default)]
    result: bool,
    #[serde(default)]
    code: Option<String>,
    /// Hex-encoded UTF-8.
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct AccountRequest {
    address: String,
    visible: bool,
}

/// Unknown accounts come back as `{}`; a zero balance is omitted.
#[derive(Debug, Deserialize, Default)]
struct AccountResponse {
    #[serde(default)]
    balance: u64,
}

#[derive(Debug, Serialize)]
struct TransactionInfoRequest<'a> {
    value: &'a str,
}

/// `{}` until the transaction is in a block.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TransactionInfo {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    block_number: Option<u64>,
    #[serde(default)]
    fee: u64,
    /// `"FAILED"` when execution failed.
    #[serde(default)]
    result: Option<String>,
    /// Hex-encoded UTF-8.
    #[serde(default)]
    res_message: Option<String>,
    #[serde(default)]
    receipt: Option<ExecutionReceipt>,
    #[serde(default)]
    contract_result: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ExecutionReceipt {
    /// `"SUCCESS"`, `"REVERT"`, `"OUT_OF_ENERGY"`, ...
    #[serde(default)]
    result: Option<String>,
}

/// Chain client backed by a TronGrid-compatible full node.
#[derive(Clone)]
pub struct TronGridClient {
    client: Client,
    full_host: String,
    api_key: Option<String>,
    confirmation: ConfirmationConfig,
}

impl TronGridClient {
    pub fn new(network: &NetworkConfig, confirmation: ConfirmationConfig) -> Self {
        Self {
            client: Client::new(),
            full_host: network.full_host.trim_end_matches('/').to_string(),
            api_key: network.api_key.clone(),
            confirmation,
        }
    }

    pub fn full_host(&self) -> &str {
        &self.full_host
    }

    /// Fetches the execution info of `tx_id`, `None` while still pending.
    async fn transaction_info(&self, tx_id: &TxId) -> CallResult<Option<TransactionInfo>> {
        let info: TransactionInfo = self
            .post(
                "/wallet/gettransactioninfobyid",
                &TransactionInfoRequest {
                    value: tx_id.as_str(),
                },
            )
            .await?;
        Ok(info.id.is_some().then_some(info))
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> CallResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.full_host, path);
        let mut request = self.client.post(&url).json(body).timeout(REQUEST_TIMEOUT);
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ContractCallError::Timeout(format!("{} timed out: {}", path, e))
            } else {
                ContractCallError::Network(format!("Request to {} failed: {}", path, e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_http_error(status, error_text));
        }

        response.json::<R>().await.map_err(|e| {
            ContractCallError::Network(format!("Failed to parse {} response: {}", path, e))
        })
    }
}

#[async_trait]
impl ChainClient for TronGridClient {
    async fn trigger_constant(&self, invocation: &ContractInvocation) -> CallResult<Vec<u8>> {
        let request = constant_request(invocation);
        let response: TriggerConstantResponse = self
            .post("/wallet/triggerconstantcontract", &request)
            .await?;
        constant_output(invocation.method.name, response)
    }

    async fn await_receipt(&self, tx_id: &TxId) -> CallResult<TxReceipt> {
        let attempts = self.confirmation.max_attempts;
        for attempt in 1..=attempts {
            match self.transaction_info(tx_id).await {
                Ok(Some(info)) => {
                    tracing::debug!("[TronGrid] {} included after {} polls", tx_id, attempt);
                    return Ok(receipt_from_info(tx_id, info));
                }
                Ok(None) => {}
                // Pending lookups fail transiently on busy nodes; keep polling.
                Err(e) => tracing::debug!("[TronGrid] Poll {} for {} failed: {}", attempt, tx_id, e),
            }
            if attempt < attempts {
                tokio::time::sleep(self.confirmation.poll_interval()).await;
            }
        }

        tracing::warn!("[TronGrid] {} not confirmed after {} attempts", tx_id, attempts);
        Err(ContractCallError::Timeout(format!(
            "transaction {} not confirmed after {} attempts",
            tx_id, attempts
        )))
    }

    async fn get_balance(&self, address: &TronAddress) -> CallResult<Sun> {
        let account: AccountResponse = self
            .post(
                "/wallet/getaccount",
                &AccountRequest {
                    address: address.to_base58(),
                    visible: true,
                },
            )
            .await?;
        Ok(Sun::new(account.balance))
    }
}

/// View calls without an owner are made from the zero address.
fn constant_request(invocation: &ContractInvocation) -> TriggerConstantRequest {
    let owner = invocation.owner.unwrap_or_else(TronAddress::zero);
    TriggerConstantRequest {
        owner_address: owner.to_base58(),
        contract_address: invocation.contract.to_base58(),
        function_selector: invocation.signature(),
        parameter: invocation.parameter_hex(),
        visible: true,
    }
}

fn map_http_error(status: StatusCode, body: String) -> ContractCallError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ContractCallError::Timeout(format!("TronGrid error ({}): {}", status, body))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ContractCallError::Network(format!(
            "TronGrid rejected the API key ({}): {}",
            status, body
        )),
        _ => ContractCallError::Network(format!("TronGrid error ({}): {}", status, body)),
    }
}

/// Hex payloads from the node; a stray `0x` prefix is tolerated.
fn decode_hex(raw: &str) -> Option<Vec<u8>> {
    hex::decode(raw.trim_start_matches("0x")).ok()
}

fn decode_message(raw: &str) -> String {
    decode_hex(raw)
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| raw.to_string())
}

/// Extracts the return data of a view call, turning node errors and
/// `Error(string)` payloads into errors.
fn constant_output(method: &str, response: TriggerConstantResponse) -> CallResult<Vec<u8>> {
    let status = response.result;
    if !status.result {
        let message = status
            .message
            .as_deref()
            .map(decode_message)
            .or(status.code)
            .unwrap_or_else(|| "call failed".to_string());
        return Err(if message.contains("REVERT") {
            ContractCallError::reverted(message)
        } else {
            ContractCallError::Network(message)
        });
    }

    let raw = response
        .constant_result
        .first()
        .ok_or_else(|| ContractCallError::Decode {
            method: method.to_string(),
            message: "node returned no constant_result".to_string(),
        })?;
    let data = decode_hex(raw).ok_or_else(|| ContractCallError::Decode {
        method: method.to_string(),
        message: "constant_result is not valid hex".to_string(),
    })?;

    match abi::decode_revert_reason(&data) {
        Some(reason) => Err(ContractCallError::reverted(reason)),
        None => Ok(data),
    }
}

fn receipt_from_info(tx_id: &TxId, info: TransactionInfo) -> TxReceipt {
    let execution = info.receipt.and_then(|r| r.result);
    let failed = info.result.as_deref() == Some("FAILED")
        || execution.as_deref().is_some_and(|r| r != "SUCCESS");

    let mut receipt = if failed {
        let reason = info
            .contract_result
            .first()
            .and_then(|raw| decode_hex(raw))
            .and_then(|data| abi::decode_revert_reason(&data))
            .or_else(|| info.res_message.as_deref().map(decode_message))
            .or(execution);
        TxReceipt::failed(tx_id.clone(), reason)
    } else {
        TxReceipt::success(tx_id.clone(), info.block_number.unwrap_or_default())
    };
    receipt.block_number = info.block_number;
    receipt.fee = Sun::new(info.fee);
    receipt
}
