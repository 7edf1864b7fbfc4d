use async_trait::async_trait;

use crate::address::TronAddress;
use crate::currency::Sun;

use super::error::ContractCallError;
use super::invocation::{ContractInvocation, TxId, TxReceipt};

/// Read access to a TRON full node.
///
/// Implementations do not retry. `await_receipt` is the only call allowed to
/// block for a while; it enforces its own confirmation bound and returns
/// [`ContractCallError::Timeout`] when it gives up.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Evaluates a view call and returns the raw ABI-encoded result.
    async fn trigger_constant(
        &self,
        invocation: &ContractInvocation,
    ) -> Result<Vec<u8>, ContractCallError>;

    /// Waits until the transaction is included and returns its receipt.
    async fn await_receipt(&self, tx_id: &TxId) -> Result<TxReceipt, ContractCallError>;

    async fn get_balance(&self, address: &TronAddress) -> Result<Sun, ContractCallError>;
}
