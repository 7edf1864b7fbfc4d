mod support;

use std::sync::Arc;

use amigos_application::ContractAdapter;
use amigos_core::abi::AbiValue;
use amigos_core::contract::{ContractCallError, PlanTier, TxId, TxReceipt, method};
use amigos_core::referral::ReferralCode;
use amigos_core::wallet::WalletError;
use amigos_core::{Sun, Trx};

use support::{MockChainClient, MockWallet, addr, adapter, contract_address, stats_values};

#[tokio::test]
async fn test_global_stats_reports_burned_in_trx() {
    let client = MockChainClient::new();
    client.respond(method::GET_GLOBAL_STATS, stats_values(10, 500_000_000));
    let adapter = ContractAdapter::new(client.clone(), Some(contract_address()));

    let stats = adapter.get_global_stats().await.unwrap();

    assert_eq!(stats.total_users, 10);
    assert_eq!(stats.total_burned, Trx::new(500.0));
}

#[tokio::test]
async fn test_user_referrals_decode_dynamic_array() {
    let client = MockChainClient::new();
    let referrals = vec![addr(1), addr(2), addr(3)];
    client.respond(
        method::GET_USER_REFERRALS,
        vec![AbiValue::AddressArray(referrals.clone())],
    );
    let adapter = ContractAdapter::new(client.clone(), Some(contract_address()));

    let result = adapter.get_user_referrals(addr(9)).await.unwrap();

    assert_eq!(result, referrals);
    assert!(result.iter().all(|a| a.to_base58().starts_with('T')));
}

#[tokio::test]
async fn test_unconfigured_and_uninitialized_adapters_fail() {
    let client = MockChainClient::new();
    let unconfigured = ContractAdapter::new(client.clone(), None);
    assert!(!unconfigured.is_configured());
    assert_eq!(
        unconfigured.get_owner().await,
        Err(ContractCallError::NotConfigured)
    );

    let uninitialized = ContractAdapter::uninitialized();
    assert!(matches!(
        uninitialized.get_global_stats().await,
        Err(ContractCallError::NotInitialized(_))
    ));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_writes_require_a_wallet() {
    let client = MockChainClient::new();
    let adapter = ContractAdapter::new(client, Some(contract_address()));
    assert!(matches!(
        adapter.activate_plan(PlanTier::Basic).await,
        Err(ContractCallError::NotInitialized(_))
    ));
}

#[tokio::test]
async fn test_activate_plan_sends_price_and_fee_limit() {
    let client = MockChainClient::new();
    let wallet = Arc::new(MockWallet::connected(addr(7), Sun::ZERO));
    let adapter = adapter(&client, &wallet);

    let receipt = adapter.activate_plan(PlanTier::Master).await.unwrap();
    assert!(receipt.is_success());

    let sent = wallet.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method.name, "activateMasterPlan");
    assert_eq!(sent[0].call_value, Sun::from_whole_trx(100));
    assert_eq!(sent[0].fee_limit, Sun::from_whole_trx(100));
    assert_eq!(sent[0].owner, Some(addr(7)));
    assert_eq!(sent[0].contract, contract_address());
}

#[tokio::test]
async fn test_register_encodes_sponsor_code() {
    let client = MockChainClient::new();
    let wallet = Arc::new(MockWallet::connected(addr(7), Sun::ZERO));
    let adapter = adapter(&client, &wallet);

    adapter
        .register(ReferralCode::new(1001).unwrap())
        .await
        .unwrap();

    let sent = wallet.sent();
    assert_eq!(sent[0].arguments, vec![AbiValue::Uint(1001)]);
    assert_eq!(sent[0].call_value, Sun::ZERO);
}

#[tokio::test]
async fn test_failed_receipt_is_revert() {
    let client = MockChainClient::new();
    client.set_receipt(TxReceipt::failed(
        TxId::new("tx-1"),
        Some("Already registered".into()),
    ));
    let wallet = Arc::new(MockWallet::connected(addr(7), Sun::ZERO));
    let adapter = adapter(&client, &wallet);

    let err = adapter
        .register(ReferralCode::new(5).unwrap())
        .await
        .unwrap_err();

    assert_eq!(err, ContractCallError::reverted("Already registered"));
}

#[tokio::test]
async fn test_wallet_rejection_surfaces_as_rejected() {
    let client = MockChainClient::new();
    let wallet = Arc::new(MockWallet::connected(addr(7), Sun::ZERO));
    wallet.set_send_result(Err(WalletError::UserRejected("Confirmation declined by user".into())));
    let adapter = adapter(&client, &wallet);

    let err = adapter.claim_dividends().await.unwrap_err();

    // The accumulated amount is read before anything is sent.
    assert!(matches!(err, ContractCallError::Network(_)));
    assert_eq!(wallet.sends(), 0);

    client.respond(method::USER_ACCUMULATED_DIVIDEND, vec![AbiValue::Uint(0)]);
    let err = adapter.claim_dividends().await.unwrap_err();
    assert!(err.is_rejected());
    assert!(err.to_string().contains("Confirmation declined by user"));
}

#[tokio::test]
async fn test_claim_dividends_reports_accumulated_amount() {
    let client = MockChainClient::new();
    client.respond(
        method::USER_ACCUMULATED_DIVIDEND,
        vec![AbiValue::Uint(12_500_000)],
    );
    let wallet = Arc::new(MockWallet::connected(addr(7), Sun::ZERO));
    let adapter = adapter(&client, &wallet);

    let claim = adapter.claim_dividends().await.unwrap();

    assert_eq!(claim.amount, Trx::new(12.5));
    assert_eq!(client.calls(), vec!["userAccumulatedDividend"]);
    assert_eq!(wallet.sent()[0].method.name, "claimDividends");
}

#[tokio::test]
async fn test_dividend_info_combines_four_reads() {
    let client = MockChainClient::new();
    client.respond(method::USER_ACCUMULATED_DIVIDEND, vec![AbiValue::Uint(2_000_000)]);
    client.respond(method::IS_QUALIFIED_FOR_DIVIDENDS, vec![AbiValue::Bool(true)]);
    client.respond(method::DIVIDEND_POOL, vec![AbiValue::Uint(300_000_000)]);
    client.respond(method::TOTAL_QUALIFIED_USERS, vec![AbiValue::Uint(12)]);
    let adapter = ContractAdapter::new(client.clone(), Some(contract_address()));

    let info = adapter.get_user_dividend_info(addr(4)).await.unwrap();

    assert_eq!(info.accumulated_dividend, Trx::new(2.0));
    assert!(info.is_qualified);
    assert_eq!(info.dividend_pool, Trx::new(300.0));
    assert_eq!(info.total_qualified_users, 12);
}

#[tokio::test]
async fn test_burn_rejects_zero_amount() {
    let client = MockChainClient::new();
    let wallet = Arc::new(MockWallet::connected(addr(7), Sun::ZERO));
    let adapter = adapter(&client, &wallet);

    assert!(matches!(
        adapter.burn_trx(Sun::ZERO).await,
        Err(ContractCallError::InvalidArguments { .. })
    ));

    adapter.burn_trx(Sun::from_whole_trx(3)).await.unwrap();
    assert_eq!(wallet.sent()[0].call_value, Sun::new(3_000_000));
}

#[tokio::test]
async fn test_owner_and_service_address() {
    let client = MockChainClient::new();
    client.respond(method::OWNER, vec![AbiValue::Address(addr(0xaa))]);
    client.respond(method::SERVICE_COMPANY_ADDRESS, vec![AbiValue::Address(addr(0xbb))]);
    let adapter = ContractAdapter::new(client.clone(), Some(contract_address()));

    assert_eq!(adapter.get_owner().await.unwrap(), addr(0xaa));
    assert_eq!(adapter.get_service_address().await.unwrap(), addr(0xbb));
}

#[tokio::test]
async fn test_truncated_response_is_decode_error() {
    let client = MockChainClient::new();
    client.respond(method::GET_GLOBAL_STATS, vec![AbiValue::Uint(1)]);
    let adapter = ContractAdapter::new(client.clone(), Some(contract_address()));

    assert!(matches!(
        adapter.get_global_stats().await,
        Err(ContractCallError::Decode { .. })
    ));
}
