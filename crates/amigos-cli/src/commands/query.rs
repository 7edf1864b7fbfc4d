use std::sync::Arc;

use amigos_application::WalletSession;
use amigos_core::Trx;
use amigos_core::contract::{GlobalStats, PlanTier, TOTAL_SUPPLY_TRX, UserInfo};
use amigos_core::wallet::WalletProvider;
use amigos_infrastructure::WatchOnlyWallet;
use anyhow::Result;
use serde_json::json;

use super::{Context, parse_address};

pub async fn stats(ctx: &Context) -> Result<()> {
    let adapter = ctx.adapter(ctx.chain_client(), None)?;
    let stats = adapter.get_global_stats().await?;
    let value = json!({
        "stats": stats,
        "totalSupply": TOTAL_SUPPLY_TRX,
        "burnGoal": GlobalStats::burn_goal(),
        "burnProgress": stats.burn_progress(),
    });
    ctx.emit(&value, || print_stats(ctx, &stats))
}

fn print_stats(ctx: &Context, stats: &GlobalStats) {
    println!("📊 {}", ctx.t("stats"));
    println!("  {}: {}", ctx.t("users"), stats.total_users);
    println!("  {}: {}", ctx.t("totalBurned"), stats.total_burned);
    println!("  {}: {}", ctx.t("totalSupply"), Trx::new(TOTAL_SUPPLY_TRX));
    println!("  {}: {}", ctx.t("burnGoal"), GlobalStats::burn_goal());
    println!("  {}: {:.2}%", ctx.t("burnProgress"), stats.burn_progress());
    for tier in PlanTier::ALL {
        println!("  {}: {}", ctx.t(tier.label_key()), stats.plan_count(tier));
    }
    println!("  Matrix positions: {}", stats.matrix_positions);
    println!("  Reinvestment: {}", stats.reinvestment_balance);
    println!("  Gas reserve: {}", stats.gas_reserve);
    println!("  Renewal fees: {}", stats.renewal_fees);
    println!("  {}: {}", ctx.t("dividends"), stats.dividend_pool);
}

pub async fn user(ctx: &Context, address: &str) -> Result<()> {
    let address = parse_address(address)?;
    let adapter = ctx.adapter(ctx.chain_client(), None)?;
    let info = adapter.get_user_info(address).await?;
    ctx.emit(&info, || print_user(ctx, &info))
}

fn print_user(ctx: &Context, info: &UserInfo) {
    println!("👤 {}", info.user_address);
    if !info.is_registered() {
        println!("  {}", ctx.t("registerFirst"));
        return;
    }
    println!("  {}: {}", ctx.t("referralCode"), info.referral_code);
    println!("  Sponsor: {}", info.sponsor);
    if let Some(at) = info.registered_at() {
        println!("  Registered: {}", at.format("%Y-%m-%d %H:%M UTC"));
    }
    println!("  {}: {}", ctx.t("totalEarned"), info.total_earned);
    println!("  {}: {}", ctx.t("totalReferrals"), info.total_referrals);
    let plans: Vec<String> = info
        .active_plans()
        .into_iter()
        .map(|tier| ctx.t(tier.label_key()))
        .collect();
    println!("  Plans: {}", if plans.is_empty() { "-".to_string() } else { plans.join(", ") });
    if let Some(remaining) = info.pre_launch_remaining(chrono::Utc::now()) {
        println!(
            "  {}: {} {}",
            ctx.t("preLaunch"),
            remaining.num_days(),
            ctx.t("daysRemaining")
        );
    }
}

pub async fn matrix(ctx: &Context, address: &str) -> Result<()> {
    let address = parse_address(address)?;
    let adapter = ctx.adapter(ctx.chain_client(), None)?;
    let info = adapter.get_user_matrix_info(address).await?;
    ctx.emit(&info, || {
        println!("🔷 {} #{}", ctx.t("position"), info.position_id);
        println!("  Upline: {}", info.upline);
        println!("  {}: {}", ctx.t("completedCycles"), info.cycles);
        println!("  Active: {}", info.is_active);
        for child in &info.children {
            println!("  └─ {}", child);
        }
    })
}

pub async fn referrals(ctx: &Context, address: &str) -> Result<()> {
    let address = parse_address(address)?;
    let adapter = ctx.adapter(ctx.chain_client(), None)?;
    let referrals = adapter.get_user_referrals(address).await?;
    ctx.emit(&referrals, || {
        println!("👥 {} ({})", ctx.t("yourReferrals"), referrals.len());
        if referrals.is_empty() {
            println!("  {}", ctx.t("noReferralsYet"));
        }
        for referral in &referrals {
            println!("  {}", referral);
        }
    })
}

pub async fn dividends(ctx: &Context, address: &str) -> Result<()> {
    let address = parse_address(address)?;
    let adapter = ctx.adapter(ctx.chain_client(), None)?;
    let info = adapter.get_user_dividend_info(address).await?;
    ctx.emit(&info, || {
        println!("💰 {}", ctx.t("dividends"));
        println!("  Accumulated: {}", info.accumulated_dividend);
        println!("  Qualified: {}", info.is_qualified);
        println!("  Pool: {}", info.dividend_pool);
        println!("  Qualified users: {}", info.total_qualified_users);
        if !info.has_claimable() {
            println!("  {}", ctx.t("noDividends"));
        }
    })
}

pub async fn owner(ctx: &Context) -> Result<()> {
    let adapter = ctx.adapter(ctx.chain_client(), None)?;
    let owner = adapter.get_owner().await?;
    let service = adapter.get_service_address().await?;
    ctx.emit(
        &json!({ "owner": owner, "serviceCompanyAddress": service }),
        || {
            println!("🔑 Owner: {}", owner);
            println!("🏢 Service company: {}", service);
        },
    )
}

/// Runs a full session against `address` with a wallet that can read but
/// not sign.
pub async fn session(ctx: &Context, address: &str) -> Result<()> {
    let address = parse_address(address)?;
    let client = ctx.chain_client();
    let wallet: Arc<dyn WalletProvider> =
        Arc::new(WatchOnlyWallet::new(client.clone(), Some(address)));
    let adapter = ctx.adapter(client, Some(wallet.clone()))?;
    let session = WalletSession::new(Some(wallet), Arc::new(adapter))
        .with_language(ctx.translator.language());

    let outcome = session.connect().await?;
    session.refresh_global_stats().await?;
    let snapshot = session.snapshot().await;
    session.dispose().await;

    ctx.emit(&json!({ "outcome": outcome, "session": snapshot }), || {
        println!("{} {}", if outcome.success { "✅" } else { "❌" }, outcome.message);
        println!("  Address: {}", address);
        println!("  {}: {}", ctx.t("balance"), snapshot.balance());
        println!("  Registered: {}", snapshot.is_registered());
        println!("  Owner: {}", snapshot.is_owner());
        if let Some(user) = snapshot.user_info() {
            println!("  {}: {}", ctx.t("totalEarned"), user.total_earned);
        }
        if let Some(stats) = snapshot.global_stats() {
            println!("  {}: {}", ctx.t("users"), stats.total_users);
        }
    })
}
