use amigos_core::contract::PlanTier;
use amigos_core::i18n::{self, Language};
use amigos_core::referral::{self, ReferralCode, ShareTarget};
use amigos_core::route::Route;
use anyhow::{Context as _, Result};
use serde_json::json;
use strum::IntoEnumIterator;

use super::Context;

pub fn plans(ctx: &Context, tiers: &[PlanTier]) -> Result<()> {
    let rows: Vec<_> = tiers
        .iter()
        .map(|tier| {
            json!({
                "tier": tier.to_string(),
                "label": ctx.t(tier.label_key()),
                "priceTrx": tier.price().to_trx(),
                "method": tier.method().name,
            })
        })
        .collect();
    ctx.emit(&rows, || {
        for tier in tiers {
            println!("  {:<16} {}", ctx.t(tier.label_key()), tier.price().to_trx());
        }
    })
}

pub fn link(ctx: &Context, code: u64) -> Result<()> {
    let code = ReferralCode::new(code).context("Referral code must be greater than zero")?;
    let link = referral::referral_link(&ctx.config.ui.base_url, code)?;
    let message = ctx.t("joinAmigosDeTron");

    let mut shares = Vec::new();
    for target in ShareTarget::iter() {
        shares.push((target, target.share_url(&link, &message)?));
    }

    let share_json: serde_json::Map<_, _> = shares
        .iter()
        .map(|(target, url)| (target.to_string(), json!(url.as_str())))
        .collect();
    ctx.emit(&json!({ "link": link.as_str(), "share": share_json }), || {
        println!("🔗 {}: {}", ctx.t("yourReferralLink"), link);
        for (target, url) in &shares {
            println!("  {}: {}", ctx.t(target.label_key()), url);
        }
    })
}

pub fn routes(ctx: &Context, path: Option<&str>) -> Result<()> {
    let routes: Vec<Route> = match path {
        Some(path) => vec![Route::resolve(path)],
        None => Route::ALL.to_vec(),
    };
    let rows: Vec<_> = routes
        .iter()
        .map(|route| {
            json!({
                "route": route,
                "path": route.path(),
                "label": ctx.t(route.label_key()),
                "requiresWallet": route.requires_wallet(),
                "requiresOwner": route.requires_owner(),
            })
        })
        .collect();
    ctx.emit(&rows, || {
        for route in &routes {
            let mut flags = Vec::new();
            if route.requires_wallet() {
                flags.push("wallet");
            }
            if route.requires_owner() {
                flags.push("owner");
            }
            println!(
                "  {:<14} {:<16} {}",
                route.path(),
                ctx.t(route.label_key()),
                flags.join(", ")
            );
        }
    })
}

/// Prints `key` in the active language; `--json` prints every language.
pub fn translate(ctx: &Context, key: &str) -> Result<()> {
    if ctx.json {
        let all: serde_json::Map<_, _> = Language::iter()
            .map(|lang| (lang.to_string(), json!(i18n::translate(key, lang))))
            .collect();
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }
    if i18n::lookup(key, ctx.translator.language()).is_none() {
        tracing::warn!("[CLI] Unknown translation key: {}", key);
    }
    println!("{}", ctx.t(key));
    Ok(())
}
