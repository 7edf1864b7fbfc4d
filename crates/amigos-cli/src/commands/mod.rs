//! Subcommand implementations.
//!
//! # Module Structure
//!
//! - [`query`]: contract reads through TronGrid
//! - [`site`]: plans, referral links, routes and translations (offline)

pub mod query;
pub mod site;

use std::path::PathBuf;
use std::sync::Arc;

use amigos_application::ContractAdapter;
use amigos_core::TronAddress;
use amigos_core::config::AmigosConfig;
use amigos_core::contract::ChainClient;
use amigos_core::i18n::{Language, Translator};
use amigos_core::wallet::WalletProvider;
use amigos_infrastructure::{ConfigService, TronGridClient};
use anyhow::{Context as _, Result};
use serde::Serialize;

/// Loaded configuration plus output settings shared by every command.
pub struct Context {
    pub config: AmigosConfig,
    pub translator: Translator,
    pub json: bool,
}

impl Context {
    pub fn load(config_path: Option<PathBuf>, lang: Option<Language>, json: bool) -> Result<Self> {
        let service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new().context("Failed to resolve config path")?,
        };
        let config = service
            .get_config()
            .with_context(|| format!("Failed to load {}", service.path().display()))?;
        tracing::debug!("[CLI] Using config {}", service.path().display());

        let language = lang.unwrap_or(config.ui.default_language);
        Ok(Self {
            config,
            translator: Translator::new(language),
            json,
        })
    }

    pub fn chain_client(&self) -> Arc<TronGridClient> {
        Arc::new(TronGridClient::new(
            &self.config.network,
            self.config.confirmation.clone(),
        ))
    }

    /// Adapter over TronGrid for the configured contract.
    pub fn adapter(
        &self,
        client: Arc<dyn ChainClient>,
        wallet: Option<Arc<dyn WalletProvider>>,
    ) -> Result<ContractAdapter> {
        let adapter = ContractAdapter::from_config(client, wallet, &self.config.contract)
            .context("Invalid contract configuration")?;
        if !adapter.is_configured() {
            anyhow::bail!(
                "{}: set contract.address in config.toml or AMIGOS_CONTRACT_ADDRESS",
                self.t("contractNotConfigured")
            );
        }
        Ok(adapter)
    }

    pub fn t(&self, key: &str) -> String {
        self.translator.t(key)
    }

    /// Prints `value` as JSON when `--json` is set, otherwise runs `text`.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce()) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text();
        }
        Ok(())
    }
}

pub fn parse_address(input: &str) -> Result<TronAddress> {
    input
        .trim()
        .parse()
        .with_context(|| format!("Invalid TRON address: {}", input))
}
