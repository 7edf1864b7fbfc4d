//! Host configuration model.
//!
//! Loaded from `config.toml` by the infrastructure `ConfigService`. Every
//! section and field has a default so a partial (or empty) file is valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::address::TronAddress;
use crate::currency::Sun;
use crate::error::Result;
use crate::i18n::Language;

pub const ENV_API_KEY: &str = "TRON_PRO_API_KEY";
pub const ENV_CONTRACT_ADDRESS: &str = "AMIGOS_CONTRACT_ADDRESS";

pub const DEFAULT_FULL_HOST: &str = "https://api.trongrid.io";
pub const DEFAULT_BASE_URL: &str = "https://amigosdetron.io";

/// 100 TRX, the fee limit attached to every write.
pub const DEFAULT_FEE_LIMIT: Sun = Sun::from_whole_trx(100);

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AmigosConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub confirmation: ConfirmationConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl AmigosConfig {
    /// Applies `TRON_PRO_API_KEY` and `AMIGOS_CONTRACT_ADDRESS` from `lookup`.
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(api_key) = non_empty(ENV_API_KEY) {
            self.network.api_key = Some(api_key);
        }
        if let Some(address) = non_empty(ENV_CONTRACT_ADDRESS) {
            self.contract.address = Some(address.trim().to_string());
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    #[serde(default = "default_full_host")]
    pub full_host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            full_host: default_full_host(),
            api_key: None,
        }
    }
}

fn default_full_host() -> String {
    DEFAULT_FULL_HOST.to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Base58 or hex. Unset means the adapter runs unconfigured and every
    /// call fails with `NotConfigured`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default = "default_fee_limit_sun")]
    pub fee_limit_sun: u64,
}

impl ContractConfig {
    /// Parses the configured address. Blank strings count as unset.
    pub fn parsed_address(&self) -> Result<Option<TronAddress>> {
        match self.address.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Ok(Some(raw.parse()?)),
        }
    }

    pub fn fee_limit(&self) -> Sun {
        Sun::new(self.fee_limit_sun)
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: None,
            fee_limit_sun: default_fee_limit_sun(),
        }
    }
}

fn default_fee_limit_sun() -> u64 {
    DEFAULT_FEE_LIMIT.value()
}

/// How long `TronGridClient` waits for a transaction to be included.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl ConfirmationConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    3_000
}

fn default_max_attempts() -> u32 {
    20
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    #[serde(default)]
    pub default_language: Language,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_language: Language::default(),
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AmigosConfig = toml::from_str("").unwrap();
        assert_eq!(config, AmigosConfig::default());
        assert_eq!(config.network.full_host, DEFAULT_FULL_HOST);
        assert_eq!(config.contract.fee_limit(), Sun::new(100_000_000));
        assert_eq!(config.confirmation.poll_interval(), Duration::from_secs(3));
        assert_eq!(config.ui.default_language, Language::Es);
    }

    #[test]
    fn test_partial_sections() {
        let config: AmigosConfig = toml::from_str(
            r#"
            [contract]
            address = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t"

            [ui]
            default_language = "en"
            "#,
        )
        .unwrap();
        assert!(config.contract.parsed_address().unwrap().is_some());
        assert_eq!(config.contract.fee_limit_sun, 100_000_000);
        assert_eq!(config.ui.default_language, Language::En);
        assert_eq!(config.ui.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_contract_address() {
        let contract = ContractConfig {
            address: Some("Tnotanaddress".to_string()),
            ..Default::default()
        };
        assert!(contract.parsed_address().is_err());

        let blank = ContractConfig {
            address: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.parsed_address().unwrap(), None);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_KEY, "secret"),
            (ENV_CONTRACT_ADDRESS, ""),
        ]);
        let mut config = AmigosConfig::default();
        config.contract.address = Some("from-file".to_string());
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.network.api_key.as_deref(), Some("secret"));
        assert_eq!(config.contract.address.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_serializes_without_unset_options() {
        let text = toml::to_string(&AmigosConfig::default()).unwrap();
        assert!(!text.contains("api_key"));
        assert!(text.contains("full_host"));
    }
}
