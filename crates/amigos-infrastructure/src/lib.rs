//! Infrastructure for AMIGOS DE TRON.
//!
//! # Module Structure
//!
//! - [`paths`]: where configuration lives on disk
//! - [`config_service`]: cached `config.toml` loading with env overrides
//! - [`trongrid_client`]: `ChainClient` over the TronGrid HTTP API
//! - [`watch_only_wallet`]: `WalletProvider` for hosts without a signer

pub mod config_service;
pub mod paths;
pub mod trongrid_client;
pub mod watch_only_wallet;

pub use config_service::ConfigService;
pub use paths::AmigosPaths;
pub use trongrid_client::TronGridClient;
pub use watch_only_wallet::WatchOnlyWallet;
