//! Domain core for AMIGOS DE TRON.
//!
//! Holds everything that does not talk to the network: currency and address
//! types, the ABI codec and contract method table, read-only contract
//! snapshots, the wallet/chain collaborator traits, the session model, and
//! the static site data (routes, translations, referral links).

pub mod abi;
pub mod address;
pub mod config;
pub mod contract;
pub mod currency;
pub mod error;
pub mod i18n;
pub mod referral;
pub mod route;
pub mod session;
pub mod wallet;

pub use address::TronAddress;
pub use currency::{Sun, Trx};
pub use error::{AmigosError, Result};
