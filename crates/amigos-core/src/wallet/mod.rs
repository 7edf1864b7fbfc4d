//! Wallet provider domain module.
//!
//! The wallet (TronLink in the browser, or whatever the host offers) is an
//! external collaborator. This module defines the interface the session
//! talks to and the events it may push.
//!
//! # Module Structure
//!
//! - `provider`: `WalletProvider` trait and the `tron_requestAccounts` response
//! - `event`: account-change notifications (`AccountEvent`)
//! - `error`: `WalletError`

mod error;
mod event;
mod provider;

pub use error::WalletError;
pub use event::AccountEvent;
pub use provider::{AccountsResponse, TRONLINK_INSTALL_URL, WalletProvider};
