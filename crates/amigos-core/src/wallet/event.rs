use serde::{Deserialize, Serialize};

use crate::address::TronAddress;

/// Notification pushed by the wallet when the active account changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountEvent {
    /// The wallet switched accounts. `None` means it no longer exposes one
    /// (locked or logged out).
    AccountChanged { address: Option<TronAddress> },
    /// The wallet disconnected from the host.
    Disconnected,
}

impl AccountEvent {
    /// The address the session should follow, `None` when it should
    /// disconnect.
    pub fn address(&self) -> Option<TronAddress> {
        match self {
            Self::AccountChanged { address } => *address,
            Self::Disconnected => None,
        }
    }
}
