use serde::{Deserialize, Serialize};
use strum::Display;

use crate::address::TronAddress;
use crate::contract::{GlobalStats, MatrixInfo, UserInfo};
use crate::currency::Trx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Connection state plus cached contract snapshots for one wallet.
///
/// Fields are private so the invariant `address.is_some() ==
/// (connection_state == Connected)` can only be changed through the
/// transition methods below. Cached data is best effort and may lag the
/// chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    address: Option<TronAddress>,
    balance: Trx,
    connection_state: ConnectionState,
    user_info: Option<UserInfo>,
    matrix_info: Option<MatrixInfo>,
    global_stats: Option<GlobalStats>,
    is_owner: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(&self) -> Option<TronAddress> {
        self.address
    }

    pub fn balance(&self) -> Trx {
        self.balance
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection_state
    }

    pub fn user_info(&self) -> Option<&UserInfo> {
        self.user_info.as_ref()
    }

    pub fn matrix_info(&self) -> Option<&MatrixInfo> {
        self.matrix_info.as_ref()
    }

    pub fn global_stats(&self) -> Option<&GlobalStats> {
        self.global_stats.as_ref()
    }

    pub fn is_owner(&self) -> bool {
        self.is_owner
    }

    pub fn is_connected(&self) -> bool {
        self.connection_state == ConnectionState::Connected
    }

    pub fn is_registered(&self) -> bool {
        self.user_info
            .as_ref()
            .is_some_and(UserInfo::is_registered)
    }

    /// Enters `Connecting`, dropping any previous account.
    pub fn mark_connecting(&mut self) {
        self.clear_account();
        self.connection_state = ConnectionState::Connecting;
    }

    /// Enters `Connected` for `address`. Account caches are cleared when the
    /// address differs from the current one.
    pub fn mark_connected(&mut self, address: TronAddress) {
        if self.address != Some(address) {
            self.clear_account();
        }
        self.address = Some(address);
        self.connection_state = ConnectionState::Connected;
    }

    /// Drops the account and enters `Disconnected`. Global stats survive.
    pub fn mark_disconnected(&mut self) {
        self.clear_account();
        self.connection_state = ConnectionState::Disconnected;
    }

    /// Back to the initial empty state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns false (and changes nothing) when not connected.
    pub fn apply_balance(&mut self, balance: Trx) -> bool {
        if !self.is_connected() {
            return false;
        }
        self.balance = balance;
        true
    }

    /// Stores the user snapshot. Matrix data is only kept for registered
    /// users.
    pub fn apply_user_snapshot(
        &mut self,
        user_info: Option<UserInfo>,
        matrix_info: Option<MatrixInfo>,
    ) -> bool {
        if !self.is_connected() {
            return false;
        }
        let registered = user_info.as_ref().is_some_and(UserInfo::is_registered);
        self.user_info = user_info;
        self.matrix_info = if registered { matrix_info } else { None };
        true
    }

    pub fn set_owner(&mut self, is_owner: bool) -> bool {
        if !self.is_connected() {
            return false;
        }
        self.is_owner = is_owner;
        true
    }

    /// Global stats are public and cached regardless of connection.
    pub fn apply_global_stats(&mut self, stats: GlobalStats) {
        self.global_stats = Some(stats);
    }

    fn clear_account(&mut self) {
        self.address = None;
        self.balance = Trx::ZERO;
        self.user_info = None;
        self.matrix_info = None;
        self.is_owner = false;
    }
}
