//! Read-only snapshots of contract state.
//!
//! Every amount the contract reports in sun is converted to [`Trx`] here, so
//! nothing above the adapter ever sees raw sun values from a view call.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::abi::{AbiError, AbiReader, AbiValue};
use crate::address::TronAddress;
use crate::currency::{Sun, Trx};

use super::method::{self, ContractMethod};

/// TRX total supply used as the burn baseline.
pub const TOTAL_SUPPLY_TRX: f64 = 94_660_000_000.0;

/// Share of [`TOTAL_SUPPLY_TRX`] the project aims to burn.
pub const BURN_GOAL_RATIO: f64 = 0.25;

fn read_trx(reader: &mut AbiReader<'_>) -> Result<Trx, AbiError> {
    let raw = reader.uint()?;
    Sun::try_from_u128(raw)
        .map(Sun::to_trx)
        .map_err(|_| AbiError::Overflow(raw.to_string()))
}

fn timestamp(secs: u64) -> Option<DateTime<Utc>> {
    if secs == 0 {
        return None;
    }
    DateTime::from_timestamp(i64::try_from(secs).ok()?, 0)
}

/// Result of `getUserInfo(address)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_address: TronAddress,
    pub sponsor: TronAddress,
    pub referral_code: u64,
    /// Unix seconds; zero for accounts that never registered.
    pub registration_time: u64,
    pub is_active: bool,
    pub total_earned: Trx,
    pub total_referrals: u64,
    pub basic_active: bool,
    pub master_active: bool,
    pub premium_active: bool,
    pub pre_launch_active: bool,
    pub pre_launch_end_time: u64,
}

impl UserInfo {
    pub fn from_abi(values: &[AbiValue]) -> Result<Self, AbiError> {
        let mut r = AbiReader::new(values);
        Ok(Self {
            user_address: r.address()?,
            sponsor: r.address()?,
            referral_code: r.u64()?,
            registration_time: r.u64()?,
            is_active: r.bool()?,
            total_earned: read_trx(&mut r)?,
            total_referrals: r.u64()?,
            basic_active: r.bool()?,
            master_active: r.bool()?,
            premium_active: r.bool()?,
            pre_launch_active: r.bool()?,
            pre_launch_end_time: r.u64()?,
        })
    }

    /// The contract keeps a zeroed record for unknown addresses; only an
    /// active record counts as registered.
    pub fn is_registered(&self) -> bool {
        self.is_active
    }

    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        timestamp(self.registration_time)
    }

    pub fn plan_active(&self, tier: PlanTier) -> bool {
        match tier {
            PlanTier::Basic => self.basic_active,
            PlanTier::Master => self.master_active,
            PlanTier::Premium => self.premium_active,
        }
    }

    pub fn active_plans(&self) -> Vec<PlanTier> {
        PlanTier::ALL
            .into_iter()
            .filter(|tier| self.plan_active(*tier))
            .collect()
    }

    /// Time left in the pre-launch window, `None` once it has ended.
    pub fn pre_launch_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        if !self.pre_launch_active {
            return None;
        }
        let end = timestamp(self.pre_launch_end_time)?;
        let left = end - now;
        (left > Duration::zero()).then_some(left)
    }
}

/// Result of `getUserMatrixInfo(address)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixInfo {
    pub position_id: u64,
    pub upline: TronAddress,
    pub children: Vec<TronAddress>,
    pub cycles: u64,
    pub is_active: bool,
}

impl MatrixInfo {
    pub fn from_abi(values: &[AbiValue]) -> Result<Self, AbiError> {
        let mut r = AbiReader::new(values);
        Ok(Self {
            position_id: r.u64()?,
            upline: r.address()?,
            children: r.address_array()?,
            cycles: r.u64()?,
            is_active: r.bool()?,
        })
    }
}

/// Result of `getGlobalStats()`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_users: u64,
    pub total_burned: Trx,
    pub reinvestment_balance: Trx,
    pub gas_reserve: Trx,
    pub renewal_fees: Trx,
    pub accounts_created: u64,
    pub basic_count: u64,
    pub master_count: u64,
    pub premium_count: u64,
    pub matrix_positions: u64,
    pub dividend_pool: Trx,
    pub total_qualified_users: u64,
}

impl GlobalStats {
    pub fn from_abi(values: &[AbiValue]) -> Result<Self, AbiError> {
        let mut r = AbiReader::new(values);
        Ok(Self {
            total_users: r.u64()?,
            total_burned: read_trx(&mut r)?,
            reinvestment_balance: read_trx(&mut r)?,
            gas_reserve: read_trx(&mut r)?,
            renewal_fees: read_trx(&mut r)?,
            accounts_created: r.u64()?,
            basic_count: r.u64()?,
            master_count: r.u64()?,
            premium_count: r.u64()?,
            matrix_positions: r.u64()?,
            dividend_pool: read_trx(&mut r)?,
            total_qualified_users: r.u64()?,
        })
    }

    pub fn plan_count(&self, tier: PlanTier) -> u64 {
        match tier {
            PlanTier::Basic => self.basic_count,
            PlanTier::Master => self.master_count,
            PlanTier::Premium => self.premium_count,
        }
    }

    pub fn burn_goal() -> Trx {
        Trx::new(TOTAL_SUPPLY_TRX * BURN_GOAL_RATIO)
    }

    /// Burned TRX as a percentage of [`GlobalStats::burn_goal`].
    pub fn burn_progress(&self) -> f64 {
        self.total_burned.value() / Self::burn_goal().value() * 100.0
    }
}

/// Combined dividend view for one account.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendInfo {
    pub accumulated_dividend: Trx,
    pub is_qualified: bool,
    pub dividend_pool: Trx,
    pub total_qualified_users: u64,
}

impl DividendInfo {
    pub fn has_claimable(&self) -> bool {
        self.is_qualified && self.accumulated_dividend > Trx::ZERO
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Basic,
    Master,
    Premium,
}

impl PlanTier {
    pub const ALL: [PlanTier; 3] = [PlanTier::Basic, PlanTier::Master, PlanTier::Premium];

    /// Call value sent with the activation transaction.
    pub const fn price(self) -> Sun {
        match self {
            PlanTier::Basic => Sun::from_whole_trx(35),
            PlanTier::Master => Sun::from_whole_trx(100),
            PlanTier::Premium => Sun::from_whole_trx(250),
        }
    }

    pub const fn method(self) -> ContractMethod {
        match self {
            PlanTier::Basic => method::ACTIVATE_BASIC_PLAN,
            PlanTier::Master => method::ACTIVATE_MASTER_PLAN,
            PlanTier::Premium => method::ACTIVATE_PREMIUM_PLAN,
        }
    }

    /// Translation key of the plan's display name.
    pub const fn label_key(self) -> &'static str {
        match self {
            PlanTier::Basic => "basicPlan",
            PlanTier::Master => "masterPlan",
            PlanTier::Premium => "premiumPlan",
        }
    }
}
