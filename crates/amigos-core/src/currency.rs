//! TRX currency units.
//!
//! The contract speaks sun (10⁻⁶ TRX) everywhere. Values coming off the
//! chain are converted to [`Trx`] for display; amounts going back on chain
//! are multiplied back into [`Sun`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of sun in one TRX.
pub const SUN_PER_TRX: u64 = 1_000_000;

/// Decimal places carried by a TRX amount.
pub const TRX_DECIMALS: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("amount must not be negative: {0}")]
    Negative(String),

    #[error("amount is not a finite number: {0}")]
    NotFinite(String),

    #[error("amount does not fit in sun: {0}")]
    Overflow(String),

    #[error("malformed amount '{0}'")]
    Malformed(String),
}

/// Integer amount in sun, the chain's smallest unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Sun(u64);

impl Sun {
    pub const ZERO: Sun = Sun(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Whole TRX expressed in sun. Saturates instead of wrapping.
    pub const fn from_whole_trx(trx: u64) -> Self {
        Self(trx.saturating_mul(SUN_PER_TRX))
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Converts to display units.
    pub fn to_trx(self) -> Trx {
        Trx(self.0 as f64 / SUN_PER_TRX as f64)
    }

    /// Narrows an ABI `uint256` (decoded as `u128`) into sun.
    pub fn try_from_u128(value: u128) -> Result<Self, CurrencyError> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| CurrencyError::Overflow(value.to_string()))
    }

    pub fn checked_add(self, other: Sun) -> Option<Sun> {
        self.0.checked_add(other.0).map(Sun)
    }

    /// Parses a decimal TRX string ("35", "0.5", "12.000001") exactly,
    /// without going through floating point.
    pub fn parse_trx(input: &str) -> Result<Self, CurrencyError> {
        let trimmed = input.trim();
        if trimmed.starts_with('-') {
            return Err(CurrencyError::Negative(trimmed.to_string()));
        }

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };

        let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty())
            || !digits_only(whole)
            || !digits_only(fraction)
            || fraction.len() > TRX_DECIMALS
        {
            return Err(CurrencyError::Malformed(trimmed.to_string()));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| CurrencyError::Overflow(trimmed.to_string()))?
        };
        let fraction: u64 = if fraction.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", fraction, width = TRX_DECIMALS);
            padded
                .parse()
                .map_err(|_| CurrencyError::Malformed(trimmed.to_string()))?
        };

        whole
            .checked_mul(SUN_PER_TRX)
            .and_then(|sun| sun.checked_add(fraction))
            .map(Sun)
            .ok_or_else(|| CurrencyError::Overflow(trimmed.to_string()))
    }
}

impl fmt::Display for Sun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sun", self.0)
    }
}

impl From<u64> for Sun {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Decimal TRX amount, used for display and UI-side comparisons.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trx(f64);

impl Trx {
    pub const ZERO: Trx = Trx(0.0);

    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    /// Multiplies back into sun, rounding to the nearest unit.
    pub fn to_sun(self) -> Result<Sun, CurrencyError> {
        if !self.0.is_finite() {
            return Err(CurrencyError::NotFinite(self.0.to_string()));
        }
        if self.0 < 0.0 {
            return Err(CurrencyError::Negative(self.0.to_string()));
        }

        let scaled = (self.0 * SUN_PER_TRX as f64).round();
        if scaled > u64::MAX as f64 {
            return Err(CurrencyError::Overflow(self.0.to_string()));
        }
        Ok(Sun(scaled as u64))
    }

    /// Fixed-point rendering with the given number of decimals.
    pub fn format(self, decimals: usize) -> String {
        format!("{:.*}", decimals, self.0)
    }
}

impl fmt::Display for Trx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} TRX", self.format(2))
    }
}

impl FromStr for Trx {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sun::parse_trx(s).map(Sun::to_trx)
    }
}
