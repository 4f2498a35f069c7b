//! Money value object.
//!
//! A non-negative amount with at most two decimal places, backed by
//! `rust_decimal` so that deposits such as `1009838.59` never pick up binary
//! floating point noise. The system is single-currency; the symbol only shows
//! up when rendering.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Number of decimal places carried by every amount.
pub const MONEY_SCALE: u32 = 2;

/// A non-negative monetary amount.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Validate and wrap a decimal amount.
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::invalid_amount(format!("{amount} is negative")));
        }
        if amount.normalize().scale() > MONEY_SCALE {
            return Err(DomainError::invalid_amount(format!(
                "{amount} has more than {MONEY_SCALE} decimal places"
            )));
        }
        Ok(Self(amount.abs()))
    }

    /// Whole currency units, e.g. a note total.
    pub fn from_units(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Add, or `None` when the sum exceeds what `Decimal` can hold.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtract, or `None` when the result would be negative.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        if other.0 > self.0 {
            return None;
        }
        self.0.checked_sub(other.0).map(Money)
    }

    /// Render with a currency symbol, thousands separators and two decimals,
    /// e.g. `£1,009,838.59`.
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
        let plain = format!("{:.2}", rounded);
        let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (idx, ch) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        format!("{symbol}{grouped}.{fraction}")
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl From<u32> for Money {
    fn from(value: u32) -> Self {
        Self::from_units(u64::from(value))
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('-') || trimmed.starts_with('+') {
            return Err(DomainError::invalid_amount(format!(
                "{s} is not in one of format 12356.84, 123458, 1234567.8"
            )));
        }
        let decimal = Decimal::from_str(trimmed)
            .map_err(|e| DomainError::invalid_amount(format!("{s}: {e}")))?;
        Self::new(decimal)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
