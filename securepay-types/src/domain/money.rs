//! Type-safe monetary value with embedded currency.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Currencies the gateway accepts for card payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    AUD,
    NZD,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Returns the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::AUD | Currency::NZD | Currency::USD | Currency::EUR | Currency::GBP => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::str::FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AUD" => Ok(Currency::AUD),
            "NZD" => Ok(Currency::NZD),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            _ => Err(DomainError::UnknownCurrency(s.to_string())),
        }
    }
}

/// Type-safe money representation with embedded currency.
///
/// Amount is stored in the smallest unit of the currency (cents), which is
/// also what the gateway expects in the `amount` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value from minor units.
    pub fn new(amount: i64, currency: Currency) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::NegativeAmount);
        }
        Ok(Self { amount, currency })
    }

    /// Creates Money from a major-unit total such as `12.34`.
    ///
    /// The minor-unit amount is `round(total * 100)`, midpoints rounded away
    /// from zero.
    pub fn from_major(total: Decimal, currency: Currency) -> Result<Self, DomainError> {
        let scale = Decimal::from(10_i64.pow(currency.decimal_places()));
        let minor = total
            .checked_mul(scale)
            .ok_or_else(|| DomainError::AmountOutOfRange(total.to_string()))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let amount = minor
            .to_i64()
            .ok_or_else(|| DomainError::AmountOutOfRange(total.to_string()))?;
        Self::new(amount, currency)
    }

    /// Returns the amount in smallest currency unit.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}
