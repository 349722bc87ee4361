//! Multi-currency display conversion with mock exchange rates.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Sgd,
    Thb,
}

impl Currency {
    /// Mock mid-market rate: how many THB one unit of this currency buys.
    pub fn rate_to_thb(&self) -> Decimal {
        match self {
            Currency::Usd => dec!(35.75),
            Currency::Eur => dec!(38.92),
            Currency::Gbp => dec!(44.25),
            Currency::Jpy => dec!(0.24),
            Currency::Sgd => dec!(26.80),
            Currency::Thb => Decimal::ONE,
        }
    }
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Sgd => "SGD",
            Currency::Thb => "THB",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "JPY" => Ok(Currency::Jpy),
            "SGD" => Ok(Currency::Sgd),
            "THB" => Ok(Currency::Thb),
            other => Err(format!("unknown currency: {other}")),
        }
    }
}

/// Converts `amount` between currencies, pivoting through THB.
pub fn convert(amount: Decimal, from: Currency, to: Currency) -> Decimal {
    if from == to {
        return amount;
    }
    let thb = amount * from.rate_to_thb();
    thb / to.rate_to_thb()
}
