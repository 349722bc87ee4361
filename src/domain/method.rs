//! Top-up payment methods and their fee rules.

use crate::domain::money::Amount;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive bounds of the allowed top-up amount. Enforced by the flow
/// controller, not by the fee calculator.
pub const TOPUP_MIN: Decimal = dec!(50);
pub const TOPUP_MAX: Decimal = dec!(50000);

pub fn topup_amount_in_range(amount: Amount) -> bool {
    let value = amount.value();
    value >= TOPUP_MIN && value <= TOPUP_MAX
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Bank,
    PayPal,
    PromptPay,
    TrueMoney,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Card,
        PaymentMethod::Bank,
        PaymentMethod::PayPal,
        PaymentMethod::PromptPay,
        PaymentMethod::TrueMoney,
    ];

    /// Percentage of the amount charged as a processing fee.
    pub fn fee_rate(&self) -> Decimal {
        match self {
            PaymentMethod::Card => dec!(0.029),
            PaymentMethod::Bank => Decimal::ZERO,
            PaymentMethod::PayPal => dec!(0.034),
            PaymentMethod::PromptPay => Decimal::ZERO,
            PaymentMethod::TrueMoney => dec!(0.005),
        }
    }

    /// Fixed fee added regardless of the amount.
    pub fn flat_fee(&self) -> Decimal {
        match self {
            PaymentMethod::Card => dec!(10),
            PaymentMethod::Bank => dec!(15),
            PaymentMethod::PayPal => Decimal::ZERO,
            PaymentMethod::PromptPay => Decimal::ZERO,
            PaymentMethod::TrueMoney => dec!(5),
        }
    }

    /// Human-readable summary of the fee rule, shown next to the breakdown.
    pub fn fee_description(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "2.9% + ฿10",
            PaymentMethod::Bank => "bank transfer fee ฿15",
            PaymentMethod::PayPal => "3.4% flat",
            PaymentMethod::PromptPay => "free!",
            PaymentMethod::TrueMoney => "0.5% + ฿5",
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Bank => "bank",
            PaymentMethod::PayPal => "paypal",
            PaymentMethod::PromptPay => "promptpay",
            PaymentMethod::TrueMoney => "truemoney",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "bank" => Ok(PaymentMethod::Bank),
            "paypal" => Ok(PaymentMethod::PayPal),
            "promptpay" => Ok(PaymentMethod::PromptPay),
            "truemoney" => Ok(PaymentMethod::TrueMoney),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

/// Fee breakdown for a single top-up. Derived on demand, never persisted.
///
/// Values keep full precision; call [`FeeBreakdown::rounded`] for the
/// two-decimal display form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeBreakdown {
    pub base_amount: Decimal,
    pub processing_fee: Decimal,
    pub total: Decimal,
}

impl FeeBreakdown {
    pub fn rounded(&self) -> FeeBreakdown {
        fn to_display(value: Decimal) -> Decimal {
            let mut v = value.round_dp_with_strategy(
                2,
                rust_decimal::RoundingStrategy::MidpointAwayFromZero,
            );
            v.rescale(2);
            v
        }
        FeeBreakdown {
            base_amount: to_display(self.base_amount),
            processing_fee: to_display(self.processing_fee),
            total: to_display(self.total),
        }
    }
}

/// Computes the fee breakdown for topping up `amount` via `method`.
///
/// Pure arithmetic: `fee = amount * rate + flat`, `total = amount + fee`.
/// Range validation is the caller's responsibility.
pub fn compute_fee(amount: Amount, method: PaymentMethod) -> FeeBreakdown {
    let base = amount.value();
    let processing_fee = base * method.fee_rate() + method.flat_fee();
    FeeBreakdown {
        base_amount: base,
        processing_fee,
        total: base + processing_fee,
    }
}
