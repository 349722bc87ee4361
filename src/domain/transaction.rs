use crate::domain::method::PaymentMethod;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    TopUp,
    Payment,
}

impl TransactionKind {
    pub fn id_prefix(&self) -> &'static str {
        match self {
            TransactionKind::TopUp => "TXN",
            TransactionKind::Payment => "PAY",
        }
    }

    /// Well-known key the persistence collaborator files this kind under.
    pub fn storage_key(&self) -> &'static str {
        match self {
            TransactionKind::TopUp => "lastTopupTransaction",
            TransactionKind::Payment => "lastPaymentTransaction",
        }
    }
}

/// A completed wallet movement. Immutable once created; appended to the
/// record store and never mutated or deleted by the core.
///
/// Top-ups carry the payment method, payments carry the merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub merchant: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_topup_record_round_trips_without_merchant() {
        let tx = Transaction {
            id: "TXN-1754550000000-0001".to_string(),
            kind: TransactionKind::TopUp,
            amount: dec!(100),
            method: Some(PaymentMethod::PromptPay),
            merchant: None,
            timestamp: "2026-08-07T06:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"promptpay\""));
        assert!(!json.contains("merchant"));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn test_kind_prefixes_and_keys() {
        assert_eq!(TransactionKind::TopUp.id_prefix(), "TXN");
        assert_eq!(TransactionKind::Payment.id_prefix(), "PAY");
        assert_eq!(TransactionKind::TopUp.storage_key(), "lastTopupTransaction");
        assert_eq!(
            TransactionKind::Payment.storage_key(),
            "lastPaymentTransaction"
        );
    }
}
