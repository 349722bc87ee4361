use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors surfaced by the wallet core.
///
/// All flow errors are recovered at the flow-controller boundary and turned
/// into user-facing notifications; none of them abort the process.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("{field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("please fill in all card details")]
    MissingCardFields,
    #[error("card number is not valid")]
    InvalidCardNumber,
    #[error("card expiry date is not valid")]
    ExpiredCard,
    #[error("amount {amount} is outside the allowed top-up range")]
    AmountOutOfRange { amount: Decimal },
    #[error("insufficient balance: have {available}, need {required}")]
    InsufficientBalance {
        available: Decimal,
        required: Decimal,
    },
    #[error("a {0} flow is already in progress")]
    FlowInFlight(&'static str),
    #[error("flow was cancelled")]
    FlowCancelled,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
