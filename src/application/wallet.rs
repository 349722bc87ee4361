use crate::domain::money::{Amount, Balance};
use crate::error::PaymentError;

/// The wallet's balance, owned here and mutated only through
/// [`Wallet::credit`] and [`Wallet::debit`]. The flow controller's
/// completion path is the single writer.
#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    balance: Balance,
}

impl Wallet {
    pub fn new(initial: Balance) -> Self {
        Self { balance: initial }
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn can_cover(&self, amount: Amount) -> bool {
        self.balance.value() >= amount.value()
    }

    /// Adds a completed top-up to the balance.
    pub fn credit(&mut self, amount: Amount) {
        self.balance += amount.into();
    }

    /// Deducts a completed payment from the balance.
    pub fn debit(&mut self, amount: Amount) -> Result<(), PaymentError> {
        if !self.can_cover(amount) {
            return Err(PaymentError::InsufficientBalance {
                available: self.balance.value(),
                required: amount.value(),
            });
        }
        self.balance -= amount.into();
        Ok(())
    }
}
