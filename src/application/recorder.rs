use crate::domain::method::PaymentMethod;
use crate::domain::money::Amount;
use crate::domain::ports::{SharedClock, SharedStore};
use crate::domain::transaction::{Transaction, TransactionKind};
use crate::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};

/// Builds immutable transaction records and files them with the
/// persistence collaborator.
///
/// Ids are clock-derived (unix milliseconds) with a process-monotonic
/// counter suffix, so they stay unique even when the clock is frozen or
/// two submissions land in the same millisecond.
pub struct TransactionRecorder {
    store: SharedStore,
    clock: SharedClock,
    sequence: AtomicU64,
}

impl TransactionRecorder {
    pub fn new(store: SharedStore, clock: SharedClock) -> Self {
        Self {
            store,
            clock,
            sequence: AtomicU64::new(1),
        }
    }

    pub async fn record_topup(
        &self,
        amount: Amount,
        method: PaymentMethod,
    ) -> Result<Transaction> {
        let tx = self.build(TransactionKind::TopUp, amount, Some(method), None);
        self.persist(tx).await
    }

    pub async fn record_payment(&self, amount: Amount, merchant: &str) -> Result<Transaction> {
        let tx = self.build(
            TransactionKind::Payment,
            amount,
            None,
            Some(merchant.to_string()),
        );
        self.persist(tx).await
    }

    /// Reads back the most recently filed record of `kind`, if any.
    pub async fn last(&self, kind: TransactionKind) -> Result<Option<Transaction>> {
        match self.store.get(kind.storage_key()).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn build(
        &self,
        kind: TransactionKind,
        amount: Amount,
        method: Option<PaymentMethod>,
        merchant: Option<String>,
    ) -> Transaction {
        let now = self.clock.now();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        Transaction {
            id: format!("{}-{}-{:04}", kind.id_prefix(), now.timestamp_millis(), seq),
            kind,
            amount: amount.value(),
            method,
            merchant,
            timestamp: now,
        }
    }

    /// Each call files exactly one new record under its kind's well-known
    /// key; records of the other kind are never touched.
    async fn persist(&self, tx: Transaction) -> Result<Transaction> {
        let json = serde_json::to_string(&tx)?;
        self.store.set(tx.kind.storage_key(), json).await?;
        Ok(tx)
    }
}
