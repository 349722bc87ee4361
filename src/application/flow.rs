//! Top-up and payment flows.
//!
//! Both flows share the same shape: `Idle -> Validating ->
//! (Authenticating)? -> Processing -> Completed`, with `Rejected` as the
//! terminal state of a failed attempt. Submissions are single-flight per
//! kind, every suspension point honors the caller's cancellation token,
//! and a flow either fully completes (balance delta + record) or has no
//! effect.

use crate::application::navigator::Navigator;
use crate::application::recorder::TransactionRecorder;
use crate::application::wallet::Wallet;
use crate::domain::card::{
    CARD_NUMBER_LENGTHS, CardBrand, CardDetails, is_valid_expiry, luhn_valid,
    sanitize_card_number,
};
use crate::domain::method::{PaymentMethod, topup_amount_in_range};
use crate::domain::money::{Amount, Balance};
use crate::domain::ports::{
    Notification, Severity, SharedClock, SharedPresenter, SharedSecondFactor, SharedStore,
};
use crate::domain::screen::Screen;
use crate::domain::transaction::{Transaction, TransactionKind};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Idle,
    Validating,
    Authenticating,
    Processing,
    Completed,
    Rejected(String),
}

/// Simulated latencies. Defaults mirror the modeled network delays; tests
/// use [`FlowConfig::instant`].
#[derive(Debug, Clone, Copy)]
pub struct FlowConfig {
    /// Delay before a card top-up completes, after authentication.
    pub card_topup_delay: Duration,
    /// Delay before a non-card top-up completes.
    pub topup_delay: Duration,
    /// Delay before a payment completes.
    pub payment_delay: Duration,
    /// Delay while "scanning" a payment QR code.
    pub qr_scan_delay: Duration,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            card_topup_delay: Duration::from_millis(1000),
            topup_delay: Duration::from_millis(2000),
            payment_delay: Duration::from_millis(1500),
            qr_scan_delay: Duration::from_millis(1000),
        }
    }
}

impl FlowConfig {
    /// All delays zero, for deterministic tests.
    pub fn instant() -> Self {
        Self {
            card_topup_delay: Duration::ZERO,
            topup_delay: Duration::ZERO,
            payment_delay: Duration::ZERO,
            qr_scan_delay: Duration::ZERO,
        }
    }
}

/// The canned payload a simulated QR scan produces.
#[derive(Debug, Clone, PartialEq)]
pub struct QrPayment {
    pub merchant: String,
    pub amount: Amount,
}

impl QrPayment {
    pub fn demo() -> Self {
        Self {
            merchant: "7-Eleven Sukhumvit".to_string(),
            amount: Amount::new(dec!(127.50)).expect("demo amount is non-negative"),
        }
    }
}

/// Per-kind flow bookkeeping: observable state plus the single-flight flag.
struct FlowSlot {
    label: &'static str,
    state: watch::Sender<FlowState>,
    in_flight: AtomicBool,
}

impl FlowSlot {
    fn new(label: &'static str) -> Self {
        let (state, _) = watch::channel(FlowState::Idle);
        Self {
            label,
            state,
            in_flight: AtomicBool::new(false),
        }
    }

    fn set(&self, state: FlowState) {
        self.state.send_replace(state);
    }

    fn get(&self) -> FlowState {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<FlowState> {
        self.state.subscribe()
    }

    /// Claims the slot, failing fast if a flow of this kind is already in
    /// flight. The returned guard releases the slot when dropped.
    fn try_begin(&self) -> Result<InFlightGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PaymentError::FlowInFlight(self.label));
        }
        Ok(InFlightGuard { slot: self })
    }
}

struct InFlightGuard<'a> {
    slot: &'a FlowSlot,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.slot.in_flight.store(false, Ordering::Release);
    }
}

/// Orchestrates validation, simulated delays, authentication, recording and
/// the balance commit for both flows. Owns the wallet and the navigator;
/// nothing else writes the balance.
pub struct FlowController {
    wallet: Mutex<Wallet>,
    navigator: Mutex<Navigator>,
    recorder: TransactionRecorder,
    presenter: SharedPresenter,
    clock: SharedClock,
    second_factor: SharedSecondFactor,
    config: FlowConfig,
    topup: FlowSlot,
    payment: FlowSlot,
}

impl FlowController {
    pub fn new(
        wallet: Wallet,
        store: SharedStore,
        presenter: SharedPresenter,
        clock: SharedClock,
        second_factor: SharedSecondFactor,
        config: FlowConfig,
    ) -> Self {
        Self {
            wallet: Mutex::new(wallet),
            navigator: Mutex::new(Navigator::new(presenter.clone(), Screen::Home)),
            recorder: TransactionRecorder::new(store, clock.clone()),
            presenter,
            clock,
            second_factor,
            config,
            topup: FlowSlot::new("top-up"),
            payment: FlowSlot::new("payment"),
        }
    }

    pub async fn balance(&self) -> Balance {
        self.wallet.lock().await.balance()
    }

    pub async fn current_screen(&self) -> Screen {
        self.navigator.lock().await.current()
    }

    pub fn topup_state(&self) -> FlowState {
        self.topup.get()
    }

    pub fn payment_state(&self) -> FlowState {
        self.payment.get()
    }

    /// Watches a flow's state transitions as they happen.
    pub fn watch_state(&self, kind: TransactionKind) -> watch::Receiver<FlowState> {
        match kind {
            TransactionKind::TopUp => self.topup.subscribe(),
            TransactionKind::Payment => self.payment.subscribe(),
        }
    }

    pub async fn last_transaction(&self, kind: TransactionKind) -> Result<Option<Transaction>> {
        self.recorder.last(kind).await
    }

    /// User-driven navigation. Entering the wallet refreshes the balance
    /// display, as the wallet screen always shows the live balance.
    pub async fn show_screen(&self, screen: Screen) {
        self.navigator.lock().await.transition_to(screen).await;
        if screen == Screen::Wallet {
            let balance = self.wallet.lock().await.balance();
            self.presenter.show_balance(balance).await;
        }
    }

    /// Simulated QR scan: announces the scan, then brings up the payment
    /// confirmation screen with the canned merchant payload.
    pub async fn scan_qr(&self, cancel: &CancellationToken) -> Result<QrPayment> {
        self.presenter
            .notify(Notification::new(Severity::Info, "Scanning QR code..."))
            .await;
        if !self.suspend(self.config.qr_scan_delay, cancel).await {
            return Err(PaymentError::FlowCancelled);
        }
        self.navigator
            .lock()
            .await
            .transition_to(Screen::PaymentConfirm)
            .await;
        Ok(QrPayment::demo())
    }

    /// Runs the top-up flow to completion.
    ///
    /// On success the wallet is credited with exactly `amount` (the
    /// processing fee is charged on the funding side, not the wallet) and
    /// exactly one transaction record is filed.
    pub async fn submit_topup(
        &self,
        amount: Amount,
        method: PaymentMethod,
        card: Option<CardDetails>,
        cancel: &CancellationToken,
    ) -> Result<Transaction> {
        let _guard = self.topup.try_begin()?;

        self.topup.set(FlowState::Validating);
        if let Err(err) = self.validate_topup(amount, method, card.as_ref()) {
            return self.reject(&self.topup, err).await;
        }

        if method == PaymentMethod::Card {
            self.topup.set(FlowState::Authenticating);
            let auth = tokio::select! {
                _ = cancel.cancelled() => return self.abort(&self.topup),
                auth = self.second_factor.authenticate(amount) => auth,
            };
            if let Err(err) = auth {
                return self.reject(&self.topup, err).await;
            }
        }

        self.topup.set(FlowState::Processing);
        let delay = match method {
            PaymentMethod::Card => self.config.card_topup_delay,
            _ => self.config.topup_delay,
        };
        if !self.suspend(delay, cancel).await {
            return self.abort(&self.topup);
        }

        let tx = match self.recorder.record_topup(amount, method).await {
            Ok(tx) => tx,
            Err(err) => return self.reject(&self.topup, err).await,
        };
        let balance = {
            let mut wallet = self.wallet.lock().await;
            wallet.credit(amount);
            wallet.balance()
        };
        self.presenter.show_balance(balance).await;
        self.navigator
            .lock()
            .await
            .transition_to(Screen::TopUpSuccess)
            .await;

        info!(id = %tx.id, %amount, %method, "top-up completed");
        self.topup.set(FlowState::Completed);
        Ok(tx)
    }

    /// Runs the payment flow to completion, debiting the wallet and filing
    /// a `PAY-` record for the merchant.
    pub async fn submit_payment(
        &self,
        amount: Amount,
        merchant: &str,
        cancel: &CancellationToken,
    ) -> Result<Transaction> {
        let _guard = self.payment.try_begin()?;

        self.payment.set(FlowState::Validating);
        if amount.value() <= Decimal::ZERO {
            return self
                .reject(
                    &self.payment,
                    PaymentError::Validation {
                        field: "amount",
                        reason: "payment amount must be positive".to_string(),
                    },
                )
                .await;
        }
        {
            let wallet = self.wallet.lock().await;
            if !wallet.can_cover(amount) {
                let err = PaymentError::InsufficientBalance {
                    available: wallet.balance().value(),
                    required: amount.value(),
                };
                drop(wallet);
                return self.reject(&self.payment, err).await;
            }
        }

        self.presenter
            .notify(Notification::new(Severity::Info, "Processing payment..."))
            .await;
        self.payment.set(FlowState::Processing);
        if !self.suspend(self.config.payment_delay, cancel).await {
            return self.abort(&self.payment);
        }

        // Sufficiency is re-checked under the wallet lock, which is then
        // held across record + debit so the commit is all-or-nothing.
        let mut wallet = self.wallet.lock().await;
        if !wallet.can_cover(amount) {
            let err = PaymentError::InsufficientBalance {
                available: wallet.balance().value(),
                required: amount.value(),
            };
            drop(wallet);
            return self.reject(&self.payment, err).await;
        }
        let tx = match self.recorder.record_payment(amount, merchant).await {
            Ok(tx) => tx,
            Err(err) => {
                drop(wallet);
                return self.reject(&self.payment, err).await;
            }
        };
        if let Err(err) = wallet.debit(amount) {
            // Unreachable: sufficiency was just checked under this lock.
            drop(wallet);
            return self.reject(&self.payment, err).await;
        }
        let balance = wallet.balance();
        drop(wallet);

        self.presenter.show_balance(balance).await;
        self.navigator
            .lock()
            .await
            .transition_to(Screen::PaymentSuccess)
            .await;

        info!(id = %tx.id, %amount, merchant, "payment completed");
        self.payment.set(FlowState::Completed);
        Ok(tx)
    }

    fn validate_topup(
        &self,
        amount: Amount,
        method: PaymentMethod,
        card: Option<&CardDetails>,
    ) -> Result<()> {
        if method == PaymentMethod::Card {
            let card = card.ok_or(PaymentError::MissingCardFields)?;
            if !card.has_all_fields() {
                return Err(PaymentError::MissingCardFields);
            }
            let digits = sanitize_card_number(&card.number);
            if !CARD_NUMBER_LENGTHS.contains(&digits.len()) || !luhn_valid(&digits) {
                return Err(PaymentError::InvalidCardNumber);
            }
            if !is_valid_expiry(&card.expiry, self.clock.now().date_naive()) {
                return Err(PaymentError::ExpiredCard);
            }
            tracing::debug!(brand = ?CardBrand::detect(&digits), "card accepted");
        }
        if !topup_amount_in_range(amount) {
            return Err(PaymentError::AmountOutOfRange {
                amount: amount.value(),
            });
        }
        Ok(())
    }

    /// Waits out a simulated delay unless cancelled first.
    async fn suspend(&self, delay: Duration, cancel: &CancellationToken) -> bool {
        tokio::select! {
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(delay) => true,
        }
    }

    async fn reject<T>(&self, slot: &FlowSlot, err: PaymentError) -> Result<T> {
        warn!(flow = slot.label, error = %err, "flow rejected");
        slot.set(FlowState::Rejected(err.to_string()));
        self.presenter
            .notify(Notification::new(severity_for(&err), err.to_string()))
            .await;
        Err(err)
    }

    /// Cancellation leaves no trace: no record, no balance change, state
    /// back to idle so the user can resubmit.
    fn abort<T>(&self, slot: &FlowSlot) -> Result<T> {
        warn!(flow = slot.label, "flow cancelled");
        slot.set(FlowState::Idle);
        Err(PaymentError::FlowCancelled)
    }
}

fn severity_for(err: &PaymentError) -> Severity {
    match err {
        PaymentError::MissingCardFields
        | PaymentError::AmountOutOfRange { .. }
        | PaymentError::Validation { .. } => Severity::Warning,
        _ => Severity::Error,
    }
}
