#![allow(dead_code)]

use paywise::application::flow::{FlowConfig, FlowController};
use paywise::application::wallet::Wallet;
use paywise::domain::card::CardDetails;
use paywise::domain::money::{Amount, Balance};
use paywise::infrastructure::clock::FixedClock;
use paywise::infrastructure::in_memory::InMemoryStore;
use paywise::infrastructure::presenter::RecordingPresenter;
use paywise::infrastructure::second_factor::AutoApprove;
use rust_decimal::Decimal;
use std::sync::Arc;

/// The frozen "now" every harness starts at.
pub const TEST_NOW: &str = "2026-08-07T06:00:00Z";

/// A Luhn-valid Visa test number.
pub const VALID_CARD_NUMBER: &str = "4539 1488 0343 6467";

pub struct Harness {
    pub controller: Arc<FlowController>,
    pub presenter: Arc<RecordingPresenter>,
    pub clock: Arc<FixedClock>,
    pub store: Arc<InMemoryStore>,
}

/// Controller wired to recording/fixed adapters with zero delays.
pub fn harness(initial_balance: Decimal) -> Harness {
    harness_with_config(initial_balance, FlowConfig::instant())
}

pub fn harness_with_config(initial_balance: Decimal, config: FlowConfig) -> Harness {
    let presenter = Arc::new(RecordingPresenter::default());
    let clock = Arc::new(FixedClock::at(TEST_NOW));
    let store = Arc::new(InMemoryStore::new());
    let controller = Arc::new(FlowController::new(
        Wallet::new(Balance::new(initial_balance)),
        store.clone(),
        presenter.clone(),
        clock.clone(),
        Arc::new(AutoApprove::instant(presenter.clone())),
        config,
    ));
    Harness {
        controller,
        presenter,
        clock,
        store,
    }
}

pub fn amount(value: Decimal) -> Amount {
    Amount::new(value).unwrap()
}

pub fn valid_card() -> CardDetails {
    CardDetails {
        number: VALID_CARD_NUMBER.to_string(),
        expiry: "12/30".to_string(),
        cvv: "123".to_string(),
        holder_name: "SOMCHAI JAIDEE".to_string(),
    }
}
