mod common;

use common::{amount, harness, valid_card};
use paywise::application::flow::FlowState;
use paywise::domain::card::CardDetails;
use paywise::domain::method::PaymentMethod;
use paywise::domain::money::Balance;
use paywise::domain::ports::{KeyValueStore, Severity};
use paywise::domain::screen::Screen;
use paywise::domain::transaction::{Transaction, TransactionKind};
use paywise::error::PaymentError;
use paywise::infrastructure::presenter::PresenterEvent;
use rust_decimal_macros::dec;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn completed_topup_credits_balance_and_records_once() {
    let h = harness(dec!(500));
    let cancel = CancellationToken::new();

    let tx = h
        .controller
        .submit_topup(amount(dec!(100)), PaymentMethod::PromptPay, None, &cancel)
        .await
        .unwrap();

    assert_eq!(h.controller.balance().await, Balance::new(dec!(600)));
    assert_eq!(h.controller.topup_state(), FlowState::Completed);

    // Exactly one record, equal to the applied balance delta.
    assert_eq!(tx.kind, TransactionKind::TopUp);
    assert_eq!(tx.amount, dec!(100));
    assert_eq!(tx.method, Some(PaymentMethod::PromptPay));
    let stored = h.store.get("lastTopupTransaction").await.unwrap().unwrap();
    let stored: Transaction = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored, tx);
}

#[tokio::test]
async fn completed_topup_updates_display_and_navigates_to_success() {
    let h = harness(dec!(0));
    let cancel = CancellationToken::new();

    h.controller
        .submit_topup(amount(dec!(50)), PaymentMethod::Bank, None, &cancel)
        .await
        .unwrap();

    assert_eq!(
        h.presenter.events(),
        vec![
            PresenterEvent::BalanceShown(Balance::new(dec!(50))),
            PresenterEvent::Navigated(Screen::TopUpSuccess),
        ]
    );
    assert_eq!(h.controller.current_screen().await, Screen::TopUpSuccess);
}

#[tokio::test]
async fn topup_range_boundaries_are_inclusive() {
    let h = harness(dec!(0));
    let cancel = CancellationToken::new();

    let below = h
        .controller
        .submit_topup(amount(dec!(49.99)), PaymentMethod::PromptPay, None, &cancel)
        .await;
    assert!(matches!(
        below,
        Err(PaymentError::AmountOutOfRange { .. })
    ));
    assert_eq!(h.controller.balance().await, Balance::ZERO);

    h.controller
        .submit_topup(amount(dec!(50.00)), PaymentMethod::PromptPay, None, &cancel)
        .await
        .unwrap();
    h.controller
        .submit_topup(amount(dec!(50000.00)), PaymentMethod::PromptPay, None, &cancel)
        .await
        .unwrap();
    assert_eq!(h.controller.balance().await, Balance::new(dec!(50050)));

    let above = h
        .controller
        .submit_topup(amount(dec!(50000.01)), PaymentMethod::PromptPay, None, &cancel)
        .await;
    assert!(matches!(
        above,
        Err(PaymentError::AmountOutOfRange { .. })
    ));
    assert_eq!(h.controller.balance().await, Balance::new(dec!(50050)));
}

#[tokio::test]
async fn card_topup_authenticates_then_completes() {
    let h = harness(dec!(0));
    let cancel = CancellationToken::new();

    let tx = h
        .controller
        .submit_topup(
            amount(dec!(1000)),
            PaymentMethod::Card,
            Some(valid_card()),
            &cancel,
        )
        .await
        .unwrap();

    assert_eq!(tx.method, Some(PaymentMethod::Card));
    // The modeled 3-D Secure step announced itself and approved.
    let notifications = h.presenter.notifications();
    assert_eq!(notifications[0].severity, Severity::Info);
    assert_eq!(notifications[1].severity, Severity::Success);
    // The wallet is credited with the base amount; the processing fee is
    // charged on the funding side.
    assert_eq!(h.controller.balance().await, Balance::new(dec!(1000)));
}

#[tokio::test]
async fn card_topup_with_missing_fields_is_rejected() {
    let h = harness(dec!(200));
    let cancel = CancellationToken::new();

    let card = CardDetails {
        cvv: String::new(),
        ..valid_card()
    };
    let result = h
        .controller
        .submit_topup(amount(dec!(100)), PaymentMethod::Card, Some(card), &cancel)
        .await;

    assert!(matches!(result, Err(PaymentError::MissingCardFields)));
    assert_eq!(h.controller.balance().await, Balance::new(dec!(200)));
    assert!(h.store.get("lastTopupTransaction").await.unwrap().is_none());
    assert!(matches!(
        h.controller.topup_state(),
        FlowState::Rejected(_)
    ));
    assert_eq!(h.presenter.notifications()[0].severity, Severity::Warning);
}

#[tokio::test]
async fn card_topup_without_card_details_is_rejected() {
    let h = harness(dec!(0));
    let cancel = CancellationToken::new();

    let result = h
        .controller
        .submit_topup(amount(dec!(100)), PaymentMethod::Card, None, &cancel)
        .await;
    assert!(matches!(result, Err(PaymentError::MissingCardFields)));
}

#[tokio::test]
async fn card_topup_with_bad_checksum_is_rejected() {
    let h = harness(dec!(0));
    let cancel = CancellationToken::new();

    let card = CardDetails {
        // Valid test number with the last digit altered.
        number: "4539 1488 0343 6468".to_string(),
        ..valid_card()
    };
    let result = h
        .controller
        .submit_topup(amount(dec!(100)), PaymentMethod::Card, Some(card), &cancel)
        .await;

    assert!(matches!(result, Err(PaymentError::InvalidCardNumber)));
    assert_eq!(h.presenter.notifications()[0].severity, Severity::Error);
}

#[tokio::test]
async fn card_topup_with_short_number_is_rejected() {
    let h = harness(dec!(0));
    let cancel = CancellationToken::new();

    // "59" is Luhn-valid but far too short to be a card number.
    let card = CardDetails {
        number: "59".to_string(),
        ..valid_card()
    };
    let result = h
        .controller
        .submit_topup(amount(dec!(100)), PaymentMethod::Card, Some(card), &cancel)
        .await;
    assert!(matches!(result, Err(PaymentError::InvalidCardNumber)));
}

#[tokio::test]
async fn card_topup_with_expired_card_is_rejected() {
    let h = harness(dec!(0));
    let cancel = CancellationToken::new();

    for expiry in ["12/99", "07/26", "13/30", "1/30"] {
        let card = CardDetails {
            expiry: expiry.to_string(),
            ..valid_card()
        };
        let result = h
            .controller
            .submit_topup(amount(dec!(100)), PaymentMethod::Card, Some(card), &cancel)
            .await;
        assert!(
            matches!(result, Err(PaymentError::ExpiredCard)),
            "expiry {expiry:?} should be rejected"
        );
    }
    assert_eq!(h.controller.balance().await, Balance::ZERO);
}

#[tokio::test]
async fn rejected_topup_allows_resubmission() {
    let h = harness(dec!(0));
    let cancel = CancellationToken::new();

    let rejected = h
        .controller
        .submit_topup(amount(dec!(10)), PaymentMethod::PromptPay, None, &cancel)
        .await;
    assert!(rejected.is_err());

    // No cleanup needed; the next attempt goes through.
    h.controller
        .submit_topup(amount(dec!(100)), PaymentMethod::PromptPay, None, &cancel)
        .await
        .unwrap();
    assert_eq!(h.controller.balance().await, Balance::new(dec!(100)));
}
