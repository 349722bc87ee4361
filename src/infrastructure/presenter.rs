use crate::domain::money::Balance;
use crate::domain::ports::{Notification, Presenter, Severity};
use crate::domain::screen::Screen;
use async_trait::async_trait;
use std::sync::Mutex;

/// Renders presentation requests as terminal lines. The CLI demo's "UI".
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    fn severity_tag(severity: Severity) -> &'static str {
        match severity {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[async_trait]
impl Presenter for TerminalPresenter {
    async fn navigate_to(&self, screen: Screen) {
        println!("-> screen: {screen}");
    }

    async fn show_balance(&self, balance: Balance) {
        println!("balance: ฿{balance}");
    }

    async fn notify(&self, notification: Notification) {
        println!(
            "[{}] {}",
            Self::severity_tag(notification.severity),
            notification.message
        );
    }
}

/// What a presenter was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    Navigated(Screen),
    BalanceShown(Balance),
    Notified(Notification),
}

/// A presenter that records every request it receives. Used by tests to
/// assert on the emission sequence without any rendering.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<PresenterEvent>>,
}

impl RecordingPresenter {
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.lock().expect("events lock poisoned").clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresenterEvent::Notified(notification) => Some(notification),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: PresenterEvent) {
        self.events.lock().expect("events lock poisoned").push(event);
    }
}

#[async_trait]
impl Presenter for RecordingPresenter {
    async fn navigate_to(&self, screen: Screen) {
        self.push(PresenterEvent::Navigated(screen));
    }

    async fn show_balance(&self, balance: Balance) {
        self.push(PresenterEvent::BalanceShown(balance));
    }

    async fn notify(&self, notification: Notification) {
        self.push(PresenterEvent::Notified(notification));
    }
}
