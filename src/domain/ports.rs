//! Ports the core drives its collaborators through.
//!
//! The core never renders, persists, or reads the clock directly; it talks
//! to whatever adapters the host wires in.

use crate::domain::money::{Amount, Balance};
use crate::domain::screen::Screen;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

pub type SharedStore = Arc<dyn KeyValueStore>;
pub type SharedPresenter = Arc<dyn Presenter>;
pub type SharedClock = Arc<dyn Clock>;
pub type SharedSecondFactor = Arc<dyn SecondFactor>;

/// Persistence collaborator: a small string key-value contract, synchronous
/// from the core's perspective.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn set(&self, key: &str, value: String) -> Result<()>;
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// How long a transient notification stays visible before auto-dismissing.
pub const NOTIFICATION_DISMISS_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient user-facing message, auto-dismissed by the presenter after
/// [`NOTIFICATION_DISMISS_AFTER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Presentation collaborator. The core only emits requests; rendering,
/// animation and dismissal timing happen on the other side.
#[async_trait]
pub trait Presenter: Send + Sync {
    async fn navigate_to(&self, screen: Screen);
    async fn show_balance(&self, balance: Balance);
    async fn notify(&self, notification: Notification);
}

/// Clock collaborator, injected so timestamps and expiry checks are
/// deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Second-factor confirmation for card top-ups.
///
/// The shipped adapter always approves, preserving the modeled 3-D Secure
/// step; swap in a failing implementation to exercise rejection paths.
#[async_trait]
pub trait SecondFactor: Send + Sync {
    async fn authenticate(&self, amount: Amount) -> Result<()>;
}
