use crate::domain::money::Amount;
use crate::domain::ports::{Notification, SecondFactor, Severity, SharedPresenter};
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// The modeled 3-D Secure confirmation: announce, wait, approve.
///
/// Always succeeds. Real failure handling belongs in an alternative
/// `SecondFactor` implementation; the flow controller already treats an
/// `Err` from the port as a rejection.
pub struct AutoApprove {
    presenter: SharedPresenter,
    challenge_delay: Duration,
    settle_delay: Duration,
}

impl AutoApprove {
    pub fn new(presenter: SharedPresenter, challenge_delay: Duration, settle_delay: Duration) -> Self {
        Self {
            presenter,
            challenge_delay,
            settle_delay,
        }
    }

    /// Delays matching the modeled authentication timing.
    pub fn with_demo_delays(presenter: SharedPresenter) -> Self {
        Self::new(
            presenter,
            Duration::from_millis(1500),
            Duration::from_millis(500),
        )
    }

    /// No delays, for tests.
    pub fn instant(presenter: SharedPresenter) -> Self {
        Self::new(presenter, Duration::ZERO, Duration::ZERO)
    }
}

#[async_trait]
impl SecondFactor for AutoApprove {
    async fn authenticate(&self, _amount: Amount) -> Result<()> {
        self.presenter
            .notify(Notification::new(
                Severity::Info,
                "Verifying identity via 3D Secure...",
            ))
            .await;
        tokio::time::sleep(self.challenge_delay).await;
        self.presenter
            .notify(Notification::new(Severity::Success, "Identity verified"))
            .await;
        tokio::time::sleep(self.settle_delay).await;
        Ok(())
    }
}
