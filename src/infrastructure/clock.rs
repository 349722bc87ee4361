use crate::domain::ports::Clock;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// The real wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a settable instant, for deterministic expiry checks,
/// timestamps and transaction ids in tests.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Convenience for tests.
    ///
    /// # Panics
    /// Panics if `rfc3339` is not a valid RFC 3339 timestamp.
    pub fn at(rfc3339: &str) -> Self {
        Self::new(
            rfc3339
                .parse()
                .expect("FixedClock::at requires a valid RFC 3339 timestamp"),
        )
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock lock poisoned") = now;
    }

    pub fn advance(&self, duration: chrono::Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += duration;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}
