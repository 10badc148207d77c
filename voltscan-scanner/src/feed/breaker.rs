//! Circuit breaker for the tick feed.
//!
//! After enough consecutive transport failures the breaker opens and the feed
//! refuses requests until a deadline passes, so a dead or rate-limiting
//! endpoint is not hammered once per symbol per cycle.

use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::warn;

#[derive(Debug)]
struct Inner {
    /// While set, requests are refused until this instant.
    open_until: Option<Instant>,
    consecutive_failures: u32,
}

#[derive(Debug)]
pub struct FeedBreaker {
    inner: Mutex<Inner>,
    cooldown: Duration,
    failure_threshold: u32,
}

impl FeedBreaker {
    pub fn new(cooldown: Duration, failure_threshold: u32) -> Self {
        Self {
            inner: Mutex::new(Inner {
                open_until: None,
                consecutive_failures: 0,
            }),
            cooldown,
            failure_threshold,
        }
    }

    /// Default feed breaker: 60-second cooldown, opens after 5 consecutive
    /// failures (a few scan cycles' worth).
    pub fn default_feed() -> Self {
        Self::new(Duration::from_secs(60), 5)
    }

    /// Whether a request may go out right now. A passed deadline closes the
    /// breaker and resets the failure count.
    pub fn is_allowed(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        match inner.open_until {
            None => true,
            Some(deadline) if Instant::now() >= deadline => {
                inner.open_until = None;
                inner.consecutive_failures = 0;
                true
            }
            Some(_) => false,
        }
    }

    /// A successful fetch resets the failure streak.
    pub fn record_success(&self) {
        self.inner.lock().unwrap().consecutive_failures = 0;
    }

    /// A failed fetch; opens the breaker once the streak hits the threshold.
    pub fn record_failure(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.consecutive_failures += 1;
        if inner.consecutive_failures >= self.failure_threshold && inner.open_until.is_none() {
            warn!(
                failures = inner.consecutive_failures,
                cooldown_secs = self.cooldown.as_secs(),
                "feed breaker opened"
            );
            inner.open_until = Some(Instant::now() + self.cooldown);
        }
    }

    /// Open immediately, regardless of the streak (hard rate-limit response).
    pub fn trip(&self) {
        self.inner.lock().unwrap().open_until = Some(Instant::now() + self.cooldown);
    }

    /// Time until the breaker closes again; zero when already closed.
    pub fn remaining_cooldown(&self) -> Duration {
        match self.inner.lock().unwrap().open_until {
            None => Duration::ZERO,
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let b = FeedBreaker::new(Duration::from_secs(60), 3);
        assert!(b.is_allowed());
        assert_eq!(b.remaining_cooldown(), Duration::ZERO);
    }

    #[test]
    fn opens_after_threshold_failures() {
        let b = FeedBreaker::new(Duration::from_secs(60), 3);
        b.record_failure();
        b.record_failure();
        assert!(b.is_allowed());
        b.record_failure();
        assert!(!b.is_allowed());
        assert!(b.remaining_cooldown() > Duration::ZERO);
    }

    #[test]
    fn success_resets_the_streak() {
        let b = FeedBreaker::new(Duration::from_secs(60), 3);
        b.record_failure();
        b.record_failure();
        b.record_success();
        b.record_failure();
        assert!(b.is_allowed());
    }

    #[test]
    fn trip_opens_and_deadline_closes() {
        let b = FeedBreaker::new(Duration::from_millis(10), 3);
        b.trip();
        assert!(!b.is_allowed());
        std::thread::sleep(Duration::from_millis(15));
        assert!(b.is_allowed());
    }
}
