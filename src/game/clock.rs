//! Fixed-delay tick scheduling.
//!
//! The clock holds at most one pending deadline. The next tick is scheduled
//! only after the previous one ran, so drift accumulates (fixed delay, not
//! fixed rate). Leaving the running state must cancel the deadline so that a
//! stale tick can't fire after pause or reset.

use std::time::Duration;
use tokio::time::{Instant, sleep_until};

#[derive(Debug, Default)]
pub struct GameClock {
    deadline: Option<Instant>,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next tick `delay` from now, replacing any pending one
    pub fn schedule_in(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    /// Schedule a tick to fire as soon as the loop polls the clock
    pub fn schedule_now(&mut self) {
        self.deadline = Some(Instant::now());
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.deadline.is_some()
    }

    /// Wait for the pending tick and consume it.
    ///
    /// Never resolves while nothing is scheduled. Cancel-safe: dropping the
    /// future before it resolves leaves the deadline in place.
    pub async fn wait(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending::<()>().await,
        }
    }

    /// Reconcile with the engine after a command.
    ///
    /// Entering the running state fires the first tick immediately; any other
    /// state cancels the pending tick.
    pub fn sync(&mut self, running: bool) {
        if !running {
            self.cancel();
        } else if !self.is_scheduled() {
            self.schedule_now();
        }
    }

    /// Reschedule after a tick ran, using the interval in effect after it
    pub fn after_tick(&mut self, running: bool, interval: Duration) {
        if running {
            self.schedule_in(interval);
        } else {
            self.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let mut clock = GameClock::new();
        let start = Instant::now();

        clock.schedule_in(Duration::from_millis(150));
        clock.wait().await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(150));
        assert!(elapsed < Duration::from_millis(160));
        assert!(!clock.is_scheduled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_clock_never_fires() {
        let mut clock = GameClock::new();
        let result = timeout(Duration::from_secs(5), clock.wait()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_tick_does_not_fire() {
        let mut clock = GameClock::new();
        clock.schedule_in(Duration::from_millis(100));
        clock.cancel();

        let result = timeout(Duration::from_secs(1), clock.wait()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_keeps_single_chain() {
        let mut clock = GameClock::new();
        let start = Instant::now();

        // Rapid pause/resume: each resume replaces the previous deadline
        clock.schedule_in(Duration::from_millis(100));
        clock.sync(false);
        clock.sync(true);
        clock.sync(true);

        clock.wait().await;
        assert!(start.elapsed() < Duration::from_millis(100));

        let second = timeout(Duration::from_secs(1), clock.wait()).await;
        assert!(second.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_keeps_deadline() {
        let mut clock = GameClock::new();
        clock.schedule_in(Duration::from_millis(200));

        let early = timeout(Duration::from_millis(50), clock.wait()).await;
        assert!(early.is_err());
        assert!(clock.is_scheduled());

        clock.wait().await;
        assert!(!clock.is_scheduled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_after_tick_uses_current_interval() {
        let mut clock = GameClock::new();
        let start = Instant::now();

        clock.after_tick(true, Duration::from_millis(90));
        assert_eq!(clock.deadline, Some(start + Duration::from_millis(90)));

        clock.after_tick(false, Duration::from_millis(90));
        assert!(!clock.is_scheduled());
    }
}
