//! Fixed-interval dispatch gate.

use std::time::Duration;

use tokio::time::Instant;

/// Spaces consecutive dispatches at least `1 / rate` seconds apart.
///
/// Unlike a token bucket, no credit accumulates while idle, so the gate never
/// lets a burst through. The first dispatch passes immediately.
#[derive(Debug)]
pub struct Throttle {
    interval: Option<Duration>,
    last_dispatch: Option<Instant>,
}

impl Throttle {
    /// Creates a gate admitting `per_second` dispatches per second.
    /// A rate of 0 disables throttling.
    pub fn new(per_second: u32) -> Self {
        let interval = (per_second > 0).then(|| Duration::from_secs(1) / per_second);
        Self {
            interval,
            last_dispatch: None,
        }
    }

    /// Minimum spacing between dispatches, if throttling is enabled.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Waits until the next dispatch is allowed and records it.
    pub async fn wait(&mut self) {
        if let (Some(interval), Some(last)) = (self.interval, self.last_dispatch) {
            tokio::time::sleep_until(last + interval).await;
        }
        self.last_dispatch = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_disables_throttle() {
        assert_eq!(Throttle::new(0).interval(), None);
    }

    #[test]
    fn test_interval_from_rate() {
        assert_eq!(Throttle::new(4).interval(), Some(Duration::from_millis(250)));
        assert_eq!(Throttle::new(1).interval(), Some(Duration::from_secs(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_dispatch_is_immediate() {
        let mut throttle = Throttle::new(1);
        let start = Instant::now();
        throttle.wait().await;
        assert_eq!(Instant::now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_dispatches_are_spaced() {
        let mut throttle = Throttle::new(10);
        let mut stamps = Vec::new();
        for _ in 0..5 {
            throttle.wait().await;
            stamps.push(Instant::now());
        }
        for pair in stamps.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(100));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_burst_after_idle() {
        let mut throttle = Throttle::new(2);
        throttle.wait().await;
        tokio::time::sleep(Duration::from_secs(10)).await;

        // The idle gap allows one immediate dispatch, not a burst.
        let before = Instant::now();
        throttle.wait().await;
        throttle.wait().await;
        assert!(Instant::now() - before >= Duration::from_millis(500));
    }
}
