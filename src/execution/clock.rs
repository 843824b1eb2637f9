/*!
 * Simulation Clock
 * Suspension points for CPU occupation and I/O waits.
 *
 * `TokioClock` sleeps for real; `VirtualClock` only advances a counter and
 * yields, so tests run deterministically with no wall-clock delay.
 */

use futures::future::BoxFuture;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Source of simulated time
pub trait Clock: Send + Sync {
    /// Suspend the caller for `duration` of simulated time
    fn suspend(&self, duration: Duration) -> BoxFuture<'static, ()>;

    /// Simulated time elapsed since the clock was created
    fn elapsed(&self) -> Duration;
}

/// Wall-clock time backed by tokio timers
pub struct TokioClock {
    started: tokio::time::Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            started: tokio::time::Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn suspend(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Simulated time that advances instantly
#[derive(Clone, Default)]
pub struct VirtualClock {
    now_micros: Arc<AtomicU64>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for VirtualClock {
    fn suspend(&self, duration: Duration) -> BoxFuture<'static, ()> {
        self.now_micros
            .fetch_add(duration.as_micros() as u64, Ordering::SeqCst);
        // Still a real suspension point, so other tasks can interleave
        Box::pin(tokio::task::yield_now())
    }

    fn elapsed(&self) -> Duration {
        Duration::from_micros(self.now_micros.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_virtual_clock_advances_without_sleeping() {
        let clock = VirtualClock::new();
        let started = std::time::Instant::now();

        clock.suspend(Duration::from_secs(3)).await;
        clock.suspend(Duration::from_millis(500)).await;

        assert_eq!(clock.elapsed(), Duration::from_millis(3500));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_sleeps() {
        let clock = TokioClock::new();
        clock.suspend(Duration::from_secs(2)).await;
        assert!(clock.elapsed() >= Duration::from_secs(2));
    }
}
