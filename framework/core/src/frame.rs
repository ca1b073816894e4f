use std::time::Duration;

use futures::future::BoxFuture;
use tokio::time::Instant;

/// Refresh rate assumed for a desktop display.
pub const DEFAULT_REFRESH_RATE_HZ: u32 = 60;

/// Resolves with the timestamp of the frame it was scheduled for.
pub type FrameFuture = BoxFuture<'static, Instant>;

/// The host's animation-frame queue.
///
/// Every call schedules exactly one callback. Callers that need a continuous loop request the next
/// frame from inside the previous one, the same way a page chains animation frames.
pub trait FrameScheduler: Send + Sync {
    fn request_frame(&self) -> FrameFuture;

    /// The fixed rate frames are delivered at, if there is one.
    fn refresh_rate_hz(&self) -> Option<u32> {
        None
    }
}

/// Delivers frames on a fixed refresh grid anchored at `origin`.
///
/// Two callers waiting at the same time are released on the same boundary, so independent frame
/// loops interleave on one clock instead of running in parallel.
#[derive(Debug, Clone)]
pub struct VsyncFrameScheduler {
    origin: Instant,
    refresh_rate_hz: u32,
    period: Duration,
}

impl VsyncFrameScheduler {
    pub fn new(refresh_rate_hz: u32) -> Self {
        Self::with_origin(Instant::now(), refresh_rate_hz)
    }

    pub fn with_origin(origin: Instant, refresh_rate_hz: u32) -> Self {
        let refresh_rate_hz = refresh_rate_hz.max(1);
        Self {
            origin,
            refresh_rate_hz,
            period: Duration::from_nanos(1_000_000_000 / u64::from(refresh_rate_hz)),
        }
    }

    /// The first boundary strictly after `now`.
    pub fn next_boundary(&self, now: Instant) -> Instant {
        let period_nanos = self.period.as_nanos().max(1);
        let elapsed_nanos = now.saturating_duration_since(self.origin).as_nanos();
        let ticks = elapsed_nanos / period_nanos + 1;
        let offset = u64::try_from(ticks * period_nanos).unwrap_or(u64::MAX);

        self.origin + Duration::from_nanos(offset)
    }
}

impl Default for VsyncFrameScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_RATE_HZ)
    }
}

impl FrameScheduler for VsyncFrameScheduler {
    fn request_frame(&self) -> FrameFuture {
        let at = self.next_boundary(Instant::now());
        Box::pin(async move {
            tokio::time::sleep_until(at).await;
            at
        })
    }

    fn refresh_rate_hz(&self) -> Option<u32> {
        Some(self.refresh_rate_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_strictly_after_now() {
        let origin = Instant::now();
        let scheduler = VsyncFrameScheduler::with_origin(origin, 50);

        assert_eq!(origin + Duration::from_millis(20), scheduler.next_boundary(origin));
        assert_eq!(
            origin + Duration::from_millis(40),
            scheduler.next_boundary(origin + Duration::from_millis(20))
        );
        assert_eq!(
            origin + Duration::from_millis(40),
            scheduler.next_boundary(origin + Duration::from_millis(25))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_requests_share_a_boundary() {
        let scheduler = VsyncFrameScheduler::new(60);

        let (a, b) = tokio::join!(scheduler.request_frame(), scheduler.request_frame());

        assert_eq!(a, b);
    }

    #[tokio::test(start_paused = true)]
    async fn chained_requests_advance_one_period() {
        let scheduler = VsyncFrameScheduler::new(100);

        let first = scheduler.request_frame().await;
        let second = scheduler.request_frame().await;

        assert_eq!(Duration::from_millis(10), second - first);
    }
}
