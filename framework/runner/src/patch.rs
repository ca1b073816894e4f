use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use frame_tunnel_core::prelude::{
    FrameFuture, FrameScheduler, HostEnvironment, MediaMatcher, REDUCED_MOTION_QUERY,
};
use tokio::time::Instant;

/// Fallback frame delay for a low-end device, about 30 frames per second on its own.
pub const LOW_END_FRAME_DELAY: Duration = Duration::from_millis(32);

/// A change to the host that a scenario runs under.
///
/// Patches never modify the environment they are applied to. The runner's environment stays as it
/// was built, so there is nothing to restore once a patched scenario finishes or fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentPatch {
    /// The user asked the host to minimize motion.
    ReducedMotion,
    /// Every other frame is delivered by a slow fallback timer instead of the display.
    ThrottledFrames { fallback_delay: Duration },
}

impl EnvironmentPatch {
    pub fn low_end_device() -> Self {
        EnvironmentPatch::ThrottledFrames {
            fallback_delay: LOW_END_FRAME_DELAY,
        }
    }

    /// Build a patched copy of `environment`.
    ///
    /// Each call creates fresh patch state, so two copies patched from the same environment do not
    /// affect each other.
    pub fn apply(&self, environment: &HostEnvironment) -> HostEnvironment {
        match self {
            EnvironmentPatch::ReducedMotion => {
                environment.with_media_matcher(Arc::new(ReducedMotionMatcher))
            }
            EnvironmentPatch::ThrottledFrames { fallback_delay } => {
                environment.with_frame_scheduler(Arc::new(ThrottledFrameScheduler::new(
                    environment.frame_scheduler().clone(),
                    *fallback_delay,
                )))
            }
        }
    }
}

/// Matches the reduced motion preference and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReducedMotionMatcher;

impl MediaMatcher for ReducedMotionMatcher {
    fn matches(&self, query: &str) -> bool {
        query == REDUCED_MOTION_QUERY
    }
}

/// Alternates between a fallback timer and the native scheduler.
///
/// Calls are numbered from 1 across every caller. Odd calls resolve after `fallback_delay`, even
/// calls are passed through to the native scheduler.
pub struct ThrottledFrameScheduler {
    native: Arc<dyn FrameScheduler>,
    fallback_delay: Duration,
    calls: AtomicU64,
}

impl ThrottledFrameScheduler {
    pub fn new(native: Arc<dyn FrameScheduler>, fallback_delay: Duration) -> Self {
        Self {
            native,
            fallback_delay,
            calls: AtomicU64::new(0),
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl FrameScheduler for ThrottledFrameScheduler {
    fn request_frame(&self) -> FrameFuture {
        let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        if call % 2 == 1 {
            let delay = self.fallback_delay;
            Box::pin(async move {
                tokio::time::sleep(delay).await;
                Instant::now()
            })
        } else {
            self.native.request_frame()
        }
    }
}
