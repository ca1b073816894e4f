use std::time::Duration;

use frame_tunnel_core::prelude::HostEnvironment;
use tokio::time::Instant;

use crate::easing::ease_in_out_quad;

/// Fraction of `duration` covered by `elapsed`, capped at 1. A zero duration is already complete.
pub fn scroll_progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }

    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

/// Scroll the environment's document from `from` to `to` over `duration`, one step per frame.
///
/// Every scroll scenario goes through here so that they all share the same easing curve and
/// clamping. Completes on the first frame where the elapsed fraction reaches 1 and returns the
/// number of frames it consumed.
pub async fn simulate_scroll(env: &HostEnvironment, from: f64, to: f64, duration: Duration) -> u32 {
    let document = env.document().clone();
    let scheduler = env.frame_scheduler().clone();
    let start = Instant::now();
    let distance = to - from;

    let mut frames = 0;
    loop {
        let frame_at = scheduler.request_frame().await;
        frames += 1;

        let progress = scroll_progress(frame_at.saturating_duration_since(start), duration);
        document.scroll_to(from + distance * ease_in_out_quad(progress));

        if progress >= 1.0 {
            break;
        }
    }

    log::trace!("Scrolled {from} -> {to} over {duration:?} in {frames} frames");
    frames
}
