use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use frame_tunnel_core::prelude::FrameScheduler;
use tokio::time::Instant;

/// Length of the frame counting window. The raw count over this window is the FPS estimate.
pub const FPS_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Count the frames delivered strictly inside `window`, measured from the moment this is called.
///
/// The first frame at or past the end of the window closes it and is not counted. If the scheduler
/// stops delivering frames this never completes.
pub async fn count_frames(scheduler: &dyn FrameScheduler, window: Duration) -> u32 {
    let start = Instant::now();
    let mut frames = 0;
    loop {
        let frame_at = scheduler.request_frame().await;
        if frame_at.saturating_duration_since(start) >= window {
            return frames;
        }
        frames += 1;
    }
}

/// Estimate the frame rate while `action` runs, over the default one second window.
///
/// See [measure_fps_during_window].
pub async fn measure_fps_during<F>(
    scheduler: Arc<dyn FrameScheduler>,
    action: F,
) -> anyhow::Result<Option<u32>>
where
    F: Future<Output = anyhow::Result<()>>,
{
    measure_fps_during_window(scheduler, FPS_SAMPLE_WINDOW, action).await
}

/// Count frames for `window` while `action` runs on the same task.
///
/// The window opens when this is called, not when the action starts doing work, so an action with
/// slow startup is under-counted. After the action settles there is a trailing wait of one window
/// so that the count is not cut short.
///
/// Returns `None` when the window had still not closed by the end of the trailing wait, which only
/// happens if the frame source stalled. Errors from the action are returned as is.
pub async fn measure_fps_during_window<F>(
    scheduler: Arc<dyn FrameScheduler>,
    window: Duration,
    action: F,
) -> anyhow::Result<Option<u32>>
where
    F: Future<Output = anyhow::Result<()>>,
{
    let counter = count_frames(scheduler.as_ref(), window);
    let settled = async {
        action.await?;
        tokio::time::sleep(window).await;
        anyhow::Ok(())
    };
    tokio::pin!(counter);
    tokio::pin!(settled);

    let mut fps = None;
    loop {
        tokio::select! {
            biased;

            frames = &mut counter, if fps.is_none() => {
                fps = Some(frames);
            }
            result = &mut settled => {
                result?;
                break;
            }
        }
    }

    if fps.is_none() {
        log::warn!("Frame source stalled, no frame closed the {window:?} sampling window");
    }

    Ok(fps)
}
