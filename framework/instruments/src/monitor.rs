use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use frame_tunnel_core::prelude::FrameScheduler;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A sample is taken every this many frames.
pub const MONITOR_SAMPLE_INTERVAL_FRAMES: u64 = 60;

/// Samples retained per session. The oldest sample is evicted first.
pub const MONITOR_MAX_SAMPLES: usize = 10;

#[derive(derive_more::Error, derive_more::Display, Debug, PartialEq, Eq)]
pub enum MonitorError {
    #[display("Monitoring session [{active}] is still running, stop it before starting [{requested}]")]
    AlreadyMonitoring { active: String, requested: String },
    #[display("Monitoring must be started from within a tokio runtime")]
    NoRuntime,
}

struct ActiveSession {
    name: String,
    handle: JoinHandle<()>,
}

type SampleSeries = Arc<Mutex<HashMap<String, VecDeque<f64>>>>;

/// Open ended frame rate monitor for long lived animations.
///
/// Sessions are named and their samples are kept after they stop, but only one frame loop runs at a
/// time. Starting a session while another is running is rejected rather than running two loops that
/// would both be charged for every frame.
#[derive(Default)]
pub struct AnimationPerformanceMonitor {
    metrics: SampleSeries,
    active: Option<ActiveSession>,
}

impl AnimationPerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting frames for `name` on the current tokio runtime.
    pub fn start_monitoring(
        &mut self,
        name: &str,
        scheduler: Arc<dyn FrameScheduler>,
    ) -> Result<(), MonitorError> {
        if let Some(active) = &self.active {
            if !active.handle.is_finished() {
                return Err(MonitorError::AlreadyMonitoring {
                    active: active.name.clone(),
                    requested: name.to_string(),
                });
            }
        }

        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| MonitorError::NoRuntime)?;

        let metrics = self.metrics.clone();
        let session = name.to_string();
        let handle = runtime.spawn(async move {
            let start = Instant::now();
            let mut frame_count: u64 = 0;
            loop {
                let frame_at = scheduler.request_frame().await;
                frame_count += 1;

                if frame_count % MONITOR_SAMPLE_INTERVAL_FRAMES == 0 {
                    let elapsed_ms = frame_at.saturating_duration_since(start).as_secs_f64() * 1000.0;
                    if elapsed_ms > 0.0 {
                        record_sample(&metrics, &session, (frame_count as f64 / elapsed_ms) * 1000.0);
                    }
                }
            }
        });

        log::debug!("Started monitoring session [{name}]");
        self.active = Some(ActiveSession {
            name: name.to_string(),
            handle,
        });

        Ok(())
    }

    /// Cancel the running frame loop, returning the name of the session that was stopped.
    pub fn stop_monitoring(&mut self) -> Option<String> {
        let active = self.active.take()?;
        active.handle.abort();
        log::debug!("Stopped monitoring session [{}]", active.name);

        Some(active.name)
    }

    pub fn active_session(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.name.as_str())
    }

    pub fn get_metrics(&self, name: &str) -> Vec<f64> {
        self.metrics
            .lock()
            .get(name)
            .map(|samples| samples.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Mean of the retained samples for `name`, 0 if none have been recorded.
    pub fn get_average_fps(&self, name: &str) -> f64 {
        let metrics = self.metrics.lock();
        match metrics.get(name) {
            Some(samples) if !samples.is_empty() => {
                samples.iter().sum::<f64>() / samples.len() as f64
            }
            _ => 0.0,
        }
    }
}

impl Drop for AnimationPerformanceMonitor {
    fn drop(&mut self) {
        self.stop_monitoring();
    }
}

fn record_sample(metrics: &SampleSeries, session: &str, fps: f64) {
    let mut metrics = metrics.lock();
    let samples = metrics.entry(session.to_string()).or_default();
    samples.push_back(fps);
    while samples.len() > MONITOR_MAX_SAMPLES {
        samples.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_tunnel_core::prelude::VsyncFrameScheduler;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn samples_every_sixty_frames() {
        let mut monitor = AnimationPerformanceMonitor::new();
        monitor
            .start_monitoring("hero", Arc::new(VsyncFrameScheduler::new(60)))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(2500)).await;
        monitor.stop_monitoring();

        let samples = monitor.get_metrics("hero");
        assert_eq!(2, samples.len());
        for sample in samples {
            assert!((sample - 60.0).abs() < 0.1, "Unexpected sample {sample}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_only_the_most_recent_samples() {
        let mut monitor = AnimationPerformanceMonitor::new();
        monitor
            .start_monitoring("scroll", Arc::new(VsyncFrameScheduler::new(100)))
            .unwrap();

        // 100 Hz gives a sample every 600ms.
        tokio::time::sleep(Duration::from_secs(15)).await;
        monitor.stop_monitoring();

        assert_eq!(MONITOR_MAX_SAMPLES, monitor.get_metrics("scroll").len());
        assert!((monitor.get_average_fps("scroll") - 100.0).abs() < 0.1);
    }

    #[tokio::test(start_paused = true)]
    async fn stopping_ends_sampling() {
        let mut monitor = AnimationPerformanceMonitor::new();
        monitor
            .start_monitoring("about", Arc::new(VsyncFrameScheduler::new(100)))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(1300)).await;

        assert_eq!(Some("about".to_string()), monitor.stop_monitoring());
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(2, monitor.get_metrics("about").len());
        assert_eq!(None, monitor.active_session());
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_a_second_session() {
        let mut monitor = AnimationPerformanceMonitor::new();
        let scheduler = Arc::new(VsyncFrameScheduler::new(60));
        monitor.start_monitoring("first", scheduler.clone()).unwrap();

        let err = monitor.start_monitoring("second", scheduler.clone()).unwrap_err();
        assert_eq!(
            MonitorError::AlreadyMonitoring {
                active: "first".to_string(),
                requested: "second".to_string(),
            },
            err
        );

        monitor.stop_monitoring();
        monitor.start_monitoring("second", scheduler).unwrap();
        assert_eq!(Some("second"), monitor.active_session());
    }

    #[test]
    fn empty_session_averages_zero() {
        let monitor = AnimationPerformanceMonitor::new();

        assert_eq!(0.0, monitor.get_average_fps("never-started"));
        assert!(monitor.get_metrics("never-started").is_empty());
    }

    #[test]
    fn requires_a_runtime() {
        let mut monitor = AnimationPerformanceMonitor::new();

        assert_eq!(
            Err(MonitorError::NoRuntime),
            monitor.start_monitoring("outside", Arc::new(VsyncFrameScheduler::new(60)))
        );
    }
}
