mod animations;
mod cleanup;
mod easing;
mod fps;
mod memory;
mod monitor;
pub mod optimizer;
mod report;
mod scroll;
#[cfg(test)]
mod test_support;

pub use animations::{
    check_animations_disabled, group_animations_disabled, ABOUT_ANIMATED_SELECTOR,
    ANIMATION_DISABLED_SENTINEL, HERO_ANIMATED_SELECTOR, SKILLS_ANIMATED_SELECTOR,
};
pub use cleanup::AnimationCleanup;
pub use easing::ease_in_out_quad;
pub use fps::{count_frames, measure_fps_during, measure_fps_during_window, FPS_SAMPLE_WINDOW};
pub use memory::{measure_memory_usage, ProcessMemoryProvider};
pub use monitor::{
    AnimationPerformanceMonitor, MonitorError, MONITOR_MAX_SAMPLES, MONITOR_SAMPLE_INTERVAL_FRAMES,
};
pub use report::{
    generate_recommendations, render_summary, JsonReportCollector, NoopReportCollector,
    ReportCollector, ReportConfig, Reporter, SummaryReportCollector,
};
pub use scroll::{scroll_progress, simulate_scroll};
