//! Animation presets shared by the page and the harness.
//!
//! These keep the page's animations on compositor friendly properties so that the scenarios
//! measure scheduling rather than layout cost.

use std::ops::ControlFlow;
use std::time::Duration;

use frame_tunnel_core::prelude::FrameScheduler;
use tokio::time::Instant;

/// Style properties that promote an element to its own compositor layer.
pub const HARDWARE_ACCELERATION: [(&str, &str); 4] = [
    ("transform", "translateZ(0)"),
    ("will-change", "transform, opacity"),
    ("backface-visibility", "hidden"),
    ("perspective", "1000px"),
];

/// Style properties that release the layer again so its GPU memory can be reclaimed.
pub const HARDWARE_ACCELERATION_RELEASE: [(&str, &str); 3] = [
    ("will-change", "auto"),
    ("backface-visibility", "visible"),
    ("perspective", "none"),
];

/// CSS-native easing curves.
pub mod eases {
    pub const POWER2_OUT: &str = "cubic-bezier(0.25, 0.46, 0.45, 0.94)";
    pub const BACK_OUT: &str = "cubic-bezier(0.175, 0.885, 0.32, 1.275)";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationPreset {
    pub duration: Duration,
    pub ease: &'static str,
    /// Extra delay per element when a preset is applied to a list.
    pub stagger: Option<Duration>,
}

impl AnimationPreset {
    const fn new(duration_ms: u64, ease: &'static str) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            ease,
            stagger: None,
        }
    }

    const fn staggered(duration_ms: u64, ease: &'static str, stagger_ms: u64) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            ease,
            stagger: Some(Duration::from_millis(stagger_ms)),
        }
    }

    /// Render as a CSS `animation` shorthand for the `index`-th element of a list.
    pub fn to_css_animation(&self, keyframes: &str, index: usize) -> String {
        let delay = self
            .stagger
            .map(|stagger| stagger.as_millis() * index as u128)
            .unwrap_or_default();

        format!(
            "{keyframes} {}ms {} {delay}ms both",
            self.duration.as_millis(),
            self.ease
        )
    }

    /// Render as a CSS `transition` for a single property, for state changes such as hover.
    pub fn to_css_transition(&self, property: &str) -> String {
        format!("{property} {}ms {}", self.duration.as_millis(), self.ease)
    }
}

pub const FAST: AnimationPreset = AnimationPreset::new(300, eases::POWER2_OUT);
pub const MEDIUM: AnimationPreset = AnimationPreset::new(500, eases::POWER2_OUT);
pub const SLOW: AnimationPreset = AnimationPreset::new(800, eases::POWER2_OUT);

/// Hero text, tuned for first paint.
pub const HERO_TEXT: AnimationPreset = AnimationPreset::new(600, eases::BACK_OUT);
pub const HERO_BUTTON: AnimationPreset = AnimationPreset::new(400, eases::BACK_OUT);

/// Scroll triggered reveals.
pub const SCROLL_REVEAL: AnimationPreset = AnimationPreset::staggered(500, eases::POWER2_OUT, 50);
pub const SCROLL_SLIDE: AnimationPreset = AnimationPreset::new(600, eases::POWER2_OUT);

/// Run `op` two frames from now, once the frame in flight has committed its layout.
///
/// Grouping style writes this way keeps them out of the frame that is currently being produced.
pub async fn batch_dom_operations<T>(scheduler: &dyn FrameScheduler, op: impl FnOnce() -> T) -> T {
    scheduler.request_frame().await;
    scheduler.request_frame().await;
    op()
}

/// Drive `callback` from the frame loop, but at most `fps` times a second.
///
/// The first frame always fires. Later frames are skipped until at least `1 / fps` has passed
/// since the last call. The loop runs until `callback` breaks, or until the future is dropped,
/// and returns how many times the callback ran.
pub async fn throttled_frames(
    scheduler: &dyn FrameScheduler,
    fps: u32,
    mut callback: impl FnMut(Instant) -> ControlFlow<()>,
) -> u32 {
    let interval = Duration::from_secs(1) / fps.max(1);
    let mut last_call: Option<Instant> = None;
    let mut calls = 0;

    loop {
        let frame_at = scheduler.request_frame().await;
        if last_call.is_some_and(|last| frame_at.saturating_duration_since(last) < interval) {
            continue;
        }

        last_call = Some(frame_at);
        calls += 1;
        if callback(frame_at).is_break() {
            return calls;
        }
    }
}
