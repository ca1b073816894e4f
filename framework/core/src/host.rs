use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use frame_tunnel_summary_model::MemorySnapshot;

use crate::environment::HostEnvironment;

/// The media query a page checks before it starts any decorative animation.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Opaque reference to an element in a [Document].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// Synthetic pointer events the harness can dispatch at an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
}

impl PointerEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            PointerEvent::Enter => "mouseenter",
            PointerEvent::Leave => "mouseleave",
        }
    }
}

/// A listener attached to an element. Listener identity is the `Arc` allocation, the same handler
/// must be passed back to [Document::remove_event_listener] to detach it.
pub type EventHandler = Arc<dyn Fn(ElementId, PointerEvent) + Send + Sync>;

/// The parts of a rendered page that the harness drives or inspects.
///
/// Elements are located by class marker only. Selectors are a comma separated list of class
/// selectors such as `.hero-specialty, .hero-summary`; results are in document order without
/// duplicates.
pub trait Document: Send + Sync {
    /// Total scrollable height of the page in pixels.
    fn scroll_height(&self) -> f64;

    fn scroll_top(&self) -> f64;

    fn scroll_to(&self, top: f64);

    fn query_selector_all(&self, selector: &str) -> Vec<ElementId>;

    /// The computed value of a style property, `None` if the element does not exist.
    fn computed_style(&self, element: ElementId, property: &str) -> Option<String>;

    fn dispatch_event(&self, element: ElementId, event: PointerEvent);

    fn add_event_listener(&self, element: ElementId, event_type: &str, handler: EventHandler);

    /// Returns true if a matching listener was found and detached.
    fn remove_event_listener(
        &self,
        element: ElementId,
        event_type: &str,
        handler: &EventHandler,
    ) -> bool;
}

/// Evaluates media queries for the page.
pub trait MediaMatcher: Send + Sync {
    fn matches(&self, query: &str) -> bool;
}

/// Matches exactly the queries it was configured with.
#[derive(Debug, Default, Clone)]
pub struct StaticMediaMatcher {
    matching: HashSet<String>,
}

impl StaticMediaMatcher {
    pub fn new<I, S>(matching: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            matching: matching.into_iter().map(Into::into).collect(),
        }
    }
}

impl MediaMatcher for StaticMediaMatcher {
    fn matches(&self, query: &str) -> bool {
        self.matching.contains(query)
    }
}

/// Result of probing the host for heap usage.
///
/// Keeping `Unavailable` distinct from a zero reading means "no data" is never confused with
/// "nothing used" until a caller explicitly chooses to degrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryReading {
    Available(MemorySnapshot),
    Unavailable,
}

impl MemoryReading {
    /// Collapse into a snapshot, using the all-zero snapshot when the capability is missing.
    pub fn unwrap_or_zero(self) -> MemorySnapshot {
        match self {
            MemoryReading::Available(snapshot) => snapshot,
            MemoryReading::Unavailable => MemorySnapshot::default(),
        }
    }
}

pub trait MemoryProvider: Send + Sync {
    fn read(&self) -> MemoryReading;
}

/// A host without any memory introspection.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableMemory;

impl MemoryProvider for UnavailableMemory {
    fn read(&self) -> MemoryReading {
        MemoryReading::Unavailable
    }
}

/// Content sections of the page that expose an animation initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Hero,
    Skills,
    About,
    Experience,
}

impl Section {
    /// Initialization order used by the page.
    pub const ALL: [Section; 4] = [
        Section::Hero,
        Section::Skills,
        Section::About,
        Section::Experience,
    ];
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Hero => "hero",
            Section::Skills => "skills",
            Section::About => "about",
            Section::Experience => "experience",
        };
        f.write_str(name)
    }
}

/// (Re)starts the animations of one section, reading preferences from the environment it is given.
pub type SectionInitializer = Arc<dyn Fn(&HostEnvironment) -> anyhow::Result<()> + Send + Sync>;
