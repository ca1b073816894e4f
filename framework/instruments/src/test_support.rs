use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use frame_tunnel_core::prelude::{
    Document, ElementId, EventHandler, FrameFuture, FrameScheduler, PointerEvent,
};
use parking_lot::Mutex;
use tokio::time::Instant;

#[derive(Default)]
struct FakeElement {
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    listeners: Vec<(String, EventHandler)>,
}

/// In-memory document with class markers, computed styles and listeners.
pub(crate) struct FakeDocument {
    scroll_height: f64,
    scroll_top: Mutex<f64>,
    elements: Mutex<Vec<FakeElement>>,
}

impl FakeDocument {
    pub(crate) fn new(scroll_height: f64) -> Self {
        Self {
            scroll_height,
            scroll_top: Mutex::new(0.0),
            elements: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn add_element(&self, class: &str, animation: &str) -> ElementId {
        let mut elements = self.elements.lock();
        elements.push(FakeElement {
            classes: vec![class.to_string()],
            styles: BTreeMap::from([("animation".to_string(), animation.to_string())]),
            listeners: Vec::new(),
        });
        ElementId(elements.len() - 1)
    }

    pub(crate) fn listener_count(&self, element: ElementId) -> usize {
        self.elements.lock()[element.0].listeners.len()
    }
}

impl Document for FakeDocument {
    fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    fn scroll_top(&self) -> f64 {
        *self.scroll_top.lock()
    }

    fn scroll_to(&self, top: f64) {
        *self.scroll_top.lock() = top;
    }

    fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        let classes = selector
            .split(',')
            .map(|s| s.trim().trim_start_matches('.'))
            .collect::<Vec<_>>();
        self.elements
            .lock()
            .iter()
            .enumerate()
            .filter(|(_, el)| el.classes.iter().any(|c| classes.contains(&c.as_str())))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    fn computed_style(&self, element: ElementId, property: &str) -> Option<String> {
        self.elements
            .lock()
            .get(element.0)
            .and_then(|el| el.styles.get(property).cloned())
    }

    fn dispatch_event(&self, element: ElementId, event: PointerEvent) {
        let handlers = self
            .elements
            .lock()
            .get(element.0)
            .map(|el| {
                el.listeners
                    .iter()
                    .filter(|(t, _)| t == event.event_type())
                    .map(|(_, h)| h.clone())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        for handler in handlers {
            handler(element, event);
        }
    }

    fn add_event_listener(&self, element: ElementId, event_type: &str, handler: EventHandler) {
        if let Some(el) = self.elements.lock().get_mut(element.0) {
            el.listeners.push((event_type.to_string(), handler));
        }
    }

    fn remove_event_listener(
        &self,
        element: ElementId,
        event_type: &str,
        handler: &EventHandler,
    ) -> bool {
        let mut elements = self.elements.lock();
        let Some(el) = elements.get_mut(element.0) else {
            return false;
        };
        let before = el.listeners.len();
        el.listeners
            .retain(|(t, h)| !(t == event_type && Arc::ptr_eq(h, handler)));
        el.listeners.len() != before
    }
}

/// Delivers frames at fixed offsets from its creation, then stops delivering altogether.
pub(crate) struct ScriptedFrameScheduler {
    origin: Instant,
    offsets: Mutex<VecDeque<Duration>>,
}

impl ScriptedFrameScheduler {
    pub(crate) fn new(offsets: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            origin: Instant::now(),
            offsets: Mutex::new(offsets.into_iter().collect()),
        }
    }
}

impl FrameScheduler for ScriptedFrameScheduler {
    fn request_frame(&self) -> FrameFuture {
        match self.offsets.lock().pop_front() {
            Some(offset) => {
                let at = self.origin + offset;
                Box::pin(async move {
                    tokio::time::sleep_until(at).await;
                    at
                })
            }
            None => Box::pin(futures::future::pending()),
        }
    }
}
