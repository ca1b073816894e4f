use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use frame_tunnel_core::prelude::{Document, ElementId, EventHandler, GcHint};

struct ListenerBinding {
    document: Arc<dyn Document>,
    element: ElementId,
    event_type: String,
    handler: EventHandler,
}

/// Registry of everything an animation controller has to undo when it is torn down.
///
/// Kill callbacks are consumed when they run, so each one fires at most once. After
/// [AnimationCleanup::cleanup] the registry is empty and a second call does nothing besides the
/// optional GC hint. Teardown only happens through an explicit call: dropping a registry leaves
/// its animations running and its listeners attached.
#[derive(Default)]
pub struct AnimationCleanup {
    animations: Vec<Box<dyn FnOnce() + Send>>,
    event_listeners: Vec<ListenerBinding>,
    gc_hint: Option<GcHint>,
}

impl AnimationCleanup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gc_hint(mut self, gc_hint: Option<GcHint>) -> Self {
        self.gc_hint = gc_hint;
        self
    }

    pub fn add_animation(&mut self, kill: impl FnOnce() + Send + 'static) {
        self.animations.push(Box::new(kill));
    }

    /// Attach `handler` now and remember the binding so it can be detached later.
    pub fn add_event_listener(
        &mut self,
        document: &Arc<dyn Document>,
        element: ElementId,
        event_type: &str,
        handler: EventHandler,
    ) {
        document.add_event_listener(element, event_type, handler.clone());
        self.event_listeners.push(ListenerBinding {
            document: document.clone(),
            element,
            event_type: event_type.to_string(),
            handler,
        });
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    pub fn listener_count(&self) -> usize {
        self.event_listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty() && self.event_listeners.is_empty()
    }

    /// Kill every animation in registration order, then detach every listener.
    pub fn cleanup(&mut self) {
        for kill in self.animations.drain(..) {
            kill();
        }

        for binding in self.event_listeners.drain(..) {
            if !binding.document.remove_event_listener(
                binding.element,
                &binding.event_type,
                &binding.handler,
            ) {
                log::debug!(
                    "Listener for [{}] on {:?} was already detached",
                    binding.event_type,
                    binding.element
                );
            }
        }

        if let Some(gc_hint) = &self.gc_hint {
            gc_hint();
        }
    }
}

impl Debug for AnimationCleanup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationCleanup")
            .field("animations", &self.animations.len())
            .field("event_listeners", &self.event_listeners.len())
            .field("gc_hint", &self.gc_hint.is_some())
            .finish()
    }
}
