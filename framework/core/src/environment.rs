use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::frame::FrameScheduler;
use crate::host::{
    Document, MediaMatcher, MemoryProvider, Section, SectionInitializer, StaticMediaMatcher,
    UnavailableMemory, REDUCED_MOTION_QUERY,
};

/// Asks the host to reclaim memory after a large teardown.
pub type GcHint = Arc<dyn Fn() + Send + Sync>;

/// Everything a scenario may touch on the host, passed explicitly instead of living in globals.
///
/// Patching produces a new environment, the original keeps pointing at the same providers. A
/// scenario that runs against a patched copy therefore has nothing to restore when it finishes,
/// whether it succeeded or not.
#[derive(Clone)]
pub struct HostEnvironment {
    document: Arc<dyn Document>,
    frame_scheduler: Arc<dyn FrameScheduler>,
    media_matcher: Arc<dyn MediaMatcher>,
    memory: Arc<dyn MemoryProvider>,
    initializers: BTreeMap<Section, SectionInitializer>,
    gc_hint: Option<GcHint>,
}

impl HostEnvironment {
    /// An environment with no matching media queries, no memory API and no section initializers.
    pub fn new(document: Arc<dyn Document>, frame_scheduler: Arc<dyn FrameScheduler>) -> Self {
        Self {
            document,
            frame_scheduler,
            media_matcher: Arc::new(StaticMediaMatcher::default()),
            memory: Arc::new(UnavailableMemory),
            initializers: BTreeMap::new(),
            gc_hint: None,
        }
    }

    pub fn with_frame_scheduler(&self, frame_scheduler: Arc<dyn FrameScheduler>) -> Self {
        Self {
            frame_scheduler,
            ..self.clone()
        }
    }

    pub fn with_media_matcher(&self, media_matcher: Arc<dyn MediaMatcher>) -> Self {
        Self {
            media_matcher,
            ..self.clone()
        }
    }

    pub fn with_memory_provider(mut self, memory: Arc<dyn MemoryProvider>) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_initializer(mut self, section: Section, initializer: SectionInitializer) -> Self {
        self.initializers.insert(section, initializer);
        self
    }

    pub fn with_gc_hint(mut self, gc_hint: GcHint) -> Self {
        self.gc_hint = Some(gc_hint);
        self
    }

    pub fn document(&self) -> &Arc<dyn Document> {
        &self.document
    }

    pub fn frame_scheduler(&self) -> &Arc<dyn FrameScheduler> {
        &self.frame_scheduler
    }

    pub fn media_matcher(&self) -> &Arc<dyn MediaMatcher> {
        &self.media_matcher
    }

    pub fn memory(&self) -> &Arc<dyn MemoryProvider> {
        &self.memory
    }

    pub fn gc_hint(&self) -> Option<&GcHint> {
        self.gc_hint.as_ref()
    }

    pub fn initializer(&self, section: Section) -> Option<&SectionInitializer> {
        self.initializers.get(&section)
    }

    pub fn prefers_reduced_motion(&self) -> bool {
        self.media_matcher.matches(REDUCED_MOTION_QUERY)
    }

    /// Invoke every registered section initializer against this environment, in page order.
    ///
    /// Sections without an initializer are skipped. Returns the number of initializers run.
    pub fn run_initializers(&self) -> anyhow::Result<usize> {
        let mut count = 0;
        for section in Section::ALL {
            let Some(initializer) = self.initializer(section) else {
                log::trace!("No initializer registered for section [{section}]");
                continue;
            };

            initializer(self)
                .map_err(|e| e.context(format!("Initializer for section [{section}] failed")))?;
            count += 1;
        }

        Ok(count)
    }
}

impl Debug for HostEnvironment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostEnvironment")
            .field("initializers", &self.initializers.keys().collect::<Vec<_>>())
            .field("prefers_reduced_motion", &self.prefers_reduced_motion())
            .field("gc_hint", &self.gc_hint.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::VsyncFrameScheduler;
    use crate::host::{ElementId, EventHandler, PointerEvent};
    use std::sync::Mutex;

    /// Minimal document for exercising the environment plumbing.
    struct BlankDocument;

    impl Document for BlankDocument {
        fn scroll_height(&self) -> f64 {
            0.0
        }

        fn scroll_top(&self) -> f64 {
            0.0
        }

        fn scroll_to(&self, _top: f64) {}

        fn query_selector_all(&self, _selector: &str) -> Vec<ElementId> {
            Vec::new()
        }

        fn computed_style(&self, _element: ElementId, _property: &str) -> Option<String> {
            None
        }

        fn dispatch_event(&self, _element: ElementId, _event: PointerEvent) {}

        fn add_event_listener(&self, _element: ElementId, _event_type: &str, _handler: EventHandler) {}

        fn remove_event_listener(
            &self,
            _element: ElementId,
            _event_type: &str,
            _handler: &EventHandler,
        ) -> bool {
            false
        }
    }

    fn environment() -> HostEnvironment {
        HostEnvironment::new(
            Arc::new(BlankDocument),
            Arc::new(VsyncFrameScheduler::default()),
        )
    }

    #[test]
    fn patching_leaves_original_untouched() {
        let original = environment();
        let patched = original
            .with_frame_scheduler(Arc::new(VsyncFrameScheduler::new(30)))
            .with_media_matcher(Arc::new(StaticMediaMatcher::new([REDUCED_MOTION_QUERY])));

        assert!(!Arc::ptr_eq(original.frame_scheduler(), patched.frame_scheduler()));
        assert!(patched.prefers_reduced_motion());
        assert!(!original.prefers_reduced_motion());
        assert!(Arc::ptr_eq(original.document(), patched.document()));
    }

    #[test]
    fn initializers_run_in_page_order_and_see_the_calling_environment() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut env = environment();
        for section in [Section::Experience, Section::Hero] {
            let log = log.clone();
            env = env.with_initializer(
                section,
                Arc::new(move |env: &HostEnvironment| -> anyhow::Result<()> {
                    log.lock().unwrap().push(format!("{section}:{}", env.prefers_reduced_motion()));
                    Ok(())
                }),
            );
        }

        let reduced = env.with_media_matcher(Arc::new(StaticMediaMatcher::new([REDUCED_MOTION_QUERY])));
        assert_eq!(2, reduced.run_initializers().unwrap());
        assert_eq!(vec!["hero:true", "experience:true"], *log.lock().unwrap());
    }

    #[test]
    fn initializer_failure_names_the_section() {
        let env = environment().with_initializer(
            Section::About,
            Arc::new(|_: &HostEnvironment| -> anyhow::Result<()> { Err(anyhow::anyhow!("boom")) }),
        );

        let err = env.run_initializers().unwrap_err();
        assert_eq!("Initializer for section [about] failed", err.to_string());
    }
}
