use std::sync::{Arc, Weak};

use frame_tunnel_core::prelude::{
    Document, ElementId, EventHandler, HostEnvironment, PointerEvent, Section, SectionInitializer,
};
use frame_tunnel_instruments::optimizer::{
    AnimationPreset, FAST, HARDWARE_ACCELERATION, HARDWARE_ACCELERATION_RELEASE, HERO_BUTTON,
    HERO_TEXT, MEDIUM, SCROLL_REVEAL, SCROLL_SLIDE, SLOW,
};
use frame_tunnel_instruments::{AnimationCleanup, ANIMATION_DISABLED_SENTINEL};
use parking_lot::Mutex;

use crate::page::PortfolioPage;

/// Transform applied to a card while the pointer is over it.
pub const HOVER_LIFT: &str = "translateY(-4px) translateZ(0)";

struct AnimatedGroup {
    selector: &'static str,
    keyframes: &'static str,
    preset: AnimationPreset,
}

const fn group(
    selector: &'static str,
    keyframes: &'static str,
    preset: AnimationPreset,
) -> AnimatedGroup {
    AnimatedGroup {
        selector,
        keyframes,
        preset,
    }
}

const HERO_GROUPS: &[AnimatedGroup] = &[
    group(".hero-name-char", "char-rise", HERO_TEXT),
    group(".hero-specialty, .hero-summary", "fade-up", MEDIUM),
    group(".hero-cta", "pop-in", HERO_BUTTON),
];
const SKILLS_GROUPS: &[AnimatedGroup] = &[group(".skill-item", "scroll-reveal", SCROLL_REVEAL)];
const ABOUT_GROUPS: &[AnimatedGroup] = &[
    group(".about-card", "scroll-reveal", SCROLL_REVEAL),
    group(".paragraph", "fade-in", SLOW),
    group(".hashtag", "scroll-slide", SCROLL_SLIDE),
];
const EXPERIENCE_GROUPS: &[AnimatedGroup] =
    &[group(".experience-card", "scroll-slide", SCROLL_SLIDE)];

fn animated_groups(section: Section) -> &'static [AnimatedGroup] {
    match section {
        Section::Hero => HERO_GROUPS,
        Section::Skills => SKILLS_GROUPS,
        Section::About => ABOUT_GROUPS,
        Section::Experience => EXPERIENCE_GROUPS,
    }
}

fn hover_selector(section: Section) -> Option<&'static str> {
    match section {
        Section::Skills => Some(".skill-item"),
        Section::Experience => Some(".experience-card"),
        Section::Hero | Section::About => None,
    }
}

/// Build the initializer for one section of `page`.
///
/// Every run starts by cleaning up whatever the previous run registered, then applies either the
/// section's preset animations or, when the environment prefers reduced motion, the disabled
/// sentinel. Hover listeners are attached in both cases; under reduced motion they only toggle
/// hardware acceleration and leave the element in place.
pub fn section_initializer(page: &Arc<PortfolioPage>, section: Section) -> SectionInitializer {
    let page = page.clone();
    let registered: Mutex<Option<AnimationCleanup>> = Mutex::new(None);

    Arc::new(move |environment: &HostEnvironment| -> anyhow::Result<()> {
        let mut registered = registered.lock();
        if let Some(mut previous) = registered.take() {
            previous.cleanup();
        }

        let reduced_motion = environment.prefers_reduced_motion();
        let mut cleanup = AnimationCleanup::new().with_gc_hint(environment.gc_hint().cloned());

        for group in animated_groups(section) {
            for (index, element) in page.query_selector_all(group.selector).into_iter().enumerate() {
                if reduced_motion {
                    page.set_style(element, "animation", ANIMATION_DISABLED_SENTINEL);
                    continue;
                }

                page.set_style(
                    element,
                    "animation",
                    &group.preset.to_css_animation(group.keyframes, index),
                );
                let page = Arc::downgrade(&page);
                cleanup.add_animation(move || {
                    if let Some(page) = page.upgrade() {
                        page.set_style(element, "animation", ANIMATION_DISABLED_SENTINEL);
                    }
                });
            }
        }

        if let Some(selector) = hover_selector(section) {
            let document: Arc<dyn Document> = page.clone();
            let handler = hover_handler(Arc::downgrade(&page), reduced_motion);
            for element in page.query_selector_all(selector) {
                for event in [PointerEvent::Enter, PointerEvent::Leave] {
                    cleanup.add_event_listener(&document, element, event.event_type(), handler.clone());
                }
            }
        }

        log::debug!(
            "Initialized {section} section with {} animations and {} listeners{}",
            cleanup.animation_count(),
            cleanup.listener_count(),
            if reduced_motion { " (reduced motion)" } else { "" }
        );
        *registered = Some(cleanup);

        Ok(())
    })
}

fn hover_handler(page: Weak<PortfolioPage>, reduced_motion: bool) -> EventHandler {
    Arc::new(move |element: ElementId, event: PointerEvent| {
        let Some(page) = page.upgrade() else {
            return;
        };

        match event {
            PointerEvent::Enter => {
                for (property, value) in HARDWARE_ACCELERATION {
                    page.set_style(element, property, value);
                }
                if !reduced_motion {
                    page.set_style(element, "transition", &FAST.to_css_transition("transform"));
                    page.set_style(element, "transform", HOVER_LIFT);
                }
            }
            PointerEvent::Leave => {
                for (property, value) in HARDWARE_ACCELERATION_RELEASE {
                    page.set_style(element, property, value);
                }
                page.set_style(element, "transform", "none");
            }
        }
    })
}
