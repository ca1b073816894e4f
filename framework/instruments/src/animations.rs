use frame_tunnel_core::prelude::Document;
use frame_tunnel_summary_model::AnimationsDisabled;

/// Computed `animation` value of an element whose animation has been switched off.
pub const ANIMATION_DISABLED_SENTINEL: &str = "none";

pub const HERO_ANIMATED_SELECTOR: &str = ".hero-name-char, .hero-specialty, .hero-summary";
pub const SKILLS_ANIMATED_SELECTOR: &str = ".skill-item";
pub const ABOUT_ANIMATED_SELECTOR: &str = ".about-card, .paragraph, .hashtag";

/// True only if every element matching `selector` reports the disabled sentinel.
///
/// One animated element fails the whole group. A selector that matches nothing passes.
pub fn group_animations_disabled(document: &dyn Document, selector: &str) -> bool {
    document.query_selector_all(selector).into_iter().all(|element| {
        document.computed_style(element, "animation").as_deref()
            == Some(ANIMATION_DISABLED_SENTINEL)
    })
}

/// Check the hero, skills and about groups for reduced motion compliance.
pub fn check_animations_disabled(document: &dyn Document) -> AnimationsDisabled {
    AnimationsDisabled {
        hero: group_animations_disabled(document, HERO_ANIMATED_SELECTOR),
        skills: group_animations_disabled(document, SKILLS_ANIMATED_SELECTOR),
        about: group_animations_disabled(document, ABOUT_ANIMATED_SELECTOR),
    }
}
