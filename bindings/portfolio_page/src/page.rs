use std::collections::HashMap;

use frame_tunnel_core::prelude::{Document, ElementId, EventHandler, PointerEvent, Section};
use parking_lot::Mutex;

use crate::content::SiteContent;

/// Height of the viewport, which the hero fills.
pub const VIEWPORT_HEIGHT: f64 = 900.0;

const SECTION_PADDING: f64 = 160.0;
const SKILL_ROW_HEIGHT: f64 = 96.0;
const EXPERIENCE_CARD_HEIGHT: f64 = 240.0;
const ABOUT_CARD_ROW_HEIGHT: f64 = 180.0;
const PARAGRAPH_HEIGHT: f64 = 120.0;

pub const HERO_NAME_CHAR: &str = "hero-name-char";
pub const HERO_SPECIALTY: &str = "hero-specialty";
pub const HERO_SUMMARY: &str = "hero-summary";
pub const HERO_CTA: &str = "hero-cta";
pub const SKILL_ITEM: &str = "skill-item";
pub const EXPERIENCE_CARD: &str = "experience-card";
pub const ABOUT_CARD: &str = "about-card";
pub const PARAGRAPH: &str = "paragraph";
pub const HASHTAG: &str = "hashtag";

struct Element {
    section: Section,
    class: &'static str,
    style: HashMap<String, String>,
    listeners: Vec<(String, EventHandler)>,
}

struct PageState {
    elements: Vec<Element>,
    scroll_top: f64,
}

/// A headless rendering of the portfolio page.
///
/// Elements are laid out hero, experience, skills, about, which is also the order queries return
/// them in. Only style and listener state is kept per element, there is no layout beyond the
/// section heights that make up the scrollable height.
pub struct PortfolioPage {
    state: Mutex<PageState>,
    section_heights: Vec<(Section, f64)>,
}

impl PortfolioPage {
    pub fn new(content: &SiteContent) -> Self {
        let mut elements = Vec::new();
        let mut push = |section: Section, class: &'static str| {
            elements.push(Element {
                section,
                class,
                style: HashMap::new(),
                listeners: Vec::new(),
            })
        };

        content
            .hero
            .name
            .chars()
            .filter(|c| !c.is_whitespace())
            .for_each(|_| push(Section::Hero, HERO_NAME_CHAR));
        push(Section::Hero, HERO_SPECIALTY);
        push(Section::Hero, HERO_SUMMARY);
        if content.hero.email.is_some() {
            push(Section::Hero, HERO_CTA);
        }

        content
            .experience
            .iter()
            .for_each(|_| push(Section::Experience, EXPERIENCE_CARD));

        content
            .skills
            .all()
            .for_each(|_| push(Section::Skills, SKILL_ITEM));

        content
            .about
            .cards
            .iter()
            .for_each(|_| push(Section::About, ABOUT_CARD));
        let paragraphs = content.about.paragraphs().len();
        (0..paragraphs).for_each(|_| push(Section::About, PARAGRAPH));
        content
            .about
            .hashtags()
            .iter()
            .for_each(|_| push(Section::About, HASHTAG));

        let skill_rows = [&content.skills.row1, &content.skills.row2]
            .iter()
            .filter(|row| !row.is_empty())
            .count();
        let section_heights = vec![
            (Section::Hero, VIEWPORT_HEIGHT),
            (
                Section::Experience,
                SECTION_PADDING + EXPERIENCE_CARD_HEIGHT * content.experience.len() as f64,
            ),
            (
                Section::Skills,
                SECTION_PADDING + SKILL_ROW_HEIGHT * skill_rows as f64,
            ),
            (
                Section::About,
                SECTION_PADDING
                    + ABOUT_CARD_ROW_HEIGHT * content.about.cards.len().div_ceil(2) as f64
                    + PARAGRAPH_HEIGHT * paragraphs as f64,
            ),
        ];

        Self {
            state: Mutex::new(PageState {
                elements,
                scroll_top: 0.0,
            }),
            section_heights,
        }
    }

    /// Set an inline style property. Returns false if the element does not exist.
    pub fn set_style(&self, element: ElementId, property: &str, value: &str) -> bool {
        match self.state.lock().elements.get_mut(element.0) {
            Some(el) => {
                el.style.insert(property.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    pub fn section_height(&self, section: Section) -> f64 {
        self.section_heights
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, height)| *height)
            .unwrap_or_default()
    }

    /// Element count per section and class, in document order of first appearance.
    pub fn inventory(&self) -> Vec<(Section, &'static str, usize)> {
        let state = self.state.lock();
        let mut inventory: Vec<(Section, &'static str, usize)> = Vec::new();
        for el in &state.elements {
            match inventory.iter_mut().find(|(_, class, _)| *class == el.class) {
                Some((_, _, count)) => *count += 1,
                None => inventory.push((el.section, el.class, 1)),
            }
        }

        inventory
    }

    pub fn listener_count(&self) -> usize {
        self.state
            .lock()
            .elements
            .iter()
            .map(|el| el.listeners.len())
            .sum()
    }

    /// Release spare capacity left behind by detached listeners.
    pub fn collect_garbage(&self) {
        let mut state = self.state.lock();
        for el in state.elements.iter_mut() {
            el.listeners.shrink_to_fit();
        }
        log::trace!("Collected garbage for {} elements", state.elements.len());
    }
}

impl Document for PortfolioPage {
    fn scroll_height(&self) -> f64 {
        self.section_heights.iter().map(|(_, height)| height).sum()
    }

    fn scroll_top(&self) -> f64 {
        self.state.lock().scroll_top
    }

    fn scroll_to(&self, top: f64) {
        let max = self.scroll_height();
        self.state.lock().scroll_top = top.clamp(0.0, max);
    }

    fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        let classes = selector
            .split(',')
            .filter_map(|part| part.trim().strip_prefix('.'))
            .filter(|class| !class.is_empty())
            .collect::<Vec<_>>();

        self.state
            .lock()
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| classes.contains(&el.class))
            .map(|(index, _)| ElementId(index))
            .collect()
    }

    fn computed_style(&self, element: ElementId, property: &str) -> Option<String> {
        self.state
            .lock()
            .elements
            .get(element.0)
            .map(|el| el.style.get(property).cloned().unwrap_or_default())
    }

    fn dispatch_event(&self, element: ElementId, event: PointerEvent) {
        // Handlers may style the page, so they must run without the state lock held.
        let handlers = match self.state.lock().elements.get(element.0) {
            Some(el) => el
                .listeners
                .iter()
                .filter(|(event_type, _)| event_type == event.event_type())
                .map(|(_, handler)| handler.clone())
                .collect::<Vec<_>>(),
            None => return,
        };

        for handler in handlers {
            handler(element, event);
        }
    }

    fn add_event_listener(&self, element: ElementId, event_type: &str, handler: EventHandler) {
        match self.state.lock().elements.get_mut(element.0) {
            Some(el) => el.listeners.push((event_type.to_string(), handler)),
            None => log::warn!("Ignoring [{event_type}] listener for missing element {element:?}"),
        }
    }

    fn remove_event_listener(
        &self,
        element: ElementId,
        event_type: &str,
        handler: &EventHandler,
    ) -> bool {
        let mut state = self.state.lock();
        let Some(el) = state.elements.get_mut(element.0) else {
            return false;
        };

        match el
            .listeners
            .iter()
            .position(|(t, h)| t == event_type && std::sync::Arc::ptr_eq(h, handler))
        {
            Some(index) => {
                el.listeners.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn page() -> PortfolioPage {
        PortfolioPage::new(&SiteContent::builtin().unwrap())
    }

    #[test]
    fn renders_an_element_per_content_item() {
        let page = page();

        assert_eq!(
            vec![
                (Section::Hero, HERO_NAME_CHAR, 11),
                (Section::Hero, HERO_SPECIALTY, 1),
                (Section::Hero, HERO_SUMMARY, 1),
                (Section::Hero, HERO_CTA, 1),
                (Section::Experience, EXPERIENCE_CARD, 4),
                (Section::Skills, SKILL_ITEM, 14),
                (Section::About, ABOUT_CARD, 4),
                (Section::About, PARAGRAPH, 2),
                (Section::About, HASHTAG, 5),
            ],
            page.inventory()
        );
    }

    #[test]
    fn scroll_height_is_the_sum_of_sections() {
        let page = page();

        // hero 900, experience 160 + 4 * 240, skills 160 + 2 * 96, about 160 + 2 * 180 + 2 * 120
        assert_eq!(900.0 + 1120.0 + 352.0 + 760.0, page.scroll_height());
    }

    #[test]
    fn scroll_is_clamped() {
        let page = page();

        page.scroll_to(-50.0);
        assert_eq!(0.0, page.scroll_top());

        page.scroll_to(1e9);
        assert_eq!(page.scroll_height(), page.scroll_top());
    }

    #[test]
    fn selectors_match_in_document_order_without_duplicates() {
        let page = page();

        let matched = page.query_selector_all(".hero-summary, .hero-specialty, .hero-summary");
        assert_eq!(2, matched.len());
        assert!(matched[0] < matched[1]);

        assert!(page.query_selector_all("skill-item").is_empty());
    }

    #[test]
    fn unset_style_is_empty_and_missing_element_is_none() {
        let page = page();
        let element = page.query_selector_all(".skill-item")[0];

        assert_eq!(Some(String::new()), page.computed_style(element, "animation"));
        assert!(page.set_style(element, "animation", "none"));
        assert_eq!(Some("none".to_string()), page.computed_style(element, "animation"));

        assert_eq!(None, page.computed_style(ElementId(10_000), "animation"));
        assert!(!page.set_style(ElementId(10_000), "animation", "none"));
    }

    #[test]
    fn events_reach_matching_listeners_only() {
        let page = page();
        let element = page.query_selector_all(".experience-card")[0];
        let calls = Arc::new(AtomicUsize::new(0));
        let handler: EventHandler = {
            let calls = calls.clone();
            Arc::new(move |_: ElementId, _: PointerEvent| {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        };

        page.add_event_listener(element, "mouseenter", handler.clone());
        page.dispatch_event(element, PointerEvent::Enter);
        page.dispatch_event(element, PointerEvent::Leave);
        assert_eq!(1, calls.load(Ordering::SeqCst));

        assert!(!page.remove_event_listener(element, "mouseleave", &handler));
        assert!(page.remove_event_listener(element, "mouseenter", &handler));
        page.dispatch_event(element, PointerEvent::Enter);
        assert_eq!(1, calls.load(Ordering::SeqCst));
        assert_eq!(0, page.listener_count());
    }
}
