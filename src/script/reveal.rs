//! Fade sections in as they scroll into view.
//!
//! Every `<section>` starts hidden and shifted down. The first time one
//! crosses the visibility threshold it is revealed; nothing hides it again.

use crate::page::{
    Document, ElementId, IntersectionEntry, IntersectionObserver, ObserverId, ObserverOptions,
    Page, RootMargin,
};

pub const SECTION_SELECTOR: &str = "section";

/// Fraction of a section that must be visible before it is revealed
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Trigger 50px before the section reaches the bottom edge of the viewport
pub const REVEAL_ROOT_MARGIN: RootMargin = RootMargin {
    top: 0,
    right: 0,
    bottom: -50,
    left: 0,
};

const HIDDEN_OPACITY: &str = "0";
const HIDDEN_TRANSFORM: &str = "translateY(20px)";
const VISIBLE_OPACITY: &str = "1";
const VISIBLE_TRANSFORM: &str = "translateY(0)";
const TRANSITION: &str = "opacity 0.6s ease-out, transform 0.6s ease-out";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Revealed,
}

/// The page's single reveal watcher and the sections it was given.
#[derive(Debug, Clone)]
pub struct ScrollReveal {
    observer: ObserverId,
    sections: Vec<ElementId>,
}

impl ScrollReveal {
    /// Hide every section currently on the page and start watching them.
    pub fn install(page: &mut Page) -> Self {
        let options = ObserverOptions {
            threshold: REVEAL_THRESHOLD,
            root_margin: REVEAL_ROOT_MARGIN,
        };
        let mut observer = IntersectionObserver::new(options, reveal_entries);

        let sections = page.document.query_selector_all(SECTION_SELECTOR);
        for &section in &sections {
            if let Some(element) = page.document.element_mut(section) {
                element.set_style("opacity", HIDDEN_OPACITY);
                element.set_style("transform", HIDDEN_TRANSFORM);
                element.set_style("transition", TRANSITION);
            }
            observer.observe(section);
        }

        tracing::debug!(
            sections = sections.len(),
            threshold = REVEAL_THRESHOLD,
            root_margin = %REVEAL_ROOT_MARGIN,
            "Scroll reveal installed"
        );

        Self {
            observer: page.register_observer(observer),
            sections,
        }
    }

    pub fn observer(&self) -> ObserverId {
        self.observer
    }

    pub fn sections(&self) -> &[ElementId] {
        &self.sections
    }
}

fn reveal_entries(document: &mut Document, entries: &[IntersectionEntry]) {
    for entry in entries.iter().filter(|e| e.is_intersecting) {
        if let Some(element) = document.element_mut(entry.target) {
            element.set_style("opacity", VISIBLE_OPACITY);
            element.set_style("transform", VISIBLE_TRANSFORM);
        }
    }
}

/// Current reveal state of a section, read from its inline style.
pub fn visibility(document: &Document, section: ElementId) -> Visibility {
    match document.element(section).and_then(|e| e.style("opacity")) {
        Some(VISIBLE_OPACITY) => Visibility::Revealed,
        _ => Visibility::Hidden,
    }
}
