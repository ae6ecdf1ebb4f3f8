//! Navigation link highlighting with smooth in-page scrolling.

use std::rc::Rc;

use crate::page::{
    Document, ElementId, EventTarget, EventType, Page, ScrollBehavior, ScrollBlock,
    ScrollIntoViewOptions,
};

pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const ACTIVE_CLASS: &str = "active";

const SCROLL_OPTIONS: ScrollIntoViewOptions = ScrollIntoViewOptions {
    behavior: ScrollBehavior::Smooth,
    block: ScrollBlock::Start,
};

/// Attach a click handler to every navigation link present now.
///
/// Links added to the page later are not wired. Returns the links that were.
pub fn setup_navigation(page: &mut Page) -> Rc<[ElementId]> {
    let links: Rc<[ElementId]> = page.document.query_selector_all(NAV_LINK_SELECTOR).into();

    for &link in links.iter() {
        let group = Rc::clone(&links);
        page.add_event_listener(EventTarget::Element(link), EventType::Click, move |page, event| {
            event.prevent_default();
            let Some(clicked) = event.target_element() else {
                return;
            };
            activate(&mut page.document, &group, clicked);
            scroll_to_target(&mut page.document, clicked);
        });
    }

    tracing::debug!(links = links.len(), "Navigation links wired");
    links
}

/// Clear the active marker from every link in `group`, then set it on `link`.
fn activate(document: &mut Document, group: &[ElementId], link: ElementId) {
    for &other in group {
        if let Some(element) = document.element_mut(other) {
            element.remove_class(ACTIVE_CLASS);
        }
    }
    if let Some(element) = document.element_mut(link) {
        element.add_class(ACTIVE_CLASS);
    }
}

fn scroll_to_target(document: &mut Document, link: ElementId) {
    let Some(href) = document.element(link).and_then(|e| e.attribute("href")) else {
        return;
    };
    match document.query_selector(&href) {
        Some(section) => document.scroll_into_view(section, SCROLL_OPTIONS),
        None => tracing::debug!(href = %href, "Navigation target not found"),
    }
}
