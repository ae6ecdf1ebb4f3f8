//! Page model the script runs against.
//!
//! `Page` owns the document, the event listeners and the intersection
//! observers. Everything is single-threaded: handlers run to completion when
//! the host dispatches an event, and receive `&mut Page` so they can register
//! further listeners or mutate the document.

pub mod dom;
pub mod events;
pub mod observer;

use std::rc::Rc;

pub use dom::{
    Document, Element, ElementId, Location, ScrollBehavior, ScrollBlock, ScrollIntoViewOptions,
    ScrollRequest,
};
pub use events::{Event, EventTarget, EventType, Listener};
pub use observer::{
    IntersectionEntry, IntersectionObserver, ObserverCallback, ObserverId, ObserverOptions,
    RootMargin,
};

use events::Listeners;

#[derive(Debug)]
pub struct Page {
    pub document: Document,
    listeners: Listeners,
    observers: Vec<IntersectionObserver>,
    ready_fired: bool,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            listeners: Listeners::default(),
            observers: Vec::new(),
            ready_fired: false,
        }
    }

    pub fn add_event_listener(
        &mut self,
        target: EventTarget,
        kind: EventType,
        listener: impl Fn(&mut Page, &mut Event) + 'static,
    ) {
        self.listeners.add(target, kind, Rc::new(listener));
    }

    pub fn listener_count(&self, target: EventTarget, kind: EventType) -> usize {
        self.listeners.count(target, kind)
    }

    /// Run every listener registered for `target`/`kind`, in registration order.
    ///
    /// Listeners added while dispatching are not invoked for this event.
    pub fn dispatch(&mut self, target: EventTarget, kind: EventType) -> Event {
        let mut event = Event::new(kind, target);
        for listener in self.listeners.snapshot(target, kind) {
            listener(self, &mut event);
        }
        event
    }

    /// Deliver the document-ready signal. Returns `false` if it was already delivered.
    pub fn dispatch_ready(&mut self) -> bool {
        if self.ready_fired {
            return false;
        }
        self.ready_fired = true;
        self.dispatch(EventTarget::Document, EventType::DomContentLoaded);
        true
    }

    /// Click an element: dispatch, then run the default action unless a listener prevented it.
    ///
    /// The default action of an anchor whose `href` is a fragment is a jump to that fragment.
    pub fn click(&mut self, element: ElementId) -> Event {
        let event = self.dispatch(EventTarget::Element(element), EventType::Click);
        if !event.default_prevented() {
            let href = self
                .document
                .element(element)
                .filter(|e| e.tag() == "a")
                .and_then(|e| e.attribute("href"));
            if let Some(fragment) = href.filter(|h| h.starts_with('#')) {
                self.document.set_hash(&fragment);
            }
        }
        event
    }

    /// Take ownership of an observer for the lifetime of the page.
    pub fn register_observer(&mut self, observer: IntersectionObserver) -> ObserverId {
        self.observers.push(observer);
        ObserverId(self.observers.len() - 1)
    }

    pub fn observer(&self, id: ObserverId) -> Option<&IntersectionObserver> {
        self.observers.get(id.0)
    }

    /// Report visibility ratios to one observer; its callback runs once if any target crossed.
    pub fn report_intersections(&mut self, id: ObserverId, samples: &[(ElementId, f64)]) {
        let Some(observer) = self.observers.get_mut(id.0) else {
            return;
        };
        let entries = observer.take_crossings(samples);
        if entries.is_empty() {
            return;
        }
        let callback = observer.callback();
        callback(&mut self.document, &entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_ready_is_delivered_once() {
        let mut page = Page::new(Document::new("localhost"));
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        page.add_event_listener(EventTarget::Document, EventType::DomContentLoaded, move |_, _| {
            seen.set(seen.get() + 1);
        });
        assert!(page.dispatch_ready());
        assert!(!page.dispatch_ready());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_click_default_action_jumps_to_fragment() {
        let mut doc = Document::new("localhost");
        let body = doc.body();
        let link = doc.append(body, Element::new("a").with_attr("href", "#security"));
        let mut page = Page::new(doc);

        let event = page.click(link);
        assert!(!event.default_prevented());
        assert_eq!(page.document.location().hash, "#security");
    }

    #[test]
    fn test_prevented_click_keeps_location() {
        let mut doc = Document::new("localhost");
        let body = doc.body();
        let link = doc.append(body, Element::new("a").with_attr("href", "#security"));
        let mut page = Page::new(doc);
        page.add_event_listener(EventTarget::Element(link), EventType::Click, |_, event| {
            event.prevent_default();
        });

        let event = page.click(link);
        assert!(event.default_prevented());
        assert_eq!(page.document.location().hash, "");
    }

    #[test]
    fn test_listeners_added_during_dispatch_wait_for_next_event() {
        let mut page = Page::new(Document::new("localhost"));
        let body = page.document.body();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        page.add_event_listener(EventTarget::Element(body), EventType::Click, move |page, _| {
            let seen = Rc::clone(&seen);
            page.add_event_listener(EventTarget::Element(body), EventType::Click, move |_, _| {
                seen.set(seen.get() + 1);
            });
        });
        page.click(body);
        assert_eq!(calls.get(), 0);
        page.click(body);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_unknown_observer_is_ignored() {
        let mut page = Page::new(Document::new("localhost"));
        let body = page.document.body();
        page.report_intersections(ObserverId(3), &[(body, 1.0)]);
        assert!(page.observer(ObserverId(3)).is_none());
    }
}
