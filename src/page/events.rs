//! Event subscription: listeners keyed by target and event type.

use std::collections::HashMap;
use std::rc::Rc;

use super::dom::ElementId;
use super::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    DomContentLoaded,
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Document,
    Element(ElementId),
}

/// An event being dispatched. Listeners may cancel the default action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventType,
    pub target: EventTarget,
    default_prevented: bool,
}

impl Event {
    pub fn new(kind: EventType, target: EventTarget) -> Self {
        Self {
            kind,
            target,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// The element the event was dispatched to, if it was not the document.
    pub fn target_element(&self) -> Option<ElementId> {
        match self.target {
            EventTarget::Element(id) => Some(id),
            EventTarget::Document => None,
        }
    }
}

/// A registered event handler.
pub type Listener = Rc<dyn Fn(&mut Page, &mut Event)>;

#[derive(Default)]
pub(crate) struct Listeners {
    by_target: HashMap<(EventTarget, EventType), Vec<Listener>>,
}

impl Listeners {
    pub(crate) fn add(&mut self, target: EventTarget, kind: EventType, listener: Listener) {
        self.by_target.entry((target, kind)).or_default().push(listener);
    }

    /// Snapshot of the listeners for a target, in registration order.
    pub(crate) fn snapshot(&self, target: EventTarget, kind: EventType) -> Vec<Listener> {
        self.by_target
            .get(&(target, kind))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, target: EventTarget, kind: EventType) -> usize {
        self.by_target.get(&(target, kind)).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("registrations", &self.by_target.len())
            .finish()
    }
}
