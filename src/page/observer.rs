//! Viewport intersection watching.
//!
//! The host reports how much of each element is visible (`0.0..=1.0`, measured
//! against the viewport shrunk or grown by the root margin). An observer only
//! delivers entries for its own targets, and only when a target moved to the
//! other side of the threshold since the previous report.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use super::dom::{Document, ElementId};

/// Viewport margin in pixels, CSS order: top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RootMargin {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: RootMargin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
}

/// Callback invoked with the entries of one report.
pub type ObserverCallback = Rc<dyn Fn(&mut Document, &[IntersectionEntry])>;

/// Handle to an observer owned by a [`Page`](super::Page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) usize);

pub struct IntersectionObserver {
    options: ObserverOptions,
    targets: Vec<ElementId>,
    above: HashSet<ElementId>,
    callback: ObserverCallback,
}

impl IntersectionObserver {
    pub fn new(
        options: ObserverOptions,
        callback: impl Fn(&mut Document, &[IntersectionEntry]) + 'static,
    ) -> Self {
        Self {
            options,
            targets: Vec::new(),
            above: HashSet::new(),
            callback: Rc::new(callback),
        }
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    pub fn observe(&mut self, target: ElementId) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    pub(crate) fn callback(&self) -> ObserverCallback {
        Rc::clone(&self.callback)
    }

    /// Turn visibility samples into entries for threshold crossings.
    pub(crate) fn take_crossings(&mut self, samples: &[(ElementId, f64)]) -> Vec<IntersectionEntry> {
        let mut entries = Vec::new();
        for &(target, ratio) in samples {
            if !self.targets.contains(&target) {
                continue;
            }
            let ratio = ratio.clamp(0.0, 1.0);
            let is_intersecting = ratio > 0.0 && ratio >= self.options.threshold;
            let was_intersecting = self.above.contains(&target);
            if is_intersecting == was_intersecting {
                continue;
            }
            if is_intersecting {
                self.above.insert(target);
            } else {
                self.above.remove(&target);
            }
            entries.push(IntersectionEntry {
                target,
                intersection_ratio: ratio,
                is_intersecting,
            });
        }
        entries
    }
}

impl fmt::Debug for IntersectionObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntersectionObserver")
            .field("options", &self.options)
            .field("targets", &self.targets)
            .finish()
    }
}
