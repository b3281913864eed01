//! Viewport Observer - Visibility change notifications
//!
//! Tracks a set of elements and reports when their visibility relative to the
//! viewport changes, like an `IntersectionObserver`:
//! - the root is the viewport in document space, grown by `root_margin`
//!   (negative margins shrink it)
//! - `intersection_ratio` is the visible fraction of the element's area
//! - an element intersects once the ratio reaches `threshold`
//!
//! Records are batched: one `take_records` call returns every observed element
//! whose state changed since the last call, in observation order. The first
//! call after `observe` always reports the element (initial notification).

use crate::engine::Page;
use crate::types::{ElementId, Margins, Millis, Rect};

// =============================================================================
// TYPES
// =============================================================================

/// Observer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f32,
    pub root_margin: Margins,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: Margins::bottom(-50.0),
        }
    }
}

/// One visibility notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub intersection_ratio: f32,
    /// Element bounds at the time of the check.
    pub bounds: Rect,
    pub time: Millis,
}

impl IntersectionEntry {
    /// Synthetic entry, for hosts that detect visibility themselves.
    pub fn new(target: ElementId, is_intersecting: bool) -> Self {
        Self {
            target,
            is_intersecting,
            intersection_ratio: if is_intersecting { 1.0 } else { 0.0 },
            bounds: Rect::default(),
            time: 0,
        }
    }
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Fraction of `bounds` inside `root`.
///
/// Zero-area elements count as fully visible when they sit inside the root.
pub fn intersection_ratio(bounds: &Rect, root: &Rect) -> f32 {
    let Some(overlap) = bounds.intersection(root) else {
        return 0.0;
    };

    let area = bounds.area();
    if area <= 0.0 {
        return if root.contains(bounds) { 1.0 } else { 0.0 };
    }
    (overlap.area() / area).clamp(0.0, 1.0)
}

/// Whether the element box lies fully inside the viewport (no margins).
pub fn is_in_viewport(page: &Page, id: ElementId) -> bool {
    page.contains(id) && page.viewport_rect().contains(&page.bounds(id))
}

// =============================================================================
// OBSERVER
// =============================================================================

struct Observation {
    target: ElementId,
    /// Last reported state; `None` until the initial notification.
    last: Option<bool>,
}

pub struct ViewportObserver {
    options: ObserverOptions,
    observations: Vec<Observation>,
}

impl ViewportObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            observations: Vec::new(),
        }
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    /// Start tracking an element. Observing twice is a no-op.
    pub fn observe(&mut self, target: ElementId) {
        if !self.is_observing(target) {
            self.observations.push(Observation { target, last: None });
        }
    }

    pub fn unobserve(&mut self, target: ElementId) {
        self.observations.retain(|o| o.target != target);
    }

    pub fn is_observing(&self, target: ElementId) -> bool {
        self.observations.iter().any(|o| o.target == target)
    }

    pub fn observed(&self) -> Vec<ElementId> {
        self.observations.iter().map(|o| o.target).collect()
    }

    /// The root rectangle intersections are measured against.
    pub fn root_rect(&self, page: &Page) -> Rect {
        page.viewport_rect().expand(&self.options.root_margin)
    }

    /// Measure one element against the current viewport.
    pub fn measure(&self, page: &Page, target: ElementId, time: Millis) -> IntersectionEntry {
        measure_with(&self.options, page, target, time)
    }

    /// Collect entries for every element whose state changed.
    pub fn take_records(&mut self, page: &Page, time: Millis) -> Vec<IntersectionEntry> {
        let options = self.options;
        let mut records = Vec::new();

        for observation in &mut self.observations {
            if !page.contains(observation.target) {
                continue;
            }

            let entry = measure_with(&options, page, observation.target, time);
            if observation.last != Some(entry.is_intersecting) {
                observation.last = Some(entry.is_intersecting);
                records.push(entry);
            }
        }

        records
    }
}

fn measure_with(
    options: &ObserverOptions,
    page: &Page,
    target: ElementId,
    time: Millis,
) -> IntersectionEntry {
    let bounds = page.bounds(target);
    let root = page.viewport_rect().expand(&options.root_margin);
    let ratio = intersection_ratio(&bounds, &root);

    IntersectionEntry {
        target,
        is_intersecting: ratio > 0.0 && ratio >= options.threshold,
        intersection_ratio: ratio,
        bounds,
        time,
    }
}

impl Default for ViewportObserver {
    fn default() -> Self {
        Self::new(ObserverOptions::default())
    }
}
