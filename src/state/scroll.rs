//! Smooth Scroll - Anchor navigation and animated scrolling
//!
//! Manages page scrolling behaviour:
//! - In-page anchors (`href="#id"`) scroll their target to the top,
//!   minus an optional fixed-header offset
//! - Smooth scrolls ease in and out, one step per animation frame
//! - A new smooth scroll cancels the one in flight
//!
//! Scroll offsets are clamped by the page, so targets near the bottom stop at
//! the maximum scroll position.

use spark_signals::{signal, Signal};

use crate::engine::Page;
use crate::pipeline::{Scheduler, TimerHandle};
use crate::types::{ElementId, Millis};

// =============================================================================
// SCROLL CONSTANTS
// =============================================================================

/// Attribute carrying the anchor target.
pub const HREF: &str = "href";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOptions {
    /// Subtracted from the target's top.
    pub header_offset: f32,
    /// Duration of a smooth scroll. 0 jumps.
    pub duration: Millis,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            header_offset: 0.0,
            duration: 400,
        }
    }
}

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Scroll offset that brings `href`'s target to the top.
///
/// `None` for a bare `#`, non-anchor hrefs and unknown ids.
pub fn scroll_target(page: &Page, href: &str, header_offset: f32) -> Option<f32> {
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    let target = page.get_by_id(id)?;
    Some((page.bounds(target).y - header_offset).max(0.0))
}

// =============================================================================
// SMOOTH SCROLL
// =============================================================================

pub struct SmoothScroll {
    anchors: Vec<ElementId>,
    options: ScrollOptions,
    active: Signal<Option<TimerHandle>>,
}

impl SmoothScroll {
    /// Collect every element whose `href` starts with `#`.
    pub fn new(page: &Page, options: ScrollOptions) -> Self {
        Self {
            anchors: page.query_attr(HREF, |href| href.starts_with('#')),
            options,
            active: signal(None),
        }
    }

    pub fn anchors(&self) -> &[ElementId] {
        &self.anchors
    }

    /// Whether a smooth scroll is in flight.
    pub fn is_scrolling(&self, scheduler: &Scheduler) -> bool {
        self.active.get().is_some_and(|h| scheduler.is_pending(h))
    }

    /// Handle a click. Anchor clicks are always consumed, even when the target
    /// does not exist.
    pub fn on_click(&self, page: &mut Page, scheduler: &mut Scheduler, element: ElementId) -> bool {
        if !self.anchors.contains(&element) {
            return false;
        }

        let href = page.attr(element, HREF).unwrap_or_default().to_owned();
        match scroll_target(page, &href, self.options.header_offset) {
            Some(top) => {
                tracing::debug!(%href, top, "anchor scroll");
                self.scroll_to(page, scheduler, top);
            }
            None => tracing::debug!(%href, "anchor target not found"),
        }
        true
    }

    pub fn scroll_to_top(&self, page: &mut Page, scheduler: &mut Scheduler) {
        self.scroll_to(page, scheduler, 0.0);
    }

    /// Smoothly scroll the page to `top`.
    pub fn scroll_to(&self, page: &mut Page, scheduler: &mut Scheduler, top: f32) {
        if let Some(handle) = self.active.get() {
            scheduler.cancel(handle);
            self.active.set(None);
        }

        let from = page.scroll_y();
        let to = top.clamp(0.0, page.max_scroll_y());
        if self.options.duration == 0 || from == to {
            page.set_scroll_y(to);
            return;
        }

        let animation = ScrollAnimation {
            from,
            to,
            start: scheduler.now(),
            duration: self.options.duration,
            active: self.active.clone(),
        };
        animation.next_frame(scheduler);
    }
}

#[derive(Clone)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    start: Millis,
    duration: Millis,
    active: Signal<Option<TimerHandle>>,
}

impl ScrollAnimation {
    fn next_frame(self, scheduler: &mut Scheduler) {
        let active = self.active.clone();
        let handle = scheduler.request_frame(move |page, scheduler| self.step(page, scheduler));
        active.set(Some(handle));
    }

    fn step(self, page: &mut Page, scheduler: &mut Scheduler) {
        let elapsed = scheduler.now().saturating_sub(self.start);
        let t = (elapsed as f32 / self.duration as f32).min(1.0);

        page.set_scroll_y(self.from + (self.to - self.from) * ease_in_out_cubic(t));

        if t < 1.0 {
            self.next_frame(scheduler);
        } else {
            self.active.set(None);
        }
    }
}
