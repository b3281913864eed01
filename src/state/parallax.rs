//! Parallax - Hero content drifts and fades while the hero scrolls away
//!
//! Scroll events only request a frame; a newer scroll cancels the pending
//! request, so at most one update runs per frame and it always sees the latest
//! offset. Once the hero has fully scrolled past, the last values stay.

use crate::engine::Page;
use crate::pipeline::{Scheduler, TimerHandle};
use crate::types::{ElementId, Markers, Transform};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxOptions {
    /// Content offset per scrolled pixel.
    pub speed: f32,
    /// Opacity lost per hero height scrolled.
    pub fade_rate: f32,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            speed: 0.5,
            fade_rate: 1.5,
        }
    }
}

pub struct Parallax {
    section: ElementId,
    content: ElementId,
    options: ParallaxOptions,
    pending: Option<TimerHandle>,
}

impl Parallax {
    /// `None` unless the page has both a hero section and hero content.
    pub fn new(page: &Page, options: ParallaxOptions) -> Option<Self> {
        let section = page.query(Markers::HERO_SECTION).first().copied()?;
        let content = page.query(Markers::HERO_CONTENT).first().copied()?;

        Some(Self {
            section,
            content,
            options,
            pending: None,
        })
    }

    pub fn section(&self) -> ElementId {
        self.section
    }

    pub fn content(&self) -> ElementId {
        self.content
    }

    /// Whether a frame update is waiting to run.
    pub fn is_pending(&self, scheduler: &Scheduler) -> bool {
        self.pending.is_some_and(|h| scheduler.is_pending(h))
    }

    /// Coalesce a scroll into the next animation frame.
    pub fn on_scroll(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }

        let (section, content, options) = (self.section, self.content, self.options);
        self.pending = Some(scheduler.request_frame(move |page, _| {
            apply(page, section, content, options);
        }));
    }
}

/// One parallax update against the current scroll offset.
///
/// Returns `false` when the hero is already out of range.
pub fn apply(page: &mut Page, section: ElementId, content: ElementId, options: ParallaxOptions) -> bool {
    let scrolled = page.scroll_y();
    let hero_height = page.bounds(section).height;

    if scrolled >= hero_height {
        return false;
    }

    let translate_y = scrolled * options.speed;
    let opacity = (1.0 - (scrolled / hero_height) * options.fade_rate).max(0.0);

    page.update_style(content, |style| {
        style.transform = Transform::Translate3d(0.0, translate_y, 0.0);
        style.opacity = Some(opacity);
    });
    true
}
