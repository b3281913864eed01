//! Mount API - Page initialisation and event routing.
//!
//! [`Showcase::mount`] wires every behaviour against a page, in the order the
//! page script initialised them, and returns the handle the host drives:
//!
//! - [`Showcase::dispatch`] for clicks, hovers, scrolls, resizes and
//!   host-side visibility records
//! - [`Showcase::advance_to`] / [`Showcase::advance_by`] to move time forward
//!
//! Scroll offsets changed by scheduled effects (smooth scrolling) are handled
//! exactly like scroll events, so parallax and reveals follow animated
//! scrolls too.
//!
//! # Example
//!
//! ```ignore
//! use spark_showcase::{PageEvent, Showcase, ShowcaseConfig};
//!
//! let mut showcase = Showcase::mount(page, ShowcaseConfig::default())?;
//!
//! showcase.dispatch(PageEvent::Scroll { top: 900.0 })?;
//! showcase.advance_by(500);
//!
//! let page = showcase.unmount();
//! ```

use crate::config::ShowcaseConfig;
use crate::engine::{Page, Viewport};
use crate::error::Result;
use crate::layout::compute_layout;
use crate::state::{
    is_in_viewport, parallax, CounterAnimation, CounterOptions, CtaButton, Debouncer,
    HoverEffects, ObserverOptions, Parallax, ParallaxOptions, RevealEngine, RevealOptions,
    ScrollOptions, SmoothScroll, TabGroup,
};
use crate::types::{ElementId, Markers, Millis};

use super::events::PageEvent;
use super::scheduler::Scheduler;

// =============================================================================
// Showcase Handle
// =============================================================================

/// A mounted page with all of its behaviours.
pub struct Showcase {
    page: Page,
    scheduler: Scheduler,
    config: ShowcaseConfig,
    reveal: RevealEngine,
    counter: Option<CounterAnimation>,
    tabs: TabGroup,
    feature_tabs: TabGroup,
    parallax: Option<Parallax>,
    hover: HoverEffects,
    cta: Option<CtaButton>,
    anchors: SmoothScroll,
    resize: Debouncer,
    last_scroll: f32,
}

impl Showcase {
    /// Lay the page out and initialise every behaviour.
    ///
    /// The counter starts after its delay and the initial visibility records
    /// are delivered before this returns.
    pub fn mount(mut page: Page, config: ShowcaseConfig) -> Result<Self> {
        config.validate()?;
        compute_layout(&mut page)?;

        let mut scheduler = Scheduler::new(config.frame.interval_ms);

        // Animations: parallax, anchors, hover, call-to-action
        let parallax = Parallax::new(
            &page,
            ParallaxOptions {
                speed: config.parallax.speed,
                fade_rate: config.parallax.fade_rate,
            },
        );
        let anchors = SmoothScroll::new(
            &page,
            ScrollOptions {
                header_offset: config.scroll.header_offset,
                duration: config.scroll.smooth_duration_ms,
            },
        );
        let hover = HoverEffects::new(&page);
        let cta = CtaButton::new(&page, config.cta.press_ms);

        // Counter
        let counter = page.get_by_id(&config.counter.element_id).map(|element| {
            CounterAnimation::new(
                element,
                CounterOptions {
                    target: config.counter.target,
                    duration: config.counter.duration_ms,
                    start_delay: config.counter.start_delay_ms,
                },
            )
        });
        if let Some(counter) = &counter {
            counter.start(&mut scheduler);
        }

        let tabs = TabGroup::design_philosophy(&page);

        // Scroll reveals
        let mut reveal = RevealEngine::new(
            RevealOptions {
                card_stagger: config.reveal.card_stagger_ms,
                timeline_stagger: config.reveal.timeline_stagger_ms,
            },
            ObserverOptions {
                threshold: config.reveal.threshold,
                root_margin: config.reveal.root_margin,
            },
        );
        reveal.observe(page.query(Markers::REVEAL));
        reveal.observe(page.query(Markers::FEATURE_CARD));

        let feature_tabs = TabGroup::features(&page);
        let resize = Debouncer::new(config.resize.debounce_ms, false);

        tracing::info!(
            elements = page.len(),
            observed = reveal.observer().observed().len(),
            counter = counter.is_some(),
            parallax = parallax.is_some(),
            "showcase mounted"
        );

        let last_scroll = page.scroll_y();
        let mut showcase = Self {
            page,
            scheduler,
            config,
            reveal,
            counter,
            tabs,
            feature_tabs,
            parallax,
            hover,
            cta,
            anchors,
            resize,
            last_scroll,
        };

        // Initial visibility notification
        showcase.reveal.poll(&mut showcase.page, &mut showcase.scheduler);
        showcase.flush();

        Ok(showcase)
    }

    /// Tear down: pending effects are discarded, the page is returned.
    pub fn unmount(mut self) -> Page {
        tracing::debug!(pending = self.scheduler.pending(), "showcase unmounted");
        self.scheduler.clear();
        self.page
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn counter(&self) -> Option<&CounterAnimation> {
        self.counter.as_ref()
    }

    pub fn reveal(&self) -> &RevealEngine {
        &self.reveal
    }

    pub fn tabs(&self) -> &TabGroup {
        &self.tabs
    }

    pub fn feature_tabs(&self) -> &TabGroup {
        &self.feature_tabs
    }

    // =========================================================================
    // Event Routing
    // =========================================================================

    /// Route one host event to the behaviours.
    ///
    /// Zero-delay effects it triggers have run when this returns. Only
    /// resizes can fail (relayout).
    pub fn dispatch(&mut self, event: PageEvent) -> Result<()> {
        match event {
            PageEvent::Click(element) => self.on_click(element),
            PageEvent::MouseEnter(element) => {
                self.hover.on_mouse_enter(&mut self.page, element);
            }
            PageEvent::MouseLeave(element) => {
                self.hover.on_mouse_leave(&mut self.page, element);
            }
            PageEvent::Scroll { top } => {
                self.page.set_scroll_y(top);
                self.sync_scroll();
            }
            PageEvent::Resize { width, height } => self.on_resize(width, height)?,
            PageEvent::Intersection(entries) => {
                self.reveal
                    .on_intersections(&mut self.page, &mut self.scheduler, &entries);
            }
        }

        self.flush();
        Ok(())
    }

    fn on_click(&mut self, element: ElementId) {
        let page = &mut self.page;
        let scheduler = &mut self.scheduler;

        // Listeners are independent; an element may match several
        let mut handled = self.tabs.on_click(page, element);
        handled |= self.feature_tabs.on_click(page, element);
        handled |= self.anchors.on_click(page, scheduler, element);
        if let Some(cta) = &self.cta {
            handled |= cta.on_click(page, scheduler, element);
        }

        if !handled {
            tracing::trace!(%element, "click without listener");
        }
    }

    fn on_resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.page.resize_viewport(Viewport::new(width, height));
        compute_layout(&mut self.page)?;
        tracing::debug!(width, height, "viewport resized");

        // Hero height changed; refresh parallax once resizing settles
        let refresh = self
            .parallax
            .as_ref()
            .map(|p| (p.section(), p.content(), self.parallax_options()));
        self.resize.call(&mut self.page, &mut self.scheduler, move |page, _| {
            if let Some((section, content, options)) = refresh {
                parallax::apply(page, section, content, options);
            }
        });

        self.sync_scroll();
        self.reveal.poll(&mut self.page, &mut self.scheduler);
        Ok(())
    }

    fn parallax_options(&self) -> ParallaxOptions {
        ParallaxOptions {
            speed: self.config.parallax.speed,
            fade_rate: self.config.parallax.fade_rate,
        }
    }

    /// React to a scroll offset change, if there was one.
    fn sync_scroll(&mut self) {
        let top = self.page.scroll_y();
        if top == self.last_scroll {
            return;
        }
        self.last_scroll = top;

        if let Some(parallax) = &mut self.parallax {
            parallax.on_scroll(&mut self.scheduler);
        }
        self.reveal.poll(&mut self.page, &mut self.scheduler);
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Run every effect due up to `target`.
    pub fn advance_to(&mut self, target: Millis) {
        while self.scheduler.run_next(&mut self.page, target) {
            self.sync_scroll();
        }
        self.scheduler.advance_to(target, &mut self.page);
    }

    pub fn advance_by(&mut self, delta: Millis) {
        self.advance_to(self.now().saturating_add(delta));
    }

    /// Run zero-delay effects.
    fn flush(&mut self) {
        self.advance_to(self.now());
    }

    // =========================================================================
    // Exposed API
    // =========================================================================

    /// Smoothly scroll back to the top of the page.
    pub fn scroll_to_top(&mut self) {
        self.anchors.scroll_to_top(&mut self.page, &mut self.scheduler);
        self.sync_scroll();
        self.flush();
    }

    /// Run the counter animation now (no-op once it has completed).
    pub fn animate_counter(&mut self) {
        if let Some(counter) = &self.counter {
            counter.animate(&mut self.page, &mut self.scheduler);
        }
        self.flush();
    }

    /// Whether the element is fully inside the viewport.
    pub fn is_in_viewport(&self, element: ElementId) -> bool {
        is_in_viewport(&self.page, element)
    }
}
