//! Reveal Engine - Scroll-triggered reveal with staggered groups
//!
//! Watches marked elements for viewport entry and applies the one-way
//! `REVEALED` class:
//! - plain elements (`REVEAL`) reveal as soon as they intersect
//! - feature cards (`FEATURE_CARD`) reveal after `position × card_stagger`,
//!   where position is the card's index among the cards of its parent
//! - timeline containers (`DESIGN_PROCESS`) start every `TIMELINE_STEP`
//!   inside them at `index × timeline_stagger`, regardless of each step's
//!   own visibility
//!
//! Non-intersecting events are ignored: nothing is ever unrevealed. Each card
//! computes its own delay when its event arrives, so cards entering out of
//! order reveal in scheduling order. Within one trigger, delays strictly grow
//! with the index.
//!
//! # Example
//!
//! ```ignore
//! use spark_showcase::state::reveal::RevealEngine;
//!
//! let mut engine = RevealEngine::new(RevealOptions::default(), ObserverOptions::default());
//! engine.observe(page.query(Markers::REVEAL));
//! engine.observe(page.query(Markers::FEATURE_CARD));
//!
//! // On scroll
//! engine.poll(&mut page, &mut scheduler);
//! ```

use std::collections::HashSet;

use crate::engine::Page;
use crate::pipeline::{Scheduler, TimerHandle};
use crate::types::{Classes, ElementId, Markers, Millis, PlayState};

use super::viewport::{IntersectionEntry, ObserverOptions, ViewportObserver};

// =============================================================================
// OPTIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealOptions {
    /// Delay step between cards of one group.
    pub card_stagger: Millis,
    /// Delay step between timeline steps.
    pub timeline_stagger: Millis,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            card_stagger: 150,
            timeline_stagger: 200,
        }
    }
}

// =============================================================================
// ENGINE
// =============================================================================

pub struct RevealEngine {
    options: RevealOptions,
    observer: ViewportObserver,
    /// Cards with a reveal already scheduled.
    scheduled: HashSet<ElementId>,
    /// Timeline containers whose steps were already started.
    started: HashSet<ElementId>,
}

impl RevealEngine {
    pub fn new(options: RevealOptions, observer: ObserverOptions) -> Self {
        Self {
            options,
            observer: ViewportObserver::new(observer),
            scheduled: HashSet::new(),
            started: HashSet::new(),
        }
    }

    pub fn options(&self) -> RevealOptions {
        self.options
    }

    pub fn observer(&self) -> &ViewportObserver {
        &self.observer
    }

    /// Register elements for visibility tracking.
    pub fn observe(&mut self, elements: impl IntoIterator<Item = ElementId>) {
        for id in elements {
            self.observer.observe(id);
        }
    }

    /// Collect pending visibility changes and handle them.
    pub fn poll(&mut self, page: &mut Page, scheduler: &mut Scheduler) {
        let records = self.observer.take_records(page, scheduler.now());
        if !records.is_empty() {
            self.on_intersections(page, scheduler, &records);
        }
    }

    /// Handle a batch of visibility notifications, in order.
    pub fn on_intersections(
        &mut self,
        page: &mut Page,
        scheduler: &mut Scheduler,
        entries: &[IntersectionEntry],
    ) {
        for entry in entries {
            self.on_intersection(page, scheduler, entry);
        }
    }

    /// Handle one visibility notification.
    ///
    /// Returns the handles of any effects it scheduled.
    pub fn on_intersection(
        &mut self,
        page: &mut Page,
        scheduler: &mut Scheduler,
        entry: &IntersectionEntry,
    ) -> Vec<TimerHandle> {
        if !entry.is_intersecting {
            return Vec::new();
        }

        let target = entry.target;
        let markers = page.markers(target);
        let mut handles = Vec::new();

        if markers.contains(Markers::FEATURE_CARD) {
            handles.extend(self.schedule_card(page, scheduler, target));
        } else if markers.contains(Markers::REVEAL) {
            page.add_class(target, Classes::REVEALED);
        }

        if markers.contains(Markers::DESIGN_PROCESS) {
            handles.extend(self.start_timeline(page, scheduler, target));
        }

        handles
    }

    fn schedule_card(
        &mut self,
        page: &Page,
        scheduler: &mut Scheduler,
        card: ElementId,
    ) -> Option<TimerHandle> {
        if page.has_class(card, Classes::REVEALED) || !self.scheduled.insert(card) {
            return None;
        }

        let position = card_position(page, card);
        let delay = (position as Millis).saturating_mul(self.options.card_stagger);
        tracing::debug!(%card, position, delay, "scheduling card reveal");

        Some(scheduler.schedule_after(delay, move |page, _| {
            page.add_class(card, Classes::REVEALED);
        }))
    }

    fn start_timeline(
        &mut self,
        page: &Page,
        scheduler: &mut Scheduler,
        container: ElementId,
    ) -> Vec<TimerHandle> {
        if !self.started.insert(container) {
            return Vec::new();
        }

        let steps = page.descendants_with(container, Markers::TIMELINE_STEP);
        tracing::debug!(%container, steps = steps.len(), "starting timeline");

        steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| {
                let delay = (index as Millis).saturating_mul(self.options.timeline_stagger);
                scheduler.schedule_after(delay, move |page, _| {
                    page.update_style(step, |style| {
                        style.animation_play_state = PlayState::Running;
                    });
                })
            })
            .collect()
    }
}

impl Default for RevealEngine {
    fn default() -> Self {
        Self::new(RevealOptions::default(), ObserverOptions::default())
    }
}

/// Index of a card among the cards of its parent, in document order.
pub fn card_position(page: &Page, card: ElementId) -> usize {
    let Some(parent) = page.parent(card) else {
        return 0;
    };
    page.descendants_with(parent, Markers::FEATURE_CARD)
        .iter()
        .position(|&id| id == card)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ElementSpec, Viewport};
    use crate::types::Markers;

    struct Fixture {
        page: Page,
        scheduler: Scheduler,
        engine: RevealEngine,
        plain: ElementId,
        cards: Vec<ElementId>,
        timeline: ElementId,
        steps: Vec<ElementId>,
    }

    fn setup() -> Fixture {
        let mut page = Page::new(Viewport::new(1000.0, 600.0));
        let plain = page.append(page.root(), ElementSpec::new().marker(Markers::REVEAL));

        let grid = page.append(page.root(), ElementSpec::new().row());
        let cards = (0..3)
            .map(|_| page.append(grid, ElementSpec::new().marker(Markers::FEATURE_CARD)))
            .collect();

        let timeline = page.append(
            page.root(),
            ElementSpec::new().marker(Markers::REVEAL | Markers::DESIGN_PROCESS),
        );
        let steps = (0..4)
            .map(|_| page.append(timeline, ElementSpec::new().marker(Markers::TIMELINE_STEP)))
            .collect();

        Fixture {
            page,
            scheduler: Scheduler::new(16),
            engine: RevealEngine::default(),
            plain,
            cards,
            timeline,
            steps,
        }
    }

    fn hit(target: ElementId, is_intersecting: bool, f: &mut Fixture) -> Vec<TimerHandle> {
        let entry = IntersectionEntry::new(target, is_intersecting);
        f.engine.on_intersection(&mut f.page, &mut f.scheduler, &entry)
    }

    fn revealed(f: &Fixture, id: ElementId) -> bool {
        f.page.has_class(id, Classes::REVEALED)
    }

    fn running(f: &Fixture, id: ElementId) -> bool {
        f.page.style(id).animation_play_state == PlayState::Running
    }

    #[test]
    fn test_plain_reveals_immediately() {
        let mut f = setup();
        let handles = hit(f.plain, true, &mut f);

        assert!(handles.is_empty());
        assert!(revealed(&f, f.plain));
    }

    #[test]
    fn test_non_intersecting_ignored() {
        let mut f = setup();
        hit(f.plain, false, &mut f);
        let card = f.cards[1];
        hit(card, false, &mut f);

        assert!(!revealed(&f, f.plain));
        assert_eq!(f.scheduler.pending(), 0);
    }

    #[test]
    fn test_reveal_is_one_way() {
        let mut f = setup();
        hit(f.plain, true, &mut f);
        hit(f.plain, false, &mut f);
        hit(f.plain, false, &mut f);

        assert!(revealed(&f, f.plain));
    }

    #[test]
    fn test_repeat_trigger_is_noop() {
        let mut f = setup();
        hit(f.plain, true, &mut f);
        let classes = f.page.classes(f.plain);
        hit(f.plain, true, &mut f);

        assert_eq!(f.page.classes(f.plain), classes);

        let card = f.cards[2];
        assert_eq!(hit(card, true, &mut f).len(), 1);
        assert!(hit(card, true, &mut f).is_empty());
        assert_eq!(f.scheduler.pending(), 1);
    }

    #[test]
    fn test_card_delays_follow_position() {
        let mut f = setup();
        let cards = f.cards.clone();

        let dues: Vec<Millis> = cards
            .iter()
            .flat_map(|&card| hit(card, true, &mut f))
            .map(|h| h.due())
            .collect();

        assert_eq!(dues, vec![0, 150, 300]);
    }

    #[test]
    fn test_card_group_scenario() {
        let mut f = setup();
        let cards = f.cards.clone();
        for &card in &cards {
            hit(card, true, &mut f);
        }

        f.scheduler.run_due(&mut f.page);
        assert!(revealed(&f, cards[0]));
        assert!(!revealed(&f, cards[1]));

        f.scheduler.advance_to(149, &mut f.page);
        assert!(!revealed(&f, cards[1]));
        f.scheduler.advance_to(150, &mut f.page);
        assert!(revealed(&f, cards[1]));
        assert!(!revealed(&f, cards[2]));

        f.scheduler.advance_to(300, &mut f.page);
        assert!(revealed(&f, cards[2]));
    }

    #[test]
    fn test_cards_out_of_order_use_own_trigger_time() {
        let mut f = setup();
        let cards = f.cards.clone();

        // Last card intersects first, first card 500ms later
        hit(cards[2], true, &mut f);
        f.scheduler.advance_to(500, &mut f.page);
        assert!(revealed(&f, cards[2]));

        let handles = hit(cards[0], true, &mut f);
        assert_eq!(handles[0].due(), 500);
    }

    #[test]
    fn test_card_position_ignores_other_siblings() {
        let mut page = Page::new(Viewport::default());
        let grid = page.append(page.root(), ElementSpec::new());
        let _heading = page.append(grid, ElementSpec::new());
        let first = page.append(grid, ElementSpec::new().marker(Markers::FEATURE_CARD));
        let second = page.append(grid, ElementSpec::new().marker(Markers::FEATURE_CARD));

        assert_eq!(card_position(&page, first), 0);
        assert_eq!(card_position(&page, second), 1);
    }

    #[test]
    fn test_card_position_is_per_grid() {
        let mut page = Page::new(Viewport::new(1000.0, 600.0));
        let first_grid = page.append(page.root(), ElementSpec::new().row());
        let a = (0..3)
            .map(|_| page.append(first_grid, ElementSpec::new().marker(Markers::FEATURE_CARD)))
            .collect::<Vec<_>>();
        let second_grid = page.append(page.root(), ElementSpec::new().row());
        let b = (0..2)
            .map(|_| page.append(second_grid, ElementSpec::new().marker(Markers::FEATURE_CARD)))
            .collect::<Vec<_>>();

        assert_eq!(card_position(&page, a[2]), 2);
        assert_eq!(card_position(&page, b[0]), 0);
        assert_eq!(card_position(&page, b[1]), 1);

        let mut scheduler = Scheduler::default();
        let mut engine = RevealEngine::default();
        let handles = engine.on_intersection(&mut page, &mut scheduler, &IntersectionEntry::new(b[0], true));
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].due(), 0);

        // Only the triggered card of the second grid is scheduled
        scheduler.advance_to(1000, &mut page);
        assert!(page.has_class(b[0], Classes::REVEALED));
        assert!(!page.has_class(b[1], Classes::REVEALED));
        assert!(a.iter().all(|&card| !page.has_class(card, Classes::REVEALED)));
    }

    #[test]
    fn test_huge_stagger_keeps_index_order() {
        let mut f = setup();
        f.engine = RevealEngine::new(
            RevealOptions {
                card_stagger: Millis::MAX / 2,
                timeline_stagger: Millis::MAX / 2 + 1,
            },
            ObserverOptions::default(),
        );

        let handles = hit(f.timeline, true, &mut f);
        assert_eq!(handles.len(), 4);
        assert_eq!(handles[0].due(), 0);
        assert!(handles.windows(2).all(|w| w[0].due() <= w[1].due() && w[0] < w[1]));

        let cards = f.cards.clone();
        let dues: Vec<Millis> = cards
            .iter()
            .flat_map(|&card| hit(card, true, &mut f))
            .map(|h| h.due())
            .collect();
        assert_eq!(dues, vec![0, Millis::MAX / 2, Millis::MAX - 1]);

        // Saturated steps still run in index order
        f.scheduler.advance_to(Millis::MAX, &mut f.page);
        assert!(f.steps.iter().all(|&step| running(&f, step)));
    }

    #[test]
    fn test_timeline_scenario() {
        let mut f = setup();
        f.scheduler.advance_to(1000, &mut f.page);

        let handles = hit(f.timeline, true, &mut f);
        let dues: Vec<Millis> = handles.iter().map(|h| h.due()).collect();
        assert_eq!(dues, vec![1000, 1200, 1400, 1600]);

        // The container itself is a plain reveal too
        assert!(revealed(&f, f.timeline));

        let steps = f.steps.clone();
        f.scheduler.run_due(&mut f.page);
        assert!(running(&f, steps[0]));
        assert!(!running(&f, steps[1]));

        f.scheduler.advance_to(1200, &mut f.page);
        assert!(running(&f, steps[1]));
        f.scheduler.advance_to(1400, &mut f.page);
        assert!(running(&f, steps[2]));
        assert!(!running(&f, steps[3]));
        f.scheduler.advance_to(1600, &mut f.page);
        assert!(running(&f, steps[3]));
    }

    #[test]
    fn test_timeline_starts_once() {
        let mut f = setup();
        assert_eq!(hit(f.timeline, true, &mut f).len(), 4);
        assert!(hit(f.timeline, true, &mut f).is_empty());
    }

    #[test]
    fn test_empty_timeline_and_missing_elements() {
        let mut page = Page::new(Viewport::default());
        let lonely = page.append(page.root(), ElementSpec::new().marker(Markers::DESIGN_PROCESS));
        let mut scheduler = Scheduler::default();
        let mut engine = RevealEngine::default();

        let handles =
            engine.on_intersection(&mut page, &mut scheduler, &IntersectionEntry::new(lonely, true));
        assert!(handles.is_empty());

        let ghost = IntersectionEntry::new(ElementId(77), true);
        assert!(engine.on_intersection(&mut page, &mut scheduler, &ghost).is_empty());

        engine.observe(page.query(Markers::REVEAL));
        engine.poll(&mut page, &mut scheduler);
        assert!(engine.observer().observed().is_empty());
    }

    #[test]
    fn test_custom_stagger() {
        let mut f = setup();
        f.engine = RevealEngine::new(
            RevealOptions { card_stagger: 40, timeline_stagger: 70 },
            ObserverOptions::default(),
        );

        let card = f.cards[2];
        assert_eq!(hit(card, true, &mut f)[0].due(), 80);

        let dues: Vec<Millis> = hit(f.timeline, true, &mut f).iter().map(|h| h.due()).collect();
        assert_eq!(dues, vec![0, 70, 140, 210]);
    }
}
