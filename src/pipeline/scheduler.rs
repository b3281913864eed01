//! Scheduler - Virtual-time timers and animation frames.
//!
//! The single "run this once after N ms" primitive every behaviour uses,
//! plus frame requests (`requestAnimationFrame` equivalent). Time only moves
//! when the host advances it, so tests are deterministic and never sleep.
//!
//! # Pattern
//!
//! - Effects run at `now + delay`; equal due times run in scheduling order
//! - Every schedule returns a [`TimerHandle`] usable for cancellation
//! - A running effect receives the page and the scheduler, so it can
//!   re-schedule itself (frame loops)
//!
//! # Example
//!
//! ```ignore
//! use spark_showcase::pipeline::Scheduler;
//!
//! let mut scheduler = Scheduler::new(16);
//! let handle = scheduler.schedule_after(150, move |page, _| {
//!     page.add_class(card, Classes::REVEALED);
//! });
//!
//! scheduler.advance_by(150, &mut page); // card revealed
//! scheduler.cancel(handle);             // false, already fired
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::engine::Page;
use crate::types::Millis;

/// A scheduled effect.
pub type Effect = Box<dyn FnOnce(&mut Page, &mut Scheduler)>;

/// Cancellation handle for a scheduled effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle {
    due: Millis,
    seq: u64,
}

impl TimerHandle {
    /// Time at which the effect fires.
    pub fn due(&self) -> Millis {
        self.due
    }
}

pub struct Scheduler {
    now: Millis,
    next_seq: u64,
    frame_interval: Millis,
    queue: BTreeMap<(Millis, u64), Effect>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now", &self.now)
            .field("frame_interval", &self.frame_interval)
            .field("pending", &self.queue.len())
            .finish()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(16)
    }
}

impl Scheduler {
    /// Create a scheduler at time 0. A zero frame interval is bumped to 1.
    pub fn new(frame_interval: Millis) -> Self {
        Self {
            now: 0,
            next_seq: 0,
            frame_interval: frame_interval.max(1),
            queue: BTreeMap::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn frame_interval(&self) -> Millis {
        self.frame_interval
    }

    /// Number of effects waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.queue.contains_key(&(handle.due, handle.seq))
    }

    /// Due time of the earliest pending effect.
    pub fn next_due(&self) -> Option<Millis> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    // =========================================================================
    // SCHEDULING
    // =========================================================================

    /// Run `effect` once, `delay` ms from now.
    pub fn schedule_after<F>(&mut self, delay: Millis, effect: F) -> TimerHandle
    where
        F: FnOnce(&mut Page, &mut Scheduler) + 'static,
    {
        let due = self.now.saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;

        self.queue.insert((due, seq), Box::new(effect));
        TimerHandle { due, seq }
    }

    /// Run `effect` on the next animation frame.
    pub fn request_frame<F>(&mut self, effect: F) -> TimerHandle
    where
        F: FnOnce(&mut Page, &mut Scheduler) + 'static,
    {
        self.schedule_after(self.frame_interval, effect)
    }

    /// Cancel a pending effect.
    ///
    /// Returns `false` if it already ran or was cancelled before.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.queue.remove(&(handle.due, handle.seq)).is_some()
    }

    /// Drop every pending effect (page teardown).
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    // =========================================================================
    // TIME
    // =========================================================================

    /// Run the earliest pending effect if it is due at or before `until`.
    ///
    /// Moves the clock to the effect's due time. Returns `true` if one ran.
    pub fn run_next(&mut self, page: &mut Page, until: Millis) -> bool {
        let Some(entry) = self.queue.first_entry() else {
            return false;
        };
        let (due, _) = *entry.key();
        if due > until {
            return false;
        }

        let effect = entry.remove();
        self.now = self.now.max(due);
        effect(page, self);
        true
    }

    /// Run every effect due up to `target`, then set the clock to `target`.
    ///
    /// Effects scheduled while advancing run too if they fall in the window.
    /// The clock never moves backwards.
    pub fn advance_to(&mut self, target: Millis, page: &mut Page) {
        while self.run_next(page, target) {}
        self.now = self.now.max(target);
    }

    pub fn advance_by(&mut self, delta: Millis, page: &mut Page) {
        self.advance_to(self.now.saturating_add(delta), page);
    }

    /// Run zero-delay effects scheduled for the current instant.
    pub fn run_due(&mut self, page: &mut Page) {
        self.advance_to(self.now, page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::engine::Viewport;

    fn setup() -> (Page, Scheduler) {
        (Page::new(Viewport::default()), Scheduler::new(16))
    }

    fn recorder() -> Rc<RefCell<Vec<(&'static str, Millis)>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn test_effects_run_at_due_time() {
        let (mut page, mut scheduler) = setup();
        let log = recorder();

        let l = log.clone();
        scheduler.schedule_after(100, move |_, s| l.borrow_mut().push(("a", s.now())));

        scheduler.advance_by(99, &mut page);
        assert!(log.borrow().is_empty());

        scheduler.advance_by(1, &mut page);
        assert_eq!(*log.borrow(), vec![("a", 100)]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_order_by_due_then_schedule_order() {
        let (mut page, mut scheduler) = setup();
        let log = recorder();

        for (name, delay) in [("late", 300), ("first", 0), ("mid-a", 150), ("mid-b", 150)] {
            let l = log.clone();
            scheduler.schedule_after(delay, move |_, s| l.borrow_mut().push((name, s.now())));
        }

        scheduler.advance_to(1000, &mut page);
        assert_eq!(
            *log.borrow(),
            vec![("first", 0), ("mid-a", 150), ("mid-b", 150), ("late", 300)]
        );
        assert_eq!(scheduler.now(), 1000);
    }

    #[test]
    fn test_cancel() {
        let (mut page, mut scheduler) = setup();
        let log = recorder();

        let l = log.clone();
        let handle = scheduler.schedule_after(50, move |_, s| l.borrow_mut().push(("x", s.now())));

        assert!(scheduler.is_pending(handle));
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));

        scheduler.advance_by(100, &mut page);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_cancel_after_fire_returns_false() {
        let (mut page, mut scheduler) = setup();
        let handle = scheduler.schedule_after(10, |_, _| {});

        scheduler.advance_by(10, &mut page);
        assert!(!scheduler.cancel(handle));
    }

    #[test]
    fn test_frame_loop_reschedules() {
        let (mut page, mut scheduler) = setup();
        let log = recorder();

        fn tick(log: Rc<RefCell<Vec<(&'static str, Millis)>>>, left: u32, s: &mut Scheduler) {
            s.request_frame(move |_, s| {
                log.borrow_mut().push(("frame", s.now()));
                if left > 1 {
                    tick(log, left - 1, s);
                }
            });
        }

        tick(log.clone(), 3, &mut scheduler);
        scheduler.advance_to(1000, &mut page);

        assert_eq!(
            *log.borrow(),
            vec![("frame", 16), ("frame", 32), ("frame", 48)]
        );
    }

    #[test]
    fn test_zero_delay_runs_on_run_due() {
        let (mut page, mut scheduler) = setup();
        scheduler.advance_by(500, &mut page);

        let log = recorder();
        let l = log.clone();
        scheduler.schedule_after(0, move |_, s| l.borrow_mut().push(("now", s.now())));
        assert_eq!(scheduler.next_due(), Some(500));

        scheduler.run_due(&mut page);
        assert_eq!(*log.borrow(), vec![("now", 500)]);
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let (mut page, mut scheduler) = setup();
        scheduler.advance_to(300, &mut page);
        scheduler.advance_to(100, &mut page);

        assert_eq!(scheduler.now(), 300);
    }

    #[test]
    fn test_effects_can_touch_page() {
        use crate::engine::ElementSpec;
        use crate::types::Classes;

        let (mut page, mut scheduler) = setup();
        let el = page.append(page.root(), ElementSpec::new());

        scheduler.schedule_after(20, move |page, _| page.add_class(el, Classes::REVEALED));
        scheduler.advance_by(20, &mut page);

        assert!(page.has_class(el, Classes::REVEALED));
    }
}
