//! Debounce - Collapse bursts of calls into one
//!
//! Trailing mode runs the function `wait` ms after the last call of a burst.
//! Leading mode (`immediate`) runs it on the first call and ignores the rest
//! of the burst until `wait` ms pass without a call.
//!
//! # Example
//!
//! ```ignore
//! let resize = Debouncer::new(250, false);
//!
//! // On every resize event
//! resize.call(&mut page, &mut scheduler, |page, _| relayout(page));
//! ```

use spark_signals::{signal, Signal};

use crate::engine::Page;
use crate::pipeline::{Scheduler, TimerHandle};
use crate::types::Millis;

pub struct Debouncer {
    wait: Millis,
    immediate: bool,
    pending: Signal<Option<TimerHandle>>,
}

impl Debouncer {
    pub fn new(wait: Millis, immediate: bool) -> Self {
        Self {
            wait,
            immediate,
            pending: signal(None),
        }
    }

    pub fn wait(&self) -> Millis {
        self.wait
    }

    /// Whether a burst is still open.
    pub fn is_pending(&self, scheduler: &Scheduler) -> bool {
        self.pending.get().is_some_and(|h| scheduler.is_pending(h))
    }

    pub fn call<F>(&self, page: &mut Page, scheduler: &mut Scheduler, f: F)
    where
        F: FnOnce(&mut Page, &mut Scheduler) + 'static,
    {
        let call_now = self.immediate && !self.is_pending(scheduler);

        if let Some(handle) = self.pending.get() {
            scheduler.cancel(handle);
        }

        let (leading, trailing) = if self.immediate { (Some(f), None) } else { (None, Some(f)) };

        let pending = self.pending.clone();
        let handle = scheduler.schedule_after(self.wait, move |page, scheduler| {
            pending.set(None);
            if let Some(f) = trailing {
                f(page, scheduler);
            }
        });
        self.pending.set(Some(handle));

        if call_now {
            if let Some(f) = leading {
                f(page, scheduler);
            }
        }
    }

    /// Drop the open burst without running anything.
    pub fn cancel(&self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.pending.get() {
            scheduler.cancel(handle);
            self.pending.set(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::engine::Viewport;

    fn setup() -> (Page, Scheduler, Rc<Cell<u32>>) {
        (Page::new(Viewport::default()), Scheduler::new(16), Rc::new(Cell::new(0)))
    }

    fn bump(calls: &Rc<Cell<u32>>) -> impl FnOnce(&mut Page, &mut Scheduler) + 'static {
        let calls = calls.clone();
        move |_, _| calls.set(calls.get() + 1)
    }

    #[test]
    fn test_trailing_runs_once_after_quiet() {
        let (mut page, mut scheduler, calls) = setup();
        let debouncer = Debouncer::new(250, false);

        for _ in 0..5 {
            debouncer.call(&mut page, &mut scheduler, bump(&calls));
            scheduler.advance_by(100, &mut page);
        }
        assert_eq!(calls.get(), 0);
        assert!(debouncer.is_pending(&scheduler));

        scheduler.advance_by(150, &mut page);
        assert_eq!(calls.get(), 1);
        assert!(!debouncer.is_pending(&scheduler));
    }

    #[test]
    fn test_leading_runs_immediately_once_per_burst() {
        let (mut page, mut scheduler, calls) = setup();
        let debouncer = Debouncer::new(250, true);

        debouncer.call(&mut page, &mut scheduler, bump(&calls));
        assert_eq!(calls.get(), 1);

        scheduler.advance_by(100, &mut page);
        debouncer.call(&mut page, &mut scheduler, bump(&calls));
        assert_eq!(calls.get(), 1);

        // Burst closes 250ms after the last call, nothing runs then
        scheduler.advance_by(250, &mut page);
        assert_eq!(calls.get(), 1);

        debouncer.call(&mut page, &mut scheduler, bump(&calls));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_cancel() {
        let (mut page, mut scheduler, calls) = setup();
        let debouncer = Debouncer::new(250, false);

        debouncer.call(&mut page, &mut scheduler, bump(&calls));
        debouncer.cancel(&mut scheduler);
        scheduler.advance_by(1000, &mut page);

        assert_eq!(calls.get(), 0);
        assert_eq!(scheduler.pending(), 0);
    }
}
