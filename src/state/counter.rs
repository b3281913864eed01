//! Counter Animation - Count up to a target with ease-out-cubic
//!
//! Renders `floor(target × ease_out_cubic(progress))` into the counter
//! element once per animation frame until the duration elapses, then writes
//! the exact target.
//!
//! Each controller owns its `animated` / `running` state, so two counters on
//! one page never interfere and a finished counter never replays.
//!
//! # Example
//!
//! ```ignore
//! use spark_showcase::state::counter::{CounterAnimation, CounterOptions};
//!
//! let counter = CounterAnimation::new(element, CounterOptions::default());
//! counter.start(&mut scheduler); // animates after the start delay
//! ```

use spark_signals::{signal, Signal};

use crate::engine::Page;
use crate::pipeline::{Scheduler, TimerHandle};
use crate::types::{ElementId, Millis};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterOptions {
    pub target: u32,
    pub duration: Millis,
    pub start_delay: Millis,
}

impl Default for CounterOptions {
    fn default() -> Self {
        Self {
            target: 100,
            duration: 2000,
            start_delay: 800,
        }
    }
}

/// `1 - (1 - p)^3`, clamped to `[0, 1]`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Counter value at `elapsed` ms into the animation.
pub fn value_at(options: &CounterOptions, elapsed: Millis) -> u32 {
    let progress = progress_at(options, elapsed);
    if progress >= 1.0 {
        return options.target;
    }
    (options.target as f64 * ease_out_cubic(progress)).floor() as u32
}

fn progress_at(options: &CounterOptions, elapsed: Millis) -> f64 {
    if options.duration == 0 {
        return 1.0;
    }
    (elapsed as f64 / options.duration as f64).min(1.0)
}

/// Cloneable handle over one counter's state.
#[derive(Clone)]
pub struct CounterAnimation {
    element: ElementId,
    options: CounterOptions,
    value: Signal<u32>,
    animated: Signal<bool>,
    running: Signal<bool>,
}

impl CounterAnimation {
    pub fn new(element: ElementId, options: CounterOptions) -> Self {
        Self {
            element,
            options,
            value: signal(0),
            animated: signal(false),
            running: signal(false),
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Last rendered value.
    pub fn value(&self) -> u32 {
        self.value.get()
    }

    pub fn value_signal(&self) -> Signal<u32> {
        self.value.clone()
    }

    /// Whether the animation has completed.
    pub fn is_animated(&self) -> bool {
        self.animated.get()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Schedule the animation after the start delay.
    pub fn start(&self, scheduler: &mut Scheduler) -> TimerHandle {
        let counter = self.clone();
        scheduler.schedule_after(self.options.start_delay, move |page, scheduler| {
            counter.animate(page, scheduler);
        })
    }

    /// Run the animation now. No-op once animated or while running.
    pub fn animate(&self, page: &mut Page, scheduler: &mut Scheduler) {
        if self.is_animated() || self.is_running() {
            return;
        }

        self.running.set(true);
        let start = scheduler.now();
        tracing::debug!(element = %self.element, target = self.options.target, "counter started");
        self.update(page, scheduler, start);
    }

    fn update(&self, page: &mut Page, scheduler: &mut Scheduler, start: Millis) {
        let elapsed = scheduler.now().saturating_sub(start);
        let value = value_at(&self.options, elapsed);

        self.value.set(value);
        page.set_text(self.element, value.to_string());
        tracing::trace!(elapsed, value, "counter frame");

        if progress_at(&self.options, elapsed) < 1.0 {
            let counter = self.clone();
            scheduler.request_frame(move |page, scheduler| {
                counter.update(page, scheduler, start);
            });
        } else {
            self.running.set(false);
            self.animated.set(true);
        }
    }
}
