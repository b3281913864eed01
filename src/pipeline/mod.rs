//! Showcase Pipeline
//!
//! Connects host input to the page behaviours.
//!
//! # Pipeline Architecture
//!
//! ```text
//! host event → Showcase::dispatch → behaviours → Page (classes, style, scroll)
//!                                        ↓
//!                                    Scheduler → delayed effects / frames
//! ```
//!
//! ## Key Design Principles
//!
//! - **Virtual time**: nothing sleeps; the host advances the scheduler
//! - **Explicit effects**: every delayed change goes through `schedule_after`
//!   or `request_frame` and can be cancelled by handle
//! - **Scroll is an event**: any change of the scroll offset, including ones
//!   made by effects, drives parallax and visibility checks

pub mod events;
pub mod mount;
pub mod scheduler;

// Re-exports
pub use events::PageEvent;
pub use mount::Showcase;
pub use scheduler::{Effect, Scheduler, TimerHandle};
