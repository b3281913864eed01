//! Showcase Engine - The page document.
//!
//! The engine owns the data every behaviour reads and writes:
//! - Page: element arena, queries, bounds, viewport and scroll offset
//! - Presentation state: reactive classes, inline style and text per element
//!
//! # Architecture
//!
//! Elements are NOT objects. They are indices into the page arena:
//!
//! ```text
//! #0: root         (parent=-,  markers=NONE)
//! #1: hero-section (parent=#0, markers=HERO_SECTION)
//! #2: feature-card (parent=#3, markers=FEATURE_CARD, classes=REVEALED)
//! ```

mod page;

pub use page::*;
