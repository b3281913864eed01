//! # spark-showcase
//!
//! Reactive page interactivity for showcase sites.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals): every
//! element's classes, inline style and text are signals a host can bind to a
//! real DOM.
//!
//! ## Architecture
//!
//! The page is an arena of elements addressed by index. Behaviours are small
//! controllers that read the page, write presentation state, and defer work
//! through a virtual-time scheduler:
//!
//! ```text
//! Page → layout (taffy) → ViewportObserver → RevealEngine → Scheduler → Page
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (ElementId, Rect, Markers, Classes, Transform)
//! - [`engine`] - The page document
//! - [`layout`] - Taffy layout producing element bounds
//! - [`state`] - Behaviours (reveal, counter, tabs, parallax, hover, scroll)
//! - [`pipeline`] - Scheduler, events and the mounted [`Showcase`]
//! - [`config`] - TOML configuration

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::ShowcaseConfig;

pub use engine::{Direction, ElementSpec, Page, Sizing, Viewport};

pub use error::{Result, ShowcaseError};

pub use layout::compute_layout;

pub use pipeline::{Effect, PageEvent, Scheduler, Showcase, TimerHandle};

pub use state::{
    is_in_viewport, CounterAnimation, CounterOptions, CtaButton, Debouncer, HoverEffects,
    IntersectionEntry, ObserverOptions, Parallax, ParallaxOptions, RevealEngine, RevealOptions,
    ScrollOptions, SmoothScroll, TabGroup, ViewportObserver,
};
