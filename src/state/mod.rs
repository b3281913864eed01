//! State Module - Page behaviours
//!
//! Each behaviour is a small controller that owns its own state and acts on
//! the page through the scheduler:
//!
//! - **Viewport** - Visibility observation, `is_in_viewport`
//! - **Reveal** - Scroll-triggered reveal, card and timeline staggering
//! - **Counter** - Eased count-up animation
//! - **Tabs** - Exclusive button/panel switching
//! - **Parallax** - Hero drift and fade, one update per frame
//! - **Hover** - Feature card lift
//! - **Cta** - Call-to-action press animation
//! - **Scroll** - Anchor navigation and smooth scrolling
//! - **Debounce** - Burst collapsing for resize handling

pub mod counter;
pub mod cta;
pub mod debounce;
pub mod hover;
pub mod parallax;
pub mod reveal;
pub mod scroll;
pub mod tabs;
pub mod viewport;

pub use counter::{CounterAnimation, CounterOptions};
pub use cta::CtaButton;
pub use debounce::Debouncer;
pub use hover::HoverEffects;
pub use parallax::{Parallax, ParallaxOptions};
pub use reveal::{RevealEngine, RevealOptions};
pub use scroll::{ScrollOptions, SmoothScroll};
pub use tabs::TabGroup;
pub use viewport::{is_in_viewport, IntersectionEntry, ObserverOptions, ViewportObserver};
