//! Core types for spark-showcase.
//!
//! These types define the foundation that everything builds on: element
//! handles, document-space geometry, marker and class flags, and the inline
//! style values the behaviours write.

use std::fmt;

/// Virtual time in milliseconds.
pub type Millis = u64;

// =============================================================================
// ElementId
// =============================================================================

/// Handle to an element on a [`Page`](crate::engine::Page).
///
/// Elements are NOT objects. They are indices into the page arena, stable for
/// the page's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub usize);

impl ElementId {
    /// The document root.
    pub const ROOT: Self = Self(0);

    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Rect - Document-space geometry
// =============================================================================

/// Axis-aligned rectangle in document coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlap of two rectangles, or `None` when they are disjoint.
    ///
    /// Edge-adjacent rectangles overlap with zero area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Whether `other` lies fully inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Grow the rectangle by the given margins. Negative margins shrink it.
    pub fn expand(&self, margins: &Margins) -> Rect {
        Rect::new(
            self.x - margins.left,
            self.y - margins.top,
            (self.width + margins.left + margins.right).max(0.0),
            (self.height + margins.top + margins.bottom).max(0.0),
        )
    }
}

/// Per-edge offsets, used for the observer root margin.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Only a bottom offset.
    pub const fn bottom(bottom: f32) -> Self {
        Self::new(0.0, 0.0, bottom, 0.0)
    }
}

// =============================================================================
// Markers + Classes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Selector markers an element carries.
    ///
    /// Each flag stands for one selector the behaviours query:
    /// `REVEAL` is `[data-reveal]`, `FEATURE_CARD` is `.feature-card`, etc.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Markers: u16 {
        const NONE = 0;
        const REVEAL = 1 << 0;
        const FEATURE_CARD = 1 << 1;
        const DESIGN_PROCESS = 1 << 2;
        const TIMELINE_STEP = 1 << 3;
        const TAB_BUTTON = 1 << 4;
        const TAB_PANEL = 1 << 5;
        const FEATURE_TAB = 1 << 6;
        const FEATURE_PANEL = 1 << 7;
        const HERO_SECTION = 1 << 8;
        const HERO_CONTENT = 1 << 9;
        const CTA_BUTTON = 1 << 10;
    }
}

bitflags::bitflags! {
    /// Presentation classes toggled by the behaviours.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Classes: u8 {
        const NONE = 0;
        /// Terminal one-way reveal state.
        const REVEALED = 1 << 0;
        /// Selected tab button / visible tab panel.
        const ACTIVE = 1 << 1;
    }
}

// =============================================================================
// Inline style
// =============================================================================

/// `animation-play-state` equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Paused,
    Running,
}

/// Transform values the behaviours write.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Transform {
    #[default]
    None,
    TranslateY(f32),
    Translate3d(f32, f32, f32),
    /// `translateY(y) scale(scale)`, the CTA press.
    Lift { y: f32, scale: f32 },
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::None => write!(f, "none"),
            Transform::TranslateY(y) => write!(f, "translateY({y}px)"),
            Transform::Translate3d(x, y, z) => write!(f, "translate3d({x}px, {y}px, {z}px)"),
            Transform::Lift { y, scale } => write!(f, "translateY({y}px) scale({scale})"),
        }
    }
}

/// Inline style state of one element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineStyle {
    pub transform: Transform,
    pub transition: Option<String>,
    /// `None` means inherited / unset.
    pub opacity: Option<f32>,
    pub animation_play_state: PlayState,
}
