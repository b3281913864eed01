//! Hover - Lift feature cards under the pointer
//!
//! Entering a card lifts it 10px with an eased transition. Leaving drops it
//! back, but only once the card has been revealed; unrevealed cards keep
//! their lift until the reveal animation takes over.

use crate::engine::Page;
use crate::types::{Classes, ElementId, Markers, Transform};

/// Transition applied on hover.
pub const HOVER_TRANSITION: &str = "all 0.3s cubic-bezier(0.22, 1, 0.36, 1)";

/// Lift distance in pixels (negative is up).
pub const HOVER_LIFT: f32 = -10.0;

pub struct HoverEffects {
    cards: Vec<ElementId>,
}

impl HoverEffects {
    pub fn new(page: &Page) -> Self {
        Self {
            cards: page.query(Markers::FEATURE_CARD),
        }
    }

    pub fn is_card(&self, element: ElementId) -> bool {
        self.cards.contains(&element)
    }

    pub fn on_mouse_enter(&self, page: &mut Page, element: ElementId) -> bool {
        if !self.is_card(element) {
            return false;
        }
        page.update_style(element, |style| {
            style.transform = Transform::TranslateY(HOVER_LIFT);
            style.transition = Some(HOVER_TRANSITION.to_string());
        });
        true
    }

    pub fn on_mouse_leave(&self, page: &mut Page, element: ElementId) -> bool {
        if !self.is_card(element) {
            return false;
        }
        if page.has_class(element, Classes::REVEALED) {
            page.update_style(element, |style| style.transform = Transform::TranslateY(0.0));
        }
        true
    }
}
