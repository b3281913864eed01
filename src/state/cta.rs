//! CTA Button - Press animation on the call-to-action
//!
//! A click squeezes the button (`scale(0.98)`) and springs it back after
//! `press` ms.

use crate::engine::Page;
use crate::pipeline::Scheduler;
use crate::types::{ElementId, Markers, Millis, Transform};

const PRESS_LIFT: f32 = -3.0;
const PRESS_SCALE: f32 = 0.98;

pub struct CtaButton {
    button: ElementId,
    press: Millis,
}

impl CtaButton {
    /// `None` when the page has no call-to-action button.
    pub fn new(page: &Page, press: Millis) -> Option<Self> {
        let button = page.query(Markers::CTA_BUTTON).first().copied()?;
        Some(Self { button, press })
    }

    pub fn button(&self) -> ElementId {
        self.button
    }

    pub fn on_click(&self, page: &mut Page, scheduler: &mut Scheduler, element: ElementId) -> bool {
        if element != self.button {
            return false;
        }

        let button = self.button;
        page.update_style(button, |style| {
            style.transform = Transform::Lift { y: PRESS_LIFT, scale: PRESS_SCALE };
        });
        scheduler.schedule_after(self.press, move |page, _| {
            page.update_style(button, |style| {
                style.transform = Transform::Lift { y: PRESS_LIFT, scale: 1.0 };
            });
        });

        tracing::info!("Discover More clicked");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ElementSpec, Viewport};

    #[test]
    fn test_press_and_release() {
        let mut page = Page::new(Viewport::default());
        let button = page.append(page.root(), ElementSpec::new().marker(Markers::CTA_BUTTON));
        let mut scheduler = Scheduler::default();
        let cta = CtaButton::new(&page, 150).unwrap();

        assert!(cta.on_click(&mut page, &mut scheduler, button));
        assert_eq!(page.style(button).transform, Transform::Lift { y: -3.0, scale: 0.98 });

        scheduler.advance_by(149, &mut page);
        assert_eq!(page.style(button).transform, Transform::Lift { y: -3.0, scale: 0.98 });

        scheduler.advance_by(1, &mut page);
        assert_eq!(page.style(button).transform, Transform::Lift { y: -3.0, scale: 1.0 });
    }

    #[test]
    fn test_other_clicks_ignored() {
        let mut page = Page::new(Viewport::default());
        page.append(page.root(), ElementSpec::new().marker(Markers::CTA_BUTTON));
        let other = page.append(page.root(), ElementSpec::new());
        let mut scheduler = Scheduler::default();
        let cta = CtaButton::new(&page, 150).unwrap();

        assert!(!cta.on_click(&mut page, &mut scheduler, other));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_missing_button() {
        let page = Page::new(Viewport::default());
        assert!(CtaButton::new(&page, 150).is_none());
    }
}
