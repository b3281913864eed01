//! Page events delivered by the host.

use crate::state::IntersectionEntry;
use crate::types::ElementId;

/// Input the host forwards to [`Showcase::dispatch`](super::Showcase::dispatch).
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Click(ElementId),
    MouseEnter(ElementId),
    MouseLeave(ElementId),
    /// The document was scrolled to `top`.
    Scroll { top: f32 },
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
    /// Visibility records from a host-side observer.
    Intersection(Vec<IntersectionEntry>),
}

impl PageEvent {
    /// Element the event targets, if any.
    pub fn target(&self) -> Option<ElementId> {
        match self {
            PageEvent::Click(id) | PageEvent::MouseEnter(id) | PageEvent::MouseLeave(id) => Some(*id),
            _ => None,
        }
    }
}
