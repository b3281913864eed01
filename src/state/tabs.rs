//! Tabs - Exclusive button/panel switching
//!
//! A tab group is a set of buttons and a set of panels. Each button names its
//! panel's id in an attribute (`data-tab`, `data-feature`). Clicking a button
//! makes it and its panel the only `ACTIVE` members of the group.

use crate::engine::Page;
use crate::types::{Classes, ElementId, Markers};

pub struct TabGroup {
    name: &'static str,
    target_attr: &'static str,
    buttons: Vec<ElementId>,
    panels: Vec<ElementId>,
}

impl TabGroup {
    pub fn new(
        page: &Page,
        name: &'static str,
        button_marker: Markers,
        panel_marker: Markers,
        target_attr: &'static str,
    ) -> Self {
        Self {
            name,
            target_attr,
            buttons: page.query(button_marker),
            panels: page.query(panel_marker),
        }
    }

    /// `.tab-btn` / `.tab-panel` switched by `data-tab`.
    pub fn design_philosophy(page: &Page) -> Self {
        Self::new(page, "philosophy", Markers::TAB_BUTTON, Markers::TAB_PANEL, "data-tab")
    }

    /// `.feature-tab` / `.feature-panel` switched by `data-feature`.
    pub fn features(page: &Page) -> Self {
        Self::new(page, "features", Markers::FEATURE_TAB, Markers::FEATURE_PANEL, "data-feature")
    }

    pub fn buttons(&self) -> &[ElementId] {
        &self.buttons
    }

    pub fn panels(&self) -> &[ElementId] {
        &self.panels
    }

    /// Handle a click. Returns `false` when `element` is not one of our buttons.
    pub fn on_click(&self, page: &mut Page, element: ElementId) -> bool {
        if !self.buttons.contains(&element) {
            return false;
        }

        for &id in self.buttons.iter().chain(&self.panels) {
            page.remove_class(id, Classes::ACTIVE);
        }
        page.add_class(element, Classes::ACTIVE);

        let target = page.attr(element, self.target_attr).map(str::to_owned);
        let panel = target.as_deref().and_then(|t| page.get_by_id(t));
        match panel {
            Some(panel) => page.add_class(panel, Classes::ACTIVE),
            None => tracing::debug!(group = self.name, ?target, "tab target panel not found"),
        }

        tracing::debug!(group = self.name, button = %element, "tab switched");
        true
    }

    pub fn active_button(&self, page: &Page) -> Option<ElementId> {
        self.buttons
            .iter()
            .copied()
            .find(|&id| page.has_class(id, Classes::ACTIVE))
    }

    pub fn active_panel(&self, page: &Page) -> Option<ElementId> {
        self.panels
            .iter()
            .copied()
            .find(|&id| page.has_class(id, Classes::ACTIVE))
    }
}
