//! Page - The document the behaviours act on.
//!
//! An arena of elements addressed by [`ElementId`], with:
//! - selector-style queries (markers, ids, attributes) in document order
//! - bounding boxes written by the layout pass
//! - reactive presentation state (classes, inline style, text) per element
//! - the viewport size and scroll offset
//!
//! Reads of unknown ids return defaults and writes to them are no-ops, so a
//! behaviour wired against a page that lacks its elements simply does nothing.
//!
//! # Example
//!
//! ```ignore
//! use spark_showcase::{ElementSpec, Markers, Page, Viewport};
//!
//! let mut page = Page::new(Viewport::new(1280.0, 800.0));
//! let grid = page.append(page.root(), ElementSpec::new().row().height(300.0));
//! let card = page.append(grid, ElementSpec::new().marker(Markers::FEATURE_CARD).width(200.0));
//! ```

use std::collections::HashMap;

use spark_signals::{signal, Signal};

use crate::types::{Classes, ElementId, InlineStyle, Markers, Rect};

// =============================================================================
// VIEWPORT
// =============================================================================

/// Visible window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

// =============================================================================
// ELEMENT SPEC
// =============================================================================

/// Main axis for an element's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Column,
    Row,
}

/// Layout inputs for one element. `None` sizes are auto.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sizing {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub direction: Direction,
    pub gap: f32,
    pub padding: f32,
}

/// Builder describing an element to append.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    id: Option<String>,
    markers: Markers,
    attrs: HashMap<String, String>,
    text: String,
    sizing: Sizing,
}

impl ElementSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn marker(mut self, markers: Markers) -> Self {
        self.markers |= markers;
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.sizing.width = Some(width);
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.sizing.height = Some(height);
        self
    }

    /// Lay children out horizontally.
    pub fn row(mut self) -> Self {
        self.sizing.direction = Direction::Row;
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.sizing.gap = gap;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.sizing.padding = padding;
        self
    }
}

// =============================================================================
// ELEMENT
// =============================================================================

struct Element {
    id_attr: Option<String>,
    markers: Markers,
    attrs: HashMap<String, String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    sizing: Sizing,
    bounds: Rect,
    classes: Signal<Classes>,
    style: Signal<InlineStyle>,
    text: Signal<String>,
}

impl Element {
    fn from_spec(spec: ElementSpec, parent: Option<ElementId>) -> Self {
        Self {
            id_attr: spec.id,
            markers: spec.markers,
            attrs: spec.attrs,
            parent,
            children: Vec::new(),
            sizing: spec.sizing,
            bounds: Rect::default(),
            classes: signal(Classes::NONE),
            style: signal(InlineStyle::default()),
            text: signal(spec.text),
        }
    }
}

// =============================================================================
// PAGE
// =============================================================================

pub struct Page {
    elements: Vec<Element>,
    ids: HashMap<String, ElementId>,
    viewport: Viewport,
    scroll_y: Signal<f32>,
}

impl Page {
    /// Create a page holding only the root element.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            elements: vec![Element::from_spec(ElementSpec::new(), None)],
            ids: HashMap::new(),
            viewport,
            scroll_y: signal(0.0),
        }
    }

    pub fn root(&self) -> ElementId {
        ElementId::ROOT
    }

    /// Number of appended elements. The root is not counted.
    pub fn len(&self) -> usize {
        self.elements.len() - 1
    }

    /// Whether nothing was appended under the root.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a child element. An unknown parent attaches to the root.
    pub fn append(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
        let parent = if self.contains(parent) { parent } else { ElementId::ROOT };
        let id = ElementId(self.elements.len());

        // First element with a given id wins, like getElementById
        if let Some(id_attr) = &spec.id {
            self.ids.entry(id_attr.clone()).or_insert(id);
        }

        self.elements.push(Element::from_spec(spec, Some(parent)));
        self.elements[parent.0].children.push(id);
        id
    }

    pub fn contains(&self, id: ElementId) -> bool {
        id.0 < self.elements.len()
    }

    fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// All elements in document (pre-)order, root first.
    pub fn document_order(&self) -> Vec<ElementId> {
        self.subtree(ElementId::ROOT)
    }

    fn subtree(&self, from: ElementId) -> Vec<ElementId> {
        let mut order = Vec::new();
        if !self.contains(from) {
            return order;
        }

        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            order.push(id);
            // Push in reverse so the first child is visited first
            stack.extend(self.elements[id.0].children.iter().rev().copied());
        }
        order
    }

    /// Elements carrying every flag in `markers`, in document order.
    pub fn query(&self, markers: Markers) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|&id| self.has_marker(id, markers))
            .collect()
    }

    /// Descendants of `container` (excluding itself) carrying `markers`.
    pub fn descendants_with(&self, container: ElementId, markers: Markers) -> Vec<ElementId> {
        self.subtree(container)
            .into_iter()
            .skip(1)
            .filter(|&id| self.has_marker(id, markers))
            .collect()
    }

    /// Elements with an attribute matching `predicate`, in document order.
    pub fn query_attr(&self, name: &str, predicate: impl Fn(&str) -> bool) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|&id| self.attr(id, name).is_some_and(&predicate))
            .collect()
    }

    pub fn get_by_id(&self, id_attr: &str) -> Option<ElementId> {
        self.ids.get(id_attr).copied()
    }

    pub fn id_attr(&self, id: ElementId) -> Option<&str> {
        self.get(id).and_then(|e| e.id_attr.as_deref())
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).and_then(|e| e.attrs.get(name).map(String::as_str))
    }

    pub fn markers(&self, id: ElementId) -> Markers {
        self.get(id).map(|e| e.markers).unwrap_or_default()
    }

    pub fn has_marker(&self, id: ElementId, markers: Markers) -> bool {
        self.markers(id).contains(markers) && !markers.is_empty()
    }

    // =========================================================================
    // GEOMETRY
    // =========================================================================

    /// Document-space bounding box from the last layout pass.
    pub fn bounds(&self, id: ElementId) -> Rect {
        self.get(id).map(|e| e.bounds).unwrap_or_default()
    }

    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.bounds = bounds;
        }
    }

    pub fn sizing(&self, id: ElementId) -> Sizing {
        self.get(id).map(|e| e.sizing).unwrap_or_default()
    }

    pub fn set_sizing(&mut self, id: ElementId, sizing: Sizing) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.sizing = sizing;
        }
    }

    pub fn document_height(&self) -> f32 {
        self.bounds(ElementId::ROOT).height
    }

    // =========================================================================
    // VIEWPORT + SCROLL
    // =========================================================================

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Change the viewport size. Layout must be recomputed afterwards.
    pub fn resize_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        // Re-clamp against the new height
        self.set_scroll_y(self.scroll_y());
    }

    /// The viewport as a rectangle in document coordinates.
    pub fn viewport_rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y(), self.viewport.width, self.viewport.height)
    }

    pub fn max_scroll_y(&self) -> f32 {
        (self.document_height() - self.viewport.height).max(0.0)
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y.get()
    }

    /// Set the vertical scroll offset, clamped to the scrollable range.
    pub fn set_scroll_y(&mut self, top: f32) {
        let clamped = top.clamp(0.0, self.max_scroll_y());
        if self.scroll_y.get() != clamped {
            self.scroll_y.set(clamped);
        }
    }

    pub fn scroll_signal(&self) -> Signal<f32> {
        self.scroll_y.clone()
    }

    // =========================================================================
    // PRESENTATION STATE
    // =========================================================================

    pub fn classes(&self, id: ElementId) -> Classes {
        self.get(id).map(|e| e.classes.get()).unwrap_or_default()
    }

    pub fn has_class(&self, id: ElementId, class: Classes) -> bool {
        self.classes(id).contains(class)
    }

    pub fn add_class(&mut self, id: ElementId, class: Classes) {
        if let Some(element) = self.get(id) {
            let current = element.classes.get();
            if !current.contains(class) {
                element.classes.set(current | class);
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: Classes) {
        if let Some(element) = self.get(id) {
            let current = element.classes.get();
            if current.intersects(class) {
                element.classes.set(current - class);
            }
        }
    }

    /// Reactive handle to an element's classes, for binding host effects.
    pub fn classes_signal(&self, id: ElementId) -> Option<Signal<Classes>> {
        self.get(id).map(|e| e.classes.clone())
    }

    pub fn style(&self, id: ElementId) -> InlineStyle {
        self.get(id).map(|e| e.style.get()).unwrap_or_default()
    }

    pub fn update_style(&mut self, id: ElementId, f: impl FnOnce(&mut InlineStyle)) {
        if let Some(element) = self.get(id) {
            let mut style = element.style.get();
            f(&mut style);
            element.style.set(style);
        }
    }

    pub fn style_signal(&self, id: ElementId) -> Option<Signal<InlineStyle>> {
        self.get(id).map(|e| e.style.clone())
    }

    pub fn text(&self, id: ElementId) -> String {
        self.get(id).map(|e| e.text.get()).unwrap_or_default()
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(element) = self.get(id) {
            element.text.set(text.into());
        }
    }
}
