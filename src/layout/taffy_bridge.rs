//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts element sizing to Taffy styles, runs layout computation, and
//! writes absolute document-space bounds back to the page.

use std::collections::HashMap;

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    LengthPercentage, NodeId, Rect as TaffyRect, Size, Style, TaffyTree,
};

use crate::engine::{Direction, Page, Sizing};
use crate::error::{Result, ShowcaseError};
use crate::types::{ElementId, Rect};

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn to_taffy_dimension(value: Option<f32>) -> TaffyDimension {
    match value {
        Some(length) => TaffyDimension::Length(length),
        None => TaffyDimension::Auto,
    }
}

fn to_taffy_flex_direction(direction: Direction) -> TaffyFlexDirection {
    match direction {
        Direction::Column => TaffyFlexDirection::Column,
        Direction::Row => TaffyFlexDirection::Row,
    }
}

/// Build a Taffy Style from element sizing.
fn build_style(sizing: Sizing) -> Style {
    let padding = LengthPercentage::Length(sizing.padding);

    Style {
        display: Display::Flex,
        flex_direction: to_taffy_flex_direction(sizing.direction),
        // Declared sizes are authoritative; sections never squeeze
        flex_shrink: 0.0,
        size: Size {
            width: to_taffy_dimension(sizing.width),
            height: to_taffy_dimension(sizing.height),
        },
        gap: Size {
            width: LengthPercentage::Length(sizing.gap),
            height: LengthPercentage::Length(sizing.gap),
        },
        padding: TaffyRect {
            top: padding,
            right: padding,
            bottom: padding,
            left: padding,
        },
        ..Default::default()
    }
}

fn layout_error(err: taffy::TaffyError) -> ShowcaseError {
    ShowcaseError::Layout(err.to_string())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute layout for the whole page using Taffy.
///
/// The root is pinned to the viewport width; its height grows with content
/// and becomes the document height. Bounds are stored in document space
/// (parent offsets accumulated), ready for intersection tests.
pub fn compute_layout(page: &mut Page) -> Result<()> {
    let order = page.document_order();
    let viewport = page.viewport();

    let mut tree: TaffyTree<()> = TaffyTree::new();
    let mut element_to_node: HashMap<ElementId, NodeId> = HashMap::new();

    // First pass: create all nodes (without children)
    for &id in &order {
        let mut sizing = page.sizing(id);
        if id == page.root() {
            sizing.width = Some(viewport.width);
        }
        let node = tree.new_leaf(build_style(sizing)).map_err(layout_error)?;
        element_to_node.insert(id, node);
    }

    // Second pass: parent-child relationships, in document order
    for &id in &order {
        let Some(parent) = page.parent(id) else { continue };
        if let (Some(&parent_node), Some(&child_node)) =
            (element_to_node.get(&parent), element_to_node.get(&id))
        {
            tree.add_child(parent_node, child_node).map_err(layout_error)?;
        }
    }

    let root_node = element_to_node[&page.root()];
    let available = Size {
        width: AvailableSpace::Definite(viewport.width),
        height: AvailableSpace::MaxContent,
    };
    tree.compute_layout(root_node, available).map_err(layout_error)?;

    // Extract results; parents come first in document order
    for &id in &order {
        let node = element_to_node[&id];
        let layout = tree.layout(node).map_err(layout_error)?;

        let (origin_x, origin_y) = match page.parent(id) {
            Some(parent) => {
                let parent_bounds = page.bounds(parent);
                (parent_bounds.x, parent_bounds.y)
            }
            None => (0.0, 0.0),
        };

        page.set_bounds(
            id,
            Rect::new(
                origin_x + layout.location.x,
                origin_y + layout.location.y,
                layout.size.width,
                layout.size.height,
            ),
        );
    }

    // Keep the scroll offset valid for the new document height
    page.set_scroll_y(page.scroll_y());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ElementSpec, Viewport};

    fn setup() -> Page {
        Page::new(Viewport::new(1000.0, 600.0))
    }

    #[test]
    fn test_sections_stack_vertically() {
        let mut page = setup();
        let hero = page.append(page.root(), ElementSpec::new().height(600.0));
        let about = page.append(page.root(), ElementSpec::new().height(400.0));

        compute_layout(&mut page).unwrap();

        assert_eq!(page.bounds(hero), Rect::new(0.0, 0.0, 1000.0, 600.0));
        assert_eq!(page.bounds(about), Rect::new(0.0, 600.0, 1000.0, 400.0));
        assert_eq!(page.document_height(), 1000.0);
    }

    #[test]
    fn test_nested_bounds_are_document_space() {
        let mut page = setup();
        let _spacer = page.append(page.root(), ElementSpec::new().height(500.0));
        let grid = page.append(page.root(), ElementSpec::new().row().gap(20.0).padding(10.0));
        let first = page.append(grid, ElementSpec::new().width(200.0).height(100.0));
        let second = page.append(grid, ElementSpec::new().width(200.0).height(100.0));

        compute_layout(&mut page).unwrap();

        assert_eq!(page.bounds(grid).y, 500.0);
        assert_eq!(page.bounds(grid).height, 120.0);
        assert_eq!(page.bounds(first), Rect::new(10.0, 510.0, 200.0, 100.0));
        assert_eq!(page.bounds(second), Rect::new(230.0, 510.0, 200.0, 100.0));
    }

    #[test]
    fn test_empty_page() {
        let mut page = setup();
        compute_layout(&mut page).unwrap();

        assert_eq!(page.bounds(page.root()).width, 1000.0);
        assert_eq!(page.document_height(), 0.0);
    }

    #[test]
    fn test_relayout_after_resize() {
        let mut page = setup();
        let section = page.append(page.root(), ElementSpec::new().height(300.0));
        compute_layout(&mut page).unwrap();

        page.resize_viewport(Viewport::new(640.0, 480.0));
        compute_layout(&mut page).unwrap();

        assert_eq!(page.bounds(section).width, 640.0);
    }

    #[test]
    fn test_shorter_layout_reclamps_scroll() {
        let mut page = setup();
        let section = page.append(page.root(), ElementSpec::new().height(2000.0));
        compute_layout(&mut page).unwrap();
        page.set_scroll_y(1400.0);

        let mut sizing = page.sizing(section);
        sizing.height = Some(1000.0);
        page.set_sizing(section, sizing);
        compute_layout(&mut page).unwrap();

        assert_eq!(page.scroll_y(), 400.0);
    }
}
