//! The presentation surface contract.
//!
//! The controller decides *what* the dropdown shows; a
//! [`PresentationSurface`] decides how. One surface is shared by every input
//! attached to a controller and shows at most one dropdown at a time.

use autocomplete_core::{Rect, Size};

use crate::item::Item;

/// Which edge of the anchor the dropdown lines up with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizontalAnchor {
    /// Dropdown's left edge at this x coordinate.
    Left(f32),
    /// Dropdown's right edge this far from the viewport's right edge.
    Right(f32),
}

/// Where the dropdown goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Top edge, directly below the anchor.
    pub top: f32,
    /// The dropdown is never narrower than its anchor.
    pub min_width: f32,
    /// Horizontal anchoring.
    pub horizontal: HorizontalAnchor,
}

/// Compute dropdown placement against `anchor`.
///
/// The dropdown hangs from the anchor's left edge unless `rtl` is set or it
/// would reach the viewport's right edge. A right anchoring is abandoned again
/// if the dropdown would then cross the viewport's left edge.
pub fn compute_placement(anchor: Rect, list_width: f32, viewport: Size, rtl: bool) -> Placement {
    let mut anchor_right = rtl || anchor.left() + list_width >= viewport.width;
    if anchor_right && anchor.right() - list_width <= 0.0 {
        anchor_right = false;
    }

    let horizontal = if anchor_right {
        HorizontalAnchor::Right(viewport.width - anchor.right())
    } else {
        HorizontalAnchor::Left(anchor.left())
    };

    Placement {
        top: anchor.bottom(),
        min_width: anchor.width(),
        horizontal,
    }
}

/// Renders and positions the dropdown.
///
/// Row `i` of the surface always corresponds to item `i` of the last
/// [`render`](Self::render) call.
pub trait PresentationSurface {
    /// Replace all rows with a single loading placeholder.
    fn show_loading(&mut self, text: &str);

    /// Replace all rows with one row per item, none highlighted.
    ///
    /// `highlight` is the query to mark inside labels, when enabled.
    fn render(&mut self, items: &[Item], highlight: Option<&str>);

    /// Highlight or unhighlight row `index`.
    fn set_selected(&mut self, index: usize, selected: bool);

    /// Make the dropdown visible.
    fn open(&mut self);

    /// Hide the dropdown.
    fn close(&mut self);

    /// Whether the dropdown is visible.
    fn is_open(&self) -> bool;

    /// Number of rendered rows.
    fn row_count(&self) -> usize;

    /// Position the dropdown against `anchor` inside `viewport`.
    fn align(&mut self, anchor: Rect, viewport: Size, rtl: bool) -> Placement;
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1000.0, 800.0);

    #[test]
    fn test_left_anchor_by_default() {
        let anchor = Rect::new(100.0, 50.0, 200.0, 30.0);
        let placement = compute_placement(anchor, 250.0, VIEWPORT, false);
        assert_eq!(placement.top, 80.0);
        assert_eq!(placement.min_width, 200.0);
        assert_eq!(placement.horizontal, HorizontalAnchor::Left(100.0));
    }

    #[test]
    fn test_flips_right_near_viewport_edge() {
        let anchor = Rect::new(800.0, 50.0, 150.0, 30.0);
        let placement = compute_placement(anchor, 300.0, VIEWPORT, false);
        assert_eq!(placement.horizontal, HorizontalAnchor::Right(50.0));
    }

    #[test]
    fn test_rtl_anchors_right() {
        let anchor = Rect::new(400.0, 0.0, 200.0, 30.0);
        let placement = compute_placement(anchor, 250.0, VIEWPORT, true);
        assert_eq!(placement.horizontal, HorizontalAnchor::Right(400.0));
    }

    #[test]
    fn test_right_anchor_abandoned_without_room_on_left() {
        let anchor = Rect::new(10.0, 0.0, 100.0, 30.0);
        let placement = compute_placement(anchor, 400.0, Size::new(300.0, 600.0), true);
        assert_eq!(placement.horizontal, HorizontalAnchor::Left(10.0));
    }
}
