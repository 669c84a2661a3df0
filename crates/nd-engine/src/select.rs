//! Selection box (marquee) engine.
//!
//! The rectangle is tracked in **screen** space for the whole gesture so
//! it draws correctly even if the viewport pans or zooms mid-drag (wheel
//! events stay live during a box-select). Conversion to canvas space
//! happens once, at finalize time. A node is selected only when its
//! absolute bounding box is fully contained in the rectangle — partial
//! overlap does not select.

use nd_core::{Board, NodeId, Point, Rect, Viewport, absolute_bounds};

/// Pointer travel below this many screen pixels is a click, not a drag.
pub const DRAG_THRESHOLD: f32 = 2.0;

/// A live marquee: both corners in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    pub start: Point,
    pub end: Point,
}

impl Marquee {
    pub fn new(start: Point) -> Self {
        Self { start, end: start }
    }

    /// Normalized screen rectangle for drawing the marching rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.start, self.end)
    }

    /// A degenerate rectangle (no meaningful drag) selects nothing and
    /// is cancelled without touching the selection.
    pub fn is_meaningful(&self) -> bool {
        let r = self.rect();
        r.width > DRAG_THRESHOLD || r.height > DRAG_THRESHOLD
    }

    /// Resolve the selected set: every node whose absolute bounds lie
    /// entirely within the rectangle, converted to canvas space under
    /// the viewport at finalize time.
    pub fn finalize(&self, board: &Board, viewport: Viewport) -> Vec<NodeId> {
        if !self.is_meaningful() {
            return Vec::new();
        }
        let region = Rect::from_corners(
            viewport.to_canvas(self.start),
            viewport.to_canvas(self.end),
        );
        board
            .nodes
            .iter()
            .filter(|n| {
                absolute_bounds(board, n.id).is_some_and(|b| region.contains_rect(&b))
            })
            .map(|n| n.id)
            .collect()
    }
}
