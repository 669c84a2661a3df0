//! View controller: pan claims, wheel zoom/scroll, and the multi-select
//! bounding box.
//!
//! Pan moves the viewport by the raw screen delta (scale-independent)
//! from a baseline captured at gesture start. Ctrl-wheel zooms anchored
//! at the cursor; a plain wheel pan-scrolls.

use crate::input::PointerButton;
use nd_core::{Board, Point, Rect, Viewport, absolute_bounds};

/// Padding around the union of selected bounds.
pub const SELECTION_PADDING: f32 = 10.0;

/// Wheel zoom step per notch.
pub const ZOOM_STEP: f32 = 1.1;

/// Which tool the toolbar has armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Select,
    Pan,
}

/// Pan claims pointer-downs when the pan tool is armed, the space
/// modifier is held, or the press is a middle-click.
pub fn wants_pan(tool: ToolMode, space_held: bool, button: PointerButton) -> bool {
    tool == ToolMode::Pan || space_held || button == PointerButton::Middle
}

/// Viewport for the current pan frame: baseline offset plus the raw
/// screen delta since gesture start.
pub fn pan(origin: Viewport, start: Point, current: Point) -> Viewport {
    origin.pan_by(current.x - start.x, current.y - start.y)
}

/// Wheel handling: ctrl-modified zooms at the cursor, unmodified scrolls.
pub fn wheel(viewport: Viewport, at: Point, dx: f32, dy: f32, ctrl: bool) -> Viewport {
    if ctrl {
        let factor = if dy < 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
        viewport.zoom_at(at, factor)
    } else {
        viewport.pan_by(-dx, -dy)
    }
}

/// The multi-select bounding box: union of the selected nodes' absolute
/// bounds plus padding. Only exists when more than one node is selected.
/// It is both a drag target for the whole selection and an exclusion
/// region for starting a new box-select.
pub fn selection_bounds(board: &Board) -> Option<Rect> {
    let selected = board.selected_nodes();
    if selected.len() < 2 {
        return None;
    }
    let mut union: Option<Rect> = None;
    for id in selected {
        if let Some(bounds) = absolute_bounds(board, id) {
            union = Some(match union {
                Some(u) => u.union(&bounds),
                None => bounds,
            });
        }
    }
    union.map(|u| u.expand(SELECTION_PADDING))
}
