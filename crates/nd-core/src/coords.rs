//! Coordinate resolver: screen ↔ canvas conversion and absolute positions.
//!
//! Screen space is raw device pixels over the canvas element. Canvas
//! space is the infinite plane the nodes live on, related to screen
//! space by the viewport transform `screen = canvas * scale + offset`.
//! A node's stored position is relative to its parent; its absolute
//! position is the sum along the parent chain.

use crate::geometry::{Point, Rect};
use crate::id::NodeId;
use crate::model::{Board, Node};
use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 5.0;

/// The pan/zoom display transform. Not part of the node graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Screen-space offset of the canvas origin.
    pub x: f32,
    pub y: f32,
    /// Zoom factor, clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(x: f32, y: f32, scale: f32) -> Self {
        Self {
            x,
            y,
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
        }
    }

    /// Screen point → canvas point.
    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new((screen.x - self.x) / self.scale, (screen.y - self.y) / self.scale)
    }

    /// Canvas point → screen point.
    pub fn to_screen(&self, canvas: Point) -> Point {
        Point::new(canvas.x * self.scale + self.x, canvas.y * self.scale + self.y)
    }

    /// Translate by a raw screen delta. Pan is scale-independent.
    pub fn pan_by(&self, dx: f32, dy: f32) -> Viewport {
        Viewport {
            x: self.x + dx,
            y: self.y + dy,
            scale: self.scale,
        }
    }

    /// Zoom by `factor`, keeping the canvas point under `anchor` (a screen
    /// point, typically the cursor) stationary on screen.
    pub fn zoom_at(&self, anchor: Point, factor: f32) -> Viewport {
        let scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let pivot = self.to_canvas(anchor);
        Viewport {
            x: anchor.x - pivot.x * scale,
            y: anchor.y - pivot.y * scale,
            scale,
        }
    }
}

/// Canvas-absolute position of a node: its stored position plus the
/// absolute position of its parent chain. A `parent_id` that no longer
/// resolves is treated as unset.
pub fn absolute_position(board: &Board, id: NodeId) -> Option<Point> {
    board.node(id).map(|node| resolve(board, node))
}

fn resolve(board: &Board, node: &Node) -> Point {
    match node.parent_id.and_then(|pid| board.node(pid)) {
        Some(parent) => resolve(board, parent) + node.position,
        None => node.position,
    }
}

/// Canvas-absolute bounding box of a node.
pub fn absolute_bounds(board: &Board, id: NodeId) -> Option<Rect> {
    let node = board.node(id)?;
    let origin = resolve(board, node);
    Some(Rect::new(origin.x, origin.y, node.width, node.height))
}
