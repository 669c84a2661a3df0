//! Grid snapping. Applied on gesture release only, never per move frame.

use crate::geometry::Point;

/// Snap cell size in canvas units.
pub const GRID_SIZE: f32 = 20.0;

/// Round a coordinate to the nearest grid line. Idempotent.
pub fn snap(v: f32) -> f32 {
    (v / GRID_SIZE).round() * GRID_SIZE
}

pub fn snap_point(p: Point) -> Point {
    Point::new(snap(p.x), snap(p.y))
}

pub fn snap_size(width: f32, height: f32) -> (f32, f32) {
    (snap(width).max(GRID_SIZE), snap(height).max(GRID_SIZE))
}
