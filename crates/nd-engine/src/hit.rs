//! Hit testing: canvas point → node and sub-node part.
//!
//! Nodes are tested front-to-back by display z-order (selection boost
//! included, so a raised selection is also grabbed first). Per node, the
//! connection handles are checked before the resize grips and the grips
//! before the body, since the handles poke outside the bounding box.
//!
//! Group nodes are grabbable only through a fixed header band along
//! their top edge; the body below passes through to the canvas so a
//! box-select can start inside a group's frame.

use crate::gesture::ResizeDir;
use nd_core::{Board, HandleSide, NodeId, NodeKind, Point, Rect, absolute_bounds, display_z};

/// Pointer distance (canvas units) within which a connection handle wins.
pub const HANDLE_HIT_RADIUS: f32 = 12.0;
/// Band around a selected node's border that resolves to a resize grip.
pub const RESIZE_MARGIN: f32 = 8.0;
/// Grabbable band at the top of a group frame.
pub const GROUP_HEADER_HEIGHT: f32 = 36.0;

/// What part of a node the pointer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(HandleSide),
    Resize(ResizeDir),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub id: NodeId,
    pub part: HitPart,
}

/// Node ids sorted front-to-back (topmost first). Later list entries win
/// ties, matching insertion order on equal z.
fn nodes_front_to_back(board: &Board) -> Vec<NodeId> {
    let mut ids: Vec<(usize, NodeId)> = board.nodes.iter().map(|n| n.id).enumerate().collect();
    ids.sort_by_key(|&(i, id)| (std::cmp::Reverse(display_z(board, id)), std::cmp::Reverse(i)));
    ids.into_iter().map(|(_, id)| id).collect()
}

/// The gesture target at `p`: topmost node part, or `None` over empty
/// canvas (including group bodies, which pass through).
pub fn hit_test(board: &Board, p: Point) -> Option<Hit> {
    for id in nodes_front_to_back(board) {
        let Some(node) = board.node(id) else { continue };
        let Some(bounds) = absolute_bounds(board, id) else {
            continue;
        };
        if let Some(side) = handle_at(&bounds, p) {
            return Some(Hit {
                id,
                part: HitPart::Handle(side),
            });
        }
        if node.selected
            && let Some(dir) = resize_dir_at(&bounds, p)
        {
            return Some(Hit {
                id,
                part: HitPart::Resize(dir),
            });
        }
        let grabbable = if node.kind == NodeKind::Group {
            Rect::new(bounds.x, bounds.y, bounds.width, GROUP_HEADER_HEIGHT.min(bounds.height))
                .contains(p)
        } else {
            bounds.contains(p)
        };
        if grabbable {
            return Some(Hit {
                id,
                part: HitPart::Body,
            });
        }
    }
    None
}

/// The topmost node whose full bounds contain `p`, regardless of kind or
/// header bands. Used for connection targeting, where dropping anywhere
/// on a node counts.
pub fn node_at(board: &Board, p: Point) -> Option<NodeId> {
    nodes_front_to_back(board)
        .into_iter()
        .find(|&id| absolute_bounds(board, id).is_some_and(|b| b.contains(p)))
}

/// The connection handle within reach of `p`, if any.
pub fn handle_at(bounds: &Rect, p: Point) -> Option<HandleSide> {
    HandleSide::ALL
        .into_iter()
        .find(|side| side.anchor(bounds).distance(p) <= HANDLE_HIT_RADIUS)
}

/// The handle of `bounds` closest to `p` by Euclidean distance.
pub fn closest_handle(bounds: &Rect, p: Point) -> HandleSide {
    let mut best = HandleSide::Top;
    let mut best_dist = f32::MAX;
    for side in HandleSide::ALL {
        let d = side.anchor(bounds).distance(p);
        if d < best_dist {
            best = side;
            best_dist = d;
        }
    }
    best
}

/// The resize grip at `p`, when `p` sits on the border band of `bounds`.
pub fn resize_dir_at(bounds: &Rect, p: Point) -> Option<ResizeDir> {
    if !bounds.expand(RESIZE_MARGIN).contains(p) {
        return None;
    }
    let west = p.x <= bounds.x + RESIZE_MARGIN;
    let east = p.x >= bounds.right() - RESIZE_MARGIN;
    let north = p.y <= bounds.y + RESIZE_MARGIN;
    let south = p.y >= bounds.bottom() - RESIZE_MARGIN;
    match (north, south, west, east) {
        (true, _, true, _) => Some(ResizeDir::NorthWest),
        (true, _, _, true) => Some(ResizeDir::NorthEast),
        (_, true, true, _) => Some(ResizeDir::SouthWest),
        (_, true, _, true) => Some(ResizeDir::SouthEast),
        (true, _, _, _) => Some(ResizeDir::North),
        (_, true, _, _) => Some(ResizeDir::South),
        (_, _, true, _) => Some(ResizeDir::West),
        (_, _, _, true) => Some(ResizeDir::East),
        _ => None,
    }
}
