//! Node resize controller.
//!
//! Eight compass grips. East/south grips grow the size directly; west/
//! north grips shrink the size and shift the position by the *actual*
//! size change, so the opposite edge stays pinned even after the minimum
//! size clamps the pointer delta. Resizing a group's north or west edge
//! counter-shifts its direct children, keeping them visually stationary
//! while the frame moves.

use crate::gesture::{DragEntry, ResizeDir};
use crate::mutation::CanvasMutation;
use nd_core::{
    Board, NodeId, NodeKind, Point, Rect,
    grid::{snap_point, snap_size},
};
use smallvec::SmallVec;

pub const MIN_WIDTH: f32 = 250.0;
pub const MIN_HEIGHT: f32 = 150.0;

/// Baseline for a resize gesture: the node's stored rect, plus its
/// direct children's stored positions when it is a group.
pub fn begin(board: &Board, id: NodeId) -> Option<(Rect, SmallVec<[DragEntry; 8]>)> {
    let node = board.node(id)?;
    let baseline = Rect::new(node.position.x, node.position.y, node.width, node.height);
    let children = if node.kind == NodeKind::Group {
        board
            .children(id)
            .into_iter()
            .filter_map(|cid| {
                board.node(cid).map(|c| DragEntry {
                    id: cid,
                    origin: c.position,
                })
            })
            .collect()
    } else {
        SmallVec::new()
    };
    Some((baseline, children))
}

/// The rect after applying the cumulative pointer `delta` (canvas units)
/// for `dir`, clamped to the minimum size. The position shift for west/
/// north grips is derived from the clamped size, not the raw delta, so
/// hitting the minimum never makes the node jump.
pub fn resized_rect(baseline: &Rect, dir: ResizeDir, delta: Point) -> Rect {
    let mut rect = *baseline;
    if dir.affects_east() {
        rect.width = (baseline.width + delta.x).max(MIN_WIDTH);
    }
    if dir.affects_west() {
        rect.width = (baseline.width - delta.x).max(MIN_WIDTH);
        rect.x = baseline.x + (baseline.width - rect.width);
    }
    if dir.affects_south() {
        rect.height = (baseline.height + delta.y).max(MIN_HEIGHT);
    }
    if dir.affects_north() {
        rect.height = (baseline.height - delta.y).max(MIN_HEIGHT);
        rect.y = baseline.y + (baseline.height - rect.height);
    }
    rect
}

/// Mutations for one move frame: position + size of the node, plus the
/// compensating child offsets when a group's origin shifted.
pub fn move_batch(
    id: NodeId,
    baseline: &Rect,
    children: &[DragEntry],
    dir: ResizeDir,
    delta: Point,
) -> Vec<CanvasMutation> {
    let rect = resized_rect(baseline, dir, delta);
    emit(id, baseline, children, rect)
}

/// Release: same shape as a move frame, with the final rect snapped to
/// the grid when enabled.
pub fn finish(
    id: NodeId,
    baseline: &Rect,
    children: &[DragEntry],
    dir: ResizeDir,
    delta: Point,
    snap_to_grid: bool,
) -> Vec<CanvasMutation> {
    let mut rect = resized_rect(baseline, dir, delta);
    if snap_to_grid {
        let origin = snap_point(rect.origin());
        let (width, height) = snap_size(rect.width, rect.height);
        rect = Rect::new(origin.x, origin.y, width, height);
    }
    emit(id, baseline, children, rect)
}

fn emit(id: NodeId, baseline: &Rect, children: &[DragEntry], rect: Rect) -> Vec<CanvasMutation> {
    let mut muts = Vec::new();
    if rect.origin() != baseline.origin() {
        muts.push(CanvasMutation::UpdatePosition {
            id,
            position: rect.origin(),
        });
    }
    muts.push(CanvasMutation::UpdateSize {
        id,
        width: rect.width,
        height: rect.height,
    });

    // The frame's origin moved by `shift`; children counter-shift so
    // their absolute positions are unchanged.
    let shift = rect.origin() - baseline.origin();
    if !children.is_empty() && (shift.x != 0.0 || shift.y != 0.0) {
        let positions: Vec<(NodeId, Point)> = children
            .iter()
            .map(|c| (c.id, c.origin - shift))
            .collect();
        muts.push(CanvasMutation::UpdatePositions { positions });
    }
    muts
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::Node;

    #[test]
    fn east_grows_from_pointer_delta() {
        let baseline = Rect::new(0.0, 0.0, 300.0, 200.0);
        let rect = resized_rect(&baseline, ResizeDir::East, Point::new(60.0, 999.0));
        assert_eq!(rect, Rect::new(0.0, 0.0, 360.0, 200.0));
    }

    #[test]
    fn west_pins_opposite_edge() {
        let baseline = Rect::new(100.0, 0.0, 300.0, 200.0);
        let rect = resized_rect(&baseline, ResizeDir::West, Point::new(40.0, 0.0));
        // Width shrinks by 40, x advances by 40: right edge stays at 400.
        assert_eq!(rect, Rect::new(140.0, 0.0, 260.0, 200.0));
        assert_eq!(rect.right(), baseline.right());
    }

    #[test]
    fn min_clamp_does_not_jump_position() {
        let baseline = Rect::new(100.0, 0.0, 300.0, 200.0);
        // Pointer overshoots: raw delta would shrink width to 20.
        let rect = resized_rect(&baseline, ResizeDir::West, Point::new(280.0, 0.0));
        assert_eq!(rect.width, MIN_WIDTH);
        // Position shift uses the actual size change (300 → 250 = 50).
        assert_eq!(rect.x, 150.0);
        assert_eq!(rect.right(), baseline.right());
    }

    #[test]
    fn corner_resizes_both_axes() {
        let baseline = Rect::new(0.0, 0.0, 300.0, 200.0);
        let rect = resized_rect(&baseline, ResizeDir::SouthEast, Point::new(20.0, 30.0));
        assert_eq!(rect, Rect::new(0.0, 0.0, 320.0, 230.0));
    }

    #[test]
    fn north_resize_of_group_compensates_children() {
        let mut board = Board::new();
        board.insert(
            Node::new(NodeId::intern("g"), NodeKind::Group, Point::new(0.0, 0.0))
                .with_size(400.0, 300.0),
        );
        board.insert(
            Node::new(
                NodeId::intern("c"),
                NodeKind::Content,
                Point::new(50.0, 50.0),
            )
            .with_parent(NodeId::intern("g")),
        );

        let (baseline, children) = begin(&board, NodeId::intern("g")).unwrap();
        let muts = move_batch(
            NodeId::intern("g"),
            &baseline,
            &children,
            ResizeDir::North,
            Point::new(0.0, -20.0),
        );

        assert_eq!(
            muts,
            vec![
                CanvasMutation::UpdatePosition {
                    id: NodeId::intern("g"),
                    position: Point::new(0.0, -20.0),
                },
                CanvasMutation::UpdateSize {
                    id: NodeId::intern("g"),
                    width: 400.0,
                    height: 320.0,
                },
                CanvasMutation::UpdatePositions {
                    positions: vec![(NodeId::intern("c"), Point::new(50.0, 70.0))],
                },
            ]
        );
    }

    #[test]
    fn non_group_has_no_child_compensation() {
        let mut board = Board::new();
        board.insert(
            Node::new(NodeId::intern("a"), NodeKind::Content, Point::ZERO).with_size(300.0, 200.0),
        );
        let (baseline, children) = begin(&board, NodeId::intern("a")).unwrap();
        assert!(children.is_empty());

        let muts = move_batch(
            NodeId::intern("a"),
            &baseline,
            &children,
            ResizeDir::North,
            Point::new(0.0, -10.0),
        );
        assert_eq!(muts.len(), 2, "position + size only: {muts:?}");
    }

    #[test]
    fn finish_snaps_rect() {
        let baseline = Rect::new(0.0, 0.0, 300.0, 200.0);
        let muts = finish(
            NodeId::intern("a"),
            &baseline,
            &[],
            ResizeDir::SouthEast,
            Point::new(13.0, 7.0),
            true,
        );
        assert_eq!(
            muts,
            vec![CanvasMutation::UpdateSize {
                id: NodeId::intern("a"),
                width: 320.0,
                height: 200.0,
            }]
        );
    }
}
