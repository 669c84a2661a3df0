//! Node drag controller.
//!
//! A drag starts from a baseline snapshot: for every node that moves
//! together, its id and stored position at gesture start. Each move
//! frame recomputes positions from the cumulative delta against that
//! baseline (never from chained per-frame deltas) and emits one batched
//! update. Release applies grid snapping, then runs containment-based
//! reparenting.

use crate::gesture::DragEntry;
use crate::input::Modifiers;
use crate::mutation::CanvasMutation;
use nd_core::{Board, NodeId, NodeKind, Point, Rect, effective_z, grid::snap_point};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Baseline the given ids against the board's current stored positions.
fn snapshot(board: &Board, ids: &[NodeId]) -> SmallVec<[DragEntry; 8]> {
    ids.iter()
        .filter_map(|&id| {
            board.node(id).map(|n| DragEntry {
                id,
                origin: n.position,
            })
        })
        .collect()
}

/// Start a drag from a pointer-down on `clicked`.
///
/// - Multi-select chord held: toggle `clicked` in the selection; the new
///   selection is the drag set. Toggling the clicked node *out* yields
///   an empty drag set — the press only edits the selection.
/// - `clicked` already part of a multi-selection: drag the whole set.
/// - Otherwise: select `clicked` alone and drag just it.
pub fn begin(
    board: &Board,
    clicked: NodeId,
    modifiers: Modifiers,
) -> (Vec<CanvasMutation>, SmallVec<[DragEntry; 8]>) {
    let selected = board.selected_nodes();
    if modifiers.multi_select() {
        let mut ids = selected;
        let toggled_off = if let Some(pos) = ids.iter().position(|&id| id == clicked) {
            ids.remove(pos);
            true
        } else {
            ids.push(clicked);
            false
        };
        let muts = vec![CanvasMutation::SelectNodes { ids: ids.clone() }];
        if toggled_off {
            return (muts, SmallVec::new());
        }
        let entries = snapshot(board, &ids);
        (muts, entries)
    } else if selected.len() > 1 && selected.contains(&clicked) {
        (Vec::new(), snapshot(board, &selected))
    } else {
        (
            vec![CanvasMutation::SelectNode { id: Some(clicked) }],
            snapshot(board, &[clicked]),
        )
    }
}

/// Start a drag of the entire current selection (pointer-down on the
/// multi-select bounding box).
pub fn begin_selection(board: &Board) -> SmallVec<[DragEntry; 8]> {
    snapshot(board, &board.selected_nodes())
}

/// True when some other entry in the drag set already carries `id`
/// through the parent chain — moving it again would displace it twice.
fn carried_by_set(board: &Board, entries: &[DragEntry], id: NodeId) -> bool {
    entries
        .iter()
        .any(|e| e.id != id && board.is_ancestor_of(e.id, id))
}

/// One batched position update for the current cumulative `delta`
/// (canvas units). Nodes carried by a dragged ancestor are skipped.
pub fn move_batch(
    board: &Board,
    entries: &[DragEntry],
    delta: Point,
) -> Option<CanvasMutation> {
    let positions: Vec<(NodeId, Point)> = entries
        .iter()
        .filter(|e| !carried_by_set(board, entries, e.id))
        .map(|e| (e.id, e.origin + delta))
        .collect();
    if positions.is_empty() {
        None
    } else {
        Some(CanvasMutation::UpdatePositions { positions })
    }
}

/// Absolute position of `id`, reading dragged nodes' final stored
/// positions from `finals` instead of the (stale) board snapshot.
fn absolute_with(board: &Board, id: NodeId, finals: &HashMap<NodeId, Point>) -> Point {
    let Some(node) = board.node(id) else {
        return Point::ZERO;
    };
    let own = finals.get(&id).copied().unwrap_or(node.position);
    match node.parent_id.filter(|pid| board.contains(*pid)) {
        Some(pid) => absolute_with(board, pid, finals) + own,
        None => own,
    }
}

/// Finalize the drag: snap the moved nodes to the grid (when enabled),
/// then reparent each by drop containment — the group with the highest
/// effective z whose bounds contain the node's absolute center wins;
/// descendants of the node are never candidates (cycle guard), and a
/// node contained by nothing is re-based to the canvas root.
pub fn finish(
    board: &Board,
    entries: &[DragEntry],
    delta: Point,
    snap_to_grid: bool,
) -> Vec<CanvasMutation> {
    let mut muts = Vec::new();

    let mut finals: HashMap<NodeId, Point> = HashMap::new();
    for e in entries {
        let carried = carried_by_set(board, entries, e.id);
        let mut p = if carried { e.origin } else { e.origin + delta };
        if snap_to_grid && !carried {
            p = snap_point(p);
        }
        finals.insert(e.id, p);
    }

    if snap_to_grid {
        let positions: Vec<(NodeId, Point)> = entries
            .iter()
            .filter(|e| !carried_by_set(board, entries, e.id))
            .map(|e| (e.id, finals[&e.id]))
            .collect();
        if !positions.is_empty() {
            muts.push(CanvasMutation::UpdatePositions { positions });
        }
    }

    for e in entries {
        // Nodes riding inside a dragged ancestor keep their containment.
        if carried_by_set(board, entries, e.id) {
            continue;
        }
        let Some(node) = board.node(e.id) else { continue };
        let abs = absolute_with(board, e.id, &finals);
        let center = Point::new(abs.x + node.width / 2.0, abs.y + node.height / 2.0);

        let mut best: Option<(NodeId, i32)> = None;
        for g in board.nodes.iter().filter(|n| n.kind == NodeKind::Group) {
            if g.id == e.id || board.is_ancestor_of(e.id, g.id) {
                continue;
            }
            let g_origin = absolute_with(board, g.id, &finals);
            let g_bounds = Rect::new(g_origin.x, g_origin.y, g.width, g.height);
            if g_bounds.contains(center) {
                let z = effective_z(board, g.id);
                if best.is_none_or(|(_, bz)| z >= bz) {
                    best = Some((g.id, z));
                }
            }
        }

        match best {
            Some((gid, _)) if node.parent_id != Some(gid) => {
                let g_origin = absolute_with(board, gid, &finals);
                log::debug!("reparenting {} under {gid}", e.id);
                muts.push(CanvasMutation::Reparent {
                    id: e.id,
                    new_parent: Some(gid),
                    position: abs - g_origin,
                });
            }
            None if node.parent_id.is_some() => {
                muts.push(CanvasMutation::Reparent {
                    id: e.id,
                    new_parent: None,
                    position: abs,
                });
            }
            _ => {}
        }
    }

    muts
}
