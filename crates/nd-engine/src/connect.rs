//! Connection controller: drag-to-connect and click-to-connect.
//!
//! Both protocols share the rubber-band line (a fixed source handle
//! anchor to the live pointer) and the same finalization rules: the
//! target handle is the one explicitly hovered, or the handle of the
//! target node closest to the release point; self-connections and pairs
//! that are already linked (in either direction) are dropped silently,
//! with no mutation emitted.
//!
//! Click-to-connect arms on a drag-free click of a handle and stays
//! armed across unrelated clicks; only completion, Escape, or the 30 s
//! idle expiry disarm it.

use crate::gesture::PendingTarget;
use crate::hit;
use crate::mutation::CanvasMutation;
use nd_core::{Board, HandleSide, NodeId, Point, absolute_bounds};

/// An armed click-to-connect cancels itself after this long.
pub const CLICK_CONNECT_TIMEOUT_MS: f64 = 30_000.0;

pub fn expired(armed_at_ms: f64, now_ms: f64) -> bool {
    now_ms - armed_at_ms > CLICK_CONNECT_TIMEOUT_MS
}

/// What the pointer is over while a connection gesture is live: a
/// precise handle when within reach, otherwise the topmost node body.
pub fn pick(board: &Board, p: Point) -> Option<(NodeId, Option<HandleSide>)> {
    for id in board.nodes.iter().map(|n| n.id) {
        if let Some(bounds) = absolute_bounds(board, id)
            && let Some(side) = hit::handle_at(&bounds, p)
        {
            return Some((id, Some(side)));
        }
    }
    hit::node_at(board, p).map(|id| (id, None))
}

/// The pending target recorded during a connection drag. The source
/// node itself is never a target.
pub fn hover_target(board: &Board, source: NodeId, cursor: Point) -> Option<PendingTarget> {
    pick(board, cursor)
        .filter(|(id, _)| *id != source)
        .map(|(id, handle)| PendingTarget { id, handle })
}

/// Finalize either protocol into a `Connect` mutation, or `None` when
/// the attempt is invalid (no target, self-connection, already linked).
pub fn complete(
    board: &Board,
    source: NodeId,
    source_handle: HandleSide,
    target: Option<PendingTarget>,
    at: Point,
) -> Option<CanvasMutation> {
    let target = target?;
    if target.id == source || board.connected(source, target.id) {
        return None;
    }
    let target_handle = match target.handle {
        Some(side) => side,
        None => {
            let bounds = absolute_bounds(board, target.id)?;
            hit::closest_handle(&bounds, at)
        }
    };
    log::debug!("connect {source} -> {}", target.id);
    Some(CanvasMutation::Connect {
        source_id: source,
        target_id: target.id,
        source_handle,
        target_handle,
    })
}
