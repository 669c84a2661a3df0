//! Z-order resolver: stored z-index → effective stacking order.
//!
//! A child may never render below its own parent, so the effective value
//! is computed bottom-up: `effective(child) = max(stored(child),
//! effective(parent) + 1)`. Manual raises above that floor are kept.
//! Selection adds a transient presentation boost on top; the boost is
//! never written back to a node's stored `z_index`.

use crate::id::NodeId;
use crate::model::{Board, Node};

/// Transient raise for selected nodes and their subtrees.
pub const SELECTION_BOOST: i32 = 1000;

/// Effective stacking order derived from the node and its ancestors.
pub fn effective_z(board: &Board, id: NodeId) -> i32 {
    board.node(id).map(|n| resolve(board, n)).unwrap_or(0)
}

fn resolve(board: &Board, node: &Node) -> i32 {
    match node.parent_id.and_then(|pid| board.node(pid)) {
        Some(parent) => node.z_index.max(resolve(board, parent) + 1),
        None => node.z_index,
    }
}

/// Effective z plus the selection boost: applied when the node itself is
/// selected or any ancestor is. Display-only — feed this to renderers
/// and hit testers, never store it.
pub fn display_z(board: &Board, id: NodeId) -> i32 {
    let Some(node) = board.node(id) else {
        return 0;
    };
    let base = resolve(board, node);
    if subtree_selected(board, node) {
        base + SELECTION_BOOST
    } else {
        base
    }
}

fn subtree_selected(board: &Board, node: &Node) -> bool {
    if node.selected {
        return true;
    }
    match node.parent_id.and_then(|pid| board.node(pid)) {
        Some(parent) => subtree_selected(board, parent),
        None => false,
    }
}
