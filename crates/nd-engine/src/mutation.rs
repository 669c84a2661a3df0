//! Mutation commands emitted by the engine.
//!
//! The engine never touches the board in place: every gesture outcome is
//! expressed as a batch of `CanvasMutation` values the owning store
//! applies. `apply` is the reference applier, routing each command to
//! the corresponding `Board`/viewport operation; a host with its own
//! store (persistence, undo, collaboration) applies the same commands
//! through its own channels.

use nd_core::{Board, HandleSide, NodeId, Point, Viewport};

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasMutation {
    UpdatePosition {
        id: NodeId,
        position: Point,
    },
    /// One batched position update per move frame.
    UpdatePositions {
        positions: Vec<(NodeId, Point)>,
    },
    UpdateSize {
        id: NodeId,
        width: f32,
        height: f32,
    },
    SetZIndex {
        id: NodeId,
        z_index: i32,
    },
    SelectNode {
        id: Option<NodeId>,
    },
    SelectNodes {
        ids: Vec<NodeId>,
    },
    SelectConnection {
        id: Option<NodeId>,
    },
    Connect {
        source_id: NodeId,
        target_id: NodeId,
        source_handle: HandleSide,
        target_handle: HandleSide,
    },
    /// Parent change with the re-based (parent-relative) position, applied
    /// atomically so the node never renders against a half-updated frame.
    Reparent {
        id: NodeId,
        new_parent: Option<NodeId>,
        position: Point,
    },
    SetViewport {
        viewport: Viewport,
    },
}

/// Apply a single mutation to the board/viewport pair.
pub fn apply(board: &mut Board, viewport: &mut Viewport, mutation: CanvasMutation) {
    match mutation {
        CanvasMutation::UpdatePosition { id, position } => board.set_position(id, position),
        CanvasMutation::UpdatePositions { positions } => {
            for (id, position) in positions {
                board.set_position(id, position);
            }
        }
        CanvasMutation::UpdateSize { id, width, height } => board.set_size(id, width, height),
        CanvasMutation::SetZIndex { id, z_index } => board.set_z_index(id, z_index),
        CanvasMutation::SelectNode { id } => board.select_node(id),
        CanvasMutation::SelectNodes { ids } => board.select_nodes(&ids),
        CanvasMutation::SelectConnection { id } => board.select_connection(id),
        CanvasMutation::Connect {
            source_id,
            target_id,
            source_handle,
            target_handle,
        } => {
            board.add_connection(source_id, target_id, source_handle, target_handle);
        }
        CanvasMutation::Reparent {
            id,
            new_parent,
            position,
        } => {
            board.reparent(id, new_parent, position);
        }
        CanvasMutation::SetViewport { viewport: next } => *viewport = next,
    }
}

/// Apply a whole batch in order.
pub fn apply_all(
    board: &mut Board,
    viewport: &mut Viewport,
    mutations: impl IntoIterator<Item = CanvasMutation>,
) {
    for mutation in mutations {
        apply(board, viewport, mutation);
    }
}
