//! Exclusive input ownership for the active pointer.
//!
//! The host surface acquires pointer capture when a gesture starts, so
//! move/up events keep arriving even when the pointer leaves the canvas
//! bounds. A node element may have acquired capture independently of the
//! canvas root (its own handler started the gesture), so release must
//! cover both: the orchestrator releases its side and reports the node
//! target the host has to release as well.

use nd_core::NodeId;

#[derive(Debug, Default)]
pub struct InputCapture {
    held: bool,
    node_target: Option<NodeId>,
}

impl InputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire ownership for the gesture that just started. `node_target`
    /// is the node whose element originated the gesture, if any.
    pub fn acquire(&mut self, node_target: Option<NodeId>) {
        self.held = true;
        self.node_target = node_target;
    }

    pub fn held(&self) -> bool {
        self.held
    }

    /// Drop ownership. Returns the node target that acquired capture at
    /// gesture start so the host can release it too.
    pub fn release(&mut self) -> Option<NodeId> {
        self.held = false;
        self.node_target.take()
    }
}
