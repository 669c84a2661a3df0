//! Board data model: nodes, connections, and the flat store that owns them.
//!
//! The board is a flat list of nodes plus a flat list of connections.
//! Containment is expressed through each node's optional `parent_id`; a
//! node's `position` is relative to its parent when one is set, otherwise
//! canvas-absolute. The parent graph must stay acyclic — `reparent` is
//! the enforcement point. A `parent_id` pointing at a node that no longer
//! exists is tolerated everywhere and treated as "no parent".
//!
//! The store is mutated only through its methods (the interaction engine
//! emits mutation commands, it never touches the lists directly).

use crate::geometry::Point;
use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Default stacking order for freshly spawned nodes.
pub const DEFAULT_Z_INDEX: i32 = 1;

// ─── Nodes ───────────────────────────────────────────────────────────────

/// What a node displays. Content rendering itself lives outside the
/// engine; the kind only drives spawn defaults and containment rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Markdown/text card.
    Content,
    /// Image card.
    Image,
    /// Free-standing title text.
    Title,
    /// Containment frame — the only kind that can own children.
    Group,
}

impl NodeKind {
    /// Spawn-time size for each kind.
    pub fn default_size(self) -> (f32, f32) {
        match self {
            NodeKind::Content => (250.0, 150.0),
            NodeKind::Image => (320.0, 240.0),
            NodeKind::Title => (300.0, 150.0),
            NodeKind::Group => (480.0, 360.0),
        }
    }

    /// Prefix for minted ids (`content_4`, `group_2`, ...).
    pub fn id_prefix(self) -> &'static str {
        match self {
            NodeKind::Content => "content",
            NodeKind::Image => "image",
            NodeKind::Title => "title",
            NodeKind::Group => "group",
        }
    }
}

/// A rectangular card on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Top-left corner. Parent-relative when `parent_id` is set,
    /// canvas-absolute otherwise.
    pub position: Point,
    pub width: f32,
    pub height: f32,
    /// Owning group, if any. At most one parent; the chain must be acyclic.
    pub parent_id: Option<NodeId>,
    pub z_index: i32,
    pub selected: bool,
}

impl Node {
    /// Create a node with the kind's default size and z-index.
    pub fn new(id: NodeId, kind: NodeKind, position: Point) -> Self {
        let (width, height) = kind.default_size();
        Self {
            id,
            kind,
            position,
            width,
            height,
            parent_id: None,
            z_index: DEFAULT_Z_INDEX,
            selected: false,
        }
    }

    pub fn with_parent(mut self, parent_id: NodeId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

// ─── Connections ─────────────────────────────────────────────────────────

/// One of four fixed attachment points on a node's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl HandleSide {
    pub const ALL: [HandleSide; 4] = [
        HandleSide::Top,
        HandleSide::Right,
        HandleSide::Bottom,
        HandleSide::Left,
    ];

    /// The handle's anchor point on an absolute bounding box.
    pub fn anchor(self, bounds: &crate::geometry::Rect) -> Point {
        match self {
            HandleSide::Top => Point::new(bounds.x + bounds.width / 2.0, bounds.y),
            HandleSide::Right => Point::new(bounds.right(), bounds.y + bounds.height / 2.0),
            HandleSide::Bottom => Point::new(bounds.x + bounds.width / 2.0, bounds.bottom()),
            HandleSide::Left => Point::new(bounds.x, bounds.y + bounds.height / 2.0),
        }
    }
}

/// A directional link between two nodes.
///
/// Endpoints may dangle (reference removed nodes); dangling connections
/// are simply not rendered and never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: NodeId,
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub source_handle: HandleSide,
    pub target_handle: HandleSide,
    pub label: Option<String>,
    pub selected: bool,
}

// ─── Board ───────────────────────────────────────────────────────────────

/// The flat node/connection store with an id → slot index.
///
/// The index is rebuilt on structural mutation; lookups are O(1) so the
/// resolvers never re-scan the list per parent hop.
#[derive(Debug, Clone, Default)]
pub struct Board {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    id_index: HashMap<NodeId, usize>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from existing lists (e.g. a persisted document).
    pub fn from_parts(nodes: Vec<Node>, connections: Vec<Connection>) -> Self {
        let mut board = Self {
            nodes,
            connections,
            id_index: HashMap::new(),
        };
        board.rebuild_index();
        board
    }

    fn rebuild_index(&mut self) {
        self.id_index.clear();
        for (i, node) in self.nodes.iter().enumerate() {
            self.id_index.insert(node.id, i);
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.id_index.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.id_index.get(&id).copied().map(|i| &mut self.nodes[i])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_index.contains_key(&id)
    }

    /// Add an existing node value. Replaces any node with the same id.
    pub fn insert(&mut self, node: Node) {
        if let Some(&i) = self.id_index.get(&node.id) {
            self.nodes[i] = node;
        } else {
            self.id_index.insert(node.id, self.nodes.len());
            self.nodes.push(node);
        }
    }

    /// Spawn a node with a minted id and kind defaults at `position`.
    pub fn spawn(&mut self, kind: NodeKind, position: Point) -> NodeId {
        let id = NodeId::mint(kind.id_prefix());
        self.insert(Node::new(id, kind, position));
        id
    }

    /// Delete a node together with its full descendant subtree.
    /// Returns how many nodes were removed.
    pub fn remove_node(&mut self, id: NodeId) -> usize {
        if !self.contains(id) {
            return 0;
        }
        let mut doomed: Vec<NodeId> = vec![id];
        doomed.extend(self.descendants(id));
        let before = self.nodes.len();
        self.nodes.retain(|n| !doomed.contains(&n.id));
        // Connections to removed nodes would dangle forever; drop them too.
        self.connections
            .retain(|c| !doomed.contains(&c.source_id) && !doomed.contains(&c.target_id));
        self.rebuild_index();
        before - self.nodes.len()
    }

    /// Direct children of `id`, in list order.
    pub fn children(&self, id: NodeId) -> SmallVec<[NodeId; 8]> {
        self.nodes
            .iter()
            .filter(|n| n.parent_id == Some(id))
            .map(|n| n.id)
            .collect()
    }

    /// All transitive descendants of `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut frontier: Vec<NodeId> = self.children(id).into_vec();
        while let Some(next) = frontier.pop() {
            frontier.extend(self.children(next));
            out.push(next);
        }
        out
    }

    /// Walk `descendant`'s parent chain looking for `ancestor`.
    /// The walk is bounded by the node count so a malformed snapshot
    /// cannot loop.
    pub fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        if ancestor == descendant {
            return false;
        }
        let mut current = self.node(descendant).and_then(|n| n.parent_id);
        let mut hops = 0;
        while let Some(pid) = current {
            if pid == ancestor {
                return true;
            }
            hops += 1;
            if hops > self.nodes.len() {
                return false;
            }
            current = self.node(pid).and_then(|n| n.parent_id);
        }
        false
    }

    /// Move a node under `new_parent` (or to the canvas root with `None`),
    /// storing the already re-based `position`. Rejects self-parenting and
    /// any reparent that would create a cycle. Returns whether it applied.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>, position: Point) -> bool {
        if let Some(pid) = new_parent {
            if pid == id || !self.contains(pid) || self.is_ancestor_of(id, pid) {
                log::debug!("rejected reparent of {id} under {pid}");
                return false;
            }
        }
        match self.node_mut(id) {
            Some(node) => {
                node.parent_id = new_parent;
                node.position = position;
                true
            }
            None => false,
        }
    }

    pub fn set_position(&mut self, id: NodeId, position: Point) {
        if let Some(node) = self.node_mut(id) {
            node.position = position;
        }
    }

    pub fn set_size(&mut self, id: NodeId, width: f32, height: f32) {
        if let Some(node) = self.node_mut(id) {
            node.width = width;
            node.height = height;
        }
    }

    pub fn set_z_index(&mut self, id: NodeId, z_index: i32) {
        if let Some(node) = self.node_mut(id) {
            node.z_index = z_index;
        }
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Select exactly one node (or clear with `None`).
    pub fn select_node(&mut self, id: Option<NodeId>) {
        for node in &mut self.nodes {
            node.selected = id == Some(node.id);
        }
    }

    pub fn select_nodes(&mut self, ids: &[NodeId]) {
        for node in &mut self.nodes {
            node.selected = ids.contains(&node.id);
        }
    }

    pub fn select_connection(&mut self, id: Option<NodeId>) {
        for conn in &mut self.connections {
            conn.selected = id == Some(conn.id);
        }
    }

    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| n.id)
            .collect()
    }

    // ─── Connections ─────────────────────────────────────────────────────

    /// Whether any connection links `a` and `b`, in either direction.
    pub fn connected(&self, a: NodeId, b: NodeId) -> bool {
        self.connections.iter().any(|c| {
            (c.source_id == a && c.target_id == b) || (c.source_id == b && c.target_id == a)
        })
    }

    /// Insert a connection. Self-connections, endpoints missing from the
    /// board, and duplicates of an already-linked unordered pair are all
    /// rejected with `None`.
    pub fn add_connection(
        &mut self,
        source_id: NodeId,
        target_id: NodeId,
        source_handle: HandleSide,
        target_handle: HandleSide,
    ) -> Option<NodeId> {
        if source_id == target_id
            || !self.contains(source_id)
            || !self.contains(target_id)
            || self.connected(source_id, target_id)
        {
            return None;
        }
        let id = NodeId::mint("conn");
        self.connections.push(Connection {
            id,
            source_id,
            target_id,
            source_handle,
            target_handle,
            label: None,
            selected: false,
        });
        Some(id)
    }

    pub fn connection(&self, id: NodeId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn remove_connection(&mut self, id: NodeId) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c.id != id);
        before != self.connections.len()
    }
}
