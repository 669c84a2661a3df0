//! Gesture ownership: the tagged union at the heart of the engine.
//!
//! Exactly one variant is active at any instant. Entering a gesture is
//! only legal from `Idle`, with one exception: click-to-connect re-enters
//! itself (the arming click's release transitions `ConnectingDrag` into
//! `ConnectingClick`, and the completing click leaves it). All variant
//! payloads are baselines captured at gesture start — move handling
//! always derives state from the cumulative delta, never from chained
//! per-event deltas, so pointer event coalescing cannot cause drift.

use nd_core::{HandleSide, NodeId, Point, Rect, Viewport};
use smallvec::SmallVec;

/// One of the eight compass resize grips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDir {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl ResizeDir {
    pub fn affects_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn affects_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub fn affects_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn affects_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }
}

/// Baseline snapshot of one node participating in a drag (or the child
/// of a group being resized): its id and stored position at gesture
/// start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEntry {
    pub id: NodeId,
    /// Stored (parent-relative) position when the gesture began.
    pub origin: Point,
}

/// A connection target recorded while hovering mid-gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTarget {
    pub id: NodeId,
    /// `Some` when a specific handle was hovered, `None` when only the
    /// node body was (resolved to the closest handle at finalize time).
    pub handle: Option<HandleSide>,
}

/// The active gesture and its baseline state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Panning {
        /// Screen point of the pointer-down.
        start: Point,
        /// Viewport at gesture start; pan offsets are derived from it.
        origin: Viewport,
    },
    BoxSelecting {
        /// Both corners in screen space; converted to canvas space only
        /// when the rectangle is finalized.
        start: Point,
        end: Point,
    },
    DraggingNodes {
        start: Point,
        entries: SmallVec<[DragEntry; 8]>,
        /// Set once the pointer travels past the drag threshold; an
        /// unmoved release is a plain click and mutates nothing.
        moved: bool,
    },
    Resizing {
        id: NodeId,
        dir: ResizeDir,
        start: Point,
        /// Stored position + size at gesture start.
        baseline: Rect,
        /// Direct children baselines when resizing a group.
        children: SmallVec<[DragEntry; 8]>,
        moved: bool,
    },
    ConnectingDrag {
        source: NodeId,
        source_handle: HandleSide,
        start: Point,
        /// Live rubber-band endpoint in canvas space.
        cursor: Point,
        target: Option<PendingTarget>,
        moved: bool,
    },
    ConnectingClick {
        source: NodeId,
        source_handle: HandleSide,
        /// Event timestamp when armed; expires after 30 s.
        armed_at_ms: f64,
        cursor: Point,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Short name for logging and cursor feedback.
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Panning { .. } => "panning",
            Gesture::BoxSelecting { .. } => "box-selecting",
            Gesture::DraggingNodes { .. } => "dragging-nodes",
            Gesture::Resizing { .. } => "resizing",
            Gesture::ConnectingDrag { .. } => "connecting-drag",
            Gesture::ConnectingClick { .. } => "connecting-click",
        }
    }
}
