//! Canvas interaction orchestrator.
//!
//! The single pointer/wheel/keyboard surface. Pointer-downs are offered
//! to the view controller first (pan and box-select claims), then to the
//! multi-select bounding box, then resolved against the topmost node
//! part. Moves and ups are routed to whichever controller owns the
//! active gesture; at most one gesture is live at a time, and a down
//! that arrives mid-gesture is simply ignored. Every batch of mutations
//! is returned to the caller — the engine never mutates the board.

use crate::capture::InputCapture;
use crate::connect;
use crate::drag;
use crate::gesture::{Gesture, PendingTarget};
use crate::hit::{self, Hit, HitPart};
use crate::input::{InputEvent, Modifiers, PointerButton};
use crate::mutation::CanvasMutation;
use crate::resize;
use crate::select::{DRAG_THRESHOLD, Marquee};
use crate::view::{self, ToolMode};
use nd_core::{Board, Point, Rect, Viewport, absolute_bounds};

/// The interaction engine. Owns only ephemeral gesture state; the node
/// and connection lists stay with the caller and are passed in as a
/// read-only snapshot per event.
#[derive(Debug, Default)]
pub struct CanvasEngine {
    gesture: Gesture,
    tool: ToolMode,
    snap_to_grid: bool,
    space_held: bool,
    capture: InputCapture,
}

impl CanvasEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolMode) {
        self.tool = tool;
    }

    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.snap_to_grid = snap;
    }

    /// Current gesture, for cursor and visual feedback.
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// The marching rectangle while a box-select is live (screen space).
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self.gesture {
            Gesture::BoxSelecting { start, end } => Some(Marquee { start, end }.rect()),
            _ => None,
        }
    }

    /// The rubber-band line of a live connection gesture, in canvas
    /// space: fixed source handle anchor → live pointer.
    pub fn rubber_band(&self, board: &Board) -> Option<(Point, Point)> {
        let (source, handle, cursor) = match self.gesture {
            Gesture::ConnectingDrag {
                source,
                source_handle,
                cursor,
                ..
            }
            | Gesture::ConnectingClick {
                source,
                source_handle,
                cursor,
                ..
            } => (source, source_handle, cursor),
            _ => return None,
        };
        absolute_bounds(board, source).map(|b| (handle.anchor(&b), cursor))
    }

    /// Process one input event against the current board snapshot.
    /// Returns the mutations the store should apply, in order.
    pub fn handle_event(
        &mut self,
        board: &Board,
        viewport: Viewport,
        event: &InputEvent,
    ) -> Vec<CanvasMutation> {
        match event {
            InputEvent::KeyDown { key, modifiers } => self.on_key_down(board, key, *modifiers),
            InputEvent::KeyUp { key } => {
                if key == " " {
                    self.space_held = false;
                }
                Vec::new()
            }
            InputEvent::Wheel { x, y, dx, dy, ctrl } => {
                vec![CanvasMutation::SetViewport {
                    viewport: view::wheel(viewport, Point::new(*x, *y), *dx, *dy, *ctrl),
                }]
            }
            InputEvent::PointerDown {
                x,
                y,
                button,
                modifiers,
                time_ms,
            } => self.on_pointer_down(
                board,
                viewport,
                Point::new(*x, *y),
                *button,
                *modifiers,
                *time_ms,
            ),
            InputEvent::PointerMove { x, y, time_ms, .. } => {
                self.on_pointer_move(board, viewport, Point::new(*x, *y), *time_ms)
            }
            InputEvent::PointerUp { x, y, time_ms, .. } => {
                self.on_pointer_up(board, viewport, Point::new(*x, *y), *time_ms)
            }
            InputEvent::PointerLeave => self.on_pointer_leave(),
        }
    }

    fn on_key_down(
        &mut self,
        board: &Board,
        key: &str,
        modifiers: Modifiers,
    ) -> Vec<CanvasMutation> {
        match key {
            " " => {
                self.space_held = true;
                Vec::new()
            }
            "Escape" => {
                match self.gesture {
                    Gesture::BoxSelecting { .. }
                    | Gesture::ConnectingDrag { .. }
                    | Gesture::ConnectingClick { .. } => {
                        log::debug!("escape cancels {}", self.gesture.name());
                        self.gesture = Gesture::Idle;
                        self.capture.release();
                    }
                    _ => {}
                }
                Vec::new()
            }
            "]" if modifiers.command() => self.nudge_z(board, 1),
            "[" if modifiers.command() => self.nudge_z(board, -1),
            _ => Vec::new(),
        }
    }

    /// Explicit z-index edit: raise or lower every selected node a step.
    fn nudge_z(&self, board: &Board, step: i32) -> Vec<CanvasMutation> {
        board
            .selected_nodes()
            .into_iter()
            .filter_map(|id| {
                board.node(id).map(|n| CanvasMutation::SetZIndex {
                    id,
                    z_index: n.z_index + step,
                })
            })
            .collect()
    }

    fn on_pointer_down(
        &mut self,
        board: &Board,
        viewport: Viewport,
        screen: Point,
        button: PointerButton,
        modifiers: Modifiers,
        time_ms: f64,
    ) -> Vec<CanvasMutation> {
        let canvas_p = viewport.to_canvas(screen);

        // An armed click-to-connect sees the press first: a click on a
        // different node completes it, anything else leaves it armed.
        // A stale armed state is dropped and the press handled fresh.
        if let Gesture::ConnectingClick {
            source,
            source_handle,
            armed_at_ms,
            ..
        } = self.gesture
        {
            if connect::expired(armed_at_ms, time_ms) {
                log::debug!("click-connect from {source} expired");
                self.gesture = Gesture::Idle;
            } else {
                return match connect::pick(board, canvas_p) {
                    Some((id, handle)) if id != source => {
                        let mutation = connect::complete(
                            board,
                            source,
                            source_handle,
                            Some(PendingTarget { id, handle }),
                            canvas_p,
                        );
                        self.gesture = Gesture::Idle;
                        mutation.into_iter().collect()
                    }
                    _ => Vec::new(),
                };
            }
        }

        // A new gesture may only begin from idle.
        if !self.gesture.is_idle() {
            return Vec::new();
        }

        if view::wants_pan(self.tool, self.space_held, button) {
            self.gesture = Gesture::Panning {
                start: screen,
                origin: viewport,
            };
            self.capture.acquire(None);
            log::debug!("gesture: panning");
            return Vec::new();
        }

        if button != PointerButton::Primary {
            return Vec::new();
        }

        // The multi-select bounding box overlays the nodes it covers:
        // pressing inside it drags the whole selection.
        if let Some(bbox) = view::selection_bounds(board)
            && bbox.contains(canvas_p)
        {
            let entries = drag::begin_selection(board);
            if !entries.is_empty() {
                self.gesture = Gesture::DraggingNodes {
                    start: screen,
                    entries,
                    moved: false,
                };
                self.capture.acquire(None);
                log::debug!("gesture: dragging selection");
            }
            return Vec::new();
        }

        match hit::hit_test(board, canvas_p) {
            Some(Hit {
                id,
                part: HitPart::Handle(side),
            }) => {
                self.gesture = Gesture::ConnectingDrag {
                    source: id,
                    source_handle: side,
                    start: screen,
                    cursor: canvas_p,
                    target: None,
                    moved: false,
                };
                self.capture.acquire(Some(id));
                log::debug!("gesture: connecting from {id}");
                Vec::new()
            }
            Some(Hit {
                id,
                part: HitPart::Resize(dir),
            }) => {
                if let Some((baseline, children)) = resize::begin(board, id) {
                    self.gesture = Gesture::Resizing {
                        id,
                        dir,
                        start: screen,
                        baseline,
                        children,
                        moved: false,
                    };
                    self.capture.acquire(Some(id));
                    log::debug!("gesture: resizing {id}");
                }
                Vec::new()
            }
            Some(Hit {
                id,
                part: HitPart::Body,
            }) => {
                let (muts, entries) = drag::begin(board, id, modifiers);
                if !entries.is_empty() {
                    self.gesture = Gesture::DraggingNodes {
                        start: screen,
                        entries,
                        moved: false,
                    };
                    self.capture.acquire(Some(id));
                    log::debug!("gesture: dragging {id}");
                }
                muts
            }
            None => {
                // Empty canvas (or a group body): start a box-select and
                // clear the selection immediately.
                self.gesture = Gesture::BoxSelecting {
                    start: screen,
                    end: screen,
                };
                self.capture.acquire(None);
                vec![
                    CanvasMutation::SelectNode { id: None },
                    CanvasMutation::SelectConnection { id: None },
                ]
            }
        }
    }

    fn on_pointer_move(
        &mut self,
        board: &Board,
        viewport: Viewport,
        screen: Point,
        time_ms: f64,
    ) -> Vec<CanvasMutation> {
        let canvas_p = viewport.to_canvas(screen);

        if let Gesture::ConnectingClick { armed_at_ms, .. } = self.gesture
            && connect::expired(armed_at_ms, time_ms)
        {
            self.gesture = Gesture::Idle;
            return Vec::new();
        }

        match &mut self.gesture {
            Gesture::Idle => Vec::new(),
            Gesture::Panning { start, origin } => vec![CanvasMutation::SetViewport {
                viewport: view::pan(*origin, *start, screen),
            }],
            Gesture::BoxSelecting { end, .. } => {
                *end = screen;
                Vec::new()
            }
            Gesture::DraggingNodes {
                start,
                entries,
                moved,
            } => {
                *moved |= screen.distance(*start) > DRAG_THRESHOLD;
                if !*moved {
                    return Vec::new();
                }
                let delta = cumulative_delta(*start, screen, viewport);
                drag::move_batch(board, entries, delta).into_iter().collect()
            }
            Gesture::Resizing {
                id,
                dir,
                start,
                baseline,
                children,
                moved,
            } => {
                *moved |= screen.distance(*start) > DRAG_THRESHOLD;
                if !*moved {
                    return Vec::new();
                }
                let delta = cumulative_delta(*start, screen, viewport);
                resize::move_batch(*id, baseline, children, *dir, delta)
            }
            Gesture::ConnectingDrag {
                source,
                start,
                cursor,
                target,
                moved,
                ..
            } => {
                *moved |= screen.distance(*start) > DRAG_THRESHOLD;
                *cursor = canvas_p;
                *target = connect::hover_target(board, *source, canvas_p);
                Vec::new()
            }
            Gesture::ConnectingClick { cursor, .. } => {
                // The rubber band follows the hover while armed.
                *cursor = canvas_p;
                Vec::new()
            }
        }
    }

    fn on_pointer_up(
        &mut self,
        board: &Board,
        viewport: Viewport,
        screen: Point,
        time_ms: f64,
    ) -> Vec<CanvasMutation> {
        let canvas_p = viewport.to_canvas(screen);

        // Release capture (the canvas surface and whichever node element
        // acquired it at gesture start) before finalizing.
        self.capture.release();

        let gesture = std::mem::take(&mut self.gesture);
        match gesture {
            Gesture::Idle => Vec::new(),
            Gesture::Panning { .. } => Vec::new(),
            Gesture::BoxSelecting { start, .. } => {
                let marquee = Marquee { start, end: screen };
                if marquee.is_meaningful() {
                    vec![CanvasMutation::SelectNodes {
                        ids: marquee.finalize(board, viewport),
                    }]
                } else {
                    Vec::new()
                }
            }
            Gesture::DraggingNodes {
                start,
                entries,
                moved,
            } => {
                if !moved {
                    return Vec::new();
                }
                let delta = cumulative_delta(start, screen, viewport);
                drag::finish(board, &entries, delta, self.snap_to_grid)
            }
            Gesture::Resizing {
                id,
                dir,
                start,
                baseline,
                children,
                moved,
            } => {
                if !moved {
                    return Vec::new();
                }
                let delta = cumulative_delta(start, screen, viewport);
                resize::finish(id, &baseline, &children, dir, delta, self.snap_to_grid)
            }
            Gesture::ConnectingDrag {
                source,
                source_handle,
                cursor,
                target,
                moved,
                ..
            } => {
                if !moved {
                    // A drag-free click on a handle arms click-to-connect.
                    self.gesture = Gesture::ConnectingClick {
                        source,
                        source_handle,
                        armed_at_ms: time_ms,
                        cursor,
                    };
                    log::debug!("click-connect armed from {source}");
                    return Vec::new();
                }
                connect::complete(board, source, source_handle, target, canvas_p)
                    .into_iter()
                    .collect()
            }
            armed @ Gesture::ConnectingClick { .. } => {
                // The arming click's own release (or that of an ignored
                // click): stay armed.
                self.gesture = armed;
                Vec::new()
            }
        }
    }

    fn on_pointer_leave(&mut self) -> Vec<CanvasMutation> {
        // Capture keeps every other gesture alive off-surface; a
        // box-select has nothing to finalize and simply cancels.
        if matches!(self.gesture, Gesture::BoxSelecting { .. }) {
            self.gesture = Gesture::Idle;
            self.capture.release();
        }
        Vec::new()
    }
}

/// Cumulative canvas-space delta since gesture start: the raw screen
/// delta divided by the current scale.
fn cumulative_delta(start: Point, current: Point, viewport: Viewport) -> Point {
    Point::new(
        (current.x - start.x) / viewport.scale,
        (current.y - start.y) / viewport.scale,
    )
}
