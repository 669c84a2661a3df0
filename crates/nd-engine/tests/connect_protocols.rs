//! Integration tests: the two connection protocols end to end.
//!
//! Drag-to-connect: press a source handle, rubber-band to the target,
//! release. Click-to-connect: a drag-free click arms, a later click on a
//! different node completes; Escape and the 30 s idle timer disarm.

use nd_core::{Board, HandleSide, Node, NodeId, NodeKind, Point, Viewport};
use nd_engine::{CanvasEngine, CanvasMutation, InputEvent, Modifiers, apply_all};

/// Board with node `a` (100×100 at origin) and node `b` (80×80 centered
/// at (500, 300)).
fn two_node_board() -> Board {
    let mut board = Board::new();
    board.insert(
        Node::new(NodeId::intern("a"), NodeKind::Content, Point::new(0.0, 0.0))
            .with_size(100.0, 100.0),
    );
    board.insert(
        Node::new(NodeId::intern("b"), NodeKind::Content, Point::new(460.0, 260.0))
            .with_size(80.0, 80.0),
    );
    board
}

fn drive(
    engine: &mut CanvasEngine,
    board: &mut Board,
    viewport: &mut Viewport,
    event: InputEvent,
) -> Vec<CanvasMutation> {
    let muts = engine.handle_event(board, *viewport, &event);
    apply_all(board, viewport, muts.clone());
    muts
}

fn down_at(x: f32, y: f32, time_ms: f64) -> InputEvent {
    InputEvent::PointerDown {
        x,
        y,
        button: nd_engine::PointerButton::Primary,
        modifiers: Modifiers::NONE,
        time_ms,
    }
}

fn up_at(x: f32, y: f32, time_ms: f64) -> InputEvent {
    InputEvent::PointerUp {
        x,
        y,
        modifiers: Modifiers::NONE,
        time_ms,
    }
}

// ─── Drag-to-connect ─────────────────────────────────────────────────────

#[test]
fn drag_connect_resolves_closest_target_handle() {
    let mut board = two_node_board();
    let mut viewport = Viewport::default();
    let mut engine = CanvasEngine::new();

    // Press a's right handle (100, 50), drag onto b's body, release at
    // (480, 290) — no handle hovered precisely, so b's left handle (the
    // closest of the four) is chosen.
    drive(&mut engine, &mut board, &mut viewport, InputEvent::pointer_down(100.0, 50.0));
    assert_eq!(engine.gesture().name(), "connecting-drag");
    drive(&mut engine, &mut board, &mut viewport, InputEvent::pointer_move(480.0, 290.0));
    drive(&mut engine, &mut board, &mut viewport, InputEvent::pointer_up(480.0, 290.0));

    assert_eq!(board.connections.len(), 1);
    let conn = &board.connections[0];
    assert_eq!(conn.source_id, NodeId::intern("a"));
    assert_eq!(conn.target_id, NodeId::intern("b"));
    assert_eq!(conn.source_handle, HandleSide::Right);
    assert_eq!(conn.target_handle, HandleSide::Left);
    assert!(engine.gesture().is_idle());
}

#[test]
fn drag_connect_released_over_nothing_is_dropped() {
    let mut board = two_node_board();
    let mut viewport = Viewport::default();
    let mut engine = CanvasEngine::new();

    drive(&mut engine, &mut board, &mut viewport, InputEvent::pointer_down(100.0, 50.0));
    drive(&mut engine, &mut board, &mut viewport, InputEvent::pointer_move(900.0, 900.0));
    let muts = drive(&mut engine, &mut board, &mut viewport, InputEvent::pointer_up(900.0, 900.0));

    assert!(muts.is_empty());
    assert!(board.connections.is_empty());
}

#[test]
fn duplicate_pair_is_inserted_once() {
    let mut board = two_node_board();
    let mut viewport = Viewport::default();
    let mut engine = CanvasEngine::new();

    // a → b.
    drive(&mut engine, &mut board, &mut viewport, InputEvent::pointer_down(100.0, 50.0));
    drive(&mut engine, &mut board, &mut viewport, InputEvent::pointer_move(500.0, 300.0));
    drive(&mut engine, &mut board, &mut viewport, InputEvent::pointer_up(500.0, 300.0));
    assert_eq!(board.connections.len(), 1);

    // b → a over the reverse direction: same unordered pair, no insert.
    drive(&mut engine, &mut board, &mut viewport, InputEvent::pointer_down(460.0, 300.0));
    assert_eq!(engine.gesture().name(), "connecting-drag");
    drive(&mut engine, &mut board, &mut viewport, InputEvent::pointer_move(50.0, 50.0));
    let muts = drive(&mut engine, &mut board, &mut viewport, InputEvent::pointer_up(50.0, 50.0));

    assert!(muts.is_empty());
    assert_eq!(board.connections.len(), 1);
}

// ─── Click-to-connect ────────────────────────────────────────────────────

#[test]
fn click_connect_arms_then_completes_on_second_node() {
    let mut board = two_node_board();
    let mut viewport = Viewport::default();
    let mut engine = CanvasEngine::new();

    // Drag-free click on a's right handle arms the connection.
    drive(&mut engine, &mut board, &mut viewport, down_at(100.0, 50.0, 1_000.0));
    drive(&mut engine, &mut board, &mut viewport, up_at(100.0, 50.0, 1_100.0));
    assert_eq!(engine.gesture().name(), "connecting-click");

    // The rubber band follows the hover.
    drive(&mut engine, &mut board, &mut viewport, InputEvent::pointer_move(300.0, 200.0));
    let (from, to) = engine.rubber_band(&board).unwrap();
    assert_eq!(from, Point::new(100.0, 50.0));
    assert_eq!(to, Point::new(300.0, 200.0));

    // Click on b's body completes, resolving b's closest handle.
    let muts = drive(&mut engine, &mut board, &mut viewport, down_at(470.0, 300.0, 2_000.0));
    assert_eq!(muts.len(), 1);
    drive(&mut engine, &mut board, &mut viewport, up_at(470.0, 300.0, 2_050.0));

    assert_eq!(board.connections.len(), 1);
    assert_eq!(board.connections[0].target_handle, HandleSide::Left);
    assert!(engine.gesture().is_idle());
}

#[test]
fn armed_state_survives_unrelated_clicks() {
    let mut board = two_node_board();
    let mut viewport = Viewport::default();
    let mut engine = CanvasEngine::new();

    drive(&mut engine, &mut board, &mut viewport, down_at(100.0, 50.0, 0.0));
    drive(&mut engine, &mut board, &mut viewport, up_at(100.0, 50.0, 50.0));
    assert_eq!(engine.gesture().name(), "connecting-click");

    // A click on empty canvas neither completes nor cancels.
    let muts = drive(&mut engine, &mut board, &mut viewport, down_at(900.0, 900.0, 500.0));
    assert!(muts.is_empty());
    drive(&mut engine, &mut board, &mut viewport, up_at(900.0, 900.0, 550.0));
    assert_eq!(engine.gesture().name(), "connecting-click");

    // Clicking the source node again is ignored too (no self-connection).
    let muts = drive(&mut engine, &mut board, &mut viewport, down_at(50.0, 50.0, 600.0));
    assert!(muts.is_empty());
    assert_eq!(engine.gesture().name(), "connecting-click");
}

#[test]
fn escape_disarms_click_connect() {
    let mut board = two_node_board();
    let mut viewport = Viewport::default();
    let mut engine = CanvasEngine::new();

    drive(&mut engine, &mut board, &mut viewport, down_at(100.0, 50.0, 0.0));
    drive(&mut engine, &mut board, &mut viewport, up_at(100.0, 50.0, 50.0));
    assert_eq!(engine.gesture().name(), "connecting-click");

    drive(
        &mut engine,
        &mut board,
        &mut viewport,
        InputEvent::KeyDown {
            key: "Escape".into(),
            modifiers: Modifiers::NONE,
        },
    );
    assert!(engine.gesture().is_idle());
    assert!(board.connections.is_empty());
}

#[test]
fn stale_armed_connection_expires_and_a_new_one_starts() {
    let mut board = two_node_board();
    let mut viewport = Viewport::default();
    let mut engine = CanvasEngine::new();

    // Arm from a at t = 1 s.
    drive(&mut engine, &mut board, &mut viewport, down_at(100.0, 50.0, 1_000.0));
    drive(&mut engine, &mut board, &mut viewport, up_at(100.0, 50.0, 1_000.0));
    assert_eq!(engine.gesture().name(), "connecting-click");

    // 31 s later, a click on b's top handle must NOT complete the stale
    // connection — it starts a fresh one from b.
    drive(&mut engine, &mut board, &mut viewport, down_at(500.0, 260.0, 32_001.0));
    drive(&mut engine, &mut board, &mut viewport, up_at(500.0, 260.0, 32_050.0));

    assert!(board.connections.is_empty());
    match engine.gesture() {
        nd_engine::Gesture::ConnectingClick { source, .. } => {
            assert_eq!(*source, NodeId::intern("b"));
        }
        other => panic!("expected a fresh armed connection from b, got {other:?}"),
    }
}
