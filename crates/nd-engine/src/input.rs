//! Input abstraction layer.
//!
//! Normalizes pointer, wheel, and keyboard events from the host surface
//! (browser, native window, test harness) into a unified `InputEvent`
//! consumed by the orchestrator. Coordinates are screen pixels relative
//! to the canvas element; timestamps are milliseconds on the host's
//! monotonic event clock — the engine never reads a wall clock itself.

use nd_core::Point;

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// The multi-select chord: any of ctrl/cmd/shift.
    pub fn multi_select(&self) -> bool {
        self.ctrl || self.meta || self.shift
    }

    /// Platform-agnostic "command": ctrl or meta.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// A normalized input event.
#[derive(Debug, Clone)]
pub enum InputEvent {
    PointerDown {
        x: f32,
        y: f32,
        button: PointerButton,
        modifiers: Modifiers,
        time_ms: f64,
    },
    PointerMove {
        x: f32,
        y: f32,
        modifiers: Modifiers,
        time_ms: f64,
    },
    PointerUp {
        x: f32,
        y: f32,
        modifiers: Modifiers,
        time_ms: f64,
    },
    /// Pointer left the canvas surface.
    PointerLeave,
    /// Scroll wheel / trackpad. `ctrl` (or pinch) means zoom, plain
    /// deltas mean pan scroll. `x`/`y` is the cursor position.
    Wheel {
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        ctrl: bool,
    },
    /// `key` follows `KeyboardEvent.key` values (`" "`, `"Escape"`, `"["`).
    KeyDown { key: String, modifiers: Modifiers },
    KeyUp { key: String },
}

impl InputEvent {
    /// Plain primary-button press, no modifiers. Test and host shorthand.
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
            time_ms: 0.0,
        }
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
            time_ms: 0.0,
        }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp {
            x,
            y,
            modifiers: Modifiers::NONE,
            time_ms: 0.0,
        }
    }

    /// Extract the screen position if this is a pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::Wheel { x, y, .. } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}
