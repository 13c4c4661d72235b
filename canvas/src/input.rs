//! Input model: editor modes, pointer buttons, and the drawing state machine.
//!
//! `Mode` captures what a primary-button press means. `InputState` is the
//! gesture tracked between pointer-down and pointer-up; while drawing it holds
//! the world-space anchor so each move can derive a normalized preview
//! [`Rect`] and pointer-up can decide whether to commit it.
//!
//! [`PointerInput`] is the toolkit-neutral event interface the host forwards
//! DOM (or any other) pointer events through.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::consts::MIN_DRAG_EXTENT_M;
use crate::engine::Action;

/// What a primary-button press does on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Drag out a new obstacle.
    #[default]
    Draw,
    /// Click an obstacle to delete it.
    Remove,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// An axis-aligned rectangle in world space with non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Normalize two arbitrary corners into a min-corner rectangle, so drags
    /// in any direction yield the same shape.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Whether a drag of this size is deliberate rather than a stray click.
    ///
    /// Both extents must be strictly greater than [`MIN_DRAG_EXTENT_M`].
    #[must_use]
    pub fn is_committable(&self) -> bool {
        self.width > MIN_DRAG_EXTENT_M && self.height > MIN_DRAG_EXTENT_M
    }
}

/// Transient view state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Current editor mode.
    pub mode: Mode,
    /// Preview of the obstacle being dragged, if any.
    pub pending_rect: Option<Rect>,
}

/// Internal state for the drawing state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging out a new obstacle.
    Drawing {
        /// The world-space corner where the drag started.
        anchor_world: Point,
    },
}

/// Pointer event sink. Points are in screen space (CSS pixels relative to the
/// canvas' top-left corner).
pub trait PointerInput {
    fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action>;
    fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action>;
    fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action>;
}
