//! Translation of raw window pointer input into surface pointer events.

use crate::surface::Surface;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event delivered to a board, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
    /// The pointer left the bounded surface.
    Leave,
}

/// Tracks the pointer across window events and decides which surface
/// events they produce.
///
/// Presses only count when they start on the surface, moves only while the
/// pointer is over it, and crossing the surface edge outward yields a
/// single `Leave`. Releases are forwarded from anywhere so a drag always
/// ends on pointer-up.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last pointer position in window coordinates.
    pub pointer_position: Option<Point>,
    /// Whether the pointer was over the surface at the last event.
    inside: bool,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pointer is currently over the surface.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Check if a button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Pointer moved to `window_pos`.
    pub fn pointer_moved(&mut self, surface: &Surface, window_pos: Point) -> Option<PointerEvent> {
        self.pointer_position = Some(window_pos);
        let was_inside = self.inside;
        self.inside = surface.contains(window_pos);
        match (was_inside, self.inside) {
            (_, true) => Some(PointerEvent::Move {
                position: surface.to_local(window_pos),
            }),
            (true, false) => Some(PointerEvent::Leave),
            (false, false) => None,
        }
    }

    /// Button pressed at the last known pointer position.
    pub fn button_pressed(&mut self, surface: &Surface, button: MouseButton) -> Option<PointerEvent> {
        self.pressed_buttons.insert(button);
        let pos = self.pointer_position?;
        if !surface.contains(pos) {
            return None;
        }
        Some(PointerEvent::Down {
            position: surface.to_local(pos),
            button,
        })
    }

    /// Button released at the last known pointer position.
    pub fn button_released(&mut self, surface: &Surface, button: MouseButton) -> Option<PointerEvent> {
        self.pressed_buttons.remove(&button);
        let pos = self.pointer_position?;
        Some(PointerEvent::Up {
            position: surface.to_local(pos),
            button,
        })
    }

    /// The pointer left the window entirely.
    pub fn pointer_left_window(&mut self) -> Option<PointerEvent> {
        self.pointer_position = None;
        let was_inside = std::mem::replace(&mut self.inside, false);
        was_inside.then_some(PointerEvent::Leave)
    }
}
