//! Pointer-drag state machine.
//!
//! ```text
//!   Idle --down on shape--> Dragging(id) --move--> Dragging(id)
//!     ^                          |
//!     +------- up / leave -------+
//! ```

use crate::input::{MouseButton, PointerEvent};
use crate::registry::ShapeRegistry;
use crate::shapes::ShapeId;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// How a pointer-down finds the shape it grabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Targeting {
    /// Resolve the coordinate through the hit-tester.
    #[default]
    HitTest,
    /// The view layer names the pressed element; bare coordinates grab nothing.
    Direct,
}

/// How the grabbed shape follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GrabMode {
    /// The shape's center jumps to the pointer.
    #[default]
    Center,
    /// The point that was grabbed stays under the pointer.
    KeepOffset,
}

/// Current drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        target: ShapeId,
        /// Shape center minus pointer position at grab time.
        grab_offset: Vec2,
    },
}

/// What a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing changed.
    Ignored,
    /// A drag started on this shape.
    Grabbed(ShapeId),
    /// This shape's position was overwritten.
    Moved(ShapeId),
    /// The drag on this shape ended.
    Released(ShapeId),
}

/// Owns the drag state and applies pointer events to a registry.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    grab_mode: GrabMode,
    release_on_leave: bool,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(GrabMode::Center, true)
    }
}

impl DragController {
    pub fn new(grab_mode: GrabMode, release_on_leave: bool) -> Self {
        Self {
            state: DragState::Idle,
            grab_mode,
            release_on_leave,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// The shape being dragged, if any.
    pub fn target(&self) -> Option<ShapeId> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { target, .. } => Some(target),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.target().is_some()
    }

    /// Start dragging `id`, grabbed at `pointer`.
    ///
    /// Ignored while another drag is active or when the shape is unknown.
    pub fn grab(&mut self, registry: &ShapeRegistry, id: ShapeId, pointer: Point) -> DragOutcome {
        if self.is_dragging() {
            return DragOutcome::Ignored;
        }
        let Some(shape) = registry.get_shape(id) else {
            return DragOutcome::Ignored;
        };
        let grab_offset = match self.grab_mode {
            GrabMode::Center => Vec2::ZERO,
            GrabMode::KeepOffset => shape.center() - pointer,
        };
        self.state = DragState::Dragging {
            target: id,
            grab_offset,
        };
        DragOutcome::Grabbed(id)
    }

    /// End any active drag.
    pub fn release(&mut self) -> DragOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragOutcome::Ignored,
            DragState::Dragging { target, .. } => DragOutcome::Released(target),
        }
    }

    /// Apply one pointer event.
    pub fn handle(
        &mut self,
        registry: &mut ShapeRegistry,
        targeting: Targeting,
        event: PointerEvent,
    ) -> DragOutcome {
        match event {
            PointerEvent::Down { position, button } => {
                if button != MouseButton::Left || targeting != Targeting::HitTest {
                    return DragOutcome::Ignored;
                }
                match registry.shape_at(position) {
                    Some(id) => self.grab(registry, id, position),
                    None => DragOutcome::Ignored,
                }
            }
            PointerEvent::Move { position } => {
                let DragState::Dragging { target, grab_offset } = self.state else {
                    return DragOutcome::Ignored;
                };
                if registry.move_shape(target, position + grab_offset) {
                    DragOutcome::Moved(target)
                } else {
                    DragOutcome::Ignored
                }
            }
            PointerEvent::Up { .. } => self.release(),
            PointerEvent::Leave if self.release_on_leave => self.release(),
            PointerEvent::Leave => DragOutcome::Ignored,
        }
    }
}
