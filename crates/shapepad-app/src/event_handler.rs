//! Translates window input into board actions.

use kurbo::Point;
use shapepad_core::board::{Board, BoardAction};
use shapepad_core::drag::Targeting;
use shapepad_core::input::{InputState, MouseButton, PointerEvent};
use shapepad_core::surface::Surface;

/// Map a winit button onto the buttons the board understands.
pub fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Tracks the pointer relative to the drawing surface and resolves
/// presses for the active board.
pub struct EventHandler {
    input: InputState,
    surface: Surface,
}

impl EventHandler {
    pub fn new(surface: Surface) -> Self {
        Self {
            input: InputState::new(),
            surface,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Replace the surface geometry (page switch or layout change).
    pub fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
    }

    /// Pointer moved to `window_pos` (logical window coordinates).
    pub fn cursor_moved(&mut self, board: &Board, window_pos: Point) -> Option<BoardAction> {
        let event = self.input.pointer_moved(&self.surface, window_pos)?;
        self.route(board, event)
    }

    /// A button changed state.
    pub fn mouse_input(
        &mut self,
        board: &Board,
        button: winit::event::MouseButton,
        pressed: bool,
    ) -> Option<BoardAction> {
        let button = map_button(button)?;
        let event = if pressed {
            self.input.button_pressed(&self.surface, button)?
        } else {
            self.input.button_released(&self.surface, button)?
        };
        self.route(board, event)
    }

    /// The pointer left the window.
    pub fn cursor_left(&mut self, board: &Board) -> Option<BoardAction> {
        let event = self.input.pointer_left_window()?;
        self.route(board, event)
    }

    fn route(&self, board: &Board, event: PointerEvent) -> Option<BoardAction> {
        match (board.config().targeting, event) {
            (
                Targeting::Direct,
                PointerEvent::Down {
                    position,
                    button: MouseButton::Left,
                },
            ) => board
                .element_at(position)
                .map(|id| BoardAction::PressOn { id, position }),
            (_, event) => Some(BoardAction::Pointer(event)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use shapepad_core::board::BoardChange;
    use shapepad_core::shapes::ShapeKind;
    use shapepad_core::variant::Variant;
    use winit::event::MouseButton as WinitButton;

    fn handler() -> EventHandler {
        EventHandler::new(Surface::new(Point::new(32.0, 80.0), Size::new(800.0, 600.0)))
    }

    fn apply(board: &mut Board, action: Option<BoardAction>) -> BoardChange {
        action.map_or(BoardChange::None, |a| board.dispatch(a))
    }

    #[test]
    fn test_canvas_drag_through_window_coordinates() {
        let mut board = Board::for_variant(Variant::CanvasPainter);
        let id = board.add_shape(ShapeKind::Circle);
        let mut events = handler();

        let a = events.cursor_moved(&board, Point::new(132.0, 180.0));
        apply(&mut board, a);
        let a = events.mouse_input(&board, WinitButton::Left, true);
        assert_eq!(apply(&mut board, a), BoardChange::Grabbed(id));
        let a = events.cursor_moved(&board, Point::new(232.0, 230.0));
        assert_eq!(apply(&mut board, a), BoardChange::Moved(id));
        let a = events.mouse_input(&board, WinitButton::Left, false);
        assert_eq!(apply(&mut board, a), BoardChange::Released(id));

        assert_eq!(
            board.registry().get_shape(id).unwrap().center(),
            Point::new(200.0, 150.0)
        );
    }

    #[test]
    fn test_press_outside_surface_is_dropped() {
        let board = Board::for_variant(Variant::CanvasPainter);
        let mut events = handler();
        events.cursor_moved(&board, Point::new(10.0, 10.0));
        assert!(events.mouse_input(&board, WinitButton::Left, true).is_none());
    }

    #[test]
    fn test_leaving_surface_releases() {
        let mut board = Board::for_variant(Variant::CanvasPainter);
        let id = board.add_shape(ShapeKind::Rectangle);
        let mut events = handler();

        let a = events.cursor_moved(&board, Point::new(132.0, 180.0));
        apply(&mut board, a);
        let a = events.mouse_input(&board, WinitButton::Left, true);
        apply(&mut board, a);
        let a = events.cursor_moved(&board, Point::new(5.0, 5.0));
        assert_eq!(apply(&mut board, a), BoardChange::Released(id));
    }

    #[test]
    fn test_direct_targeting_resolves_element() {
        let mut board = Board::for_variant(Variant::Painter);
        let id = board.add_shape(ShapeKind::Circle);
        let mut events = handler();

        events.cursor_moved(&board, Point::new(82.0, 130.0));
        let action = events.mouse_input(&board, WinitButton::Left, true);
        assert_eq!(
            action,
            Some(BoardAction::PressOn {
                id,
                position: Point::new(50.0, 50.0)
            })
        );
    }

    #[test]
    fn test_direct_targeting_press_on_empty_space() {
        let board = Board::for_variant(Variant::Painter);
        let mut events = handler();
        events.cursor_moved(&board, Point::new(500.0, 500.0));
        assert!(events.mouse_input(&board, WinitButton::Left, true).is_none());
    }

    #[test]
    fn test_unmapped_button() {
        let board = Board::for_variant(Variant::CanvasPainter);
        let mut events = handler();
        events.cursor_moved(&board, Point::new(100.0, 100.0));
        assert!(events.mouse_input(&board, WinitButton::Back, true).is_none());
    }
}
