//! A single interactive surface: registry, drag state and configuration
//! updated through one reducer-style entry point.

use crate::config::{BoardConfig, ConfigResult};
use crate::drag::{DragController, DragOutcome, DragState, Targeting};
use crate::frame::FrameLoop;
use crate::input::PointerEvent;
use crate::registry::ShapeRegistry;
use crate::shapes::{ShapeId, ShapeKind};
use crate::spawn::Spawner;
use crate::variant::Variant;
use kurbo::Point;

/// Something the user did to a board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoardAction {
    /// A spawn button was clicked.
    AddShape(ShapeKind),
    /// Pointer input in surface coordinates.
    Pointer(PointerEvent),
    /// A press delivered directly on a rendered element.
    PressOn { id: ShapeId, position: Point },
}

/// What a dispatched action changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardChange {
    None,
    Added(ShapeId),
    Grabbed(ShapeId),
    Moved(ShapeId),
    Released(ShapeId),
}

impl From<DragOutcome> for BoardChange {
    fn from(outcome: DragOutcome) -> Self {
        match outcome {
            DragOutcome::Ignored => BoardChange::None,
            DragOutcome::Grabbed(id) => BoardChange::Grabbed(id),
            DragOutcome::Moved(id) => BoardChange::Moved(id),
            DragOutcome::Released(id) => BoardChange::Released(id),
        }
    }
}

/// State of one page.
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    registry: ShapeRegistry,
    drag: DragController,
    spawner: Spawner,
    frames: FrameLoop,
}

impl Board {
    /// Create an empty board.
    pub fn new(config: BoardConfig) -> Self {
        let spawner = Spawner::new(config.spawn);
        Self::with_spawner(config, spawner)
    }

    /// Create an empty board after checking the config.
    pub fn try_new(config: BoardConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create an empty board whose random placement is reproducible.
    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        let spawner = Spawner::with_seed(config.spawn, seed);
        Self::with_spawner(config, spawner)
    }

    fn with_spawner(config: BoardConfig, spawner: Spawner) -> Self {
        Self {
            registry: ShapeRegistry::with_defaults(config.shapes.clone()),
            drag: DragController::new(config.grab, config.release_on_leave),
            frames: FrameLoop::new(config.redraw),
            spawner,
            config,
        }
    }

    /// Create an empty board for one of the stock pages.
    pub fn for_variant(variant: Variant) -> Self {
        Self::new(variant.config())
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn frames(&self) -> &FrameLoop {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut FrameLoop {
        &mut self.frames
    }

    /// Spawn a shape of `kind` at the next spawn position.
    pub fn add_shape(&mut self, kind: ShapeKind) -> ShapeId {
        let at = self.spawner.next_position();
        let id = self.registry.add_shape(kind, at);
        log::debug!("Added {:?} {} at ({:.1}, {:.1})", kind, id, at.x, at.y);
        id
    }

    /// The element a press at `position` lands on, for front-ends that
    /// resolve presses themselves (direct targeting).
    pub fn element_at(&self, position: Point) -> Option<ShapeId> {
        self.registry.shape_at(position)
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: BoardAction) -> BoardChange {
        let change = match action {
            BoardAction::AddShape(kind) => BoardChange::Added(self.add_shape(kind)),
            BoardAction::Pointer(event) => self
                .drag
                .handle(&mut self.registry, self.config.targeting, event)
                .into(),
            BoardAction::PressOn { id, position } => {
                if self.config.targeting == Targeting::Direct {
                    self.drag.grab(&self.registry, id, position).into()
                } else {
                    BoardChange::None
                }
            }
        };
        match change {
            BoardChange::Grabbed(id) => log::debug!("Drag started on {id}"),
            BoardChange::Released(id) => log::debug!("Drag ended on {id}"),
            _ => {}
        }
        change
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}
