//! Shapepad Core Library
//!
//! Platform-agnostic shape registry, hit-testing and pointer-drag logic
//! shared by every shapepad page.

pub mod board;
pub mod config;
pub mod drag;
pub mod frame;
pub mod input;
pub mod registry;
pub mod shapes;
pub mod spawn;
pub mod surface;
pub mod variant;

pub use board::{Board, BoardAction, BoardChange};
pub use config::{BoardConfig, ConfigError, ConfigResult, ShapeDefaults, DEFAULT_SURFACE_SIZE};
pub use drag::{DragController, DragOutcome, DragState, GrabMode, Targeting};
pub use frame::{FrameDecision, FrameLoop, RedrawPolicy};
pub use input::{InputState, MouseButton, PointerEvent};
pub use registry::ShapeRegistry;
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeKind, ShapeTrait};
pub use spawn::{SpawnPolicy, Spawner};
pub use surface::Surface;
pub use variant::Variant;
