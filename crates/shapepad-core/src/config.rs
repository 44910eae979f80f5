//! Board configuration and preset loading.

use crate::drag::{GrabMode, Targeting};
use crate::frame::RedrawPolicy;
use crate::shapes::{BLUE_500, GREEN_500, SADDLE_BROWN, SerializableColor, ShapeKind};
use crate::spawn::SpawnPolicy;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default drawing surface size in pixels.
pub const DEFAULT_SURFACE_SIZE: Size = Size::new(800.0, 600.0);

/// Sizes and colors given to newly created shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeDefaults {
    pub circle_diameter: f64,
    pub circle_color: SerializableColor,
    pub rectangle_size: Size,
    pub rectangle_color: SerializableColor,
    pub bunny_side: f64,
    pub bunny_color: SerializableColor,
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self {
            circle_diameter: 50.0,
            circle_color: BLUE_500,
            rectangle_size: Size::new(80.0, 60.0),
            rectangle_color: GREEN_500,
            bunny_side: 100.0,
            bunny_color: SADDLE_BROWN,
        }
    }
}

/// Everything that distinguishes one board from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Size of the bounded interactive surface.
    pub surface_size: Size,
    /// Kinds offered as spawn buttons, in button order.
    pub spawn_kinds: Vec<ShapeKind>,
    /// Shape sizes and colors.
    pub shapes: ShapeDefaults,
    /// Where new shapes appear.
    pub spawn: SpawnPolicy,
    /// How a pointer-down picks its target.
    pub targeting: Targeting,
    /// How the grabbed shape follows the pointer.
    pub grab: GrabMode,
    /// Whether leaving the surface ends a drag.
    pub release_on_leave: bool,
    /// Redraw cadence.
    pub redraw: RedrawPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            surface_size: DEFAULT_SURFACE_SIZE,
            spawn_kinds: vec![ShapeKind::Circle, ShapeKind::Rectangle],
            shapes: ShapeDefaults::default(),
            spawn: SpawnPolicy::Fixed {
                at: Point::new(100.0, 100.0),
            },
            targeting: Targeting::HitTest,
            grab: GrabMode::Center,
            release_on_leave: true,
            redraw: RedrawPolicy::OnChange,
        }
    }
}

impl BoardConfig {
    /// Check that sizes are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.surface_size.width) || !positive(self.surface_size.height) {
            return Err(ConfigError::Invalid(format!(
                "surface size must be positive, got {}x{}",
                self.surface_size.width, self.surface_size.height
            )));
        }
        let d = &self.shapes;
        if !positive(d.circle_diameter)
            || !positive(d.rectangle_size.width)
            || !positive(d.rectangle_size.height)
            || !positive(d.bunny_side)
        {
            return Err(ConfigError::Invalid("shape sizes must be positive".to_string()));
        }
        if self.spawn_kinds.is_empty() {
            return Err(ConfigError::Invalid("at least one spawn kind is required".to_string()));
        }
        self.spawn.validate()
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize and validate a config from JSON.
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a preset file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded board config from {}", path.display());
        Ok(config)
    }
}
