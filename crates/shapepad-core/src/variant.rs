//! Presets for the three shape pages.

use crate::config::{BoardConfig, ShapeDefaults};
use crate::drag::Targeting;
use crate::frame::RedrawPolicy;
use crate::shapes::ShapeKind;
use crate::spawn::SpawnPolicy;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// One of the independent shape pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variant {
    /// Raster surface repainted every frame; presses resolve through hit-testing.
    #[default]
    CanvasPainter,
    /// Shapes as positioned elements; presses land on the element itself.
    Painter,
    /// Bunny icons spawned at random spots.
    Bunny,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::CanvasPainter, Variant::Painter, Variant::Bunny];

    /// Display name for page tabs.
    pub fn title(self) -> &'static str {
        match self {
            Variant::CanvasPainter => "Canvas Painter",
            Variant::Painter => "Painter",
            Variant::Bunny => "Bunny",
        }
    }

    /// Board configuration matching this page.
    pub fn config(self) -> BoardConfig {
        match self {
            Variant::CanvasPainter => BoardConfig {
                redraw: RedrawPolicy::Continuous,
                ..BoardConfig::default()
            },
            Variant::Painter => BoardConfig {
                shapes: ShapeDefaults {
                    circle_diameter: 64.0,
                    rectangle_size: Size::new(80.0, 64.0),
                    ..ShapeDefaults::default()
                },
                spawn: SpawnPolicy::Fixed {
                    at: Point::new(50.0, 50.0),
                },
                targeting: Targeting::Direct,
                ..BoardConfig::default()
            },
            Variant::Bunny => {
                let half = ShapeDefaults::default().bunny_side / 2.0;
                BoardConfig {
                    spawn_kinds: vec![ShapeKind::Bunny],
                    // Top-left corner anywhere in [0, 400) on both axes.
                    spawn: SpawnPolicy::Random {
                        area: Rect::new(half, half, 400.0 + half, 400.0 + half),
                    },
                    targeting: Targeting::Direct,
                    release_on_leave: false,
                    ..BoardConfig::default()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_valid() {
        for variant in Variant::ALL {
            assert!(variant.config().validate().is_ok(), "{variant:?}");
        }
    }

    #[test]
    fn test_canvas_painter_preset() {
        let config = Variant::CanvasPainter.config();
        assert_eq!(config.redraw, RedrawPolicy::Continuous);
        assert_eq!(config.targeting, Targeting::HitTest);
        assert_eq!(config.spawn, SpawnPolicy::Fixed { at: Point::new(100.0, 100.0) });
        assert!((config.shapes.circle_diameter - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_painter_preset() {
        let config = Variant::Painter.config();
        assert_eq!(config.targeting, Targeting::Direct);
        assert_eq!(config.shapes.rectangle_size, Size::new(80.0, 64.0));
        assert_eq!(config.spawn_kinds, vec![ShapeKind::Circle, ShapeKind::Rectangle]);
    }

    #[test]
    fn test_bunny_preset() {
        let config = Variant::Bunny.config();
        assert_eq!(config.spawn_kinds, vec![ShapeKind::Bunny]);
        assert!(!config.release_on_leave);
        assert_eq!(
            config.spawn,
            SpawnPolicy::Random {
                area: Rect::new(50.0, 50.0, 450.0, 450.0)
            }
        );
    }
}
