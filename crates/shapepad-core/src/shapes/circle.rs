//! Circle shape.

use super::{BLUE_500, SerializableColor, ShapeId, ShapeTrait};
use kurbo::{BezPath, Circle as KurboCircle, Point, Shape as KurboShape, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A filled circle anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Radius (half the rendered diameter).
    pub radius: f64,
    /// Fill color.
    pub fill: SerializableColor,
}

impl Circle {
    /// Create a new circle with the default blue fill.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            fill: BLUE_500,
        }
    }

    /// Create a circle from its diameter, the way sizes are given for spawning.
    pub fn with_diameter(center: Point, diameter: f64) -> Self {
        Self::new(center, diameter / 2.0)
    }

    /// Replace the fill color.
    pub fn with_fill(mut self, fill: SerializableColor) -> Self {
        self.fill = fill;
        self
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, self.radius)
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn center(&self) -> Point {
        self.center
    }

    fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    fn size(&self) -> Size {
        Size::new(self.radius * 2.0, self.radius * 2.0)
    }

    fn hit_test(&self, point: Point) -> bool {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn fill(&self) -> SerializableColor {
        self.fill
    }
}
