//! Rectangle shape.

use super::{GREEN_500, SerializableColor, ShapeId, ShapeTrait, box_contains};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned filled rectangle anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Fill color.
    pub fill: SerializableColor,
}

impl Rectangle {
    /// Create a new rectangle with the default green fill.
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            width,
            height,
            fill: GREEN_500,
        }
    }

    /// Replace the fill color.
    pub fn with_fill(mut self, fill: SerializableColor) -> Self {
        self.fill = fill;
        self
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_center_size(self.center, Size::new(self.width, self.height))
    }

    /// Half the width and half the height.
    pub fn half_extents(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl ShapeTrait for Rectangle {
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
        Size::new(self.width, self.height)
    }

    fn hit_test(&self, point: Point) -> bool {
        box_contains(self.center, self.size(), point)
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }

    fn fill(&self) -> SerializableColor {
        self.fill
    }
}
