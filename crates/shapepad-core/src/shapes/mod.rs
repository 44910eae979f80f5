//! Shape definitions for the drawing surface.

mod bunny;
mod circle;
mod rectangle;

pub use bunny::{Bunny, BunnyPart, PartRole};
pub use circle::Circle;
pub use rectangle::Rectangle;

use kurbo::{BezPath, Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Parse a CSS hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
            )),
            6 => Some(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    /// Format as `#rrggbb` (alpha is dropped when opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Tailwind blue-500, the circle fill on every page.
pub const BLUE_500: SerializableColor = SerializableColor::rgb(0x3B, 0x82, 0xF6);
/// Tailwind green-500, the rectangle fill on every page.
pub const GREEN_500: SerializableColor = SerializableColor::rgb(0x22, 0xC5, 0x5E);
/// Saddle brown used for the bunny body.
pub const SADDLE_BROWN: SerializableColor = SerializableColor::rgb(0x8B, 0x45, 0x13);

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// The closed set of shape kinds a user can spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    /// Decorative bunny icon.
    Bunny,
}

impl ShapeKind {
    /// Label shown on the spawn button for this kind.
    pub fn button_label(self) -> &'static str {
        match self {
            ShapeKind::Circle => "Add Circle",
            ShapeKind::Rectangle => "Add Rectangle",
            ShapeKind::Bunny => "Create Bunny",
        }
    }
}

/// Common trait for all shapes.
///
/// Every shape is anchored at its center; `position` in the registry is
/// always the center point in surface coordinates.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Center point in surface coordinates.
    fn center(&self) -> Point;

    /// Move the shape so its center sits at `center`.
    fn set_center(&mut self, center: Point);

    /// Width and height of the shape's box.
    fn size(&self) -> Size;

    /// Get the bounding box in surface coordinates.
    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center(), self.size())
    }

    /// Check if a point (in surface coordinates) lies inside this shape.
    /// Points exactly on the edge count as inside.
    fn hit_test(&self, point: Point) -> bool;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Fill color.
    fn fill(&self) -> SerializableColor;
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
    Bunny(Bunny),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Bunny(_) => ShapeKind::Bunny,
        }
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Circle(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
            Shape::Bunny(s) => s.id(),
        }
    }

    pub fn center(&self) -> Point {
        match self {
            Shape::Circle(s) => s.center(),
            Shape::Rectangle(s) => s.center(),
            Shape::Bunny(s) => s.center(),
        }
    }

    pub fn set_center(&mut self, center: Point) {
        match self {
            Shape::Circle(s) => s.set_center(center),
            Shape::Rectangle(s) => s.set_center(center),
            Shape::Bunny(s) => s.set_center(center),
        }
    }

    pub fn size(&self) -> Size {
        match self {
            Shape::Circle(s) => s.size(),
            Shape::Rectangle(s) => s.size(),
            Shape::Bunny(s) => s.size(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Circle(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Bunny(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Shape::Circle(s) => s.hit_test(point),
            Shape::Rectangle(s) => s.hit_test(point),
            Shape::Bunny(s) => s.hit_test(point),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Circle(s) => s.to_path(),
            Shape::Rectangle(s) => s.to_path(),
            Shape::Bunny(s) => s.to_path(),
        }
    }

    pub fn fill(&self) -> SerializableColor {
        match self {
            Shape::Circle(s) => s.fill(),
            Shape::Rectangle(s) => s.fill(),
            Shape::Bunny(s) => s.fill(),
        }
    }
}

/// Axis-aligned box test shared by rectangles and the bunny icon.
pub(crate) fn box_contains(center: Point, size: Size, point: Point) -> bool {
    (point.x - center.x).abs() <= size.width / 2.0
        && (point.y - center.y).abs() <= size.height / 2.0
}
