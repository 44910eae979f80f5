//! Decorative bunny icon.

use super::{SADDLE_BROWN, SerializableColor, ShapeId, ShapeTrait, box_contains};
use kurbo::{
    Affine, BezPath, Circle as KurboCircle, Ellipse as KurboEllipse, Point, Shape as KurboShape,
    Size, Vec2,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Side length of the icon's view box; part coordinates are given in this space.
const VIEW_BOX: f64 = 100.0;
const EYE_COLOR: SerializableColor = SerializableColor::black();
const NOSE_COLOR: SerializableColor = SerializableColor::rgb(255, 192, 203);

/// What a piece of the drawing depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartRole {
    /// Body, head and ears, painted in the bunny's own color.
    Body,
    Eye,
    Nose,
}

/// One filled piece of the bunny drawing.
#[derive(Debug, Clone)]
pub struct BunnyPart {
    pub role: PartRole,
    pub path: BezPath,
    pub fill: SerializableColor,
}

/// A bunny icon drawn inside a square box anchored at its center.
///
/// The whole box is grabbable, not just the painted parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bunny {
    pub(crate) id: ShapeId,
    /// Center of the icon box.
    pub center: Point,
    /// Side length of the icon box.
    pub side: f64,
    /// Body color.
    pub fill: SerializableColor,
}

impl Bunny {
    pub const DEFAULT_SIDE: f64 = VIEW_BOX;

    /// Create a new bunny with the default size and color.
    pub fn new(center: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            side: Self::DEFAULT_SIDE,
            fill: SADDLE_BROWN,
        }
    }

    /// Create a bunny from the top-left corner of its box.
    pub fn from_top_left(top_left: Point, side: f64) -> Self {
        let mut bunny = Self::new(top_left + Vec2::new(side / 2.0, side / 2.0));
        bunny.side = side;
        bunny
    }

    /// Top-left corner of the icon box.
    pub fn top_left(&self) -> Point {
        self.center - Vec2::new(self.side / 2.0, self.side / 2.0)
    }

    /// Maps view-box coordinates onto the surface.
    fn placement(&self) -> Affine {
        let origin = self.top_left();
        Affine::translate(origin.to_vec2()) * Affine::scale(self.side / VIEW_BOX)
    }

    /// The drawing in paint order (body first, nose last), in surface coordinates.
    pub fn parts(&self) -> Vec<BunnyPart> {
        let placement = self.placement();
        let body = self.fill;

        let mut left_ear = BezPath::new();
        left_ear.move_to((40.0, 30.0));
        left_ear.quad_to((35.0, 10.0), (40.0, 25.0));
        left_ear.close_path();

        let mut right_ear = BezPath::new();
        right_ear.move_to((60.0, 30.0));
        right_ear.quad_to((65.0, 10.0), (60.0, 25.0));
        right_ear.close_path();

        let parts = [
            (PartRole::Body, KurboEllipse::new((50.0, 60.0), (25.0, 20.0), 0.0).to_path(0.1), body),
            (PartRole::Body, KurboCircle::new((50.0, 40.0), 15.0).to_path(0.1), body),
            (PartRole::Body, left_ear, body),
            (PartRole::Body, right_ear, body),
            (PartRole::Eye, KurboCircle::new((45.0, 35.0), 2.0).to_path(0.1), EYE_COLOR),
            (PartRole::Eye, KurboCircle::new((55.0, 35.0), 2.0).to_path(0.1), EYE_COLOR),
            (PartRole::Nose, KurboEllipse::new((50.0, 40.0), (2.0, 1.0), 0.0).to_path(0.1), NOSE_COLOR),
        ];

        parts
            .into_iter()
            .map(|(role, path, fill)| BunnyPart {
                role,
                path: placement * path,
                fill,
            })
            .collect()
    }
}

impl ShapeTrait for Bunny {
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
        Size::new(self.side, self.side)
    }

    fn hit_test(&self, point: Point) -> bool {
        box_contains(self.center, self.size(), point)
    }

    /// Silhouette of the body, head and ears.
    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for part in self.parts().into_iter().filter(|p| p.role == PartRole::Body) {
            path.extend(part.path.elements().iter().copied());
        }
        path
    }

    fn fill(&self) -> SerializableColor {
        self.fill
    }
}
