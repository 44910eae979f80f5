//! Ordered, append-only store of the shapes on a surface.

use crate::config::ShapeDefaults;
use crate::shapes::{Bunny, Circle, Rectangle, Shape, ShapeId, ShapeKind};
use kurbo::Point;
use std::collections::HashMap;
use uuid::Uuid;

/// Shapes in paint order (back to front).
///
/// There is no delete or reorder: a shape's index never changes once it
/// has been added, and only its position is ever mutated.
#[derive(Debug)]
pub struct ShapeRegistry {
    /// Identity of this registry; never shared, not even by clones.
    instance: Uuid,
    shapes: Vec<Shape>,
    /// Index into `shapes` by ID.
    index: HashMap<ShapeId, usize>,
    /// Sizes and colors used by `add_shape`.
    defaults: ShapeDefaults,
    /// Bumped on every mutation.
    revision: u64,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::with_defaults(ShapeDefaults::default())
    }
}

impl Clone for ShapeRegistry {
    fn clone(&self) -> Self {
        Self {
            instance: Uuid::new_v4(),
            shapes: self.shapes.clone(),
            index: self.index.clone(),
            defaults: self.defaults.clone(),
            revision: self.revision,
        }
    }
}

impl ShapeRegistry {
    /// Create an empty registry with the stock shape defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry using the given shape defaults.
    pub fn with_defaults(defaults: ShapeDefaults) -> Self {
        Self {
            instance: Uuid::new_v4(),
            shapes: Vec::new(),
            index: HashMap::new(),
            defaults,
            revision: 0,
        }
    }

    /// Identity of this registry. Together with [`revision`](Self::revision)
    /// it names one exact state of one shape list.
    pub fn instance_id(&self) -> Uuid {
        self.instance
    }

    /// Defaults applied to newly created shapes.
    pub fn defaults(&self) -> &ShapeDefaults {
        &self.defaults
    }

    /// Create a shape of `kind` centered at `center` and append it on top.
    pub fn add_shape(&mut self, kind: ShapeKind, center: Point) -> ShapeId {
        let d = &self.defaults;
        let shape = match kind {
            ShapeKind::Circle => {
                Shape::Circle(Circle::with_diameter(center, d.circle_diameter).with_fill(d.circle_color))
            }
            ShapeKind::Rectangle => Shape::Rectangle(
                Rectangle::new(center, d.rectangle_size.width, d.rectangle_size.height)
                    .with_fill(d.rectangle_color),
            ),
            ShapeKind::Bunny => {
                let mut bunny = Bunny::new(center);
                bunny.side = d.bunny_side;
                bunny.fill = d.bunny_color;
                Shape::Bunny(bunny)
            }
        };
        self.add(shape)
    }

    /// Append an already-built shape on top and return its ID.
    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        if let Some(&existing) = self.index.get(&id) {
            // Same identity: replace in place so the index stays unique.
            self.shapes[existing] = shape;
        } else {
            self.index.insert(id, self.shapes.len());
            self.shapes.push(shape);
        }
        self.revision += 1;
        id
    }

    /// Overwrite a shape's center. Returns false if no such shape exists.
    pub fn move_shape(&mut self, id: ShapeId, center: Point) -> bool {
        let Some(shape) = self.get_shape_mut(id) else {
            return false;
        };
        shape.set_center(center);
        self.revision += 1;
        true
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.index.get(&id).map(|&i| &self.shapes[i])
    }

    fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        let i = *self.index.get(&id)?;
        self.shapes.get_mut(i)
    }

    /// Shapes in paint order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Topmost shape containing `point`.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        crate::hit_test::topmost_at(&self.shapes, point)
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Change counter; differs whenever the shape list or any position changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{BLUE_500, GREEN_500, ShapeTrait};

    #[test]
    fn test_registry_creation() {
        let registry = ShapeRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.revision(), 0);
    }

    #[test]
    fn test_add_circle_grows_by_one() {
        let mut registry = ShapeRegistry::new();
        registry.add_shape(ShapeKind::Rectangle, Point::new(10.0, 10.0));
        let before = registry.len();

        let id = registry.add_shape(ShapeKind::Circle, Point::new(100.0, 100.0));

        assert_eq!(registry.len(), before + 1);
        let last = registry.shapes().last().unwrap();
        assert_eq!(last.id(), id);
        assert_eq!(last.kind(), ShapeKind::Circle);
        assert_eq!(last.fill(), BLUE_500);
    }

    #[test]
    fn test_add_uses_defaults() {
        let defaults = ShapeDefaults {
            circle_diameter: 64.0,
            ..ShapeDefaults::default()
        };
        let mut registry = ShapeRegistry::with_defaults(defaults);
        let c = registry.add_shape(ShapeKind::Circle, Point::new(0.0, 0.0));
        let r = registry.add_shape(ShapeKind::Rectangle, Point::new(0.0, 0.0));

        assert!((registry.get_shape(c).unwrap().size().width - 64.0).abs() < f64::EPSILON);
        let rect = registry.get_shape(r).unwrap();
        assert!((rect.size().width - 80.0).abs() < f64::EPSILON);
        assert!((rect.size().height - 60.0).abs() < f64::EPSILON);
        assert_eq!(rect.fill(), GREEN_500);
    }

    #[test]
    fn test_ids_are_unique_and_order_is_insertion() {
        let mut registry = ShapeRegistry::new();
        let ids: Vec<_> = (0..5)
            .map(|_| registry.add_shape(ShapeKind::Circle, Point::new(100.0, 100.0)))
            .collect();
        let listed: Vec<_> = registry.shapes().iter().map(|s| s.id()).collect();
        assert_eq!(ids, listed);
    }

    #[test]
    fn test_move_shape() {
        let mut registry = ShapeRegistry::new();
        let a = registry.add_shape(ShapeKind::Circle, Point::new(100.0, 100.0));
        let b = registry.add_shape(ShapeKind::Rectangle, Point::new(100.0, 100.0));
        let rev = registry.revision();

        assert!(registry.move_shape(a, Point::new(200.0, 150.0)));

        assert_eq!(registry.get_shape(a).unwrap().center(), Point::new(200.0, 150.0));
        assert_eq!(registry.get_shape(b).unwrap().center(), Point::new(100.0, 100.0));
        assert!(registry.revision() > rev);
        // Moving never reorders.
        assert_eq!(registry.shapes()[0].id(), a);
    }

    #[test]
    fn test_move_unknown_shape() {
        let mut registry = ShapeRegistry::new();
        registry.add_shape(ShapeKind::Circle, Point::new(100.0, 100.0));
        let rev = registry.revision();

        assert!(!registry.move_shape(uuid::Uuid::new_v4(), Point::new(0.0, 0.0)));
        assert_eq!(registry.revision(), rev);
    }

    #[test]
    fn test_add_same_identity_replaces() {
        let mut registry = ShapeRegistry::new();
        let circle = Circle::new(Point::new(0.0, 0.0), 5.0);
        let id = circle.id();
        registry.add(Shape::Circle(circle.clone()));
        let mut moved = circle;
        moved.set_center(Point::new(9.0, 9.0));
        registry.add(Shape::Circle(moved));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get_shape(id).unwrap().center(), Point::new(9.0, 9.0));
    }

    #[test]
    fn test_shape_at() {
        let mut registry = ShapeRegistry::new();
        let a = registry.add_shape(ShapeKind::Rectangle, Point::new(100.0, 100.0));
        let b = registry.add_shape(ShapeKind::Circle, Point::new(100.0, 100.0));

        assert_eq!(registry.shape_at(Point::new(100.0, 100.0)), Some(b));
        assert_eq!(registry.shape_at(Point::new(61.0, 71.0)), Some(a));
        assert_eq!(registry.shape_at(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_instance_ids_are_distinct() {
        let mut a = ShapeRegistry::new();
        let b = ShapeRegistry::new();
        assert_ne!(a.instance_id(), b.instance_id());

        a.add_shape(ShapeKind::Circle, Point::new(0.0, 0.0));
        let copy = a.clone();
        assert_ne!(copy.instance_id(), a.instance_id());
        assert_eq!(copy.revision(), a.revision());
        assert_eq!(copy.len(), 1);
    }
}
