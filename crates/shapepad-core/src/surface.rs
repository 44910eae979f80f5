//! The bounded interactive region and its coordinate space.

use kurbo::{Point, Rect, Size, Vec2};

/// Where the drawing surface sits inside the window.
///
/// Shapes live in surface coordinates: (0, 0) is the surface's top-left
/// corner regardless of where the surface is placed on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Top-left corner in window coordinates.
    pub origin: Point,
    /// Size in window units.
    pub size: Size,
}

impl Surface {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Surface rect in window coordinates.
    pub fn window_rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Surface rect in its own coordinates.
    pub fn local_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size)
    }

    /// Whether a window point lies on the surface (edges included).
    pub fn contains(&self, window_point: Point) -> bool {
        let r = self.window_rect();
        window_point.x >= r.x0
            && window_point.x <= r.x1
            && window_point.y >= r.y0
            && window_point.y <= r.y1
    }

    /// Convert a window point to surface coordinates.
    pub fn to_local(&self, window_point: Point) -> Point {
        window_point - self.origin.to_vec2()
    }

    /// Convert a surface point to window coordinates.
    pub fn to_window(&self, local_point: Point) -> Point {
        local_point + self.origin.to_vec2()
    }

    /// Offset to apply when painting surface content into the window.
    pub fn offset(&self) -> Vec2 {
        self.origin.to_vec2()
    }

    /// A zero-area surface has nothing to paint into.
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_conversion() {
        let surface = Surface::new(Point::new(32.0, 80.0), Size::new(800.0, 600.0));
        let local = surface.to_local(Point::new(132.0, 180.0));
        assert_eq!(local, Point::new(100.0, 100.0));
        assert_eq!(surface.to_window(local), Point::new(132.0, 180.0));
    }

    #[test]
    fn test_contains() {
        let surface = Surface::new(Point::new(10.0, 10.0), Size::new(100.0, 50.0));
        assert!(surface.contains(Point::new(10.0, 10.0)));
        assert!(surface.contains(Point::new(110.0, 60.0)));
        assert!(!surface.contains(Point::new(9.0, 30.0)));
        assert!(!surface.contains(Point::new(50.0, 61.0)));
    }

    #[test]
    fn test_empty() {
        assert!(Surface::new(Point::ZERO, Size::new(0.0, 10.0)).is_empty());
        assert!(!Surface::new(Point::ZERO, Size::new(1.0, 1.0)).is_empty());
    }
}
