//! Renderer trait abstraction.

use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Size};
use peniko::Color;
use shapepad_core::registry::ShapeRegistry;
use shapepad_core::shapes::{SerializableColor, Shape};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Tolerance used when flattening curves into paths.
pub(crate) const PATH_TOLERANCE: f64 = 0.1;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The shapes to render, in paint order.
    pub registry: &'a ShapeRegistry,
    /// Drawing surface size in logical pixels.
    pub viewport_size: Size,
    /// Top-left of the surface in window coordinates.
    pub origin: Point,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Surface fill behind the shapes.
    pub background_color: Color,
    /// Surface outline.
    pub border_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(registry: &'a ShapeRegistry, viewport_size: Size) -> Self {
        Self {
            registry,
            viewport_size,
            origin: Point::ZERO,
            scale_factor: 1.0,
            background_color: Color::WHITE,
            // Tailwind gray-300
            border_color: Color::from_rgba8(209, 213, 219, 255),
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the surface origin within the window.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the border color.
    pub fn with_border(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    /// Surface rectangle in surface coordinates.
    pub fn surface_rect(&self) -> Rect {
        self.viewport_size.to_rect()
    }

    /// A zero-area viewport has nothing to draw into.
    pub fn has_surface(&self) -> bool {
        self.viewport_size.width > 0.0 && self.viewport_size.height > 0.0 && self.scale_factor > 0.0
    }
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, a CPU pixel buffer, or emit markup.
pub trait Renderer: Send + Sync {
    /// Build the frame for the current registry contents.
    ///
    /// A context without a surface is a no-op.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Filled layers making up a shape, bottom to top.
pub(crate) fn fill_layers(shape: &Shape) -> Vec<(BezPath, SerializableColor)> {
    match shape {
        Shape::Circle(circle) => vec![(circle.as_kurbo().to_path(PATH_TOLERANCE), circle.fill)],
        Shape::Rectangle(rect) => vec![(rect.as_rect().to_path(PATH_TOLERANCE), rect.fill)],
        Shape::Bunny(bunny) => bunny
            .parts()
            .into_iter()
            .map(|part| (part.path, part.fill))
            .collect(),
    }
}
