//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer, fill_layers};
use kurbo::{Affine, Stroke};
use peniko::{Color, Fill};
use shapepad_core::shapes::Shape;
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self { scene: Scene::new() }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn render_shape(&mut self, shape: &Shape, transform: Affine) {
        for (path, color) in fill_layers(shape) {
            self.scene
                .fill(Fill::NonZero, transform, Color::from(color), None, &path);
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        // Clear the scene
        self.scene.reset();
        if !ctx.has_surface() {
            return;
        }

        let transform =
            Affine::scale(ctx.scale_factor) * Affine::translate(ctx.origin.to_vec2());
        let surface = ctx.surface_rect();

        self.scene
            .fill(Fill::NonZero, transform, ctx.background_color, None, &surface);

        // Draw all shapes in paint order
        for shape in ctx.registry.shapes() {
            self.render_shape(shape, transform);
        }

        self.scene
            .stroke(&Stroke::new(1.0), transform, ctx.border_color, None, &surface);
    }
}
