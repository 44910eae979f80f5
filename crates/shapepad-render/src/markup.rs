//! Declarative renderer: the registry as an SVG document.
//!
//! Each shape becomes one positioned element carrying its id, so a host can
//! route a press on the element straight back to the shape.

use crate::renderer::{RenderContext, Renderer};
use kurbo::{Affine, Size};
use peniko::Color;
use shapepad_core::shapes::{SerializableColor, Shape};
use std::fmt::Write;
use uuid::Uuid;

/// Inputs a document was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BuildKey {
    registry: Uuid,
    revision: u64,
    viewport_size: Size,
    background: SerializableColor,
    border: SerializableColor,
}

/// Emits an SVG document and rebuilds it only when the inputs changed.
#[derive(Debug, Default)]
pub struct MarkupRenderer {
    markup: String,
    built_from: Option<BuildKey>,
    builds: u64,
}

impl MarkupRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last built document (empty before the first build).
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// How many times the document has been rebuilt.
    pub fn builds(&self) -> u64 {
        self.builds
    }

    fn write_document(&mut self, ctx: &RenderContext) -> std::fmt::Result {
        let Size { width, height } = ctx.viewport_size;
        let out = &mut self.markup;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        writeln!(
            out,
            r#"  <rect width="{width}" height="{height}" fill="{}" stroke="{}"/>"#,
            hex(ctx.background_color),
            hex(ctx.border_color)
        )?;
        for shape in ctx.registry.shapes() {
            write_shape(out, shape)?;
        }
        writeln!(out, "</svg>")
    }
}

fn hex(color: Color) -> String {
    SerializableColor::from(color).to_hex()
}

fn write_shape(out: &mut String, shape: &Shape) -> std::fmt::Result {
    let id = shape.id();
    match shape {
        Shape::Circle(circle) => writeln!(
            out,
            r#"  <circle data-shape-id="{id}" cx="{}" cy="{}" r="{}" fill="{}" style="cursor:move"/>"#,
            circle.center.x,
            circle.center.y,
            circle.radius,
            circle.fill.to_hex()
        ),
        Shape::Rectangle(rect) => {
            let bounds = rect.as_rect();
            writeln!(
                out,
                r#"  <rect data-shape-id="{id}" x="{}" y="{}" width="{}" height="{}" fill="{}" style="cursor:move"/>"#,
                bounds.x0,
                bounds.y0,
                bounds.width(),
                bounds.height(),
                rect.fill.to_hex()
            )
        }
        Shape::Bunny(bunny) => {
            let top_left = bunny.top_left();
            writeln!(
                out,
                r#"  <g data-shape-id="{id}" transform="translate({} {})" style="cursor:move">"#,
                top_left.x, top_left.y
            )?;
            // Parts come back placed in surface space; undo the translation
            // so the group transform positions the icon.
            let back = Affine::translate(-top_left.to_vec2());
            for part in bunny.parts() {
                writeln!(
                    out,
                    r#"    <path d="{}" fill="{}"/>"#,
                    (back * part.path).to_svg(),
                    part.fill.to_hex()
                )?;
            }
            writeln!(out, "  </g>")
        }
    }
}

impl Renderer for MarkupRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        if !ctx.has_surface() {
            return;
        }
        let key = BuildKey {
            registry: ctx.registry.instance_id(),
            revision: ctx.registry.revision(),
            viewport_size: ctx.viewport_size,
            background: ctx.background_color.into(),
            border: ctx.border_color.into(),
        };
        if self.built_from == Some(key) {
            return;
        }

        self.markup.clear();
        if self.write_document(ctx).is_err() {
            log::error!("Failed to format SVG document");
            self.markup.clear();
            self.built_from = None;
            return;
        }
        self.built_from = Some(key);
        self.builds += 1;
        log::debug!("Rebuilt markup for revision {}", key.revision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use shapepad_core::registry::ShapeRegistry;
    use shapepad_core::shapes::ShapeKind;

    const VIEWPORT: Size = Size::new(800.0, 600.0);

    #[test]
    fn test_empty_registry() {
        let registry = ShapeRegistry::new();
        let mut renderer = MarkupRenderer::new();
        renderer.build_scene(&RenderContext::new(&registry, VIEWPORT));

        let markup = renderer.markup();
        assert!(markup.starts_with("<svg"));
        assert!(markup.contains(r#"width="800""#));
        assert!(!markup.contains("data-shape-id"));
        assert!(markup.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_shapes_in_paint_order() {
        let mut registry = ShapeRegistry::new();
        let circle = registry.add_shape(ShapeKind::Circle, Point::new(100.0, 100.0));
        let rect = registry.add_shape(ShapeKind::Rectangle, Point::new(100.0, 100.0));
        let mut renderer = MarkupRenderer::new();
        renderer.build_scene(&RenderContext::new(&registry, VIEWPORT));

        let markup = renderer.markup();
        let circle_at = markup.find(&circle.to_string()).unwrap();
        let rect_at = markup.find(&rect.to_string()).unwrap();
        assert!(circle_at < rect_at);
        assert!(markup.contains(r##"cx="100" cy="100" r="25" fill="#3b82f6""##));
        assert!(markup.contains(r##"x="60" y="70" width="80" height="60" fill="#22c55e""##));
    }

    #[test]
    fn test_bunny_group() {
        let mut registry = ShapeRegistry::new();
        registry.add_shape(ShapeKind::Bunny, Point::new(150.0, 250.0));
        let mut renderer = MarkupRenderer::new();
        renderer.build_scene(&RenderContext::new(&registry, VIEWPORT));

        let markup = renderer.markup();
        assert!(markup.contains(r#"transform="translate(100 200)""#));
        assert_eq!(markup.matches("<path").count(), 7);
        assert!(markup.contains("#8b4513"));
    }

    #[test]
    fn test_rebuilds_only_on_revision_change() {
        let mut registry = ShapeRegistry::new();
        let id = registry.add_shape(ShapeKind::Circle, Point::new(100.0, 100.0));
        let mut renderer = MarkupRenderer::new();

        renderer.build_scene(&RenderContext::new(&registry, VIEWPORT));
        renderer.build_scene(&RenderContext::new(&registry, VIEWPORT));
        assert_eq!(renderer.builds(), 1);

        registry.move_shape(id, Point::new(200.0, 150.0));
        renderer.build_scene(&RenderContext::new(&registry, VIEWPORT));
        assert_eq!(renderer.builds(), 2);
        assert!(renderer.markup().contains(r#"cx="200" cy="150""#));
    }

    #[test]
    fn test_switching_registries_rebuilds() {
        let mut first = ShapeRegistry::new();
        first.add_shape(ShapeKind::Circle, Point::new(100.0, 100.0));
        let mut second = ShapeRegistry::new();
        let rect = second.add_shape(ShapeKind::Rectangle, Point::new(100.0, 100.0));
        assert_eq!(first.revision(), second.revision());

        let mut renderer = MarkupRenderer::new();
        renderer.build_scene(&RenderContext::new(&first, VIEWPORT));
        renderer.build_scene(&RenderContext::new(&second, VIEWPORT));

        assert_eq!(renderer.builds(), 2);
        assert!(renderer.markup().contains(&rect.to_string()));
        assert!(!renderer.markup().contains("<circle"));
    }

    #[test]
    fn test_border_change_rebuilds() {
        let registry = ShapeRegistry::new();
        let mut renderer = MarkupRenderer::new();
        renderer.build_scene(&RenderContext::new(&registry, VIEWPORT));
        renderer.build_scene(&RenderContext::new(&registry, VIEWPORT).with_border(Color::BLACK));

        assert_eq!(renderer.builds(), 2);
        assert!(renderer.markup().contains(r##"stroke="#000000""##));
    }

    #[test]
    fn test_missing_surface_is_noop() {
        let mut registry = ShapeRegistry::new();
        registry.add_shape(ShapeKind::Circle, Point::new(100.0, 100.0));
        let mut renderer = MarkupRenderer::new();
        renderer.build_scene(&RenderContext::new(&registry, Size::ZERO));
        assert_eq!(renderer.builds(), 0);
        assert!(renderer.markup().is_empty());
    }
}
