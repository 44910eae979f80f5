//! Immediate-mode CPU renderer into an RGBA8 pixel buffer.

use crate::renderer::{RenderContext, RenderResult, Renderer, fill_layers};
use kurbo::{Point, Rect, Shape as KurboShape};
use shapepad_core::shapes::SerializableColor;

/// Paints every shape into a pixel buffer, clearing it on every call.
#[derive(Debug, Default)]
pub struct RasterRenderer {
    width: u32,
    height: u32,
    /// RGBA pixel data (4 bytes per pixel), row-major.
    pixels: Vec<u8>,
}

impl RasterRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at a pixel, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<SerializableColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.pixels[i..i + 4];
        Some(SerializableColor::new(p[0], p[1], p[2], p[3]))
    }

    /// Encode the current buffer as PNG.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        encode_png(&self.pixels, self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.resize(width as usize * height as usize * 4, 0);
    }

    fn clear(&mut self, color: SerializableColor) {
        for p in self.pixels.chunks_exact_mut(4) {
            p.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Fill every pixel whose center lies inside `path` (given in pixels).
    fn fill_path(&mut self, path: &kurbo::BezPath, color: SerializableColor) {
        let Some(((x0, x1), (y0, y1))) = pixel_span(path.bounding_box(), self.width, self.height)
        else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                if path.contains(Point::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    let i = (y as usize * self.width as usize + x as usize) * 4;
                    blend(&mut self.pixels[i..i + 4], color);
                }
            }
        }
    }
}

/// Pixel column and row ranges covered by `bounds`, clipped to the buffer.
fn pixel_span(bounds: Rect, width: u32, height: u32) -> Option<((u32, u32), (u32, u32))> {
    let clip = |lo: f64, hi: f64, max: u32| {
        let lo = lo.floor().max(0.0) as u32;
        let hi = (hi.ceil().max(0.0) as u32).min(max);
        (lo < hi).then_some((lo, hi))
    };
    Some((clip(bounds.x0, bounds.x1, width)?, clip(bounds.y0, bounds.y1, height)?))
}

/// Source-over blend of `color` onto an RGBA8 pixel.
fn blend(dst: &mut [u8], color: SerializableColor) {
    let a = color.a as u32;
    if a == 255 {
        dst.copy_from_slice(&[color.r, color.g, color.b, 255]);
        return;
    }
    let inv = 255 - a;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
    dst[0] = mix(color.r, dst[0]);
    dst[1] = mix(color.g, dst[1]);
    dst[2] = mix(color.b, dst[2]);
    dst[3] = (a + (dst[3] as u32 * inv + 127) / 255) as u8;
}

impl Renderer for RasterRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        if !ctx.has_surface() {
            return;
        }
        let scale = ctx.scale_factor;
        let width = (ctx.viewport_size.width * scale).round() as u32;
        let height = (ctx.viewport_size.height * scale).round() as u32;
        self.resize(width, height);
        self.clear(ctx.background_color.into());

        let transform = kurbo::Affine::scale(scale);
        for shape in ctx.registry.shapes() {
            for (path, color) in fill_layers(shape) {
                self.fill_path(&(transform * path), color);
            }
        }
    }
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba_data)?;
    }
    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use shapepad_core::registry::ShapeRegistry;
    use shapepad_core::shapes::{BLUE_500, GREEN_500, SADDLE_BROWN, ShapeKind};

    fn render(registry: &ShapeRegistry) -> RasterRenderer {
        let mut renderer = RasterRenderer::new();
        renderer.build_scene(&RenderContext::new(registry, Size::new(200.0, 150.0)));
        renderer
    }

    #[test]
    fn test_background_only() {
        let renderer = render(&ShapeRegistry::new());
        assert_eq!(renderer.width(), 200);
        assert_eq!(renderer.height(), 150);
        assert_eq!(renderer.pixel(0, 0), Some(SerializableColor::white()));
        assert_eq!(renderer.pixel(199, 149), Some(SerializableColor::white()));
        assert_eq!(renderer.pixel(200, 0), None);
    }

    #[test]
    fn test_shape_color_at_center() {
        let mut registry = ShapeRegistry::new();
        registry.add_shape(ShapeKind::Circle, Point::new(50.0, 50.0));
        registry.add_shape(ShapeKind::Rectangle, Point::new(150.0, 100.0));
        let renderer = render(&registry);

        assert_eq!(renderer.pixel(50, 50), Some(BLUE_500));
        assert_eq!(renderer.pixel(150, 100), Some(GREEN_500));
        // Corner of the circle's box lies outside the disc.
        assert_eq!(renderer.pixel(26, 26), Some(SerializableColor::white()));
    }

    #[test]
    fn test_later_shape_paints_on_top() {
        let mut registry = ShapeRegistry::new();
        registry.add_shape(ShapeKind::Rectangle, Point::new(100.0, 75.0));
        registry.add_shape(ShapeKind::Circle, Point::new(100.0, 75.0));
        let renderer = render(&registry);
        assert_eq!(renderer.pixel(100, 75), Some(BLUE_500));
        assert_eq!(renderer.pixel(62, 75), Some(GREEN_500));
    }

    #[test]
    fn test_repaints_after_move() {
        let mut registry = ShapeRegistry::new();
        let id = registry.add_shape(ShapeKind::Circle, Point::new(50.0, 50.0));
        let mut renderer = render(&registry);

        registry.move_shape(id, Point::new(150.0, 100.0));
        renderer.build_scene(&RenderContext::new(&registry, Size::new(200.0, 150.0)));
        assert_eq!(renderer.pixel(50, 50), Some(SerializableColor::white()));
        assert_eq!(renderer.pixel(150, 100), Some(BLUE_500));
    }

    #[test]
    fn test_bunny_body_color() {
        let mut registry = ShapeRegistry::new();
        registry.add_shape(ShapeKind::Bunny, Point::new(100.0, 75.0));
        let renderer = render(&registry);
        // Body ellipse center sits at (50, 60) within the icon box.
        assert_eq!(renderer.pixel(100, 85), Some(SADDLE_BROWN));
    }

    #[test]
    fn test_shapes_clipped_to_surface() {
        let mut registry = ShapeRegistry::new();
        registry.add_shape(ShapeKind::Rectangle, Point::new(0.0, 0.0));
        let renderer = render(&registry);
        assert_eq!(renderer.pixel(0, 0), Some(GREEN_500));
    }

    #[test]
    fn test_scale_factor() {
        let mut registry = ShapeRegistry::new();
        registry.add_shape(ShapeKind::Circle, Point::new(50.0, 50.0));
        let mut renderer = RasterRenderer::new();
        renderer.build_scene(
            &RenderContext::new(&registry, Size::new(100.0, 100.0)).with_scale_factor(2.0),
        );
        assert_eq!(renderer.width(), 200);
        assert_eq!(renderer.pixel(100, 100), Some(BLUE_500));
    }

    #[test]
    fn test_missing_surface_is_noop() {
        let mut registry = ShapeRegistry::new();
        registry.add_shape(ShapeKind::Circle, Point::new(50.0, 50.0));
        let mut renderer = RasterRenderer::new();
        renderer.build_scene(&RenderContext::new(&registry, Size::ZERO));
        assert!(renderer.pixels().is_empty());
    }

    #[test]
    fn test_encode_png() {
        let mut registry = ShapeRegistry::new();
        registry.add_shape(ShapeKind::Circle, Point::new(50.0, 50.0));
        let png_data = render(&registry).to_png().unwrap();

        let decoder = png::Decoder::new(std::io::Cursor::new(png_data));
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 200);
        assert_eq!(reader.info().height, 150);
    }

    #[test]
    fn test_encode_png_rejects_short_buffer() {
        assert!(encode_png(&[0; 8], 4, 4).is_err());
    }
}
