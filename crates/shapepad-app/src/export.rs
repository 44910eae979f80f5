//! Snapshots of the current page: SVG markup plus a PNG raster.

use shapepad_core::board::Board;
use shapepad_core::variant::Variant;
use shapepad_render::{MarkupRenderer, RasterRenderer, RenderContext, RenderResult, Renderer};
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

/// One exported page.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub svg: String,
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Keeps the renderers alive between exports so unchanged pages are not
/// re-serialized.
#[derive(Debug, Default)]
pub struct Exporter {
    markup: MarkupRenderer,
    raster: RasterRenderer,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `board` at one pixel per logical unit.
    pub fn capture(&mut self, board: &Board) -> RenderResult<Snapshot> {
        let ctx = RenderContext::new(board.registry(), board.config().surface_size);
        self.markup.build_scene(&ctx);
        self.raster.build_scene(&ctx);
        Ok(Snapshot {
            svg: self.markup.markup().to_string(),
            png: self.raster.to_png()?,
            width: self.raster.width(),
            height: self.raster.height(),
        })
    }

    /// Number of times the SVG document was actually rebuilt.
    pub fn markup_builds(&self) -> u64 {
        self.markup.builds()
    }
}

/// File stem for a page, e.g. `shapepad-canvas-painter`.
pub fn file_stem(variant: Variant) -> String {
    format!("shapepad-{}", variant.title().to_lowercase().replace(' ', "-"))
}

/// Write `snapshot` as `<stem>.svg` and `<stem>.png` into `dir`.
#[cfg(not(target_arch = "wasm32"))]
pub fn write_snapshot(
    dir: &Path,
    variant: Variant,
    snapshot: &Snapshot,
) -> std::io::Result<(PathBuf, PathBuf)> {
    let stem = file_stem(variant);
    let svg_path = dir.join(format!("{stem}.svg"));
    let png_path = dir.join(format!("{stem}.png"));
    std::fs::write(&svg_path, &snapshot.svg)?;
    std::fs::write(&png_path, &snapshot.png)?;
    log::info!("Exported {} to {:?} and {:?}", variant.title(), svg_path, png_path);
    Ok((svg_path, png_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use shapepad_core::board::BoardAction;
    use shapepad_core::shapes::ShapeKind;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Variant::CanvasPainter), "shapepad-canvas-painter");
        assert_eq!(file_stem(Variant::Bunny), "shapepad-bunny");
    }

    #[test]
    fn test_capture_matches_board() {
        let mut board = Board::for_variant(Variant::CanvasPainter);
        let id = board.add_shape(ShapeKind::Circle);
        let mut exporter = Exporter::new();

        let snapshot = exporter.capture(&board).unwrap();

        assert_eq!((snapshot.width, snapshot.height), (800, 600));
        assert!(snapshot.svg.contains(&id.to_string()));
        assert!(snapshot.png.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_capture_follows_page_switch() {
        let mut painter = Board::for_variant(Variant::Painter);
        painter.dispatch(BoardAction::AddShape(ShapeKind::Circle));
        let mut canvas = Board::for_variant(Variant::CanvasPainter);
        canvas.dispatch(BoardAction::AddShape(ShapeKind::Rectangle));
        let mut exporter = Exporter::new();

        let first = exporter.capture(&painter).unwrap();
        let second = exporter.capture(&canvas).unwrap();

        assert!(first.svg.contains("<circle"));
        assert!(!second.svg.contains("<circle"));
        assert_eq!(exporter.markup_builds(), 2);
        // Same page again is served from the cached document.
        exporter.capture(&canvas).unwrap();
        assert_eq!(exporter.markup_builds(), 2);
    }

    #[test]
    fn test_capture_reflects_drag() {
        let mut board = Board::for_variant(Variant::Painter);
        let id = board.add_shape(ShapeKind::Circle);
        let mut exporter = Exporter::new();
        exporter.capture(&board).unwrap();

        board.dispatch(BoardAction::PressOn { id, position: Point::new(50.0, 50.0) });
        board.dispatch(BoardAction::Pointer(shapepad_core::input::PointerEvent::Move {
            position: Point::new(300.0, 200.0),
        }));
        let snapshot = exporter.capture(&board).unwrap();

        assert!(snapshot.svg.contains(r#"cx="300" cy="200""#));
    }

    #[test]
    fn test_write_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut board = Board::for_variant(Variant::Bunny);
        board.add_shape(ShapeKind::Bunny);
        let snapshot = Exporter::new().capture(&board).unwrap();

        let (svg, png) = write_snapshot(dir.path(), Variant::Bunny, &snapshot).unwrap();

        assert_eq!(svg, dir.path().join("shapepad-bunny.svg"));
        assert_eq!(std::fs::read_to_string(svg).unwrap(), snapshot.svg);
        assert_eq!(std::fs::read(png).unwrap(), snapshot.png);
    }
}
