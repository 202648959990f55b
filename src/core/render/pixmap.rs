//=========================================================================
// Pixmap Canvas
//=========================================================================
//
// CPU raster backend on top of `tiny-skia`.
//
// Path commands are buffered until `fill`/`stroke`, then converted to a
// `tiny_skia::Path` in one go. The pixmap is what the platform layer
// presents to the window.
//
//=========================================================================

//=== External Crates =====================================================

use log::warn;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

//=== Internal Dependencies ===============================================

use super::{Canvas, Color, PathCommand, RenderError};
use crate::core::math::Point;

//=== PixmapCanvas ========================================================

pub struct PixmapCanvas {
    pixmap: Pixmap,
    path: Vec<PathCommand>,
}

impl PixmapCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::ZeroSized { width, height })?;
        Ok(Self {
            pixmap,
            path: Vec::new(),
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Builds the buffered path; `None` when it has no drawable segment.
    fn build_path(&self) -> Option<tiny_skia::Path> {
        let mut builder = PathBuilder::new();
        for command in &self.path {
            match *command {
                PathCommand::MoveTo(Point { x, y }) => builder.move_to(x as f32, y as f32),
                PathCommand::LineTo(Point { x, y }) => builder.line_to(x as f32, y as f32),
                PathCommand::Close => builder.close(),
            }
        }
        builder.finish()
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        paint
    }
}

impl Canvas for PixmapCanvas {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.pixmap = Pixmap::new(width, height).ok_or(RenderError::ZeroSized { width, height })?;
        self.path.clear();
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(PathCommand::MoveTo(Point::new(x, y)));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(PathCommand::LineTo(Point::new(x, y)));
    }

    fn close_path(&mut self) {
        self.path.push(PathCommand::Close);
    }

    fn fill(&mut self, color: Color) {
        let Some(path) = self.build_path() else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn stroke(&mut self, color: Color, width: f64) {
        let Some(path) = self.build_path() else {
            return;
        };
        if width <= 0.0 {
            warn!("Ignoring stroke with non-positive width {}", width);
            return;
        }
        let stroke = Stroke {
            width: width as f32,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &Self::paint(color), &stroke, Transform::identity(), None);
    }

    fn pixels(&self) -> Option<&[u8]> {
        Some(self.pixmap.data())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(canvas: &PixmapCanvas, x: u32, y: u32) -> [u8; 4] {
        let (width, _) = canvas.size();
        let data = canvas.pixels().expect("pixmap exposes pixels");
        let i = ((y * width + x) * 4) as usize;
        [data[i], data[i + 1], data[i + 2], data[i + 3]]
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        assert_eq!(
            PixmapCanvas::new(0, 10).err(),
            Some(RenderError::ZeroSized { width: 0, height: 10 })
        );
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut canvas = PixmapCanvas::new(4, 4).expect("valid size");
        canvas.clear(Color::rgb(10, 20, 30));
        assert_eq!(pixel(&canvas, 3, 3), [10, 20, 30, 255]);
    }

    #[test]
    fn filled_square_covers_its_interior() {
        let mut canvas = PixmapCanvas::new(20, 20).expect("valid size");
        canvas.clear(Color::BLACK);
        canvas.begin_path();
        canvas.move_to(5.0, 5.0);
        canvas.line_to(15.0, 5.0);
        canvas.line_to(15.0, 15.0);
        canvas.line_to(5.0, 15.0);
        canvas.close_path();
        canvas.fill(Color::WHITE);

        assert_eq!(pixel(&canvas, 10, 10), [255, 255, 255, 255], "interior should be filled");
        assert_eq!(pixel(&canvas, 1, 1), [0, 0, 0, 255], "outside should stay clear");
    }

    #[test]
    fn empty_path_draws_nothing() {
        let mut canvas = PixmapCanvas::new(8, 8).expect("valid size");
        canvas.clear(Color::BLACK);
        canvas.begin_path();
        canvas.fill(Color::WHITE);
        assert_eq!(pixel(&canvas, 4, 4), [0, 0, 0, 255]);
    }

    #[test]
    fn resize_reallocates() {
        let mut canvas = PixmapCanvas::new(8, 8).expect("valid size");
        canvas.resize(300, 300).expect("valid size");
        assert_eq!(canvas.size(), (300, 300));
        assert!(canvas.resize(0, 0).is_err());
    }
}
