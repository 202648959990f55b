//=========================================================================
// Canvas
//=========================================================================
//
// The path-drawing contract every render backend implements.
//
//=========================================================================

//=== External Crates =====================================================

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::RenderError;
use crate::core::math::Point;

//=== Color ===============================================================

/// Straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

//=== PathCommand =========================================================

/// One segment of a path in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

//=== Viewport ============================================================

/// Canvas dimensions in device pixels, used for unit-to-pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Maps a centered unit-square point to pixels.
    pub fn to_pixels(&self, point: Point) -> Point {
        Point::new(self.width * (point.x + 0.5), self.height * (point.y + 0.5))
    }
}

//=== Canvas ==============================================================

/// Immediate-mode path surface.
///
/// A path is built with `begin_path`/`move_to`/`line_to`/`close_path` and
/// consumed by `fill` or `stroke`. Paint is passed on each call.
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Reallocates the surface. Contents are discarded.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError>;

    fn clear(&mut self, color: Color);

    fn begin_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    fn close_path(&mut self);

    fn fill(&mut self, color: Color);

    fn stroke(&mut self, color: Color, width: f64);

    /// Premultiplied RGBA bytes, when the backend rasterizes.
    fn pixels(&self) -> Option<&[u8]> {
        None
    }

    fn viewport(&self) -> Viewport {
        let (width, height) = self.size();
        Viewport::new(f64::from(width), f64::from(height))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_maps_center_to_middle_pixel() {
        let viewport = Viewport::new(400.0, 300.0);
        assert_eq!(viewport.to_pixels(Point::ORIGIN), Point::new(200.0, 150.0));
        assert_eq!(viewport.to_pixels(Point::new(-0.5, 0.5)), Point::new(0.0, 300.0));
    }

    #[test]
    fn color_defaults_to_opaque_white() {
        assert_eq!(Color::default(), Color::rgba(255, 255, 255, 255));
    }
}
