//=========================================================================
// Render
//=========================================================================
//
// Drawing surface abstraction and its backends.
//
// Architecture:
// ```text
//   SceneNode::render_geometry ──> dyn Canvas
//                                    ├─ PixmapCanvas    (tiny-skia raster)
//                                    └─ RecordingCanvas (headless log)
// ```
//
// Nodes only speak the path API (begin/move/line/close, fill/stroke) and
// set their own paint on every call, so no state leaks between nodes.
//
//=========================================================================

//=== External Crates =====================================================

use thiserror::Error;

//=== Module Declarations =================================================

mod canvas;
mod pixmap;
mod recording;

//=== Public API ==========================================================

pub use canvas::{Canvas, Color, PathCommand, Viewport};
pub use pixmap::PixmapCanvas;
pub use recording::{DrawCommand, DrawLog, RecordingCanvas};

//=== RenderError =========================================================

/// Failures creating or resizing a raster surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} surface")]
    ZeroSized { width: u32, height: u32 },
}
