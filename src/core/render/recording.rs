//=========================================================================
// Recording Canvas
//=========================================================================
//
// Headless backend that logs every finished draw call.
//
// The log is shared through a cloneable `DrawLog` handle so a test can
// keep reading it after the canvas has been boxed into the game.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::{Canvas, Color, PathCommand, RenderError};
use crate::core::math::Point;

//=== DrawCommand =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Fill { color: Color, path: Vec<PathCommand> },
    Stroke { color: Color, width: f64, path: Vec<PathCommand> },
}

impl DrawCommand {
    pub fn is_clear(&self) -> bool {
        matches!(self, DrawCommand::Clear(_))
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Clear(color) => *color,
            DrawCommand::Fill { color, .. } | DrawCommand::Stroke { color, .. } => *color,
        }
    }
}

//=== DrawLog =============================================================

/// Shared read handle onto a [`RecordingCanvas`]'s command log.
#[derive(Debug, Clone, Default)]
pub struct DrawLog(Rc<RefCell<Vec<DrawCommand>>>);

impl DrawLog {
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Number of `Clear` commands, i.e. frames drawn.
    pub fn frames(&self) -> usize {
        self.0.borrow().iter().filter(|c| c.is_clear()).count()
    }

    /// Commands issued after the most recent `Clear`.
    pub fn last_frame(&self) -> Vec<DrawCommand> {
        let log = self.0.borrow();
        let start = log.iter().rposition(DrawCommand::is_clear).map_or(0, |i| i + 1);
        log[start..].to_vec()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, command: DrawCommand) {
        self.0.borrow_mut().push(command);
    }
}

//=== RecordingCanvas =====================================================

pub struct RecordingCanvas {
    width: u32,
    height: u32,
    path: Vec<PathCommand>,
    log: DrawLog,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            path: Vec::new(),
            log: DrawLog::default(),
        }
    }

    pub fn log(&self) -> DrawLog {
        self.log.clone()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::ZeroSized { width, height });
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        self.log.push(DrawCommand::Clear(color));
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
        self.log.push(DrawCommand::Fill {
            color,
            path: self.path.clone(),
        });
    }

    fn stroke(&mut self, color: Color, width: f64) {
        self.log.push(DrawCommand::Stroke {
            color,
            width,
            path: self.path.clone(),
        });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
