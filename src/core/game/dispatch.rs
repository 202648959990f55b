//=========================================================================
// Input Dispatch
//=========================================================================
//
// Routes the frame's input batches.
//
// - `Resized` feeds the resize debouncer; the canvas is re-tiered and its
//   on-screen rectangle recached once the window has been quiet.
// - A completed left click fires the scene's one-shot click action.
// - Cursor and touch motion are made canvas-relative and handed to the
//   level; cursor leave stops the follow.
// - Everything else goes to the nodes wired for it, in wiring order.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::Game;
use crate::content::behavior;
use crate::core::input::{InputEvent, MouseButton};

//=== Canvas Sizing =======================================================

/// Square canvas side for a window `width` pixels wide.
pub fn canvas_size_tier(width: u32) -> u32 {
    match width {
        0..=400 => 300,
        401..=800 => 400,
        _ => 750,
    }
}

/// Canvas bounds inside the window, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    /// Canvas of `canvas` size centered in a `window`-sized area.
    pub fn centered(window: (u32, u32), canvas: (u32, u32)) -> Self {
        let (ww, wh) = (f64::from(window.0), f64::from(window.1));
        let (cw, ch) = (f64::from(canvas.0), f64::from(canvas.1));
        Self {
            x: ((ww - cw) / 2.0).floor(),
            y: ((wh - ch) / 2.0).floor(),
            width: cw,
            height: ch,
        }
    }

    /// Window position relative to the canvas' top-left corner.
    pub fn relative(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.x, y - self.y)
    }
}

//=== Dispatch ============================================================

impl Game {
    pub(crate) fn dispatch_input(&mut self, time: f64) {
        let batches = self.events.take_batches();
        if !batches.is_empty() {
            trace!("Dispatching {} input batches", batches.len());
        }
        for event in batches.into_iter().flatten() {
            self.handle_input(event, time);
        }
    }

    fn handle_input(&mut self, event: InputEvent, time: f64) {
        match event {
            InputEvent::Resized { width, height } => {
                self.resize.trigger(time, (width, height));
                return;
            }
            InputEvent::MouseButtonDown { .. } => self.pointer_down = true,
            InputEvent::MouseButtonUp { button } => {
                if button == MouseButton::Left && self.pointer_down {
                    if let Some(action) = self.click_action.take() {
                        debug!("Click triggers {:?}", action);
                        self.transitions.push(action);
                    }
                }
                self.pointer_down = false;
            }
            InputEvent::CursorMoved { x, y } | InputEvent::TouchMoved { x, y } => {
                let (cx, cy) = self.canvas_rect.relative(x, y);
                self.with_level(|_, level, _| level.start_updating_with_cursor(cx, cy));
            }
            InputEvent::CursorLeft => {
                self.with_level(|_, level, _| level.stop_updating_with_cursor());
            }
            _ => {}
        }

        for key in self.listeners.subscribers(&event) {
            self.with_kind(key, |_, kind| behavior::on_input(kind, &event));
        }
    }

    //--- Resize -----------------------------------------------------------

    pub(crate) fn poll_resize(&mut self, time: f64) {
        if let Some(size) = self.resize.poll(time) {
            self.resize_canvas(size);
        }
    }

    /// Re-tiers the canvas for a `window`-sized window and recaches its
    /// on-screen rectangle.
    pub(crate) fn resize_canvas(&mut self, window: (u32, u32)) {
        if window.0 == 0 || window.1 == 0 {
            warn!("Ignoring resize to a zero-sized window {}x{}", window.0, window.1);
            return;
        }
        self.window_size = window;

        let side = canvas_size_tier(window.0);
        if self.canvas.size() != (side, side) {
            if let Err(err) = self.canvas.resize(side, side) {
                warn!("Canvas resize failed: {}", err);
                return;
            }
            debug!("Canvas resized to {}x{}", side, side);
        }
        self.canvas_rect = CanvasRect::centered(window, self.canvas.size());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
