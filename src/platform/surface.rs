//=========================================================================
// Presentation Surface
//=========================================================================
//
// Copies the rasterized canvas into the window through softbuffer.
//
// The canvas is smaller than the window and sits centered in it; the
// rest of the window is painted black. Canvas pixels are premultiplied
// RGBA bytes, the window buffer is 0RGB words.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::num::NonZeroU32;
use std::rc::Rc;

//=== External Dependencies ===============================================

use log::*;
use softbuffer::{Context, Surface};
use winit::window::Window;

//=== Internal Dependencies ===============================================

use crate::core::game::CanvasRect;
use crate::core::platform_bridge::PlatformError;
use crate::core::render::Canvas;

//=== Presenter ===========================================================

pub(crate) struct Presenter {
    window: Rc<Window>,
    _context: Context<Rc<Window>>,
    surface: Surface<Rc<Window>, Rc<Window>>,
    size: (u32, u32),
}

impl Presenter {
    pub(crate) fn new(window: Rc<Window>) -> Result<Self, PlatformError> {
        let context = Context::new(window.clone()).map_err(|e| PlatformError::Surface(e.to_string()))?;
        let surface = Surface::new(&context, window.clone()).map_err(|e| PlatformError::Surface(e.to_string()))?;
        debug!(target: "platform", "Presentation surface created");
        Ok(Self {
            window,
            _context: context,
            surface,
            size: (0, 0),
        })
    }

    /// Blits `canvas` at `rect` and presents the frame. Skipped while the
    /// window has no area.
    pub(crate) fn present(&mut self, canvas: &dyn Canvas, rect: CanvasRect) -> Result<(), PlatformError> {
        let inner = self.window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(inner.width), NonZeroU32::new(inner.height)) else {
            return Ok(());
        };
        if self.size != (inner.width, inner.height) {
            self.surface
                .resize(width, height)
                .map_err(|e| PlatformError::Surface(e.to_string()))?;
            self.size = (inner.width, inner.height);
            trace!(target: "platform", "Surface resized to {}x{}", inner.width, inner.height);
        }

        let mut buffer = self.surface.buffer_mut().map_err(|e| PlatformError::Surface(e.to_string()))?;
        match canvas.pixels() {
            Some(pixels) => {
                let offset = (rect.x as i64, rect.y as i64);
                blit(&mut buffer, self.size, pixels, canvas.size(), offset);
            }
            None => buffer.fill(0),
        }
        buffer.present().map_err(|e| PlatformError::Surface(e.to_string()))
    }
}

//=== Blitting ============================================================

/// Writes `src` (premultiplied RGBA, `src_size`) into `dst` (0RGB,
/// `dst_size`) with its top-left corner at `offset`. Pixels outside the
/// source are cleared; source pixels outside the destination are clipped.
pub(crate) fn blit(dst: &mut [u32], dst_size: (u32, u32), src: &[u8], src_size: (u32, u32), offset: (i64, i64)) {
    dst.fill(0);
    let (dw, dh) = (i64::from(dst_size.0), i64::from(dst_size.1));
    let (sw, sh) = (i64::from(src_size.0), i64::from(src_size.1));

    for sy in 0..sh {
        let dy = sy + offset.1;
        if dy < 0 || dy >= dh {
            continue;
        }
        for sx in 0..sw {
            let dx = sx + offset.0;
            if dx < 0 || dx >= dw {
                continue;
            }
            let si = ((sy * sw + sx) * 4) as usize;
            let Some(rgba) = src.get(si..si + 4) else {
                return;
            };
            let di = (dy * dw + dx) as usize;
            if let Some(slot) = dst.get_mut(di) {
                // Over black, premultiplied channels are already the result.
                *slot = u32::from(rgba[0]) << 16 | u32::from(rgba[1]) << 8 | u32::from(rgba[2]);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
