//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level events) with the game on the main thread.
//
// Architecture:
// ```text
//  Main Thread
//  ┌──────────────────────────────────────────────────────────┐
//  │  winit Event Loop                                        │
//  │   ↓                                                      │
//  │  InputProcessor ── converts winit types, tracks touch    │
//  │   ↓                                                      │
//  │  InputBuffer ───── discrete: Vec<>, continuous: IndexSet │
//  │   ↓                                                      │
//  │  RedrawRequested (frame boundary)                        │
//  │   ├─ flush ──PlatformEvent──> channel ──> Game           │
//  │   ├─ game.on_frame(now_ms)                               │
//  │   ├─ Presenter: canvas pixels → softbuffer               │
//  │   └─ request_redraw                                      │
//  └──────────────────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: all input gathered since the
//   previous redraw is handed over in one batch, in arrival order
// - **Channel hand-off**: the game reads input from the same
//   crossbeam channel tests inject into; a disconnected channel is logged
//   and the window keeps running until closed
// - **Main thread requirement**: winit mandates the main thread on
//   macOS/iOS, so the whole game runs on the thread that called
//   `Engine::run()`
//
// Responsibilities:
// - Create and own the OS window and its presentation surface
// - Convert winit types → InputEvents and buffer them
// - Drive one game frame per redraw with a monotonic millisecond clock
// - Stop the event loop when the window closes or the game stops
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;
mod surface;

//=== Standard Library Imports ============================================

use std::rc::Rc;
use std::time::Instant;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::game::Game;
use crate::core::input::InputEvent;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;
use surface::Presenter;

//=== Platform ============================================================

/// Window owner, input aggregator and frame driver.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(game, sender)`
/// 2. **Execution**: `platform.run()` blocks in the event loop
/// 3. **Resume**: the window and surface are created, the game starts
/// 4. **Redraw**: input flushed, one frame run and presented
/// 5. **Shutdown**: window close sends `WindowClosed` and exits the loop
///
/// This type is not Send; it stays on the main thread.
pub(crate) struct Platform {
    game: Game,

    /// OS window handle (None until `resumed()` called).
    window: Option<Rc<Window>>,

    presenter: Option<Presenter>,

    /// Buffers discrete/continuous input until the frame boundary.
    buffer: InputBuffer,

    event_sender: Sender<PlatformEvent>,

    input_processor: InputProcessor,

    /// Origin of the frame timestamps.
    epoch: Instant,

    /// First fatal error seen inside the loop, reported by `run`.
    failure: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens in `resumed()`.
    pub(crate) fn new(game: Game, event_sender: Sender<PlatformEvent>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            game,
            window: None,
            presenter: None,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            epoch: Instant::now(),
            failure: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or the game stops.
    ///
    /// # Errors
    ///
    /// Event loop creation or execution failures, and the first window or
    /// surface failure that forced the loop to exit.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;
        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))?;

        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Milliseconds since the platform was created.
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Sends buffered input as one [`PlatformEvent::Inputs`]. Empty
    /// buffers are not sent. A disconnected channel drops the events with
    /// a warning.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events ({} discrete, {} continuous)",
                    discrete_count + continuous_count,
                    discrete_count,
                    continuous_count
                );
            }
        }
    }

    /// Flush, frame, present. Returns whether another frame is wanted.
    fn redraw(&mut self) -> bool {
        self.flush_input_buffer();

        let time = self.now_ms();
        if !self.game.on_frame(time) {
            info!(target: "platform", "Game stopped");
            return false;
        }

        if let Some(presenter) = self.presenter.as_mut() {
            if let Err(err) = presenter.present(self.game.canvas(), self.game.canvas_rect()) {
                error!(target: "platform", "Presentation failed: {}", err);
                self.failure = Some(err);
                return false;
            }
        }
        true
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: PlatformError) {
        error!(target: "platform", "{}", err);
        let _ = self.event_sender.send(PlatformEvent::WindowClosed);
        self.failure = Some(err);
        event_loop.exit();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window and surface on first resume, then starts the
    /// game. Later resumes (mobile) reuse them.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let settings = &self.game.config().window;
        let attrs = WindowAttributes::default()
            .with_title(settings.title.clone())
            .with_inner_size(LogicalSize::new(settings.width, settings.height));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                self.fail(event_loop, PlatformError::Surface(format!("window creation failed: {}", e)));
                return;
            }
        };

        let size = window.inner_size();
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );

        match Presenter::new(window.clone()) {
            Ok(presenter) => self.presenter = Some(presenter),
            Err(err) => {
                self.fail(event_loop, err);
                return;
            }
        }

        self.game.start();
        self.buffer.push(self.input_processor.process_resize(size.width, size.height));
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                trace!(target: "platform::input", "Resized to {}x{}", size.width, size.height);
                self.buffer.push(self.input_processor.process_resize(size.width, size.height));
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_cursor_move(position.x, position.y);
                self.buffer.push(event);
            }

            WindowEvent::CursorLeft { .. } => {
                self.buffer.push(InputEvent::CursorLeft);
            }

            WindowEvent::Touch(touch) => {
                let location = touch.location;
                if let Some(event) = self.input_processor.process_touch(touch.id, touch.phase, location.x, location.y) {
                    self.buffer.push(event);
                }
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push(event);
            }

            WindowEvent::RedrawRequested => {
                if !self.redraw() {
                    event_loop.exit();
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
