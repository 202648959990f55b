//=========================================================================
// Frame Engine
//=========================================================================
//
// Cooperative per-refresh scheduler.
//
// The platform calls `on_frame(time)` once per display refresh with a
// monotonic timestamp in milliseconds. Each call runs, in order:
//
// ```text
//   1. collect platform events       (window close stops the engine)
//   2. dispatch input to listeners
//   3. apply a settled resize
//   4. draw(delta, time)             skipped on the first frame
//   5. advance the death sequence
//   6. apply queued scene transitions
// ```
//
// Stopping is advisory: `stop` clears the running flag and the next
// `on_frame` returns `false` without doing any work.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::Game;
use crate::content::behavior;
use crate::core::graph::NodeKey;
use crate::core::platform_bridge::TickControl;
use crate::core::render::Color;

//=== Constants ===========================================================

const BACKGROUND: Color = Color::BLACK;

//=== FrameClock ==========================================================

/// Running flag plus the previous frame's timestamp.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    running: bool,
    last_time: Option<f64>,
    last_delta: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the clock. The next tick only records the baseline.
    pub fn start(&mut self) {
        self.running = true;
        self.last_time = None;
        self.last_delta = None;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Delta since the previous tick, `None` for the baseline tick or when
    /// stopped.
    pub fn tick(&mut self, time: f64) -> Option<f64> {
        if !self.running {
            return None;
        }
        let delta = self.last_time.map(|last| time - last);
        self.last_time = Some(time);
        if delta.is_some() {
            self.last_delta = delta;
        }
        delta
    }

    pub fn last_delta(&self) -> Option<f64> {
        self.last_delta
    }
}

//=== Frame Loop ==========================================================

impl Game {
    /// Starts the clock, sizes the canvas and builds the current scene.
    pub fn start(&mut self) {
        info!("Starting game in scene {:?}", self.state().scene);
        self.clock.start();
        self.resize_canvas(self.window_size);
        self.start_scene();
    }

    pub fn stop(&mut self) {
        info!("Stopping game");
        self.clock.stop();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Delta passed to the most recent `draw`.
    pub fn frame_delta(&self) -> Option<f64> {
        self.clock.last_delta()
    }

    /// One display-refresh callback. Returns whether the next frame should
    /// be scheduled.
    pub fn on_frame(&mut self, time: f64) -> bool {
        if !self.clock.is_running() {
            return false;
        }
        if self.events.collect_frame() == TickControl::Exit {
            self.stop();
            return false;
        }

        // Input, resize and transitions do not depend on a delta, so they
        // also run on the baseline frame; only update and render wait.
        self.dispatch_input(time);
        self.poll_resize(time);
        if let Some(delta) = self.clock.tick(time) {
            self.draw(delta, time);
        }
        self.tick_sequence(time);
        self.process_transitions();

        self.clock.is_running()
    }

    /// Clears the canvas, then updates and renders every live node in
    /// layer order. Nodes may add or remove nodes while this runs.
    pub(crate) fn draw(&mut self, delta: f64, time: f64) {
        self.canvas.clear(BACKGROUND);

        let mut visit = self.layers.begin_visit();
        while let Some(key) = self.layers.next_visit(&mut visit) {
            self.update_node(key, delta, time);

            if let Some(node) = self.graph.get(key) {
                if node.is_rendered() && node.is_visible() {
                    behavior::render(node, self.canvas.as_mut());
                }
            }
        }
    }

    fn update_node(&mut self, key: NodeKey, delta: f64, time: f64) {
        self.with_kind(key, |game, kind| behavior::update(game, key, kind, delta, time));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
