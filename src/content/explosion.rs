//=========================================================================
// Explosion
//=========================================================================
//
// One-shot effect: grows for `DURATION_MS`, cycling colors, then removes
// itself. The timeline is kept per entity and advanced by frame time.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::palette;
use crate::core::game::Game;
use crate::core::graph::{NodeKey, SceneNode};
use crate::core::math::TransformProps;
use crate::core::render::Canvas;

//=== ExplosionPhase ======================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExplosionPhase {
    /// `started` is set by the first update.
    Playing { started: Option<f64> },
    Done,
}

//=== Explosion ===========================================================

#[derive(Debug, Clone)]
pub struct Explosion {
    phase: ExplosionPhase,
    base_size: f64,
    progress: f64,
}

impl Explosion {
    pub const DURATION_MS: f64 = 600.0;
    pub const SIZE: f64 = 0.05;

    /// Final size relative to the starting size.
    const GROWTH: f64 = 3.0;

    pub fn new(base_size: f64) -> Self {
        Self {
            phase: ExplosionPhase::Playing { started: None },
            base_size,
            progress: 0.0,
        }
    }

    pub fn phase(&self) -> ExplosionPhase {
        self.phase
    }

    pub(crate) fn update(&mut self, game: &mut Game, key: NodeKey, time: f64) {
        let ExplosionPhase::Playing { started } = self.phase else {
            return;
        };
        let started = started.unwrap_or(time);
        self.phase = ExplosionPhase::Playing { started: Some(started) };

        self.progress = ((time - started) / Self::DURATION_MS).clamp(0.0, 1.0);
        if self.progress >= 1.0 {
            self.phase = ExplosionPhase::Done;
            game.destroy_object(key);
            return;
        }

        let size = self.base_size * (1.0 + (Self::GROWTH - 1.0) * self.progress);
        game.graph.set_local_transform(key, TransformProps::new().scale(size, size));
    }

    pub(crate) fn render(&self, node: &SceneNode, canvas: &mut dyn Canvas) {
        let frames = palette::EXPLOSION.len();
        let idx = ((self.progress * 12.0) as usize) % frames;
        node.paint_points(canvas, node.points(), palette::EXPLOSION[idx]);
    }
}
