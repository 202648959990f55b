//=========================================================================
// Bullet
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::game::Game;
use crate::core::graph::NodeKey;
use crate::core::math::{Point, TransformProps};

//=== Bullet ==============================================================

/// Travels down one lane from the near rim (`z = 0`) to the far rim
/// (`z = 1`), then destroys itself.
#[derive(Debug, Clone)]
pub struct Bullet {
    from: Point,
    to: Point,
    z: f64,
}

impl Bullet {
    pub const SIZE: f64 = 0.05;

    /// Depth covered per second.
    pub const SPEED: f64 = 1.6;

    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to, z: 0.0 }
    }

    pub fn depth(&self) -> f64 {
        self.z
    }

    pub(crate) fn update(&mut self, game: &mut Game, key: NodeKey, delta: f64) {
        self.z += Self::SPEED * delta / 1000.0;
        if self.z >= 1.0 {
            game.destroy_object(key);
            return;
        }
        let at = self.from.lerp(self.to, self.z);
        game.graph
            .set_local_transform(key, TransformProps::new().position(at.x, at.y).depth(self.z));
    }
}
