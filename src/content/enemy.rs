//=========================================================================
// Enemies
//=========================================================================
//
// Enemies crawl up their lane from the far rim toward the player. They
// only move themselves; the level decides what happens at the near rim.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{palette, shapes};
use crate::core::game::Game;
use crate::core::graph::NodeKey;
use crate::core::math::{Point, TransformProps};
use crate::core::render::Color;

//=== EnemyVariant ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyVariant {
    /// Bow-tie that keeps its lane's orientation.
    Flipper,

    /// Star that spins while it crawls.
    Spinner,
}

impl EnemyVariant {
    pub fn points(self) -> u32 {
        match self {
            EnemyVariant::Flipper => 150,
            EnemyVariant::Spinner => 50,
        }
    }

    pub fn color(self) -> Color {
        match self {
            EnemyVariant::Flipper => palette::FLIPPER,
            EnemyVariant::Spinner => palette::SPINNER,
        }
    }

    pub(crate) fn geometry(self) -> Vec<Point> {
        match self {
            EnemyVariant::Flipper => shapes::flipper(),
            EnemyVariant::Spinner => shapes::explosion(),
        }
    }
}

//=== Enemy ===============================================================

#[derive(Debug, Clone)]
pub struct Enemy {
    variant: EnemyVariant,
    near: Point,
    far: Point,
    z: f64,
    speed: f64,
}

impl Enemy {
    pub const SIZE: f64 = 0.12;

    /// Spinner rotation, radians per second.
    const SPIN: f64 = 4.0;

    /// Starts at the far end (`z = 1`) of the lane `near -> far`, moving
    /// `speed` depth per second.
    pub fn new(variant: EnemyVariant, near: Point, far: Point, speed: f64) -> Self {
        Self {
            variant,
            near,
            far,
            z: 1.0,
            speed,
        }
    }

    pub fn variant(&self) -> EnemyVariant {
        self.variant
    }

    pub fn depth(&self) -> f64 {
        self.z
    }

    pub fn at_rim(&self) -> bool {
        self.z <= 0.0
    }

    /// Sends the enemy back to the far rim of its lane.
    pub fn wrap(&mut self) {
        self.z = 1.0;
    }

    pub(crate) fn update(&mut self, game: &mut Game, key: NodeKey, delta: f64) {
        let seconds = delta / 1000.0;
        self.z = (self.z - self.speed * seconds).max(0.0);

        let at = self.near.lerp(self.far, self.z);
        game.graph
            .set_local_transform(key, TransformProps::new().position(at.x, at.y).depth(self.z));
        if self.variant == EnemyVariant::Spinner {
            game.graph
                .update_local_transform(key, TransformProps::new().angle(Self::SPIN * seconds));
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flippers_are_worth_more() {
        assert!(EnemyVariant::Flipper.points() > EnemyVariant::Spinner.points());
    }

    #[test]
    fn wrap_returns_to_far_rim() {
        let mut enemy = Enemy::new(EnemyVariant::Flipper, Point::new(0.0, 0.5), Point::new(0.0, 0.15), 0.2);
        assert!(!enemy.at_rim());
        enemy.z = 0.0;
        assert!(enemy.at_rim());
        enemy.wrap();
        assert_eq!(enemy.depth(), 1.0);
    }
}
