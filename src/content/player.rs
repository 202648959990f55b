//=========================================================================
// Player
//=========================================================================
//
// The ship on the near rim. Fire input toggles a flag; while it is set
// the ship shoots down its current lane at most once per fire interval.
// Lane selection itself belongs to the level, which follows the cursor.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::bullet::Bullet;
use super::{palette, NodeKind};
use crate::core::game::Game;
use crate::core::graph::NodeKey;
use crate::core::input::{InputEvent, KeyCode, Listener};

//=== Player ==============================================================

#[derive(Debug, Clone, Default)]
pub struct Player {
    firing: bool,
    last_shot: Option<f64>,
}

impl Player {
    /// Ship size in level units.
    pub const SIZE: f64 = 0.12;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_firing(&self) -> bool {
        self.firing
    }

    pub(crate) fn listeners() -> Vec<Listener> {
        vec![Listener::Key(KeyCode::Space), Listener::PointerButton]
    }

    pub(crate) fn on_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key: KeyCode::Space } | InputEvent::MouseButtonDown { .. } => {
                self.firing = true;
            }
            InputEvent::KeyUp { key: KeyCode::Space } | InputEvent::MouseButtonUp { .. } => {
                self.firing = false;
            }
            _ => {}
        }
    }

    pub(crate) fn update(&mut self, game: &mut Game, key: NodeKey, time: f64) {
        if !self.firing {
            return;
        }
        let interval = game.config.gameplay.fire_interval_ms;
        if self.last_shot.is_some_and(|last| time - last < interval) {
            return;
        }
        if Self::fire(game, key).is_some() {
            self.last_shot = Some(time);
        }
    }

    /// Spawns a bullet at the near end of the current lane.
    fn fire(game: &mut Game, key: NodeKey) -> Option<NodeKey> {
        let layer = game.graph.get(key)?.layer();
        game.with_level(|game, level, level_key| {
            let lane = level.get_player_spot_index();
            let (from, to) = level.get_bullet_path(lane)?;

            let props = game
                .default_props()
                .at(from.x, from.y)
                .size(Bullet::SIZE, Bullet::SIZE)
                .color(palette::BULLET);
            let bullet = game.spawn(props, NodeKind::Bullet(Bullet::new(from, to)));
            game.add_object(bullet, layer);
            level.add_bullet(game, level_key, bullet, lane);
            Some(bullet)
        })
        .flatten()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
