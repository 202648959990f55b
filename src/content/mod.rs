//=========================================================================
// Content
//=========================================================================
//
// Game objects and screens built on top of the core scene graph.
//
// Architecture:
//   behavior  NodeKind + dispatch hooks called by the frame engine
//   level     playfield, lanes, spawning and game rules
//   player / bullet / enemy / explosion   per-entity behavior
//   hud / font / screens                  text, lives and menus
//   shapes / palette / levels             static data
//
//=========================================================================

//=== Module Declarations =================================================

pub mod behavior;
pub mod bullet;
pub mod enemy;
pub mod explosion;
pub mod font;
pub mod hud;
pub mod level;
pub mod levels;
pub mod palette;
pub mod player;
pub mod screens;
pub mod shapes;

//=== Public API ==========================================================

pub use behavior::NodeKind;
pub use level::{Level, LevelSpec};

use crate::core::game::Game;

//=== SceneContent ========================================================

/// Builders for every scene the state machine can enter.
#[derive(Debug, Clone)]
pub struct SceneContent {
    pub title: fn(&mut Game),
    pub win: fn(&mut Game),
    pub game_over: fn(&mut Game),
    pub levels: Vec<LevelSpec>,
}

impl Default for SceneContent {
    fn default() -> Self {
        Self {
            title: screens::title,
            win: screens::win,
            game_over: screens::game_over,
            levels: levels::standard_levels(),
        }
    }
}
