//=========================================================================
// Text Screens
//=========================================================================
//
// Builders for the non-level scenes. Each runs on an already-cleared
// layer collection; the click-to-advance hook is installed by the game.
//
//=========================================================================

use super::hud::{format_score, spawn_text, Align};
use crate::core::game::Game;

const LAYER: u32 = 0;

fn line(game: &mut Game, text: &str, y: f64, height: f64) {
    let key = spawn_text(game, text, 0.0, y, height, Align::Center);
    game.add_object(key, LAYER);
}

pub fn title(game: &mut Game) {
    line(game, "LANEBOUND", -0.1, 0.08);
    line(game, "CLICK TO START", 0.1, 0.03);
}

pub fn win(game: &mut Game) {
    let score = format_score(game.state().score);
    line(game, "YOU WIN", -0.15, 0.08);
    line(game, &format!("SCORE {}", score), 0.0, 0.04);
    line(game, "CLICK TO PLAY AGAIN", 0.15, 0.03);
}

pub fn game_over(game: &mut Game) {
    let score = format_score(game.state().score);
    line(game, "GAME OVER", -0.15, 0.08);
    line(game, &format!("SCORE {}", score), 0.0, 0.04);
    line(game, "CLICK TO RETRY", 0.15, 0.03);
}
