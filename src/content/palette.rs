//=========================================================================
// Palette
//=========================================================================

use crate::core::render::Color;

pub const TEXT: Color = Color::rgb(240, 240, 240);
pub const PLAYER: Color = Color::rgb(255, 230, 0);
pub const BULLET: Color = Color::rgb(255, 255, 255);
pub const FLIPPER: Color = Color::rgb(230, 30, 40);
pub const SPINNER: Color = Color::rgb(40, 220, 90);
pub const LANE_ACTIVE: Color = Color::rgb(255, 230, 0);
pub const EXPLOSION: [Color; 3] = [
    Color::rgb(255, 255, 255),
    Color::rgb(255, 200, 40),
    Color::rgb(255, 80, 20),
];
