//=========================================================================
// Level Layouts
//=========================================================================

use super::level::LevelSpec;
use super::shapes;
use crate::core::math::Point;
use crate::core::render::Color;

/// The default campaign, in play order.
pub fn standard_levels() -> Vec<LevelSpec> {
    vec![tube(), block(), cross(), ridge()]
}

pub fn tube() -> LevelSpec {
    LevelSpec {
        name: "Tube".to_string(),
        rim: shapes::circle(16),
        loops: true,
        enemy_count: 8,
        spawn_interval_ms: 1200.0,
        enemy_speed: 0.15,
        spinner_ratio: 0.25,
        color: Color::rgb(40, 90, 255),
    }
}

pub fn block() -> LevelSpec {
    LevelSpec {
        name: "Block".to_string(),
        rim: shapes::square(16),
        loops: true,
        enemy_count: 10,
        spawn_interval_ms: 1000.0,
        enemy_speed: 0.18,
        spinner_ratio: 0.3,
        color: Color::rgb(200, 40, 200),
    }
}

pub fn cross() -> LevelSpec {
    LevelSpec {
        name: "Cross".to_string(),
        rim: shapes::plus(),
        loops: true,
        enemy_count: 12,
        spawn_interval_ms: 900.0,
        enemy_speed: 0.2,
        spinner_ratio: 0.35,
        color: Color::rgb(40, 200, 200),
    }
}

/// Open zig-zag: its ends do not join, so it has one lane fewer than
/// rim points.
pub fn ridge() -> LevelSpec {
    let rim = (0..9)
        .map(|i| {
            let x = -0.5 + 0.125 * f64::from(i);
            let y = if i % 2 == 0 { 0.3 } else { 0.15 };
            Point::new(x, y)
        })
        .collect();
    LevelSpec {
        name: "Ridge".to_string(),
        rim,
        loops: false,
        enemy_count: 14,
        spawn_interval_ms: 800.0,
        enemy_speed: 0.22,
        spinner_ratio: 0.4,
        color: Color::rgb(230, 120, 30),
    }
}
