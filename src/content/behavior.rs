//=========================================================================
// Node Behaviors
//=========================================================================
//
// The closed set of node kinds and the explicit dispatch over it.
//
// Each hook is a plain `match`; adding a kind means adding an arm to each
// function below. The frame engine and the lifecycle manager call these
// and never look inside a variant themselves.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::bullet::Bullet;
use super::enemy::Enemy;
use super::explosion::Explosion;
use super::hud::{LivesDisplay, TextLabel};
use super::level::Level;
use super::player::Player;
use super::shapes;
use crate::core::game::Game;
use crate::core::graph::{NodeKey, SceneNode};
use crate::core::input::{InputEvent, Listener};
use crate::core::math::Point;
use crate::core::render::Canvas;

//=== NodeKind ============================================================

#[derive(Debug, Clone)]
pub enum NodeKind {
    Level(Level),
    Player(Player),
    Bullet(Bullet),
    Enemy(Enemy),
    Explosion(Explosion),
    Lives(LivesDisplay),
    Text(TextLabel),

    /// Static geometry with no behavior of its own.
    Shape,
}

//=== Dispatch ============================================================

/// Geometry assigned once, when the node is first added.
pub(crate) fn init_geometry(kind: &NodeKind) -> Option<Vec<Point>> {
    match kind {
        NodeKind::Player(_) => Some(shapes::player()),
        NodeKind::Bullet(_) => Some(shapes::plus()),
        NodeKind::Enemy(enemy) => Some(enemy.variant().geometry()),
        NodeKind::Explosion(_) => Some(shapes::explosion()),
        NodeKind::Level(_) | NodeKind::Lives(_) | NodeKind::Text(_) | NodeKind::Shape => None,
    }
}

/// Inputs the node is wired to while it is live.
pub(crate) fn listeners(kind: &NodeKind) -> Vec<Listener> {
    match kind {
        NodeKind::Player(_) => Player::listeners(),
        _ => Vec::new(),
    }
}

pub(crate) fn update(game: &mut Game, key: NodeKey, kind: &mut NodeKind, delta: f64, time: f64) {
    match kind {
        NodeKind::Level(level) => level.update(game, key, time),
        NodeKind::Player(player) => player.update(game, key, time),
        NodeKind::Bullet(bullet) => bullet.update(game, key, delta),
        NodeKind::Enemy(enemy) => enemy.update(game, key, delta),
        NodeKind::Explosion(explosion) => explosion.update(game, key, time),
        NodeKind::Lives(_) | NodeKind::Text(_) | NodeKind::Shape => {}
    }
}

pub(crate) fn render(node: &SceneNode, canvas: &mut dyn Canvas) {
    match node.kind() {
        Some(NodeKind::Level(level)) => level.render(node, canvas),
        Some(NodeKind::Lives(lives)) => lives.render(node, canvas),
        Some(NodeKind::Text(label)) => label.render(node, canvas),
        Some(NodeKind::Explosion(explosion)) => explosion.render(node, canvas),
        _ => node.render_geometry(canvas),
    }
}

pub(crate) fn on_input(kind: &mut NodeKind, event: &InputEvent) {
    if let NodeKind::Player(player) = kind {
        player.on_input(event);
    }
}
