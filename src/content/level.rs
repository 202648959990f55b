//=========================================================================
// Level
//=========================================================================
//
// The playfield: a rim polygon seen down a tube, its far end shrunk by
// `FAR_SCALE`. Every edge of the rim is a lane.
//
// Responsibilities:
// - Derive lanes and player spots from the rim
// - Own the player, bullets and enemies as child nodes
// - Follow the cursor to pick the player's lane
// - Spawn enemies, resolve hits, detect the player's death and the clear
// - Play the intro and game-over animations on its own scale
//
// Lane geometry (level-local units):
// ```text
//   near edge  rim[i] ─── mid ─── rim[i+1]       z = 0
//                 ╲        │         ╱
//   far edge       far[i] ─ far_mid ─ far[i+1]   z = 1
// ```
// Anything travelling a lane sits at `lerp(mid, far_mid, z)` with node
// depth `z`, so depth scaling and position shrink together.
//
// Phases:
// ```text
//   Idle ──> Intro ──> Spawning ──> Cleared
//                          │
//                          └──> Halted ──> Outro ──> Halted
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

//=== Internal Dependencies ===============================================

use super::enemy::{Enemy, EnemyVariant};
use super::player::Player;
use super::{palette, shapes, NodeKind};
use crate::core::game::Game;
use crate::core::graph::{NodeKey, SceneNode};
use crate::core::math::{Point, TransformProps, FAR_SCALE};
use crate::core::render::{Canvas, Color};
use crate::core::scene::SceneTransition;

//=== LevelSpec ===========================================================

/// Static description of one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSpec {
    pub name: String,

    /// Near rim in level-local units, inside the unit box.
    pub rim: Vec<Point>,

    /// Whether the last rim point connects back to the first.
    pub loops: bool,

    pub enemy_count: u32,
    pub spawn_interval_ms: f64,

    /// Enemy depth covered per second.
    pub enemy_speed: f64,

    /// Share of spawns that are spinners, in `[0, 1]`.
    pub spinner_ratio: f64,

    pub color: Color,
}

//=== Lane ================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct Lane {
    mid: Point,

    /// Orientation that points a ship's claws at the tube's center.
    angle: f64,
}

impl Lane {
    fn far(&self) -> Point {
        self.mid.scaled(FAR_SCALE)
    }
}

//=== Phase ===============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Intro { started: Option<f64> },
    Spawning,
    Halted,
    Outro { started: Option<f64> },
    Cleared,
}

//=== Level ===============================================================

#[derive(Debug, Clone)]
pub struct Level {
    spec: LevelSpec,
    size: f64,
    lanes: Vec<Lane>,
    phase: Phase,
    player: Option<NodeKey>,
    spot: usize,
    cursor: Option<Point>,
    bullets: Vec<(NodeKey, usize)>,
    enemies: Vec<(NodeKey, usize)>,
    spawned: u32,
    next_spawn_at: Option<f64>,
    rng: StdRng,
}

impl Level {
    pub const INTRO_MS: f64 = 1000.0;
    pub const OUTRO_MS: f64 = 800.0;

    /// Bullet and enemy in one lane collide when this close in depth.
    pub const HIT_DEPTH: f64 = 0.06;

    /// Scale floor for the intro and outro; keeps the matrix invertible.
    const MIN_SCALE: f64 = 0.01;

    /// `size` is the level node's full on-screen scale.
    pub fn new(spec: LevelSpec, size: f64, seed: u64) -> Self {
        Self {
            spec,
            size,
            lanes: Vec::new(),
            phase: Phase::Idle,
            player: None,
            spot: 0,
            cursor: None,
            bullets: Vec::new(),
            enemies: Vec::new(),
            spawned: 0,
            next_spawn_at: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn spec(&self) -> &LevelSpec {
        &self.spec
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_spawning(&self) -> bool {
        self.phase == Phase::Spawning
    }

    //--- Collaborator Interface -------------------------------------------

    /// Derives one lane per rim edge, plus the closing edge when the rim
    /// loops.
    pub fn init_player_spots(&mut self) {
        self.lanes = Point::midpoints(&self.spec.rim, self.spec.loops)
            .into_iter()
            .map(|mid| Lane {
                mid,
                angle: (-mid.x).atan2(mid.y).rem_euclid(std::f64::consts::TAU),
            })
            .collect();

        // Start on the bottom-most lane.
        self.spot = self
            .lanes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.mid.y.total_cmp(&b.mid.y))
            .map_or(0, |(i, _)| i);
        debug!("Level '{}' has {} lanes", self.spec.name, self.lanes.len());
    }

    /// Adopts `player` as a child and places it on the current spot.
    pub fn set_player(&mut self, game: &mut Game, me: NodeKey, player: NodeKey) {
        game.graph.attach_children(me, &[player]);
        if let Some(node) = game.graph.get(me) {
            if node.is_rendered() {
                let layer = node.layer();
                game.add_object(player, layer);
            }
        }
        self.player = Some(player);
        self.place_player(game);
    }

    pub fn start_spawning(&mut self) {
        self.phase = Phase::Spawning;
        self.next_spawn_at = None;
    }

    pub fn start_level_start_anim(&mut self, game: &mut Game, me: NodeKey) {
        self.phase = Phase::Intro { started: None };
        self.set_scale(game, me, Self::MIN_SCALE);
    }

    /// Near and far end of `lane` in level-local units.
    pub fn get_bullet_path(&self, lane: usize) -> Option<(Point, Point)> {
        self.lanes.get(lane).map(|l| (l.mid, l.far()))
    }

    pub fn get_player_spot_index(&self) -> usize {
        self.spot
    }

    /// Adopts `bullet` as a child travelling `lane`.
    pub fn add_bullet(&mut self, game: &mut Game, me: NodeKey, bullet: NodeKey, lane: usize) {
        game.graph.attach_children(me, &[bullet]);
        self.bullets.push((bullet, lane));
    }

    /// Follows the cursor, given in canvas pixels, from the next update.
    pub fn start_updating_with_cursor(&mut self, x: f64, y: f64) {
        self.cursor = Some(Point::new(x, y));
    }

    pub fn stop_updating_with_cursor(&mut self) {
        self.cursor = None;
    }

    /// Freezes play after the player was hit.
    pub fn halt(&mut self) {
        self.phase = Phase::Halted;
    }

    /// Starts the game-over shrink.
    pub fn on_game_over(&mut self) {
        self.phase = Phase::Outro { started: None };
    }

    //--- Frame Update -----------------------------------------------------

    pub(crate) fn update(&mut self, game: &mut Game, me: NodeKey, time: f64) {
        self.prune(game);
        self.follow_cursor(game, me);

        match self.phase {
            Phase::Intro { started } => {
                let started = started.unwrap_or(time);
                self.phase = Phase::Intro { started: Some(started) };
                let k = ((time - started) / Self::INTRO_MS).clamp(0.0, 1.0);
                self.set_scale(game, me, k.max(Self::MIN_SCALE));
                if k >= 1.0 {
                    self.start_spawning();
                }
            }
            Phase::Spawning => {
                self.spawn_due(game, me, time);
                self.resolve_hits(game);
                if self.check_rim(game, time) {
                    return;
                }
                self.check_cleared(game);
            }
            Phase::Outro { started } => {
                let started = started.unwrap_or(time);
                self.phase = Phase::Outro { started: Some(started) };
                let k = 1.0 - ((time - started) / Self::OUTRO_MS).clamp(0.0, 1.0);
                self.set_scale(game, me, k.max(Self::MIN_SCALE));
                if k <= 0.0 {
                    self.phase = Phase::Halted;
                }
            }
            Phase::Idle | Phase::Halted | Phase::Cleared => {}
        }
    }

    /// Forgets children that were destroyed elsewhere.
    fn prune(&mut self, game: &Game) {
        self.bullets.retain(|&(key, _)| game.graph.contains(key));
        self.enemies.retain(|&(key, _)| game.graph.contains(key));
        if self.player.is_some_and(|key| !game.graph.contains(key)) {
            self.player = None;
        }
    }

    fn follow_cursor(&mut self, game: &mut Game, me: NodeKey) {
        let (Some(cursor), Some(_)) = (self.cursor, self.player) else {
            return;
        };
        let Some(global) = game.graph.get(me).map(|n| *n.global()) else {
            return;
        };
        let viewport = game.canvas.viewport();
        if viewport.width <= 0.0 || viewport.height <= 0.0 || global.w() == 0.0 || global.h() == 0.0 {
            return;
        }

        let local = Point::new(
            (cursor.x / viewport.width - 0.5 - global.x()) / global.w(),
            (cursor.y / viewport.height - 0.5 - global.y()) / global.h(),
        );
        let nearest = self
            .lanes
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.mid.distance(local).total_cmp(&b.mid.distance(local)))
            .map(|(i, _)| i);

        if let Some(nearest) = nearest {
            if nearest != self.spot {
                self.spot = nearest;
                self.place_player(game);
            }
        }
    }

    fn place_player(&self, game: &mut Game) {
        let (Some(player), Some(lane)) = (self.player, self.lanes.get(self.spot)) else {
            return;
        };
        game.graph.set_local_transform(
            player,
            TransformProps::new()
                .position(lane.mid.x, lane.mid.y)
                .angle(lane.angle)
                .scale(Player::SIZE, Player::SIZE),
        );
    }

    fn set_scale(&self, game: &mut Game, me: NodeKey, k: f64) {
        let size = self.size * k;
        game.graph.set_local_transform(me, TransformProps::new().scale(size, size));
    }

    //--- Spawning ---------------------------------------------------------

    fn spawn_due(&mut self, game: &mut Game, me: NodeKey, time: f64) {
        if self.spawned >= self.spec.enemy_count || self.lanes.is_empty() {
            return;
        }
        let due = *self.next_spawn_at.get_or_insert(time + self.spec.spawn_interval_ms);
        if time < due {
            return;
        }
        self.next_spawn_at = Some(due + self.spec.spawn_interval_ms);
        self.spawn_enemy(game, me);
    }

    fn spawn_enemy(&mut self, game: &mut Game, me: NodeKey) {
        let lane_idx = self.rng.gen_range(0..self.lanes.len());
        let lane = self.lanes[lane_idx];
        let variant = if self.rng.gen_bool(self.spec.spinner_ratio.clamp(0.0, 1.0)) {
            EnemyVariant::Spinner
        } else {
            EnemyVariant::Flipper
        };

        let far = lane.far();
        let props = game
            .default_props()
            .at(far.x, far.y)
            .depth(1.0)
            .size(Enemy::SIZE, Enemy::SIZE)
            .angle(lane.angle)
            .color(variant.color());
        let enemy = game.spawn(
            props,
            NodeKind::Enemy(Enemy::new(variant, lane.mid, far, self.spec.enemy_speed)),
        );
        game.graph.attach_children(me, &[enemy]);
        let layer = game.graph.get(me).map_or(0, SceneNode::layer);
        game.add_object(enemy, layer);

        self.enemies.push((enemy, lane_idx));
        self.spawned += 1;
    }

    //--- Rules ------------------------------------------------------------

    fn resolve_hits(&mut self, game: &mut Game) {
        let mut points = 0;
        for (bullet, lane) in self.bullets.clone() {
            let Some(bullet_z) = bullet_depth(game, bullet) else {
                continue;
            };
            let hit = self.enemies.iter().position(|&(enemy, enemy_lane)| {
                enemy_lane == lane
                    && enemy_of(game, enemy).is_some_and(|e| (e.depth() - bullet_z).abs() <= Self::HIT_DEPTH)
            });
            if let Some(idx) = hit {
                let (enemy, _) = self.enemies.remove(idx);
                points += enemy_of(game, enemy).map_or(0, |e| e.variant().points());
                game.destroy_object(enemy);
                game.destroy_object(bullet);
            }
        }
        self.bullets.retain(|&(key, _)| game.graph.contains(key));

        if points > 0 {
            game.add_score(points);
        }
    }

    /// Handles enemies that reached the near rim. Returns `true` when one
    /// of them got the player.
    fn check_rim(&mut self, game: &mut Game, time: f64) -> bool {
        for (enemy, lane) in self.enemies.clone() {
            let Some(NodeKind::Enemy(state)) = game.graph.get_mut(enemy).and_then(SceneNode::kind_mut) else {
                continue;
            };
            if !state.at_rim() {
                continue;
            }
            if self.player.is_some() && lane == self.spot {
                info!("Player hit in lane {}", lane);
                self.halt();
                game.player_died(time);
                return true;
            }
            state.wrap();
        }
        false
    }

    fn check_cleared(&mut self, game: &mut Game) {
        if self.spawned >= self.spec.enemy_count && self.enemies.is_empty() {
            info!("Level '{}' cleared", self.spec.name);
            self.phase = Phase::Cleared;
            game.transitions.push(SceneTransition::LevelCleared);
        }
    }

    //--- Render -----------------------------------------------------------

    pub(crate) fn render(&self, node: &SceneNode, canvas: &mut dyn Canvas) {
        let color = node.color();
        let mut near = self.spec.rim.clone();
        if self.spec.loops {
            if let Some(&first) = near.first() {
                near.push(first);
            }
        }
        let far: Vec<Point> = near.iter().map(|p| p.scaled(FAR_SCALE)).collect();

        node.stroke_polyline(canvas, &near, color);
        node.stroke_polyline(canvas, &far, color);
        for point in &self.spec.rim {
            node.stroke_polyline(canvas, &[*point, point.scaled(FAR_SCALE)], color);
        }
        for lane in &self.lanes {
            node.paint_points(canvas, &shapes::far_dot(lane.far()), color);
        }

        if self.player.is_some() {
            if let (Some(&a), Some(&b)) = (near.get(self.spot), near.get(self.spot + 1)) {
                let outline = [a, b, b.scaled(FAR_SCALE), a.scaled(FAR_SCALE), a];
                node.stroke_polyline(canvas, &outline, palette::LANE_ACTIVE);
            }
        }
    }
}

//=== Helpers =============================================================

fn bullet_depth(game: &Game, key: NodeKey) -> Option<f64> {
    match game.graph.get(key)?.kind()? {
        NodeKind::Bullet(bullet) => Some(bullet.depth()),
        _ => None,
    }
}

fn enemy_of(game: &Game, key: NodeKey) -> Option<&Enemy> {
    match game.graph.get(key)?.kind()? {
        NodeKind::Enemy(enemy) => Some(enemy),
        _ => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
