//=========================================================================
// Scene State Machine
//=========================================================================
//
// Applies scene transitions and builds each scene.
//
// Every transition goes through the same path:
// ```text
//   SceneTransition::patch ─> update_state ─> start_scene
//                                              ├─ clear_layers (teardown)
//                                              └─ build TITLE | LEVEL | WIN | GAME_OVER
// ```
// Transitions requested during a frame are queued and applied after the
// frame's visit, so a scene is never torn down under its own update.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{Game, Hud};
use crate::content::explosion::Explosion;
use crate::content::hud::{format_score, spawn_text, Align, LivesDisplay};
use crate::content::player::Player;
use crate::content::{palette, Level, NodeKind};
use crate::core::scene::{DeathSequence, DeathTiming, GameState, SceneTransition, SceneType, SequenceEvent, StatePatch};

//=== Layout ==============================================================

/// Level root scale in screen units.
const LEVEL_SIZE: f64 = 0.65;

const PLAYFIELD_LAYER: u32 = 0;
const OVERLAY_LAYER: u32 = 1;

//=== Scenes ==============================================================

impl Game {
    //--- State ------------------------------------------------------------

    /// Merges `patch` into the state and refreshes the HUD nodes that
    /// mirror the touched fields.
    pub fn update_state(&mut self, patch: StatePatch) {
        self.state.apply(&patch);

        if let Some(score) = patch.score {
            let graph = &mut self.graph;
            let label = self.hud.score.and_then(move |k| graph.get_mut(k)).and_then(|n| n.kind_mut());
            if let Some(NodeKind::Text(label)) = label {
                label.update_text(format_score(score));
            }
        }
        if let Some(lives) = patch.lives {
            let graph = &mut self.graph;
            let display = self.hud.lives.and_then(move |k| graph.get_mut(k)).and_then(|n| n.kind_mut());
            if let Some(NodeKind::Lives(display)) = display {
                display.update_lives(lives);
            }
        }
    }

    /// Back to the title screen with a fresh state.
    pub fn restart(&mut self) {
        info!("Restarting");
        self.update_state(StatePatch::replacing(&GameState::new(self.config.gameplay.starting_lives)));
        self.start_scene();
    }

    pub(crate) fn add_score(&mut self, points: u32) {
        let score = self.state.score.saturating_add(points);
        self.update_state(StatePatch::new().score(score));
    }

    //--- Transitions ------------------------------------------------------

    pub(crate) fn process_transitions(&mut self) {
        for transition in self.transitions.take() {
            self.apply_transition(transition);
        }
    }

    fn apply_transition(&mut self, transition: SceneTransition) {
        let patch = transition.patch(
            &self.state,
            self.content.levels.len(),
            self.config.gameplay.starting_lives,
        );
        let Some(patch) = patch else {
            warn!("Ignoring {:?} in scene {:?}", transition, self.state.scene);
            return;
        };
        info!("Transition {:?} from {:?}", transition, self.state.scene);
        self.update_state(patch);
        self.start_scene();
    }

    //--- Scene Construction -----------------------------------------------

    /// Tears down the current scene and builds the one `state` names.
    pub(crate) fn start_scene(&mut self) {
        self.clear_layers();
        let scene = self.state.scene;

        match scene {
            SceneType::Title => {
                let build = self.content.title;
                build(self);
                self.click_action = Some(SceneTransition::Begin);
            }
            SceneType::Level => self.start_level(),
            SceneType::Win => {
                let build = self.content.win;
                build(self);
                self.click_action = Some(SceneTransition::Restart);
            }
            SceneType::GameOver => {
                let build = self.content.game_over;
                build(self);
                self.click_action = Some(SceneTransition::Restart);
            }
        }
        debug!("Built {:?} with {} live nodes", self.state.scene, self.layers.len());
    }

    fn start_level(&mut self) {
        let idx = self.state.level_idx;
        let Some(spec) = self.content.levels.get(idx).cloned() else {
            warn!("Level index {} out of range, showing WIN", idx);
            self.update_state(StatePatch::new().scene(SceneType::Win));
            self.start_scene();
            return;
        };
        info!("Starting level {} '{}'", idx, spec.name);

        let props = self
            .default_props()
            .size(Player::SIZE, Player::SIZE)
            .color(palette::PLAYER);
        let player = self.spawn(props, NodeKind::Player(Player::new()));

        let props = self.default_props().at(-0.4, -0.4).size(0.1, 0.1).color(palette::PLAYER);
        let display = LivesDisplay::new(self.state.lives);
        let lives = self.spawn(props, NodeKind::Lives(display));

        let seed = self.config.gameplay.seed.wrapping_add(idx as u64);
        let props = self
            .default_props()
            .size(LEVEL_SIZE, LEVEL_SIZE)
            .color(spec.color)
            .stroked();
        let level = self.spawn(props, NodeKind::Level(Level::new(spec, LEVEL_SIZE, seed)));

        let score_label = spawn_text(self, "SCORE", 0.45, -0.43, 0.02, Align::End);
        let score = format_score(self.state.score);
        let score_value = spawn_text(self, &score, 0.45, -0.37, 0.03, Align::End);

        self.level = Some(level);
        self.hud = Hud {
            score: Some(score_value),
            lives: Some(lives),
        };
        self.add_object(level, PLAYFIELD_LAYER);
        self.add_object(lives, OVERLAY_LAYER);
        self.add_object(score_label, OVERLAY_LAYER);
        self.add_object(score_value, OVERLAY_LAYER);

        let replay = self.state.level_started;
        self.with_level(|game, level, key| {
            level.init_player_spots();
            level.set_player(game, key, player);
            if replay {
                level.start_spawning();
            } else {
                level.start_level_start_anim(game, key);
            }
        });
        self.player = Some(player);
        self.update_state(StatePatch::new().level_started(true));
    }

    //--- Player Death -----------------------------------------------------

    /// Destroys the player, leaves an explosion where it was and starts
    /// the death sequence.
    pub(crate) fn player_died(&mut self, time: f64) {
        let Some(player) = self.player.take() else {
            return;
        };
        let Some(at) = self.graph.get(player).map(|n| *n.global()) else {
            return;
        };
        info!("Player died with {} lives left", self.state.lives);

        self.with_level(|_, level, _| level.halt());
        self.destroy_object(player);

        let props = self
            .default_props()
            .at(at.x(), at.y())
            .size(Explosion::SIZE, Explosion::SIZE)
            .color(palette::EXPLOSION[0]);
        let explosion = self.spawn(props, NodeKind::Explosion(Explosion::new(Explosion::SIZE)));
        self.add_object(explosion, OVERLAY_LAYER);

        let timing = DeathTiming {
            pause_ms: self.config.timing.game_over_pause_ms,
            outro_ms: Level::OUTRO_MS,
            settle_ms: self.config.timing.game_over_settle_ms,
        };
        self.death = Some(DeathSequence::new(time, Explosion::DURATION_MS, self.state.lives, timing));
    }

    pub(crate) fn tick_sequence(&mut self, time: f64) {
        let Some(sequence) = self.death.as_mut() else {
            return;
        };
        let event = sequence.tick(time);
        if sequence.is_finished() {
            self.death = None;
        }

        match event {
            Some(SequenceEvent::LifeLost) => self.transitions.push(SceneTransition::RetryLevel),
            Some(SequenceEvent::StartOutro) => {
                self.with_level(|_, level, _| level.on_game_over());
            }
            Some(SequenceEvent::GameOver) => self.transitions.push(SceneTransition::GameOver),
            None => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
