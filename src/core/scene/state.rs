//=========================================================================
// Game State
//=========================================================================
//
// The scene-level state record and the partial update applied to it.
//
// `GameState` is created once from defaults and afterwards only changes
// through `Game::update_state`, which merges a `StatePatch` and refreshes
// whatever HUD nodes mirror the touched fields.
//
//=========================================================================

//=== Constants ===========================================================

/// Lives a fresh game starts with.
pub const DEFAULT_LIVES: u32 = 2;

//=== SceneType ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneType {
    Title,
    Level,
    Win,
    GameOver,
}

//=== GameState ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub scene: SceneType,
    pub score: u32,
    pub level_idx: usize,
    pub lives: u32,

    /// Set once the first level of a run has started; later level starts
    /// skip the intro animation.
    pub level_started: bool,
}

impl GameState {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            scene: SceneType::Title,
            score: 0,
            level_idx: 0,
            lives: starting_lives,
            level_started: false,
        }
    }

    /// Merges `patch` into the state. Absent fields are untouched.
    pub fn apply(&mut self, patch: &StatePatch) {
        if let Some(scene) = patch.scene {
            self.scene = scene;
        }
        if let Some(score) = patch.score {
            self.score = score;
        }
        if let Some(level_idx) = patch.level_idx {
            self.level_idx = level_idx;
        }
        if let Some(lives) = patch.lives {
            self.lives = lives;
        }
        if let Some(level_started) = patch.level_started {
            self.level_started = level_started;
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_LIVES)
    }
}

//=== StatePatch ==========================================================

/// Partial [`GameState`] update.
///
/// # Examples
///
/// ```
/// use lanebound::core::scene::{GameState, SceneType, StatePatch};
///
/// let mut state = GameState::default();
/// state.apply(&StatePatch::new().scene(SceneType::Level).level_idx(0));
/// assert_eq!(state.scene, SceneType::Level);
/// assert_eq!(state.lives, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatePatch {
    pub scene: Option<SceneType>,
    pub score: Option<u32>,
    pub level_idx: Option<usize>,
    pub lives: Option<u32>,
    pub level_started: Option<bool>,
}

impl StatePatch {
    pub const fn new() -> Self {
        Self {
            scene: None,
            score: None,
            level_idx: None,
            lives: None,
            level_started: None,
        }
    }

    /// A patch that overwrites every field with `state`'s values.
    pub const fn replacing(state: &GameState) -> Self {
        Self {
            scene: Some(state.scene),
            score: Some(state.score),
            level_idx: Some(state.level_idx),
            lives: Some(state.lives),
            level_started: Some(state.level_started),
        }
    }

    pub const fn scene(mut self, scene: SceneType) -> Self {
        self.scene = Some(scene);
        self
    }

    pub const fn score(mut self, score: u32) -> Self {
        self.score = Some(score);
        self
    }

    pub const fn level_idx(mut self, idx: usize) -> Self {
        self.level_idx = Some(idx);
        self
    }

    pub const fn lives(mut self, lives: u32) -> Self {
        self.lives = Some(lives);
        self
    }

    pub const fn level_started(mut self, started: bool) -> Self {
        self.level_started = Some(started);
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_matches_a_fresh_run() {
        let state = GameState::default();
        assert_eq!(state.scene, SceneType::Title);
        assert_eq!(state.score, 0);
        assert_eq!(state.level_idx, 0);
        assert_eq!(state.lives, 2);
        assert!(!state.level_started);
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut state = GameState::default();
        state.apply(&StatePatch::new().score(150).lives(1));

        assert_eq!(state.score, 150);
        assert_eq!(state.lives, 1);
        assert_eq!(state.scene, SceneType::Title, "absent scene must be untouched");
    }

    #[test]
    fn replacing_patch_restores_everything() {
        let mut state = GameState {
            scene: SceneType::GameOver,
            score: 900,
            level_idx: 3,
            lives: 0,
            level_started: true,
        };
        state.apply(&StatePatch::replacing(&GameState::new(5)));
        assert_eq!(state, GameState::new(5));
    }
}
