//=========================================================================
// Scene Transitions
//=========================================================================
//
// The finite scene-state machine, as pure data.
//
// ```text
//   TITLE ──Begin──> LEVEL(0)
//   LEVEL(i) ──LevelCleared──> LEVEL(i+1) | WIN (no levels left)
//   LEVEL(i) ──RetryLevel───> LEVEL(i), lives - 1
//   LEVEL(i) ──GameOver─────> GAME_OVER
//   any ──────Restart───────> TITLE with defaults
// ```
//
// `SceneTransition::patch` only computes the state change. The game
// applies it, tears the old scene down and builds the new one.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::state::{GameState, SceneType, StatePatch};

//=== SceneTransition =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition {
    /// Title clicked: start the first level.
    Begin,

    /// Current level completed.
    LevelCleared,

    /// Player died with lives to spare.
    RetryLevel,

    /// Player died on the last life and the death sequence has finished.
    GameOver,

    /// Back to the title screen with a fresh state.
    Restart,
}

impl SceneTransition {
    /// Scene this transition may fire from, `None` meaning any scene.
    pub fn source(&self) -> Option<SceneType> {
        match self {
            Self::Begin => Some(SceneType::Title),
            Self::LevelCleared | Self::RetryLevel | Self::GameOver => Some(SceneType::Level),
            Self::Restart => None,
        }
    }

    /// State change for this transition from `state`, or `None` when the
    /// transition does not apply to the current scene.
    pub fn patch(&self, state: &GameState, level_count: usize, starting_lives: u32) -> Option<StatePatch> {
        if let Some(source) = self.source() {
            if state.scene != source {
                return None;
            }
        }

        let patch = match self {
            Self::Begin => StatePatch::new().scene(SceneType::Level).level_idx(0),
            Self::LevelCleared => {
                let next = state.level_idx + 1;
                if next >= level_count {
                    StatePatch::new().scene(SceneType::Win)
                } else {
                    StatePatch::new().level_idx(next)
                }
            }
            Self::RetryLevel => StatePatch::new().lives(state.lives.saturating_sub(1)),
            Self::GameOver => StatePatch::new().scene(SceneType::GameOver),
            Self::Restart => StatePatch::replacing(&GameState::new(starting_lives)),
        };
        Some(patch)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
