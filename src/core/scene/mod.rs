//=========================================================================
// Scene System
//=========================================================================
//
// Scene state, the transitions between scenes, and the timed sequences
// that lead up to them.
//
// Architecture:
//   GameState ──(SceneTransition::patch)──> StatePatch ──> Game::update_state
//   TransitionQueue: transitions requested mid-frame, applied after it
//   DeathSequence:   deadlines between a player hit and the next scene
//
//=========================================================================

//=== Module Declarations =================================================

mod scene_manager;
mod sequence;
mod state;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_manager::SceneTransition;
pub use sequence::{DeathSequence, DeathTiming, SequenceEvent};
pub use state::{GameState, SceneType, StatePatch, DEFAULT_LIVES};
pub use transition_queue::TransitionQueue;
