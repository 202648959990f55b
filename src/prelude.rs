//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types.
//
// Usage:
//   use lanebound::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine facade
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Configuration
pub use crate::config::{ConfigError, GameConfig};

// Game context and scene graph
pub use crate::core::game::Game;
pub use crate::core::graph::{NodeKey, NodeProps, SceneNode};
pub use crate::core::math::{Point, Transform};

// Scene state
pub use crate::core::scene::{GameState, SceneTransition, SceneType, StatePatch};

// Content
pub use crate::content::{LevelSpec, NodeKind, SceneContent};
