//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-game interface types (events and errors).
//
// The platform layer and the game share one thread; the channel between
// them is a frame-boundary hand-off, not a thread boundary. Tests drive
// the game by sending these same events.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from the platform to the game.
#[derive(Debug, Clone)]
pub enum PlatformEvent {
    /// Input gathered since the previous frame.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Window close requested.
    WindowClosed,
}

impl PlatformEvent {
    /// Wraps a single event, routed by its continuity.
    pub fn single(event: InputEvent) -> Self {
        if event.is_continuous() {
            Self::Inputs {
                discrete: Vec::new(),
                continuous: vec![event],
            }
        } else {
            Self::Inputs {
                discrete: vec![event],
                continuous: Vec::new(),
            }
        }
    }
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(String),

    /// The window or its presentation surface could not be set up.
    #[error("presentation surface error: {0}")]
    Surface(String),
}
