//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the windowing layer (winit) with the game.
//
// Components:
// - `interface`: event and error types (the contract)
// - `event_collector`: game-side draining of the channel each frame
//
// The game only sees `PlatformEvent`s, so a headless driver (tests, a
// replay) can stand in for the window by owning the sender.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event_collector;
pub mod interface;

//=== Public API ==========================================================

pub use event_collector::{EventCollector, TickControl};
pub use interface::{PlatformError, PlatformEvent};
