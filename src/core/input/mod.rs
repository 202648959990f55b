//=========================================================================
// Input
//
// Input vocabulary and routing shared by the platform layer and the game.
//
// Responsibilities:
// - Portable input events (`event`)
// - Per-node input subscriptions (`listeners`)
// - Time-based debouncing for bursty inputs such as resizes (`debounce`)
//
// Notes:
// There is no global "is key pressed" state here: nodes that care about a
// key keep their own flag and update it from the events they are wired to.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod debounce;
mod listeners;

//=== Public API ==========================================================

pub use debounce::Debouncer;
pub use event::{InputEvent, KeyCode, MouseButton};
pub use listeners::{Listener, ListenerRegistry};
