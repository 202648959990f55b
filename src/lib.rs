//=========================================================================
// Lanebound: Library Root
//
// A lane shooter on a layered 2D scene graph with a cooperative,
// refresh-driven frame engine.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the core systems and the game content for embedding and tests
// - Keep the winit integration (`platform`) private
//
// Typical usage:
// ```no_run
// use lanebound::EngineBuilder;
//
// fn main() -> Result<(), lanebound::EngineError> {
//     EngineBuilder::new().build().run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the scene graph, frame engine and state machine.
// `content` holds the game objects and screens built on it.
// `config` is the TOML-backed settings tree.
//
pub mod config;
pub mod content;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window, input conversion and presentation.
// `engine` wires config, canvas, game and platform together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineError};
