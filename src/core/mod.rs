//=========================================================================
// Core
//
// Engine-side systems the content layer is built on.
//
// Responsibilities:
// - `math`: 3×3 affine matrices and composed node transforms
// - `graph`: node arena, scene nodes, layer collection, id recycling
// - `input`: portable input events, listener wiring, resize debounce
// - `render`: the `Canvas` surface and its raster / recording backends
// - `scene`: game state, transitions and the death sequence
// - `platform_bridge`: the events and errors shared with the platform
// - `game`: the owned context tying them together frame by frame
//
// Notes:
// Everything here is single-threaded and driven from the platform's
// redraw callback. Nothing blocks; timed steps are checked each frame.
//
//=========================================================================

pub mod game;
pub mod graph;
pub mod input;
pub mod math;
pub mod platform_bridge;
pub mod render;
pub mod scene;
