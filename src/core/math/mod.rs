//=========================================================================
// Math
//=========================================================================
//
// Pure 2D math shared by the scene graph and the content layer.
//
// Architecture:
//   Point (value type) ─┐
//                       ├─> Transform (cached scalars + Matrix3)
//   matrix helpers ─────┘
//
// Coordinates use the centered unit-square convention: the visible play
// area spans roughly [-0.5, 0.5] on both axes before being normalized to
// device pixels by the scene node.
//
//=========================================================================

//=== Module Declarations =================================================

mod matrix;
mod transform;

//=== Public API ==========================================================

pub use matrix::{derive_angle, derive_scale, rotation, scaling, translation, Mat3, Point};
pub use transform::{depth_scale, Transform, TransformProps, FAR_SCALE};
