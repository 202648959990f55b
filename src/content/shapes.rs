//=========================================================================
// Shapes
//=========================================================================
//
// Point lists in node-local units: every shape fits the [-0.5, 0.5] box
// so a node's `w`/`h` is its on-screen size in play-area units.
//
// `circle` and `square` are memoized per segment count.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_4, TAU};

//=== Internal Dependencies ===============================================

use crate::core::math::Point;

//=== Memo ================================================================

thread_local! {
    static CIRCLES: RefCell<HashMap<usize, Vec<Point>>> = RefCell::new(HashMap::new());
    static SQUARES: RefCell<HashMap<usize, Vec<Point>>> = RefCell::new(HashMap::new());
}

//=== Shapes ==============================================================

/// Claw-shaped player ship, opening toward +y.
pub fn player() -> Vec<Point> {
    vec![
        Point::new(-0.25, -0.25),
        Point::new(-0.5, 0.0),
        Point::new(0.0, 0.3),
        Point::new(0.5, 0.0),
        Point::new(0.25, -0.25),
        Point::new(0.4, 0.0),
        Point::new(0.0, 0.1),
        Point::new(-0.4, 0.0),
    ]
}

/// Sixteen-point plus sign, starting at the right arm.
pub fn plus() -> Vec<Point> {
    vec![
        Point::new(0.5, 0.0),
        Point::new(0.5, 0.25),
        Point::new(0.25, 0.25),
        Point::new(0.25, 0.5),
        Point::new(0.0, 0.5),
        Point::new(-0.25, 0.5),
        Point::new(-0.25, 0.25),
        Point::new(-0.5, 0.25),
        Point::new(-0.5, 0.0),
        Point::new(-0.5, -0.25),
        Point::new(-0.25, -0.25),
        Point::new(-0.25, -0.5),
        Point::new(0.0, -0.5),
        Point::new(0.25, -0.5),
        Point::new(0.25, -0.25),
        Point::new(0.5, -0.25),
    ]
}

/// `segments` evenly spaced points on the radius-0.5 circle, starting at
/// angle 0.
pub fn circle(segments: usize) -> Vec<Point> {
    CIRCLES.with(|memo| {
        memo.borrow_mut()
            .entry(segments)
            .or_insert_with(|| {
                let step = TAU / segments.max(1) as f64;
                (0..segments)
                    .map(|i| {
                        let (sin, cos) = (step * i as f64).sin_cos();
                        Point::new(0.5 * cos, 0.5 * sin)
                    })
                    .collect()
            })
            .clone()
    })
}

/// Seven-armed star: outer circle points interleaved with a half-size
/// inner ring rotated by 45°.
pub fn explosion() -> Vec<Point> {
    let outer = circle(7);
    outer
        .iter()
        .flat_map(|&p| [p, p.rotated(FRAC_PI_4).scaled(0.5)])
        .collect()
}

/// `segments` points around the unit square, clockwise in screen space
/// from the top-right corner. Each side gets `segments / 4` points.
pub fn square(segments: usize) -> Vec<Point> {
    SQUARES.with(|memo| {
        memo.borrow_mut()
            .entry(segments)
            .or_insert_with(|| {
                let quarter = (segments / 4).max(1);
                let q = quarter as f64;
                (0..quarter * 4)
                    .map(|i| {
                        let t = (i % quarter) as f64 / q;
                        match i / quarter {
                            0 => Point::new(0.5, -0.5 + t),
                            1 => Point::new(0.5 - t, 0.5),
                            2 => Point::new(-0.5, 0.5 - t),
                            _ => Point::new(-0.5 + t, -0.5),
                        }
                    })
                    .collect()
            })
            .clone()
    })
}

/// Size of the far-rim marker diamonds.
pub const DOT_SIZE: f64 = 0.005;

/// Tiny diamond centered on `center`.
pub fn far_dot(center: Point) -> Vec<Point> {
    circle(4)
        .into_iter()
        .map(|p| Point::new(DOT_SIZE * p.x + center.x, DOT_SIZE * p.y + center.y))
        .collect()
}

/// Bow-tie enemy that flips between lanes.
pub fn flipper() -> Vec<Point> {
    vec![
        Point::new(-0.5, -0.2),
        Point::new(0.0, 0.1),
        Point::new(0.5, -0.2),
        Point::new(0.5, 0.2),
        Point::new(0.0, -0.1),
        Point::new(-0.5, 0.2),
    ]
}

//=========================================================================
// Unit Tests
//=========================================================================
