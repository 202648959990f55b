//=========================================================================
// Matrix Helpers
//=========================================================================
//
// Homogeneous 3×3 helpers over `nalgebra::Matrix3<f64>`.
//
// Layout follows the usual 2D affine convention:
// ```text
//   | m00 m01 tx |     m00, m11: scale cells (cos-weighted when rotated)
//   | m10 m11 ty |     tx, ty:   translation cells
//   |  0   0   1 |
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::f64::consts::TAU;

//=== External Crates =====================================================

use nalgebra::Matrix3;

//=== Mat3 ================================================================

/// Affine matrix type used by every transform in the engine.
pub type Mat3 = Matrix3<f64>;

/// Translation matrix.
pub fn translation(x: f64, y: f64) -> Mat3 {
    Mat3::new(
        1.0, 0.0, x,
        0.0, 1.0, y,
        0.0, 0.0, 1.0,
    )
}

/// Counter-clockwise rotation matrix (radians).
pub fn rotation(angle: f64) -> Mat3 {
    let (sin, cos) = angle.sin_cos();
    Mat3::new(
        cos, -sin, 0.0,
        sin, cos, 0.0,
        0.0, 0.0, 1.0,
    )
}

/// Non-uniform scaling matrix.
pub fn scaling(sx: f64, sy: f64) -> Mat3 {
    Mat3::new(
        sx, 0.0, 0.0,
        0.0, sy, 0.0,
        0.0, 0.0, 1.0,
    )
}

/// Recovers the rotation angle of the linear block, in `[0, 2π)`.
pub fn derive_angle(m: &Mat3) -> f64 {
    m[(1, 0)].atan2(m[(0, 0)]).rem_euclid(TAU)
}

/// Recovers `(w, h)` scale factors from the linear block.
///
/// `w` is the length of the first column and `h` is the determinant
/// divided by `w`, which keeps the sign of a mirrored axis and never
/// divides by `cos(angle)`. When the first column collapses to zero the
/// second column's length is used for `h`.
pub fn derive_scale(m: &Mat3) -> (f64, f64) {
    let w = m[(0, 0)].hypot(m[(1, 0)]);
    if w <= f64::EPSILON {
        return (0.0, m[(0, 1)].hypot(m[(1, 1)]));
    }
    let det = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)];
    (w, det / w)
}

//=== Point ===============================================================

/// Immutable 2D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point `k` of the way from `self` to `end`.
    pub fn lerp(self, end: Point, k: f64) -> Point {
        Point::new(self.x + (end.x - self.x) * k, self.y + (end.y - self.y) * k)
    }

    /// Rotates around the origin (radians, counter-clockwise).
    pub fn rotated(self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Uniformly scales the point away from the origin.
    pub fn scaled(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }

    /// Polar angle of the point, in `(-π, π]`.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Applies an affine matrix to the point.
    pub fn transformed(self, m: &Mat3) -> Point {
        Point::new(
            m[(0, 0)] * self.x + m[(0, 1)] * self.y + m[(0, 2)],
            m[(1, 0)] * self.x + m[(1, 1)] * self.y + m[(1, 2)],
        )
    }

    /// Midpoints of consecutive pairs, plus the closing pair when `loops`.
    pub fn midpoints(points: &[Point], loops: bool) -> Vec<Point> {
        let mut mids: Vec<Point> = points
            .windows(2)
            .map(|pair| pair[0].lerp(pair[1], 0.5))
            .collect();

        if loops {
            if let (Some(&last), Some(&first)) = (points.last(), points.first()) {
                if points.len() > 1 {
                    mids.push(last.lerp(first, 0.5));
                }
            }
        }

        mids
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn trs_product_places_translation_in_last_column() {
        let m = translation(0.25, -0.1) * rotation(FRAC_PI_2) * scaling(2.0, 3.0);
        assert_relative_eq!(m[(0, 2)], 0.25);
        assert_relative_eq!(m[(1, 2)], -0.1);
    }

    #[test]
    fn derive_angle_is_normalized() {
        assert_relative_eq!(derive_angle(&rotation(-FRAC_PI_2)), 3.0 * FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(derive_angle(&rotation(PI)), PI, epsilon = 1e-12);
    }

    #[test]
    fn derive_scale_is_stable_at_quarter_turn() {
        // cos(π/2) is ~6e-17: dividing by it would explode.
        let m = rotation(FRAC_PI_2) * scaling(2.0, 0.5);
        let (w, h) = derive_scale(&m);
        assert_relative_eq!(w, 2.0, epsilon = 1e-12);
        assert_relative_eq!(h, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn derive_scale_keeps_mirrored_axis() {
        let (w, h) = derive_scale(&scaling(1.0, -2.0));
        assert_relative_eq!(w, 1.0);
        assert_relative_eq!(h, -2.0);
    }

    #[test]
    fn point_transformed_matches_matrix_product() {
        let m = translation(1.0, 2.0) * scaling(2.0, 2.0);
        let p = Point::new(0.5, -0.5).transformed(&m);
        assert_eq!(p, Point::new(2.0, 1.0));
    }

    #[test]
    fn midpoints_close_the_loop_when_requested() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert_eq!(Point::midpoints(&square, false).len(), 3);

        let looped = Point::midpoints(&square, true);
        assert_eq!(looped.len(), 4);
        assert_eq!(looped[3], Point::new(0.0, 0.5));
    }

    #[test]
    fn midpoints_of_single_point_is_empty() {
        assert!(Point::midpoints(&[Point::ORIGIN], true).is_empty());
    }
}
