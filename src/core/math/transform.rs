//=========================================================================
// Transform
//=========================================================================
//
// 2D affine transform with cached scalars.
//
// Responsibilities:
// - Hold a 3×3 matrix and the scalars it was built from
//   (x, y, z, w, h, angle)
// - Absolute and relative prop updates
// - Folding an external (parent) matrix into this one
// - Depth falloff: scale shrinks toward FAR_SCALE as z approaches 1
//
// Prop updates rebuild the matrix from the scalars. Composition keeps the
// exact product instead, so its scalars are a best fit when the product
// carries shear.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::f64::consts::TAU;

//=== Internal Dependencies ===============================================

use super::matrix::{derive_angle, derive_scale, rotation, scaling, translation, Mat3, Point};

//=== Depth ===============================================================

/// Scale multiplier applied at full depth (`z = 1`).
pub const FAR_SCALE: f64 = 0.3;

/// Scale multiplier for depth `z`: 1 at the near rim, FAR_SCALE at the far rim.
#[inline]
pub fn depth_scale(z: f64) -> f64 {
    1.0 - (1.0 - FAR_SCALE) * z
}

//=== TransformProps ======================================================

/// Partial set of transform scalars.
///
/// Omitted (`None`) fields are left untouched by both absolute and
/// relative updates.
///
/// # Examples
///
/// ```
/// use lanebound::core::math::{Transform, TransformProps};
///
/// let t = Transform::new(TransformProps::new().position(0.1, -0.2).scale(0.5, 0.5));
/// assert_eq!(t.x(), 0.1);
/// assert_eq!(t.w(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformProps {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub angle: Option<f64>,
}

impl TransformProps {
    pub const fn new() -> Self {
        Self {
            x: None,
            y: None,
            z: None,
            w: None,
            h: None,
            angle: None,
        }
    }

    pub const fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub const fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub const fn position(self, x: f64, y: f64) -> Self {
        self.x(x).y(y)
    }

    pub const fn depth(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    pub const fn scale(mut self, w: f64, h: f64) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }

    pub const fn angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }
}

//=== Transform ===========================================================

/// Affine transform: `translate(x, y) · rotate(angle) · scale(w·d, h·d)`
/// where `d = depth_scale(z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Mat3,
    x: f64,
    y: f64,
    z: f64,
    w: f64,
    h: f64,
    angle: f64,
}

impl Transform {
    //--- Construction -----------------------------------------------------

    /// Identity transform with `props` applied on top.
    pub fn new(props: TransformProps) -> Self {
        let mut transform = Self::identity();
        transform.set_with_props(props);
        transform
    }

    pub fn identity() -> Self {
        Self {
            matrix: Mat3::identity(),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
            h: 1.0,
            angle: 0.0,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn matrix(&self) -> &Mat3 {
        &self.matrix
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn w(&self) -> f64 {
        self.w
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Horizontal scale cell (`m00`).
    pub fn scale_x_cell(&self) -> f64 {
        self.matrix[(0, 0)]
    }

    /// Vertical scale cell (`m11`).
    pub fn scale_y_cell(&self) -> f64 {
        self.matrix[(1, 1)]
    }

    /// Every cached scalar as a fully-populated props set.
    pub fn props(&self) -> TransformProps {
        TransformProps {
            x: Some(self.x),
            y: Some(self.y),
            z: Some(self.z),
            w: Some(self.w),
            h: Some(self.h),
            angle: Some(self.angle),
        }
    }

    pub fn transform_point(&self, point: Point) -> Point {
        point.transformed(&self.matrix)
    }

    //--- Mutation ---------------------------------------------------------

    /// Absolute assignment of the given scalars.
    pub fn set_with_props(&mut self, props: TransformProps) {
        if let Some(x) = props.x {
            self.x = x;
        }
        if let Some(y) = props.y {
            self.y = y;
        }
        if let Some(z) = props.z {
            self.z = z;
        }
        if let Some(w) = props.w {
            self.w = w;
        }
        if let Some(h) = props.h {
            self.h = h;
        }
        if let Some(angle) = props.angle {
            self.angle = angle;
        }
        self.angle = collapse_overflow(self.angle);
        self.rebuild();
    }

    /// Relative assignment: translation, depth and angle are added, scale
    /// factors are multiplied.
    pub fn update_with_props(&mut self, props: TransformProps) {
        if let Some(dx) = props.x {
            self.x += dx;
        }
        if let Some(dy) = props.y {
            self.y += dy;
        }
        if let Some(dz) = props.z {
            self.z += dz;
        }
        if let Some(kw) = props.w {
            self.w *= kw;
        }
        if let Some(kh) = props.h {
            self.h *= kh;
        }
        if let Some(da) = props.angle {
            self.angle += da;
        }
        self.angle = collapse_overflow(self.angle);
        self.rebuild();
    }

    /// Post-multiplies by `external` and keeps the product as the matrix.
    ///
    /// The scalars are re-derived from the product: angle and `w` from its
    /// first column, `h` from the determinant. A sheared product (non-uniform
    /// scale under a rotated parent) has no exact `T·R·S` form, so the
    /// scalars are then only a best fit and a later prop update rebuilds
    /// the matrix without the shear. Depth is already baked into the
    /// product's scale, so `z` resets to 0.
    pub fn compose_from_matrix(&mut self, external: &Mat3) {
        let composed = self.matrix * external;

        self.x = composed[(0, 2)];
        self.y = composed[(1, 2)];
        self.z = 0.0;
        self.angle = derive_angle(&composed);
        let (w, h) = derive_scale(&composed);
        self.w = w;
        self.h = h;

        self.matrix = composed;
    }

    /// Replaces only the translation, leaving rotation and scale intact.
    pub fn override_translation(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.matrix[(0, 2)] = x;
        self.matrix[(1, 2)] = y;
    }

    //--- Internal Helpers -------------------------------------------------

    fn rebuild(&mut self) {
        let d = depth_scale(self.z);
        self.matrix = translation(self.x, self.y)
            * rotation(self.angle)
            * scaling(self.w * d, self.h * d);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// One full turn is dropped once the angle reaches it. Negative angles
/// pass through.
fn collapse_overflow(angle: f64) -> f64 {
    if angle >= TAU {
        angle % TAU
    } else {
        angle
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

    fn assert_matrix_matches_scalars(t: &Transform) {
        let d = depth_scale(t.z());
        let expected = translation(t.x(), t.y()) * rotation(t.angle()) * scaling(t.w() * d, t.h() * d);
        assert_relative_eq!(*t.matrix(), expected, epsilon = 1e-12);
    }

    //=====================================================================
    // Construction & Absolute Updates
    //=====================================================================

    #[test]
    fn default_is_identity() {
        let t = Transform::default();
        assert_eq!(*t.matrix(), Mat3::identity());
        assert_eq!(t.w(), 1.0);
        assert_eq!(t.h(), 1.0);
    }

    #[test]
    fn set_with_props_keeps_omitted_fields() {
        let mut t = Transform::new(TransformProps::new().position(0.2, 0.3).scale(2.0, 4.0));
        t.set_with_props(TransformProps::new().x(-0.1));

        assert_eq!(t.x(), -0.1);
        assert_eq!(t.y(), 0.3, "omitted y must survive an absolute update");
        assert_eq!(t.w(), 2.0);
        assert_eq!(t.h(), 4.0);
        assert_matrix_matches_scalars(&t);
    }

    //=====================================================================
    // Relative Updates
    //=====================================================================

    #[test]
    fn update_with_props_adds_and_multiplies() {
        let mut t = Transform::new(TransformProps::new().position(0.1, 0.1).scale(2.0, 2.0).depth(0.2));
        t.update_with_props(TransformProps::new().position(0.1, -0.2).scale(0.5, 3.0).depth(0.3));

        assert_relative_eq!(t.x(), 0.2);
        assert_relative_eq!(t.y(), -0.1);
        assert_relative_eq!(t.z(), 0.5);
        assert_relative_eq!(t.w(), 1.0);
        assert_relative_eq!(t.h(), 6.0);
        assert_matrix_matches_scalars(&t);
    }

    #[test]
    fn full_turn_plus_theta_equals_theta() {
        for start in [0.0, 1.0, 4.0] {
            for theta in [0.0, 0.5, 2.0] {
                let mut a = Transform::new(TransformProps::new().angle(start));
                let mut b = a;
                a.update_with_props(TransformProps::new().angle(TAU + theta));
                b.update_with_props(TransformProps::new().angle(theta));

                assert_relative_eq!(a.angle(), b.angle(), epsilon = 1e-9);
                assert_relative_eq!(*a.matrix(), *b.matrix(), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn negative_angle_is_not_collapsed() {
        let mut t = Transform::default();
        t.update_with_props(TransformProps::new().angle(-FRAC_PI_2));
        assert_eq!(t.angle(), -FRAC_PI_2);
    }

    //=====================================================================
    // Depth Scaling
    //=====================================================================

    #[test]
    fn depth_endpoints() {
        let near = Transform::new(TransformProps::new().scale(2.0, 2.0).depth(0.0));
        let far = Transform::new(TransformProps::new().scale(2.0, 2.0).depth(1.0));

        assert_relative_eq!(near.scale_x_cell(), 2.0);
        assert_relative_eq!(far.scale_x_cell(), 2.0 * FAR_SCALE);
        assert_eq!(far.w(), 2.0, "depth must not leak into the cached w");
    }

    #[test]
    fn depth_scale_is_non_increasing() {
        let mut previous = f64::INFINITY;
        for step in 0..=10 {
            let t = Transform::new(TransformProps::new().scale(1.5, 1.5).depth(step as f64 / 10.0));
            assert!(t.scale_y_cell() <= previous, "scale grew at z = {}", t.z());
            previous = t.scale_y_cell();
        }
    }

    //=====================================================================
    // Composition
    //=====================================================================

    #[test]
    fn compose_recovers_scalars() {
        let parent = translation(0.5, 0.25) * rotation(PI / 6.0) * scaling(2.0, 3.0);
        let mut t = Transform::new(TransformProps::new().position(0.1, 0.0));
        t.compose_from_matrix(&parent);

        assert_relative_eq!(t.angle(), PI / 6.0, epsilon = 1e-12);
        assert_relative_eq!(t.w(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(t.h(), 3.0, epsilon = 1e-12);
        assert_matrix_matches_scalars(&t);
    }

    #[test]
    fn compose_is_stable_at_odd_quarter_turns() {
        for k in [1.0, 3.0] {
            let parent = rotation(k * FRAC_PI_2) * scaling(0.65, 0.65);
            let mut t = Transform::default();
            t.compose_from_matrix(&parent);

            assert!(t.w().is_finite() && t.h().is_finite());
            assert_relative_eq!(t.w(), 0.65, epsilon = 1e-12);
            assert_relative_eq!(t.h(), 0.65, epsilon = 1e-12);
        }
    }

    #[test]
    fn compose_folds_depth_into_scale() {
        let mut t = Transform::new(TransformProps::new().depth(1.0));
        t.compose_from_matrix(&Mat3::identity());

        assert_eq!(t.z(), 0.0);
        assert_relative_eq!(t.w(), FAR_SCALE, epsilon = 1e-12);
        assert_matrix_matches_scalars(&t);
    }

    #[test]
    fn compose_keeps_sheared_product() {
        let mut t = Transform::new(TransformProps::new().angle(0.5).scale(2.0, 1.0));
        let parent = rotation(0.3) * scaling(1.0, 3.0);
        let product = *t.matrix() * parent;

        t.compose_from_matrix(&parent);

        assert_relative_eq!(*t.matrix(), product, epsilon = 1e-12);
        assert_relative_eq!(t.angle(), derive_angle(&product), epsilon = 1e-12);
        assert_relative_eq!(t.w(), product[(0, 0)].hypot(product[(1, 0)]), epsilon = 1e-12);

        let rebuilt = rotation(t.angle()) * scaling(t.w(), t.h());
        assert!(
            (rebuilt[(0, 1)] - product[(0, 1)]).abs() > 1e-3,
            "the scalars alone cannot express the shear"
        );
    }

    #[test]
    fn override_translation_keeps_linear_block() {
        let mut t = Transform::new(TransformProps::new().angle(1.0).scale(2.0, 2.0));
        let before = *t.matrix();
        t.override_translation(0.3, -0.3);

        assert_eq!(t.matrix()[(0, 0)], before[(0, 0)]);
        assert_eq!(t.matrix()[(1, 0)], before[(1, 0)]);
        assert_matrix_matches_scalars(&t);
    }
}
