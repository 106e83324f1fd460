//! Conversions between the two models of the hyperbolic plane.
//!
//! Points of the hyperbolic manifold are stored on the upper sheet of the
//! hyperboloid x²+y²−z² = −1 (Minkowski model), where boosts act linearly.
//! The Poincaré disk (open unit disk in the z = 0 plane) is used for display
//! and for the circle-inversion tiling construction. The two maps here are
//! the stereographic-style projection between those models, mutually inverse
//! on the upper sheet.

use crate::vector::Vec3;

/// Map a Poincaré-disk point (z ignored) onto the upper hyperboloid sheet.
#[must_use]
pub fn poincare_to_hyperbolic(v: Vec3) -> Vec3 {
    let sum = v.x * v.x + v.y * v.y;
    let denom = sum - 1.0;
    Vec3::new(
        (-2.0 * v.x) / denom,
        (-2.0 * v.y) / denom,
        (-sum - 1.0) / denom,
    )
}

/// Map an upper-sheet hyperboloid point into the open unit disk (z = 0).
#[must_use]
pub fn hyperbolic_to_poincare(v: Vec3) -> Vec3 {
    Vec3::new(v.x / (1.0 + v.z), v.y / (1.0 + v.z), 0.0)
}

/// Signed deviation of a point from the hyperboloid constraint x²+y²−z²+1.
///
/// Zero (within tolerance) for points on either sheet.
#[must_use]
pub fn hyperboloid_residual(v: Vec3) -> f64 {
    v.x * v.x + v.y * v.y - v.z * v.z + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_TOL;

    #[test]
    fn test_disk_origin_maps_to_pole() {
        let pole = poincare_to_hyperbolic(Vec3::zero());
        assert!((pole.x).abs() < DEFAULT_TOL);
        assert!((pole.y).abs() < DEFAULT_TOL);
        assert!((pole.z - 1.0).abs() < DEFAULT_TOL);
    }

    #[test]
    fn test_projected_points_lie_on_sheet() {
        for &(x, y) in &[(0.0, 0.0), (0.3, 0.1), (-0.6, 0.5), (0.9, 0.0)] {
            let h = poincare_to_hyperbolic(Vec3::new(x, y, 0.0));
            assert!(
                libm::fabs(hyperboloid_residual(h)) < 1e-9,
                "residual for ({x}, {y})"
            );
            assert!(h.z >= 1.0);
        }
    }

    #[test]
    fn test_round_trip_from_disk() {
        for &(x, y) in &[(0.1, 0.2), (-0.4, 0.4), (0.0, -0.8)] {
            let p = Vec3::new(x, y, 0.0);
            let back = hyperbolic_to_poincare(poincare_to_hyperbolic(p));
            assert!(p.distance(&back) < 1e-9, "round trip for ({x}, {y})");
        }
    }

    #[test]
    fn test_round_trip_from_sheet() {
        // Points produced by boosting the pole stay on the sheet; the
        // disk projection must invert exactly there.
        use crate::matrix::Matrix;

        let pole = Vec3::new(0.0, 0.0, 1.0);
        for &w in &[0.0, 0.3, -0.9, 1.7] {
            let h = pole.transformed(&Matrix::boost_x(w)).unwrap();
            let back = poincare_to_hyperbolic(hyperbolic_to_poincare(h));
            assert!(h.distance(&back) < 1e-9, "round trip for rapidity {w}");
        }
    }
}
