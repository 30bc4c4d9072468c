//! 2D vector primitives.
//!
//! Displacements and velocities are represented as `nalgebra` vectors,
//! world-frame positions as `nalgebra` points, the same convention the
//! reference engine uses for its physical-quantity type aliases. The free
//! functions below cover the handful of 2D-specific operations `nalgebra`
//! does not name directly.

use nalgebra::{Point2, Vector2};

/// A displacement, velocity or other free vector.
pub type Vec2 = Vector2<f64>;

/// A world-frame or local-frame position.
pub type Pos2 = Point2<f64>;

/// Seed value for [`min_by_length`] folds: no real displacement has this
/// length, so it always loses the first comparison.
pub fn infinity() -> Vec2 {
    Vec2::new(f64::INFINITY, f64::INFINITY)
}

/// A 90° counter-clockwise rotation of `v`. Not normalised.
pub fn normal(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// The 2D scalar cross product `a.x*b.y - a.y*b.x`.
pub fn cross_mag(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// The planar form of `omega × r` for an angular velocity `omega` along +z.
pub fn cross_up_with_vec(r: Vec2, omega: f64) -> Vec2 {
    Vec2::new(-omega * r.y, omega * r.x)
}

/// The vector projection of `v` onto `k`.
pub fn project(v: Vec2, k: Vec2) -> Vec2 {
    k * (v.dot(&k) / k.dot(&k))
}

/// Whichever of `a`, `b` has the smaller Euclidean length.
pub fn min_by_length(a: Vec2, b: Vec2) -> Vec2 {
    if b.norm() < a.norm() { b } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normal_is_a_quarter_turn() {
        assert_abs_diff_eq!(normal(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0));
        assert_abs_diff_eq!(normal(Vec2::new(0.0, 1.0)), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn cross_mag_matches_determinant() {
        assert_abs_diff_eq!(cross_mag(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)), 1.0);
        assert_abs_diff_eq!(cross_mag(Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0)), -1.0);
    }

    #[test]
    fn cross_up_with_vec_matches_cross_mag_of_z_axis() {
        // omega * (ẑ × r) for ẑ-aligned omega should equal the planar formula.
        let r = Vec2::new(3.0, -2.0);
        let omega = 1.5;
        assert_abs_diff_eq!(cross_up_with_vec(r, omega), Vec2::new(omega * 2.0, omega * 3.0));
    }

    #[test]
    fn project_onto_axis_aligned_vector() {
        let v = Vec2::new(3.0, 4.0);
        let k = Vec2::new(2.0, 0.0);
        assert_abs_diff_eq!(project(v, k), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn min_by_length_picks_shorter() {
        let short = Vec2::new(1.0, 0.0);
        let long = Vec2::new(10.0, 0.0);
        assert_abs_diff_eq!(min_by_length(short, long), short);
        assert_abs_diff_eq!(min_by_length(long, short), short);
        assert_abs_diff_eq!(min_by_length(short, infinity()), short);
    }
}
