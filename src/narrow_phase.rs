//! Separating-axis narrow phase.

use crate::geometry::compute_outward_normal;
use crate::polygon::Polygon;
use crate::vector::{min_by_length, Vec2};

/// Tests every edge normal of `a` as a separating axis against `b`.
///
/// Returns the zero vector the moment a separating axis is found. Otherwise
/// returns the minimum-length overlap vector among `a`'s edge normals,
/// oriented away from `a` (not yet corrected for orientation relative to
/// `b` — that correction happens in [`sat`]).
pub fn sat_single(a: &Polygon, b: &Polygon) -> Vec2 {
    let mut mtv = crate::vector::infinity();

    for i in 0..a.vertex_count() {
        let v = a.world_vertex(i);
        let next = a.world_vertex((i + 1) % a.vertex_count());
        let axis = compute_outward_normal(next, v, a.state.centroid);

        let proj_a = a.axis_projection(axis);
        let proj_b = b.axis_projection(axis);

        if proj_a[1] < proj_b[0] || proj_b[1] < proj_a[0] {
            return Vec2::zeros();
        }

        let overlap = proj_a[1].min(proj_b[1]) - proj_a[0].max(proj_b[0]);
        mtv = min_by_length(mtv, axis * overlap);
    }

    mtv
}

/// The Minimum Translation Vector separating `a` and `b`, oriented from `a`
/// toward `b`. Returns the zero vector if the polygons do not overlap.
pub fn sat(a: &Polygon, b: &Polygon) -> Vec2 {
    let mtv_for_b = sat_single(a, b);
    let mtv_for_a = sat_single(b, a);

    if mtv_for_b == Vec2::zeros() || mtv_for_a == Vec2::zeros() {
        return Vec2::zeros();
    }

    let mut chosen = if mtv_for_b.norm() <= mtv_for_a.norm() {
        mtv_for_b
    } else {
        -mtv_for_a
    };

    if chosen.dot(&(b.state.centroid - a.state.centroid)) < 0.0 {
        chosen = -chosen;
    }
    chosen
}
