//! Contact manifold construction.
//!
//! The manifold shape mirrors the reference engine's
//! `constraint::contact::ContactManifold`, which stores its contacts in a
//! `TinyVec` sized for the common case rather than a heap `Vec` — here
//! sized for 2, since a convex-polygon-on-convex-polygon collision in 2D
//! never produces more than two contact points.

use crate::config::SolverConfig;
use crate::geometry::{compute_outward_normal, interval_region_intersection, lies_behind_line};
use crate::polygon::Polygon;
use crate::vector::{Pos2, Vec2};
use tinyvec::TinyVec;

/// The complete description of a collision between two polygons, built once
/// SAT has reported a non-zero MTV and discarded after the solver consumes
/// it.
#[derive(Clone, Debug)]
pub struct ContactManifold {
    /// Oriented from the reference polygon toward the incident polygon.
    pub mtv: Vec2,
    pub reference_face: [usize; 2],
    pub incident_face: [usize; 2],
    /// World-frame contact points, 0, 1 or 2 entries.
    pub contact_points: TinyVec<[Pos2; 2]>,
    /// Unsigned penetration depth of each entry in [`Self::contact_points`].
    pub contact_depths: TinyVec<[f64; 2]>,
}

impl ContactManifold {
    pub fn contact_count(&self) -> usize {
        self.contact_points.len()
    }
}

/// Builds the contact manifold for a pair known to overlap (`mtv` must be
/// the non-zero, A→B-oriented MTV [`crate::narrow_phase::sat`] returned for
/// `(a, b)`).
///
/// `reference`/`incident` in the return value identify the two input
/// polygons by which one plays which role; the caller is expected to match
/// them back against `a`/`b` by pointer or id.
pub fn build_manifold(a: &Polygon, b: &Polygon, mtv: Vec2) -> (bool, ContactManifold) {
    let n = mtv.normalize();

    let (edge_a, p_a) = a.determine_supporting_edge(n);
    let (edge_b, p_b) = b.determine_supporting_edge(-n);

    // `true` means b is the reference polygon.
    let b_is_reference = p_b >= p_a;
    let (reference, incident, reference_face, incident_face, reference_mtv) = if b_is_reference {
        (b, a, edge_b, edge_a, -mtv)
    } else {
        (a, b, edge_a, edge_b, mtv)
    };

    let mut incident_edge = incident.get_edge_coordinates(incident_face);
    let reference_edge = reference.get_edge_coordinates(reference_face);
    let reference_centroid = reference.state.centroid;

    // Clip the incident edge against the two reference side planes: the
    // edges adjacent to (sharing a vertex with, but distinct from) the
    // reference face. `reference_face[1]` is either `reference_face[0] + 1`
    // or `reference_face[0] - 1` (mod n) depending on which way
    // `determine_supporting_edge` broke its tie, so each side edge is built
    // from whichever of its endpoint's two ring-neighbours is *not* the
    // other face vertex, rather than assuming a fixed `+1` direction.
    let n_ref = reference.vertex_count();
    let other_neighbour = |v: usize, not: usize| -> usize {
        let next = (v + 1) % n_ref;
        if next == not { (v + n_ref - 1) % n_ref } else { next }
    };
    let side_edges = [
        [other_neighbour(reference_face[0], reference_face[1]), reference_face[0]],
        [reference_face[1], other_neighbour(reference_face[1], reference_face[0])],
    ];

    for side in side_edges {
        let side_coords = reference.get_edge_coordinates(side);
        let outward = compute_outward_normal(side_coords[0], side_coords[1], reference_centroid);
        let inward = -outward;
        incident_edge = interval_region_intersection(incident_edge, side_coords, inward);
    }

    // Final cull against the reference face itself: keep points behind it.
    let outward_ref = compute_outward_normal(reference_edge[0], reference_edge[1], reference_centroid);
    let (kept, depths) = lies_behind_line(&incident_edge, reference_edge, outward_ref);

    let mut contact_points = TinyVec::new();
    let mut contact_depths = TinyVec::new();
    for (p, d) in kept.into_iter().zip(depths) {
        contact_points.push(p);
        contact_depths.push(d);
    }

    (
        b_is_reference,
        ContactManifold {
            mtv: reference_mtv,
            reference_face,
            incident_face,
            contact_points,
            contact_depths,
        },
    )
}

/// Consolidates a two-point manifold to its single deepest point when the
/// two depths differ by more than `config.consolidation_depth_threshold`.
pub fn process_manifold(manifold: &mut ContactManifold, config: &SolverConfig) {
    if manifold.contact_count() != 2 {
        return;
    }

    if (manifold.contact_depths[0] - manifold.contact_depths[1]).abs()
        <= config.consolidation_depth_threshold
    {
        return;
    }

    let shallower = if manifold.contact_depths[1] < manifold.contact_depths[0] {
        1
    } else {
        0
    };
    manifold.contact_points.remove(shallower);
    manifold.contact_depths.remove(shallower);
}
