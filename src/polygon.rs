//! Convex polygons and their rigid-body state.

use crate::geometry::compute_outward_normal;
use crate::vector::{Pos2, Vec2};
use anyhow::{bail, Result};

/// The motion and inertial state of a rigid body.
///
/// A static body ("NoKinetic" in the original terminology this crate
/// descends from) is reported as having infinite mass and rotational
/// inertia by [`EntityState::physical_data`] — its reciprocals are then
/// zero everywhere the solver uses them, so it absorbs no impulse and no
/// positional correction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityState {
    pub velocity: Vec2,
    /// Positive is counter-clockwise.
    pub angular_velocity: f64,
    pub centroid: Pos2,
    pub mass: f64,
    pub rotational_inertia: f64,
    pub is_static: bool,
}

impl EntityState {
    fn at_rest(centroid: Pos2) -> Self {
        Self {
            velocity: Vec2::zeros(),
            angular_velocity: 0.0,
            centroid,
            mass: 1.0,
            rotational_inertia: 1.0,
            is_static: false,
        }
    }

    /// `(mass, rotational_inertia)`, or `(+inf, +inf)` for a static body.
    pub fn physical_data(&self) -> (f64, f64) {
        if self.is_static {
            (f64::INFINITY, f64::INFINITY)
        } else {
            (self.mass, self.rotational_inertia)
        }
    }
}

/// A convex polygon with vertices in counter-clockwise order.
///
/// Vertices are stored relative to the centroid (local frame) as an
/// implicit ring — vertex `i` borders `i-1` and `i+1` (mod `n`). The core
/// never mutates this topology after construction; clipping during manifold
/// construction works on freestanding edge-coordinate pairs, never on the
/// polygon's own vertex storage (see `REDESIGN FLAGS` in `SPEC_FULL.md`).
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<Pos2>,
    pub state: EntityState,
}

impl Polygon {
    /// Builds a polygon from a counter-clockwise vertex list.
    ///
    /// Fewer than three vertices is a caller error reported through
    /// `anyhow` — it is the one condition a caller could plausibly hit from
    /// untrusted or parsed input. Non-convexity and collinearity are
    /// checked only by `debug_assert!`: they indicate a bug in the caller's
    /// vertex generation, not a runtime condition to recover from.
    pub fn new(vertices: &[Pos2]) -> Result<Self> {
        if vertices.len() < 3 {
            bail!(
                "a polygon needs at least 3 vertices, got {}",
                vertices.len()
            );
        }

        let centroid = centroid_of(vertices);
        let local = vertices.iter().map(|v| centroid_relative(*v, centroid)).collect::<Vec<_>>();

        debug_assert!(
            is_convex_ccw(&local),
            "polygon vertices must form a convex, counter-clockwise, non-collinear ring"
        );

        Ok(Self {
            vertices: local,
            state: EntityState::at_rest(centroid),
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The world-frame position of vertex `i`.
    pub fn world_vertex(&self, i: usize) -> Pos2 {
        self.state.centroid + centroid_relative_vec(self.vertices[i])
    }

    /// The world-frame endpoints of an edge given as a pair of vertex
    /// indices.
    pub fn get_edge_coordinates(&self, face: [usize; 2]) -> [Pos2; 2] {
        [self.world_vertex(face[0]), self.world_vertex(face[1])]
    }

    fn next(&self, i: usize) -> usize {
        (i + 1) % self.vertex_count()
    }

    fn prev(&self, i: usize) -> usize {
        (i + self.vertex_count() - 1) % self.vertex_count()
    }

    /// The vertex maximising `local_vertex . axis`, and its index.
    ///
    /// The projection uses the local vertex rather than the world vertex so
    /// the choice of supporting vertex is translation-invariant.
    pub fn get_supporting_point(&self, axis: Vec2) -> (Pos2, usize) {
        let mut best_index = 0;
        let mut best_proj = f64::NEG_INFINITY;
        for (i, v) in self.vertices.iter().enumerate() {
            let proj = centroid_relative_vec(*v).dot(&axis);
            if proj > best_proj {
                best_proj = proj;
                best_index = i;
            }
        }
        (self.world_vertex(best_index), best_index)
    }

    /// The edge most aligned with `axis`, as a pair of vertex indices, and
    /// the absolute value of its normal's dot product with `axis`.
    ///
    /// Ties between the two edges incident to the supporting vertex are
    /// broken toward the `(i-1 mod n)` neighbour.
    pub fn determine_supporting_edge(&self, axis: Vec2) -> ([usize; 2], f64) {
        let (_, v) = self.get_supporting_point(axis);
        let prev = self.prev(v);
        let next = self.next(v);

        let world_v = self.world_vertex(v);
        let centroid = self.state.centroid;

        let normal_prev = compute_outward_normal(self.world_vertex(prev), world_v, centroid);
        let normal_next = compute_outward_normal(self.world_vertex(next), world_v, centroid);

        let score_prev = normal_prev.dot(&axis).abs();
        let score_next = normal_next.dot(&axis).abs();

        if score_prev >= score_next {
            ([v, prev], score_prev)
        } else {
            ([v, next], score_next)
        }
    }

    /// The closed projection interval `[min, max]` of every world vertex
    /// onto `axis`.
    pub fn axis_projection(&self, axis: Vec2) -> [f64; 2] {
        let axis = axis.normalize();
        let (left, _) = self.get_supporting_point(axis);
        let (right, _) = self.get_supporting_point(-axis);
        let mut interval = [left.coords.dot(&axis), right.coords.dot(&axis)];
        interval.sort_by(|a, b| a.partial_cmp(b).unwrap());
        interval
    }

    /// Advances this polygon by one time step: translates the centroid by
    /// `velocity * metre * dt` and rotates every local vertex by
    /// `angular_velocity * dt`. Static bodies are left untouched. Vertices
    /// stay in the local frame — only the centroid translates.
    pub fn integrate(&mut self, dt: f64, metre: f64) {
        if self.state.is_static {
            return;
        }

        self.state.centroid += self.state.velocity * metre * dt;

        let d_theta = self.state.angular_velocity * dt;
        let (sin, cos) = d_theta.sin_cos();
        for v in &mut self.vertices {
            let d = centroid_relative_vec(*v);
            *v = Pos2::origin() + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos);
        }
    }
}

fn centroid_of(vertices: &[Pos2]) -> Pos2 {
    let sum = vertices
        .iter()
        .fold(Vec2::zeros(), |acc, v| acc + v.coords);
    Pos2::origin() + sum / (vertices.len() as f64)
}

fn centroid_relative(v: Pos2, centroid: Pos2) -> Pos2 {
    Pos2::origin() + (v - centroid)
}

fn centroid_relative_vec(local: Pos2) -> Vec2 {
    local - Pos2::origin()
}

/// `true` if `local` (centroid-relative, CCW) vertices form a convex ring
/// with no collinear or duplicate points. Used only for `debug_assert!`.
fn is_convex_ccw(local: &[Pos2]) -> bool {
    let n = local.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|i| {
        let a = centroid_relative_vec(local[i]);
        let b = centroid_relative_vec(local[(i + 1) % n]);
        let c = centroid_relative_vec(local[(i + 2) % n]);
        crate::vector::cross_mag(b - a, c - b) > 0.0
    })
}
