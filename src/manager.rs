//! Physics manager: entity registry, pairwise sweep and callback dispatch.
//!
//! The pairwise sweep and callback-dispatch shape is grounded on the
//! reference engine's `CollisionWorld` (`collision.rs`), which iterates
//! collidables with a deterministic `i < j` nested loop and fires callbacks
//! per colliding pair. The per-tick phase timing follows `lib.rs`'s
//! `perform_physics_step`, which wraps its own constraint-preparation and
//! constraint-solving phases in timing-instrumented logging rather than
//! logging unconditionally.
//!
//! Polygons are owned by the manager rather than held as external weak
//! references: Rust's aliasing rules make "manager mutates a
//! caller-owned body in place through a non-owning handle" impractical
//! without `Rc<RefCell<_>>` or unsafe code, and the reference engine's own
//! `RigidBodyManager` owns its bodies in a `Vec` for the same reason.

use std::time::Instant;

use crate::config::SolverConfig;
use crate::manifold::{build_manifold, process_manifold, ContactManifold};
use crate::narrow_phase::sat;
use crate::polygon::Polygon;
use crate::vector::Vec2;

/// An opaque handle to a polygon registered with a [`PhysicsManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PolygonId(usize);

/// Entity registry, pairwise narrow-phase sweep and collision resolution
/// for a set of tracked polygons.
pub struct PhysicsManager {
    polygons: Vec<Polygon>,
    callbacks: Vec<Box<dyn FnMut(&ContactManifold)>>,
    config: SolverConfig,
}

impl PhysicsManager {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            polygons: Vec::new(),
            callbacks: Vec::new(),
            config,
        }
    }

    /// Registers `polygon` for tracking and returns a handle to it.
    pub fn begin_tracking(&mut self, polygon: Polygon) -> PolygonId {
        self.polygons.push(polygon);
        PolygonId(self.polygons.len() - 1)
    }

    /// Registers every polygon in `polygons` for tracking, in order, and
    /// returns their handles. The batch form the public interface describes
    /// as `begin_tracking(polygons...)`; it is built on the single-polygon
    /// form above rather than replacing it; so callers registering one body
    /// (the common case for a body spawned mid-simulation) are not forced to
    /// wrap it in a one-element collection.
    pub fn begin_tracking_many(
        &mut self,
        polygons: impl IntoIterator<Item = Polygon>,
    ) -> Vec<PolygonId> {
        polygons
            .into_iter()
            .map(|polygon| self.begin_tracking(polygon))
            .collect()
    }

    /// Registers a callback invoked with every manifold produced by a
    /// resolved collision, in the order collisions are discovered.
    pub fn add_callback(&mut self, callback: impl FnMut(&ContactManifold) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn get(&self, id: PolygonId) -> &Polygon {
        &self.polygons[id.0]
    }

    pub fn get_mut(&mut self, id: PolygonId) -> &mut Polygon {
        &mut self.polygons[id.0]
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Advances the simulation by one tick: integrate, resolve every
    /// colliding pair, integrate again. The double integration brackets
    /// the positional correction so visual output stays smooth (§4.6).
    pub fn next_time_step(&mut self, dt: f64) {
        self.integrate_all(dt);

        let start = Instant::now();
        self.resolve_collisions();
        log::trace!(
            "physics manager resolved {} tracked polygons in {:.3} ms",
            self.polygons.len(),
            start.elapsed().as_secs_f64() * 1e3
        );

        self.integrate_all(dt);
    }

    fn integrate_all(&mut self, dt: f64) {
        for polygon in &mut self.polygons {
            polygon.integrate(dt, self.config.metre);
        }
    }

    fn resolve_collisions(&mut self) {
        let n = self.polygons.len();
        for i in 0..n {
            for j in (i + 1)..n {
                self.resolve_pair(i, j);
            }
        }
    }

    fn resolve_pair(&mut self, i: usize, j: usize) {
        let mtv = {
            let a = &self.polygons[i];
            let b = &self.polygons[j];
            sat(a, b)
        };

        if mtv == Vec2::zeros() {
            return;
        }

        let (b_is_reference, mut manifold) = {
            let a = &self.polygons[i];
            let b = &self.polygons[j];
            build_manifold(a, b, mtv)
        };
        process_manifold(&mut manifold, &self.config);

        if manifold.contact_count() == 0 {
            return;
        }

        {
            let (lo, hi) = self.polygons.split_at_mut(j);
            let (a, b) = (&mut lo[i], &mut hi[0]);
            let (reference, incident) = if b_is_reference { (b, a) } else { (a, b) };
            crate::solver::resolve(reference, incident, &manifold, &self.config);
        }

        for callback in &mut self.callbacks {
            callback(&manifold);
        }
    }
}
