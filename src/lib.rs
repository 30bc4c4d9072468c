//! 2D rigid-body physics for convex polygons.
//!
//! Every tick detects pairwise interpenetrations between tracked convex
//! polygons, builds a contact manifold for each collision (normal, depth,
//! one or two contact points) and applies impulses that statically
//! separate and dynamically respond to it. See [`manager::PhysicsManager`]
//! for the entry point.

pub mod config;
pub mod geometry;
pub mod manager;
pub mod manifold;
pub mod narrow_phase;
pub mod polygon;
pub mod solver;
pub mod vector;

pub use config::SolverConfig;
pub use manager::{PhysicsManager, PolygonId};
pub use manifold::ContactManifold;
pub use polygon::{EntityState, Polygon};
