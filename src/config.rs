//! Solver tunables.
//!
//! Mirrors the shape of the reference engine's `ConstraintSolverConfig`: a
//! single struct of tunable fields with a `Default` impl carrying the
//! shipped values, constructed once by the caller and threaded through the
//! manager into the solver. There is no config-file format — a `SolverConfig`
//! is always built in code.

/// Tunables for manifold consolidation and impulse resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    /// Depth difference above which a two-point manifold is reduced to its
    /// deeper contact (§4.4 step 6).
    pub consolidation_depth_threshold: f64,
    /// Scalar converting engine units (pixels) to physical metres. Lever
    /// arms are divided by this before entering the impulse formula.
    pub metre: f64,
    /// Baseline coefficient of restitution `e`.
    pub restitution: f64,
    /// Below this separation speed the restitution is bumped to `1.0` to
    /// avoid apparent sticking at near-zero approach speed.
    pub low_speed_restitution_bump_threshold: f64,
    /// Separation velocities above `-separation_epsilon` are treated as
    /// already separating; the impulse is skipped.
    pub separation_epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            consolidation_depth_threshold: 0.2,
            metre: 1.0,
            restitution: 0.73,
            low_speed_restitution_bump_threshold: 0.1,
            separation_epsilon: 1e-3,
        }
    }
}
