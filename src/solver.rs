//! Impulse-based collision resolution.
//!
//! Positional correction and impulse application mirror the division of
//! labour in the reference engine's `TwoBodyConstraint`/solver pair
//! (`constraint.rs`, `constraint/solver.rs`), simplified to a single-shot
//! resolution with no warm-starting: this solver runs once per colliding
//! pair per tick, never iterates, and carries no cross-tick state.

use crate::config::SolverConfig;
use crate::geometry::project_point_onto_line;
use crate::manifold::ContactManifold;
use crate::polygon::Polygon;
use crate::vector::{cross_mag, cross_up_with_vec, Pos2, Vec2};

/// Resolves a collision described by `manifold` between `reference` and
/// `incident`. `manifold.mtv` must be oriented from `reference` toward
/// `incident` (see [`crate::manifold::build_manifold`]).
pub fn resolve(
    reference: &mut Polygon,
    incident: &mut Polygon,
    manifold: &ContactManifold,
    config: &SolverConfig,
) {
    apply_positional_correction(reference, incident, manifold.mtv);

    if reference.state.is_static && incident.state.is_static {
        return;
    }

    let reference_edge = reference.get_edge_coordinates(manifold.reference_face);

    match manifold.contact_count() {
        0 => {}
        1 => {
            let p = manifold.contact_points[0];
            let p_ref = project_point_onto_line(p, reference_edge);
            apply_point_impulse(reference, incident, manifold.mtv, p, p_ref, 1.0, config);
        }
        _ => {
            for &p in manifold.contact_points.iter() {
                let p_ref = project_point_onto_line(p, reference_edge);
                apply_point_impulse(reference, incident, manifold.mtv, p, p_ref, 0.5, config);
            }
        }
    }
}

/// Moves the incident body by `+mtv` and the reference body by `-mtv`. A
/// static body is left in place; the other absorbs the full correction. If
/// both are static the caller has already returned before reaching here.
fn apply_positional_correction(reference: &mut Polygon, incident: &mut Polygon, mtv: Vec2) {
    if !incident.state.is_static {
        incident.state.centroid += mtv;
    }
    if !reference.state.is_static {
        reference.state.centroid -= mtv;
    }
}

/// One contact's worth of normal impulse, scaled by `share` (`1.0` for a
/// single contact, `0.5` for each of a two-point manifold).
fn apply_point_impulse(
    reference: &mut Polygon,
    incident: &mut Polygon,
    mtv: Vec2,
    p_incident: Pos2,
    p_reference: Pos2,
    share: f64,
    config: &SolverConfig,
) {
    let n = mtv.normalize();

    let r_i = (p_incident - incident.state.centroid) / config.metre;
    let r_r = (p_reference - reference.state.centroid) / config.metre;

    let (m_i, i_i) = incident.state.physical_data();
    let (m_r, i_r) = reference.state.physical_data();

    let v_pi = incident.state.velocity + cross_up_with_vec(r_i, incident.state.angular_velocity);
    let v_pr = reference.state.velocity + cross_up_with_vec(r_r, reference.state.angular_velocity);

    let separation_velocity = (v_pi - v_pr).dot(&n);
    if separation_velocity.is_nan() || separation_velocity > -config.separation_epsilon {
        return;
    }

    let restitution = if separation_velocity.abs() < config.low_speed_restitution_bump_threshold {
        1.0
    } else {
        config.restitution
    };

    let denom = (1.0 / m_i + 1.0 / m_r)
        + cross_mag(r_i, n).powi(2) / i_i
        + cross_mag(r_r, n).powi(2) / i_r;
    let j = share * (-(1.0 + restitution) * separation_velocity / denom);

    apply_impulse(incident, n * j, p_incident);
    apply_impulse(reference, n * -j, p_reference);
}

/// Applies `impulse` at world-frame `application_point`: a linear
/// `velocity += impulse/mass` plus, if the point is off-centre, an angular
/// change driven by the lever arm. Static bodies absorb nothing.
fn apply_impulse(body: &mut Polygon, impulse: Vec2, application_point: Pos2) {
    if body.state.is_static {
        return;
    }

    body.state.velocity += impulse / body.state.mass;

    let arm = application_point - body.state.centroid;
    if arm.norm() > 0.0 && impulse.norm() > 0.0 {
        body.state.angular_velocity +=
            cross_mag(arm.normalize(), impulse.normalize()) * impulse.norm() / body.state.rotational_inertia;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrow_phase::sat;
    use crate::vector::Pos2;
    use approx::assert_abs_diff_eq;

    fn square_at(cx: f64, cy: f64, side: f64) -> Polygon {
        let h = side / 2.0;
        Polygon::new(&[
            Pos2::new(cx - h, cy - h),
            Pos2::new(cx + h, cy - h),
            Pos2::new(cx + h, cy + h),
            Pos2::new(cx - h, cy + h),
        ])
        .unwrap()
    }

    #[test]
    fn static_body_is_unmoved_by_positional_correction() {
        let mut wall = square_at(150.0, 50.0, 100.0);
        wall.state.is_static = true;
        let mut dynamic = square_at(50.0, 50.0, 100.0);
        let before = wall.state.centroid;

        let mtv = crate::narrow_phase::sat(&dynamic, &wall);
        assert_ne!(mtv, Vec2::zeros());
        apply_positional_correction(&mut wall, &mut dynamic, mtv);
        assert_abs_diff_eq!(wall.state.centroid, before);
    }

    #[test]
    fn head_on_collision_separates_dynamic_bodies() {
        let mut a = square_at(50.0, 50.0, 100.0);
        a.state.velocity = Vec2::new(10.0, 0.0);
        a.state.mass = 1.0;
        a.state.rotational_inertia = 1.0;

        let mut b = square_at(140.0, 50.0, 100.0);
        b.state.mass = 1.0;
        b.state.rotational_inertia = 1.0;

        let mtv = sat(&a, &b);
        assert_ne!(mtv, Vec2::zeros());

        let (b_is_reference, mut manifold) = crate::manifold::build_manifold(&a, &b, mtv);
        let config = SolverConfig::default();
        crate::manifold::process_manifold(&mut manifold, &config);

        let (reference, incident) = if b_is_reference { (&mut b, &mut a) } else { (&mut a, &mut b) };
        resolve(reference, incident, &manifold, &config);

        // a was moving toward b; after resolution a's velocity along the
        // collision axis should no longer be pushing further into b.
        assert!(a.state.velocity.x <= 10.0);
    }
}
