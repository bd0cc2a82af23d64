use bevy::prelude::*;

use crate::config::{CollisionResponse, Falloff, PhysicsConfig};
use crate::physics::body::Body;

/// Below this length a vector is treated as zero (no direction to normalize).
pub const EPSILON: f32 = 1e-6;

/// Full-overlap scale for the legacy asymmetric response; matches the softer
/// "melting" settle of that variant.
const ASYMMETRIC_PUSH: f32 = 0.1;

/// Latest pointer snapshot, produced by the tracker systems and read at the
/// start of every tick. `point` is `None` whenever no valid projection exists
/// (cursor off-window, ray parallel to the interaction plane).
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub point: Option<Vec3>,
    pub active: bool,
}

/// Advance every body by one tick: pointer forces, Euler integration,
/// damping, pairwise collision resolution, boundary containment, in that
/// order. Mutates `position`/`velocity` in place; never panics for finite
/// input (zero-length directions are skipped, not normalized).
pub fn step(bodies: &mut [Body], pointer: &PointerState, config: &PhysicsConfig) {
    apply_pointer_forces(bodies, pointer, config);
    integrate_and_damp(bodies, config);
    match config.collision_response {
        CollisionResponse::Symmetric => resolve_collisions_symmetric(bodies, config),
        CollisionResponse::Asymmetric => resolve_collisions_asymmetric(bodies),
    }
    contain_in_bounds(bodies, config);
}

/// Repulsion away from the pointer inside the interaction radius, otherwise a
/// constant-magnitude spring pull back toward the rest position.
fn apply_pointer_forces(bodies: &mut [Body], pointer: &PointerState, config: &PhysicsConfig) {
    // In the press-gated variant proximity alone does nothing.
    let point = match pointer.point {
        Some(p) if !config.press_gated || pointer.active => Some(p),
        _ => None,
    };

    for body in bodies.iter_mut() {
        if let Some(point) = point {
            let offset = body.position - point;
            let dist = offset.length();
            if dist < config.interaction_radius {
                // Coincident with the pointer: no direction, no force.
                if dist > EPSILON {
                    let t = (1.0 - dist / config.interaction_radius).clamp(0.0, 1.0);
                    let magnitude = match config.falloff {
                        Falloff::Linear => t,
                        Falloff::Quadratic => t * t,
                    } * config.repulsion_strength;
                    body.velocity += offset / dist * magnitude;
                }
                continue;
            }
        }

        // Regroup toward the rest position; inside the threshold the body is
        // settled and only damping acts on it.
        let to_rest = body.rest_position - body.position;
        let dist = to_rest.length();
        if dist > config.return_threshold && dist > EPSILON {
            body.velocity += to_rest / dist * config.return_strength;
        }
    }
}

/// Explicit Euler with a unit time step, then per-tick damping. Damping runs
/// every tick regardless of which force branch fired, bounding velocity growth.
fn integrate_and_damp(bodies: &mut [Body], config: &PhysicsConfig) {
    for body in bodies.iter_mut() {
        body.position += body.velocity;
        body.velocity *= config.damping;
    }
}

/// Visit each unordered pair once and split the overlap correction evenly,
/// with a small velocity nudge so separating pairs keep drifting apart.
fn resolve_collisions_symmetric(bodies: &mut [Body], config: &PhysicsConfig) {
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let delta = bodies[j].position - bodies[i].position;
            let dist = delta.length();
            let min_dist = bodies[i].radius + bodies[j].radius;
            // Coincident centers have no separation axis; skip rather than
            // inject an arbitrary one.
            if dist <= EPSILON || dist >= min_dist {
                continue;
            }
            let normal = delta / dist;
            let overlap = min_dist - dist;

            let correction = normal * (overlap * 0.5);
            bodies[i].position -= correction;
            bodies[j].position += correction;

            let nudge = normal * (overlap * config.collision_nudge);
            bodies[i].velocity -= nudge;
            bodies[j].velocity += nudge;
        }
    }
}

/// Legacy response: every ordered pair pushes the first body the full overlap
/// scaled by ASYMMETRIC_PUSH, so each pair is counted twice. Order-dependent
/// within a tick; single-threaded only.
fn resolve_collisions_asymmetric(bodies: &mut [Body]) {
    for i in 0..bodies.len() {
        for j in 0..bodies.len() {
            if i == j {
                continue;
            }
            let delta = bodies[i].position - bodies[j].position;
            let dist = delta.length();
            let min_dist = bodies[i].radius + bodies[j].radius;
            if dist <= EPSILON || dist >= min_dist {
                continue;
            }
            let normal = delta / dist;
            let push = (min_dist - dist) * ASYMMETRIC_PUSH;
            bodies[i].position += normal * push;
            bodies[i].velocity += normal * (push * 0.5);
        }
    }
}

/// Hard clamp to the bounding volume with an inverted, dampened velocity on
/// the offending axis. A body exactly on a face does not reflect (strict
/// comparisons).
fn contain_in_bounds(bodies: &mut [Body], config: &PhysicsConfig) {
    let b = &config.bounds;
    let restitution = config.boundary_restitution;
    for body in bodies.iter_mut() {
        if body.position.x.abs() > b.x {
            body.position.x = body.position.x.signum() * b.x;
            body.velocity.x *= -restitution;
        }
        if body.position.y.abs() > b.y {
            body.position.y = body.position.y.signum() * b.y;
            body.velocity.y *= -restitution;
        }
        if body.position.z > b.z_max || body.position.z < b.z_min {
            body.position.z = body.position.z.clamp(b.z_min, b.z_max);
            body.velocity.z *= -restitution;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;

    fn pointer_at(point: Vec3) -> PointerState {
        PointerState {
            point: Some(point),
            active: true,
        }
    }

    #[test]
    fn quadratic_falloff_is_weaker_than_linear_at_equal_distance() {
        let linear = PhysicsConfig::default();
        let quadratic = PhysicsConfig::default().with_falloff(Falloff::Quadratic);

        let mut a = [Body::new(Vec3::new(4.0, 0.0, 0.0), 1.0)];
        let mut b = a;
        step(&mut a, &pointer_at(Vec3::ZERO), &linear);
        step(&mut b, &pointer_at(Vec3::ZERO), &quadratic);

        assert!(a[0].velocity.x > 0.0);
        assert!(b[0].velocity.x > 0.0);
        assert!(b[0].velocity.x < a[0].velocity.x);
    }

    #[test]
    fn body_coincident_with_pointer_gets_no_force() {
        let config = PhysicsConfig::default();
        let origin = Vec3::new(1.0, -2.0, 3.0);
        let mut bodies = [Body::new(origin, 1.0)];
        step(&mut bodies, &pointer_at(origin), &config);

        assert_eq!(bodies[0].velocity, Vec3::ZERO);
        assert_eq!(bodies[0].position, origin);
    }

    #[test]
    fn restoring_force_skips_settled_bodies() {
        let config = PhysicsConfig::default();
        let mut bodies = [Body::new(Vec3::ZERO, 1.0)];
        // Nudge just inside the threshold: settled, no spring.
        bodies[0].position.x = config.return_threshold * 0.5;
        apply_pointer_forces(&mut bodies, &PointerState::default(), &config);
        assert_eq!(bodies[0].velocity, Vec3::ZERO);

        // Outside the threshold the spring pulls back toward rest.
        bodies[0].position.x = config.return_threshold * 4.0;
        apply_pointer_forces(&mut bodies, &PointerState::default(), &config);
        assert!(bodies[0].velocity.x < 0.0);
    }

    #[test]
    fn boundary_faces_do_not_reflect_exact_contact() {
        let config = PhysicsConfig::default();
        let mut bodies = [Body::new(Vec3::new(config.bounds.x, 0.0, 0.0), 1.0)];
        bodies[0].velocity = Vec3::new(0.5, 0.0, 0.0);
        contain_in_bounds(&mut bodies, &config);
        // Exactly on the face: strict comparison leaves velocity alone.
        assert_eq!(bodies[0].velocity.x, 0.5);
    }

    #[test]
    fn coincident_pair_is_skipped_without_nan() {
        let config = PhysicsConfig::default();
        let at = Vec3::new(0.0, 0.0, -5.0);
        let mut bodies = [Body::new(at, 1.0), Body::new(at, 1.0)];
        for _ in 0..10 {
            step(&mut bodies, &PointerState::default(), &config);
        }
        for body in &bodies {
            assert!(body.position.is_finite());
            assert!(body.velocity.is_finite());
        }
    }
}
