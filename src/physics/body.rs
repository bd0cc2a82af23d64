use bevy::prelude::*;
use rand::{Rng, RngExt};

use crate::config::ClusterConfig;

/// A single simulated sphere.
/// Store this as a Component on the rendered entity (which also has a Transform).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Current world position (kept in sync with Transform by systems).
    pub position: Vec3,
    /// Accumulated per-tick velocity; only the engine reads it.
    pub velocity: Vec3,
    /// The cluster point this body relaxes back toward. Fixed at creation.
    pub rest_position: Vec3,
    /// Collision/boundary radius (world units). Fixed at creation.
    pub radius: f32,
}

impl Body {
    /// Create a body at `position` with its rest position pinned there.
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            rest_position: position,
            radius,
        }
    }

    /// Distance still to travel back to the rest position.
    pub fn distance_from_rest(&self) -> f32 {
        self.position.distance(self.rest_position)
    }
}

/// Scatter `cluster.count` bodies inside the cluster volume: random angle and
/// radial distance on the horizontal disc, random height in the vertical band,
/// random radius in the configured range. Each body rests where it spawns.
pub fn scatter(cluster: &ClusterConfig, rng: &mut impl Rng) -> Vec<Body> {
    (0..cluster.count)
        .map(|_| {
            let angle = rng.random_range(0.0..core::f32::consts::TAU);
            let radial = rng.random_range(0.0..=cluster.radius);
            let height = rng.random_range(-0.5..=0.5) * cluster.height;
            let position = cluster.center
                + Vec3::new(angle.cos() * radial, height, angle.sin() * radial);
            let radius = rng.random_range(cluster.body_radius_min..=cluster.body_radius_max);
            Body::new(position, radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_respects_cluster_extents() {
        let cluster = ClusterConfig::default();
        let mut rng = rand::rng();
        let bodies = scatter(&cluster, &mut rng);

        assert_eq!(bodies.len(), cluster.count);
        for body in &bodies {
            let offset = body.position - cluster.center;
            let horizontal = Vec2::new(offset.x, offset.z).length();
            assert!(horizontal <= cluster.radius + 1e-4);
            assert!(offset.y.abs() <= cluster.height * 0.5 + 1e-4);
            assert!(body.radius >= cluster.body_radius_min);
            assert!(body.radius <= cluster.body_radius_max);
            assert_eq!(body.rest_position, body.position);
            assert_eq!(body.velocity, Vec3::ZERO);
        }
    }

    #[test]
    fn new_body_starts_at_rest() {
        let body = Body::new(Vec3::new(1.0, 2.0, 3.0), 0.9);
        assert_eq!(body.distance_from_rest(), 0.0);
    }
}
