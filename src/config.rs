use bevy::prelude::*;
use core::fmt;

/// Physics timing
pub const PHYSICS_HZ: f64 = 60.0;

/// Per-tick velocity multiplier in (0, 1); the step runs at PHYSICS_HZ.
pub const DAMPING: f32 = 0.85;

/// Cluster defaults (world units; camera looks down -Z)
pub const SPHERE_COUNT: usize = 18;
pub const CLUSTER_CENTER: Vec3 = Vec3::new(0.0, 0.0, -5.0);
pub const CLUSTER_RADIUS: f32 = 8.0;
pub const CLUSTER_HEIGHT: f32 = 6.0;
pub const BODY_RADIUS_MIN: f32 = 0.8;
pub const BODY_RADIUS_MAX: f32 = 1.3;

/// Pointer interaction defaults
pub const INTERACTION_RADIUS: f32 = 8.0;
pub const REPULSION_STRENGTH: f32 = 0.3;
pub const RETURN_STRENGTH: f32 = 0.02;
pub const RETURN_THRESHOLD: f32 = 0.1;
pub const POINTER_DEPTH: f32 = 20.0; // distance along the camera ray

/// Collision / boundary defaults
pub const COLLISION_NUDGE: f32 = 0.05;
pub const BOUNDARY_RESTITUTION: f32 = 0.5;
pub const BOUNDARY_XY: f32 = 25.0;
pub const BOUNDARY_Z_MIN: f32 = -20.0;
pub const BOUNDARY_Z_MAX: f32 = 10.0;

/// Camera sits on +Z looking at the origin
pub const CAMERA_DISTANCE: f32 = 50.0;

/// How the pointer's 2D position becomes a 3D interaction point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerProjection {
    /// Take the point a fixed distance along the camera ray.
    AtDistance(f32),
    /// Intersect the camera ray with the plane z = depth; yields no point
    /// when the ray is parallel to the plane.
    PlaneAtDepth(f32),
}

/// Pointer-force falloff shape inside the interaction radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Falloff {
    #[default]
    Linear,
    /// Steeper near-field push.
    Quadratic,
}

/// Which pairwise collision resolution to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionResponse {
    /// Each unordered pair visited once; half the overlap corrected per side.
    #[default]
    Symmetric,
    /// Each body pushes itself out of every overlapping neighbor by the full
    /// overlap scaled down; pairs are double-counted, giving a softer
    /// "melting" settle. Order-dependent within a tick.
    Asymmetric,
}

/// Axis-aligned bounding volume: symmetric in x/y, asymmetric front/back in z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x: BOUNDARY_XY,
            y: BOUNDARY_XY,
            z_min: BOUNDARY_Z_MIN,
            z_max: BOUNDARY_Z_MAX,
        }
    }
}

/// Per-tick physics tunables. Construct via `Default` and adjust with the
/// `with_*` methods, then let `PhysicsPlugin::new` (or `validate`) check it.
///
/// ```
/// use sphere_cluster::config::{CollisionResponse, Falloff, PhysicsConfig};
///
/// let config = PhysicsConfig::default()
///     .with_falloff(Falloff::Quadratic)
///     .with_collision_response(CollisionResponse::Asymmetric)
///     .with_press_gated(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Distance within which the pointer repels bodies.
    pub interaction_radius: f32,
    /// Peak repulsion added to velocity per tick (at zero distance).
    pub repulsion_strength: f32,
    /// Velocity multiplier applied every tick; must be in (0, 1).
    pub damping: f32,
    /// Spring pull toward the rest position, per tick.
    pub return_strength: f32,
    /// Within this distance of rest a body counts as settled.
    pub return_threshold: f32,
    /// Velocity separation per unit of overlap (symmetric response).
    pub collision_nudge: f32,
    /// Velocity scale (sign-flipped) when a boundary face is hit; in [0, 1].
    pub boundary_restitution: f32,
    pub bounds: Bounds,
    pub falloff: Falloff,
    pub collision_response: CollisionResponse,
    /// When true, repulsion only applies while the pointer button is held.
    pub press_gated: bool,
    pub pointer_projection: PointerProjection,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            interaction_radius: INTERACTION_RADIUS,
            repulsion_strength: REPULSION_STRENGTH,
            damping: DAMPING,
            return_strength: RETURN_STRENGTH,
            return_threshold: RETURN_THRESHOLD,
            collision_nudge: COLLISION_NUDGE,
            boundary_restitution: BOUNDARY_RESTITUTION,
            bounds: Bounds::default(),
            falloff: Falloff::default(),
            collision_response: CollisionResponse::default(),
            press_gated: true,
            pointer_projection: PointerProjection::AtDistance(POINTER_DEPTH),
        }
    }
}

impl PhysicsConfig {
    pub fn with_falloff(mut self, falloff: Falloff) -> Self {
        self.falloff = falloff;
        self
    }

    pub fn with_collision_response(mut self, response: CollisionResponse) -> Self {
        self.collision_response = response;
        self
    }

    pub fn with_press_gated(mut self, gated: bool) -> Self {
        self.press_gated = gated;
        self
    }

    pub fn with_pointer_projection(mut self, projection: PointerProjection) -> Self {
        self.pointer_projection = projection;
        self
    }

    /// Reject values that would let the simulation blow up at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.interaction_radius.is_finite() && self.interaction_radius > 0.0) {
            return Err(ConfigError::InvalidInteractionRadius(self.interaction_radius));
        }
        if !(self.damping.is_finite() && self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConfigError::InvalidDamping(self.damping));
        }
        for (name, value) in [
            ("repulsion_strength", self.repulsion_strength),
            ("return_strength", self.return_strength),
            ("return_threshold", self.return_threshold),
            ("collision_nudge", self.collision_nudge),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidStrength { name, value });
            }
        }
        if !(self.boundary_restitution.is_finite()
            && (0.0..=1.0).contains(&self.boundary_restitution))
        {
            return Err(ConfigError::InvalidRestitution(self.boundary_restitution));
        }
        let b = &self.bounds;
        if !(b.x.is_finite() && b.x > 0.0 && b.y.is_finite() && b.y > 0.0)
            || !(b.z_min.is_finite() && b.z_max.is_finite() && b.z_min < b.z_max)
        {
            return Err(ConfigError::InvalidBounds);
        }
        match self.pointer_projection {
            PointerProjection::AtDistance(d) if !(d.is_finite() && d > 0.0) => {
                return Err(ConfigError::InvalidProjection);
            }
            PointerProjection::PlaneAtDepth(z) if !z.is_finite() => {
                return Err(ConfigError::InvalidProjection);
            }
            _ => {}
        }
        Ok(())
    }
}

/// Startup cluster layout: where bodies spawn and how big they are.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    pub count: usize,
    pub center: Vec3,
    /// Horizontal scatter radius around the center.
    pub radius: f32,
    /// Vertical spread (total height of the scatter band).
    pub height: f32,
    pub body_radius_min: f32,
    pub body_radius_max: f32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            count: SPHERE_COUNT,
            center: CLUSTER_CENTER,
            radius: CLUSTER_RADIUS,
            height: CLUSTER_HEIGHT,
            body_radius_min: BODY_RADIUS_MIN,
            body_radius_max: BODY_RADIUS_MAX,
        }
    }
}

impl ClusterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::EmptyCluster);
        }
        if !self.center.is_finite()
            || !(self.radius.is_finite() && self.radius >= 0.0)
            || !(self.height.is_finite() && self.height >= 0.0)
        {
            return Err(ConfigError::InvalidClusterExtent);
        }
        if !(self.body_radius_min.is_finite()
            && self.body_radius_max.is_finite()
            && self.body_radius_min > 0.0
            && self.body_radius_min <= self.body_radius_max)
        {
            return Err(ConfigError::InvalidBodyRadius {
                min: self.body_radius_min,
                max: self.body_radius_max,
            });
        }
        Ok(())
    }
}

/// Configuration values rejected at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidInteractionRadius(f32),
    InvalidDamping(f32),
    InvalidStrength { name: &'static str, value: f32 },
    InvalidRestitution(f32),
    InvalidBounds,
    InvalidProjection,
    EmptyCluster,
    InvalidClusterExtent,
    InvalidBodyRadius { min: f32, max: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidInteractionRadius(v) => {
                write!(f, "interaction radius must be positive and finite, got {v}")
            }
            ConfigError::InvalidDamping(v) => {
                write!(f, "damping must be in (0, 1), got {v}")
            }
            ConfigError::InvalidStrength { name, value } => {
                write!(f, "{name} must be non-negative and finite, got {value}")
            }
            ConfigError::InvalidRestitution(v) => {
                write!(f, "boundary restitution must be in [0, 1], got {v}")
            }
            ConfigError::InvalidBounds => {
                write!(f, "bounds need positive x/y extents and z_min < z_max")
            }
            ConfigError::InvalidProjection => {
                write!(f, "pointer projection needs a positive distance or finite depth")
            }
            ConfigError::EmptyCluster => write!(f, "cluster needs at least one body"),
            ConfigError::InvalidClusterExtent => {
                write!(f, "cluster center/radius/height must be finite and non-negative")
            }
            ConfigError::InvalidBodyRadius { min, max } => {
                write!(f, "body radius range needs 0 < min <= max, got [{min}, {max}]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(PhysicsConfig::default().validate(), Ok(()));
        assert_eq!(ClusterConfig::default().validate(), Ok(()));
    }

    #[test]
    fn damping_must_stay_inside_unit_interval() {
        for bad in [0.0, 1.0, 1.2, -0.1, f32::NAN] {
            let config = PhysicsConfig {
                damping: bad,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidDamping(_))
            ));
        }
    }

    #[test]
    fn rejects_non_finite_strengths() {
        let config = PhysicsConfig {
            repulsion_strength: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStrength { name: "repulsion_strength", .. })
        ));
    }

    #[test]
    fn rejects_inverted_z_range() {
        let config = PhysicsConfig {
            bounds: Bounds {
                z_min: 10.0,
                z_max: -20.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidBounds));
    }

    #[test]
    fn rejects_bad_body_radius_range() {
        let cluster = ClusterConfig {
            body_radius_min: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            cluster.validate(),
            Err(ConfigError::InvalidBodyRadius { .. })
        ));

        let cluster = ClusterConfig {
            body_radius_min: 2.0,
            body_radius_max: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            cluster.validate(),
            Err(ConfigError::InvalidBodyRadius { .. })
        ));
    }

    #[test]
    fn rejects_empty_cluster() {
        let cluster = ClusterConfig {
            count: 0,
            ..Default::default()
        };
        assert_eq!(cluster.validate(), Err(ConfigError::EmptyCluster));
    }
}
