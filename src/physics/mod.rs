use bevy::prelude::*;

pub mod body;
pub mod debug;
pub mod engine;
pub mod systems;

pub use body::Body;
pub use engine::PointerState;

use crate::config::{ClusterConfig, ConfigError, PhysicsConfig};

/// Plug this into your App with `.add_plugins(PhysicsPlugin::default())`.
/// Configuration is validated at construction so a bad value fails loudly
/// instead of producing unbounded motion mid-run.
pub struct PhysicsPlugin {
    physics: PhysicsConfig,
    cluster: ClusterConfig,
}

impl PhysicsPlugin {
    pub fn new(physics: PhysicsConfig, cluster: ClusterConfig) -> Result<Self, ConfigError> {
        physics.validate()?;
        cluster.validate()?;
        Ok(Self { physics, cluster })
    }
}

impl Default for PhysicsPlugin {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            cluster: ClusterConfig::default(),
        }
    }
}

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.physics.clone())
            .insert_resource(self.cluster.clone())
            .init_resource::<PointerState>()
            // Soft fill light to match the key directional light
            .insert_resource(GlobalAmbientLight {
                color: Color::WHITE,
                brightness: 150.0,
                ..default()
            })
            // Camera, lights, and one entity per body
            .add_systems(Startup, systems::spawn_sphere_cluster)
            .add_systems(
                Update,
                (
                    systems::update_pointer_state,
                    debug::draw_pointer_gizmo,
                    systems::exit_on_esc_or_q_if_native,
                ),
            )
            // The physics tick runs on the fixed clock (set rate in main via
            // Time::<Fixed>) and always reads the latest pointer snapshot.
            .add_systems(FixedUpdate, systems::physics_step);
    }
}
