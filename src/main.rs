use bevy::prelude::*;

use sphere_cluster::config::PHYSICS_HZ;
use sphere_cluster::physics::PhysicsPlugin;

fn main() {
    App::new()
        // Solid black background
        .insert_resource(ClearColor(Color::BLACK))
        // Configure the fixed timestep clock (used in FixedUpdate)
        .insert_resource(Time::<Fixed>::from_hz(PHYSICS_HZ))
        // Bevy's core engine features
        .add_plugins(DefaultPlugins)
        // Sphere cluster physics + pointer tracking
        .add_plugins(PhysicsPlugin::default())
        .run();
}
