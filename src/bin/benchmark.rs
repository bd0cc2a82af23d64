//! Headless timing run: steps the engine with an orbiting pressed pointer
//! and prints the mean tick cost per cluster size and collision response.

use std::time::Instant;

use bevy::math::Vec3;

use sphere_cluster::config::{ClusterConfig, CollisionResponse, PhysicsConfig};
use sphere_cluster::physics::body::scatter;
use sphere_cluster::physics::engine::{PointerState, step};

const WARMUP_TICKS: usize = 1_000;
const TIMED_TICKS: usize = 20_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{:<12} {:>8} {:>14} {:>14}",
        "response", "bodies", "ticks", "ns/tick"
    );

    for response in [CollisionResponse::Symmetric, CollisionResponse::Asymmetric] {
        for count in [18usize, 64, 256] {
            let config = PhysicsConfig::default()
                .with_collision_response(response)
                .with_press_gated(false);
            config.validate()?;
            let cluster = ClusterConfig {
                count,
                ..Default::default()
            };
            cluster.validate()?;

            let mut rng = rand::rng();
            let mut bodies = scatter(&cluster, &mut rng);

            let mut run = |ticks: usize| {
                for i in 0..ticks {
                    // Sweep the pointer through the cluster so every branch
                    // of the force pass gets exercised.
                    let angle = i as f32 * 0.05;
                    let pointer = PointerState {
                        point: Some(
                            cluster.center
                                + Vec3::new(angle.cos(), 0.0, angle.sin()) * cluster.radius * 0.5,
                        ),
                        active: true,
                    };
                    step(&mut bodies, &pointer, &config);
                }
            };

            run(WARMUP_TICKS);
            let start = Instant::now();
            run(TIMED_TICKS);
            let elapsed = start.elapsed();

            println!(
                "{:<12} {:>8} {:>14} {:>14.1}",
                format!("{response:?}"),
                count,
                TIMED_TICKS,
                elapsed.as_nanos() as f64 / TIMED_TICKS as f64
            );
        }
    }
    Ok(())
}
