use std::hint::black_box;

use bevy::math::Vec3;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use sphere_cluster::config::{ClusterConfig, CollisionResponse, PhysicsConfig};
use sphere_cluster::physics::body::scatter;
use sphere_cluster::physics::engine::{PointerState, step};

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    let pointer = PointerState {
        point: Some(Vec3::new(2.0, 1.0, -5.0)),
        active: true,
    };

    for &count in &[18usize, 64, 256] {
        for (name, response) in [
            ("symmetric", CollisionResponse::Symmetric),
            ("asymmetric", CollisionResponse::Asymmetric),
        ] {
            let config = PhysicsConfig::default()
                .with_collision_response(response)
                .with_press_gated(false);
            let cluster = ClusterConfig {
                count,
                ..Default::default()
            };
            let mut rng = rand::rng();
            let mut bodies = scatter(&cluster, &mut rng);

            group.bench_with_input(BenchmarkId::new(name, count), &count, |b, _| {
                b.iter(|| step(black_box(&mut bodies), &pointer, &config));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
