use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::{ClusterConfig, PhysicsConfig, PointerProjection};
use crate::physics::body::{Body, scatter};
use crate::physics::engine::{self, PointerState};

/// Spawn the camera, the lights, and one mesh entity per scattered body.
/// Bodies rest where they spawn; a single unit sphere mesh is shared and
/// scaled per body via its Transform.
pub fn spawn_sphere_cluster(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cluster: Res<ClusterConfig>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.0, crate::config::CAMERA_DISTANCE),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 3_000.0,
            ..default()
        },
        Transform::from_xyz(-10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let mesh = meshes.add(Sphere::new(1.0));
    let mut rng = rand::rng();
    let bodies = scatter(&cluster, &mut rng);
    tracing::info!(count = bodies.len(), "spawning sphere cluster");

    for body in bodies {
        let material = materials.add(StandardMaterial {
            base_color: Color::srgb(0.94, 0.94, 0.94),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        });
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(body.position).with_scale(Vec3::splat(body.radius)),
            body,
        ));
    }
}

/// Refresh the pointer snapshot each render frame: cursor -> camera ray ->
/// 3D interaction point via the configured projection. Anything missing
/// (cursor off-window, no camera, parallel ray) leaves `point` as None.
pub fn update_pointer_state(
    windows: Query<&Window, With<PrimaryWindow>>,
    q_cam: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    buttons: Res<ButtonInput<MouseButton>>,
    config: Res<PhysicsConfig>,
    mut pointer: ResMut<PointerState>,
) {
    pointer.active = buttons.pressed(MouseButton::Left);
    pointer.point = None;

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(screen_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_xform)) = q_cam.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_xform, screen_pos) else {
        return;
    };

    pointer.point = match config.pointer_projection {
        PointerProjection::AtDistance(distance) => Some(ray.get_point(distance)),
        PointerProjection::PlaneAtDepth(depth) => ray
            .intersect_plane(Vec3::new(0.0, 0.0, depth), InfinitePlane3d::new(Vec3::Z))
            .map(|t| ray.get_point(t)),
    };
}

/// Fixed-tick driver: copy bodies out, run one engine step against the latest
/// pointer snapshot, write results back and sync Transforms for rendering.
pub fn physics_step(
    mut q_bodies: Query<(&mut Body, &mut Transform)>,
    pointer: Res<PointerState>,
    config: Res<PhysicsConfig>,
    mut scratch: Local<Vec<Body>>,
) {
    let _span = tracing::info_span!("physics_step").entered();

    scratch.clear();
    scratch.extend(q_bodies.iter().map(|(body, _)| *body));
    engine::step(&mut scratch, &pointer, &config);

    for ((mut body, mut transform), stepped) in q_bodies.iter_mut().zip(scratch.drain(..)) {
        *body = stepped;
        transform.translation = stepped.position;
    }
}

/// Native-only quit: press Esc or Q to exit the app.
/// (No-op on wasm32.)
pub fn exit_on_esc_or_q_if_native(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if cfg!(not(target_arch = "wasm32")) {
        if keys.any_just_pressed([KeyCode::Escape, KeyCode::KeyQ]) {
            exit.write(AppExit::Success);
        }
    }
}
