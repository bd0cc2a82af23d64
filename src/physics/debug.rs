use bevy::prelude::*;

use crate::config::PhysicsConfig;
use crate::physics::engine::PointerState;

/// Gizmo sphere showing the interaction radius at the projected pointer
/// point. Dim while the button is up, solid while pressed.
pub fn draw_pointer_gizmo(
    mut gizmos: Gizmos,
    pointer: Res<PointerState>,
    config: Res<PhysicsConfig>,
) {
    let Some(point) = pointer.point else {
        return;
    };
    let alpha = if pointer.active { 0.9 } else { 0.1 };
    gizmos.sphere(
        point,
        config.interaction_radius,
        Color::srgba(1.0, 0.0, 0.0, alpha),
    );
}
