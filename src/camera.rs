use bevy::prelude::*;
use bevy::render::camera::{Projection, ScalingMode};

use crate::game_logic::{PlayerControlled, ARENA_HALF};

// World units visible vertically
pub const VIEW_HEIGHT: f32 = 120.0;

pub fn camera_setup(mut commands: Commands) {
    let mut projection = OrthographicProjection::default_2d();
    projection.scaling_mode = ScalingMode::FixedVertical {
        viewport_height: VIEW_HEIGHT,
    };

    commands
        .spawn(Camera2d)
        .insert(Projection::Orthographic(projection));
}

// Camera follows the car, smoothed, clamped to the arena
pub fn move_camera(
    time: Res<Time>,
    player_car: Single<&Transform, With<PlayerControlled>>,
    mut camera: Single<&mut Transform, (With<Camera>, Without<PlayerControlled>)>,
) {
    let target = player_car
        .translation
        .truncate()
        .clamp(Vec2::splat(-ARENA_HALF), Vec2::splat(ARENA_HALF));

    let blend = (5.0 * time.delta_secs()).min(1.0);
    let current = camera.translation.truncate();
    let next = current.lerp(target, blend);
    camera.translation.x = next.x;
    camera.translation.y = next.y;
}
