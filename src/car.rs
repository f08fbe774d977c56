use bevy::prelude::*;

use crate::game_logic::{
    apply_driving, Car, CarMotion, CarPosition, DriveInput, Heading, ObstacleField,
    PlayerControlled, RaceStats, BASE_CLEARANCE, CAR_LENGTH, CAR_WIDTH,
};
use crate::GamePhase;

pub fn spawn_car(mut commands: Commands) {
    let position = CarPosition::start_pose();
    commands.spawn((
        Sprite::from_color(Color::srgb(0.85, 0.15, 0.1), Vec2::new(CAR_WIDTH, CAR_LENGTH)),
        Transform::from_xyz(position.x, position.z, 50.0),
        position,
        Heading::start_pose(),
        CarMotion::default(),
        Car,
        PlayerControlled,
    ));
}

/// Sample the keyboard into the per-tick control snapshot. Runs before the
/// drive system so a tick never sees input change mid-computation.
pub fn sample_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<DriveInput>) {
    input.accelerate =
        keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp);
    input.brake = keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown);
    input.left = keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft);
    input.right = keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight);
}

/// Run one simulation tick and mirror the result into the render transform.
/// The sim works on the xz driving plane; the top-down view maps x to screen
/// x, z to screen y, and scales the sprite up a little while airborne.
pub fn drive_car(
    time: Res<Time>,
    input: Res<DriveInput>,
    mut field: ResMut<ObstacleField>,
    mut stats: ResMut<RaceStats>,
    car: Single<
        (&mut CarPosition, &mut Heading, &mut CarMotion, &mut Transform),
        With<PlayerControlled>,
    >,
) {
    let (mut position, mut heading, mut motion, mut transform) = car.into_inner();
    let now_ms = time.elapsed_secs_f64() * 1000.0;

    apply_driving(
        &mut position.0,
        &mut heading,
        &mut motion,
        &input,
        &mut field,
        &mut stats,
        time.delta_secs(),
        now_ms,
    );

    transform.translation.x = position.x;
    transform.translation.y = position.z;
    transform.rotation = Quat::from_rotation_z(-heading.angle);
    let lift = 1.0 + (position.y - BASE_CLEARANCE) * 0.08;
    transform.scale = Vec3::splat(lift);
}

/// Flip to the wrecked phase the tick the car breaks.
pub fn detect_wreck(stats: Res<RaceStats>, mut next_state: ResMut<NextState<GamePhase>>) {
    if stats.broken() {
        next_state.set(GamePhase::Wrecked);
    }
}

/// Crash-restart: repair the car, put it back on the start line and wipe the
/// session stats.
pub fn handle_restart(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut stats: ResMut<RaceStats>,
    mut next_state: ResMut<NextState<GamePhase>>,
    car: Single<
        (&mut CarPosition, &mut Heading, &mut CarMotion, &mut Transform),
        With<PlayerControlled>,
    >,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) {
        return;
    }

    let (mut position, mut heading, mut motion, mut transform) = car.into_inner();
    *position = CarPosition::start_pose();
    *heading = Heading::start_pose();
    *motion = CarMotion::default();
    transform.translation.x = position.x;
    transform.translation.y = position.z;
    transform.rotation = Quat::from_rotation_z(-heading.angle);
    transform.scale = Vec3::ONE;

    stats.repair();
    stats.reset(time.elapsed_secs_f64() * 1000.0);
    next_state.set(GamePhase::Driving);
    info!("Car repaired, back to the start line");
}
