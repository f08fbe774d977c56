use bevy::prelude::*;

use crate::game_logic::{
    query_collision, CarMotion, CollisionResult, DriveInput, Heading, HitKind, ObstacleField,
    RaceStats, ACCEL_RATE, ARENA_HALF, BASE_CLEARANCE, BRAKE_CROSSOVER, BRAKE_RATE, CONE_DRAG,
    CRASH_SPEED, DRAG_FACTOR, GRAVITY, LAUNCH_LIFT, LAUNCH_MIN_SPEED, MAX_SPEED, MAX_STEER_ANGLE,
    MAX_TICK_DT, MIN_TURN_SPEED, RAMP_BACK_BOUNCE, RAMP_BACK_PUSH, RAMP_EDGE_EPS,
    REVERSE_ACCEL_RATE, REVERSE_MAX_SPEED, ROCK_BOUNCE, ROCK_PUSH, STEER_SMOOTHING, STOP_EPSILON,
    TURNING_RATE, TURN_FALLOFF, WALL_BOUNCE, WALL_PUSH, WHEEL_RADIUS,
};

/// One simulation tick for the car.
///
/// This is the whole state machine: longitudinal and lateral control, the
/// collision response policy, ramp launches, airborne integration, lap
/// tracking and the arena clamp. The host loop calls it once per frame; the
/// delta gets clamped here so a frame hitch cannot blow up the integration.
///
/// Nothing in here can fail. The single modeled dead end is the broken state
/// in `RaceStats`, which freezes the car until an external repair.
pub fn apply_driving(
    position: &mut Vec3,
    heading: &mut Heading,
    motion: &mut CarMotion,
    input: &DriveInput,
    field: &mut ObstacleField,
    stats: &mut RaceStats,
    delta: f32,
    now_ms: f64,
) {
    if stats.broken() {
        return;
    }
    let delta = delta.min(MAX_TICK_DT);

    // Throttle, brake/reverse, or coast-down drag
    if input.accelerate {
        motion.speed = (motion.speed + ACCEL_RATE * delta).min(MAX_SPEED);
    } else if input.brake {
        if motion.speed > BRAKE_CROSSOVER {
            motion.speed = (motion.speed - BRAKE_RATE * delta).max(0.0);
        } else {
            motion.speed = (motion.speed - REVERSE_ACCEL_RATE * delta).max(-REVERSE_MAX_SPEED);
        }
    } else {
        motion.speed *= DRAG_FACTOR;
        if motion.speed.abs() < STOP_EPSILON {
            motion.speed = 0.0;
        }
    }

    // Steering: turn authority shrinks with speed, inverts in reverse, and
    // does nothing while the car is essentially stationary
    let steer = input.steer();
    if motion.speed.abs() > MIN_TURN_SPEED {
        let speed_ratio = (motion.speed.abs() / MAX_SPEED).min(1.0);
        let turn_rate = TURNING_RATE * (1.0 - TURN_FALLOFF * speed_ratio);
        let direction = if motion.speed < 0.0 { -steer } else { steer };
        heading.angle += direction * turn_rate * delta;
    }

    // Display-only: smoothed wheel angle and wheel spin for the visuals,
    // independent of the heading itself
    let steer_target = steer * MAX_STEER_ANGLE;
    motion.steer_display +=
        (steer_target - motion.steer_display) * (STEER_SMOOTHING * delta).min(1.0);
    motion.wheel_spin += motion.speed * delta / WHEEL_RADIUS;

    // Propose the next position and ask the collision engine about it
    let forward = heading.forward_vector();
    let candidate = Vec2::new(position.x, position.z) + forward * motion.speed * delta;
    let result = query_collision(candidate, position.y, field);
    apply_collision_response(result, candidate, position, motion, field, stats);

    // Vertical motion: gravity while airborne, ramp-exit launch detection
    // while grounded
    let ramp_height = field.ramp_height_at(position.x, position.z);
    let ground_level = BASE_CLEARANCE + ramp_height;
    if motion.airborne {
        motion.vertical_velocity -= GRAVITY * delta;
        position.y += motion.vertical_velocity * delta;
        if position.y <= ground_level {
            position.y = ground_level;
            motion.vertical_velocity = 0.0;
            motion.airborne = false;
            let points = stats.end_jump(now_ms);
            if points > 0 {
                info!("Jump landed for {} points", points);
            }
        }
    } else if motion.last_ramp_height > RAMP_EDGE_EPS
        && ramp_height <= RAMP_EDGE_EPS
        && motion.speed.abs() > LAUNCH_MIN_SPEED
    {
        // Rolled off a ramp's far edge with enough speed
        motion.airborne = true;
        motion.vertical_velocity = motion.speed.abs() * LAUNCH_LIFT;
        stats.start_jump(now_ms);
        info!("Launched at speed {:.1}", motion.speed);
    } else {
        position.y = ground_level;
    }
    motion.last_ramp_height = ramp_height;

    if !stats.broken() {
        stats.record_position(position.x, position.z, now_ms);
    }

    // Soft arena boundary: clamp each axis and bleed off speed
    if position.x.abs() > ARENA_HALF {
        position.x = position.x.clamp(-ARENA_HALF, ARENA_HALF);
        motion.speed *= 0.5;
    }
    if position.z.abs() > ARENA_HALF {
        position.z = position.z.clamp(-ARENA_HALF, ARENA_HALF);
        motion.speed *= 0.5;
    }
}

/// Kind-specific collision response. Rocks and ramp backs wreck the car above
/// the crash speed and bounce it below; walls always bounce; cones get
/// knocked away and barely slow the car. Only cone and miss outcomes commit
/// the candidate position.
pub fn apply_collision_response(
    result: CollisionResult,
    candidate: Vec2,
    position: &mut Vec3,
    motion: &mut CarMotion,
    field: &mut ObstacleField,
    stats: &mut RaceStats,
) {
    match result {
        CollisionResult::Hit {
            kind: HitKind::Rock,
            push,
            ..
        } => {
            if motion.speed.abs() > CRASH_SPEED {
                motion.speed = 0.0;
                stats.mark_broken();
                info!("Wrecked on a rock");
            } else {
                motion.speed *= -ROCK_BOUNCE;
                position.x += push.x * ROCK_PUSH;
                position.z += push.y * ROCK_PUSH;
            }
        }
        CollisionResult::Hit {
            kind: HitKind::RampBack,
            push,
            ..
        } => {
            if motion.speed.abs() > CRASH_SPEED {
                motion.speed = 0.0;
                stats.mark_broken();
                info!("Wrecked on a ramp edge");
            } else {
                motion.speed *= -RAMP_BACK_BOUNCE;
                position.x += push.x * RAMP_BACK_PUSH;
                position.z += push.y * RAMP_BACK_PUSH;
            }
        }
        CollisionResult::Hit {
            kind: HitKind::Wall,
            push,
            ..
        } => {
            motion.speed *= -WALL_BOUNCE;
            position.x += push.x * WALL_PUSH;
            position.z += push.y * WALL_PUSH;
        }
        CollisionResult::Hit {
            kind: HitKind::Cone,
            obstacle,
            ..
        } => {
            motion.speed *= CONE_DRAG;
            field.knock_cone(obstacle);
            position.x = candidate.x;
            position.z = candidate.y;
        }
        CollisionResult::Miss => {
            position.x = candidate.x;
            position.z = candidate.y;
        }
    }
}
