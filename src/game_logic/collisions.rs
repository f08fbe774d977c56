use bevy::prelude::*;

use crate::game_logic::{
    rotate_xz, ObstacleField, ObstacleKind, CAR_LENGTH, CAR_WIDTH, DEGENERATE_DISTANCE,
    RAMP_BACK_MARGIN, RAMP_BACK_MAX_HEIGHT,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitKind {
    Cone,
    Rock,
    Wall,
    RampBack,
}

/// Result of one collision query, consumed within the same tick.
#[derive(Clone, Copy, Debug)]
pub enum CollisionResult {
    Miss,
    Hit {
        kind: HitKind,
        /// Normalized direction that separates the car from the obstacle.
        push: Vec2,
        /// Registry index of the struck obstacle (the knock target for cones).
        obstacle: usize,
    },
}

pub fn car_radius() -> f32 {
    CAR_WIDTH.max(CAR_LENGTH) / 2.0
}

/// Test a candidate car position against every obstacle, in registration
/// order. First match wins; there is no multi-contact resolution.
pub fn query_collision(candidate: Vec2, car_y: f32, field: &ObstacleField) -> CollisionResult {
    let radius = car_radius();

    for (index, obstacle) in field.obstacles.iter().enumerate() {
        match obstacle.kind {
            ObstacleKind::Cone { radius: r, .. } => {
                if let Some(push) = circle_hit(candidate, obstacle.position, radius + r) {
                    return CollisionResult::Hit {
                        kind: HitKind::Cone,
                        push,
                        obstacle: index,
                    };
                }
            }
            ObstacleKind::Rock { radius: r } => {
                if let Some(push) = circle_hit(candidate, obstacle.position, radius + r) {
                    return CollisionResult::Hit {
                        kind: HitKind::Rock,
                        push,
                        obstacle: index,
                    };
                }
            }
            ObstacleKind::Wall { width, depth, yaw } => {
                if let Some(push) = wall_hit(candidate, obstacle.position, width, depth, yaw, radius)
                {
                    return CollisionResult::Hit {
                        kind: HitKind::Wall,
                        push,
                        obstacle: index,
                    };
                }
            }
            ObstacleKind::Ramp { length, yaw, .. } => {
                if let Some(push) =
                    ramp_back_hit(candidate, car_y, obstacle.position, length, yaw, radius)
                {
                    return CollisionResult::Hit {
                        kind: HitKind::RampBack,
                        push,
                        obstacle: index,
                    };
                }
            }
        }
    }

    CollisionResult::Miss
}

/// Circle-circle overlap. The push vector points from the obstacle center to
/// the candidate; at degenerate zero separation it falls back to +X rather
/// than dividing by zero.
fn circle_hit(candidate: Vec2, center: Vec2, combined_radius: f32) -> Option<Vec2> {
    let offset = candidate - center;
    let distance = offset.length();
    if distance >= combined_radius {
        return None;
    }
    if distance < DEGENERATE_DISTANCE {
        return Some(Vec2::X);
    }
    Some(offset / distance)
}

/// Point-vs-box in the wall's yaw frame. The car radius expands the thin
/// (depth) axis only, not the width axis; a car can slip past a wall's end
/// without contact. Preserved as observed behavior, exercised in tests.
fn wall_hit(
    candidate: Vec2,
    center: Vec2,
    width: f32,
    depth: f32,
    yaw: f32,
    car_radius: f32,
) -> Option<Vec2> {
    let local = rotate_xz(candidate - center, -yaw);
    let half_width = width / 2.0;
    let half_depth = depth / 2.0 + car_radius;

    if local.x.abs() > half_width || local.y.abs() > half_depth {
        return None;
    }

    // Push out along the thin axis, by whichever side of the wall plane the
    // candidate fell on
    let side = if local.y >= 0.0 { 1.0 } else { -1.0 };
    Some(rotate_xz(Vec2::new(0.0, side), yaw))
}

/// Only a ramp's back (tall) edge collides; the sloped face and sides never
/// do, so driving up from the front cannot register a crash. The candidate
/// must be low (not already elevated) and on the far side of the back edge.
fn ramp_back_hit(
    candidate: Vec2,
    car_y: f32,
    origin: Vec2,
    length: f32,
    yaw: f32,
    car_radius: f32,
) -> Option<Vec2> {
    if car_y >= RAMP_BACK_MAX_HEIGHT {
        return None;
    }

    let forward = rotate_xz(Vec2::new(0.0, 1.0), yaw);
    let back_edge = origin + forward * length;
    let offset = candidate - back_edge;

    if offset.length() >= car_radius + RAMP_BACK_MARGIN {
        return None;
    }
    if offset.dot(forward) <= 0.0 {
        return None;
    }

    let distance = offset.length();
    if distance < DEGENERATE_DISTANCE {
        return Some(forward);
    }
    Some(offset / distance)
}
