use bevy::prelude::*;

use crate::game_logic::{KNOCKED_CONE_PARK, RAMP_FIELD_MARGIN};

/// Kind-specific geometry for a world obstacle.
#[derive(Clone, Debug)]
pub enum ObstacleKind {
    Cone { radius: f32, knocked: bool },
    Rock { radius: f32 },
    Wall { width: f32, depth: f32, yaw: f32 },
    Ramp { width: f32, length: f32, height: f32, yaw: f32 },
}

#[derive(Clone, Debug)]
pub struct Obstacle {
    /// World position on the driving plane.
    pub position: Vec2,
    pub kind: ObstacleKind,
}

/// The obstacle registry. Append-only at build time; only a cone's
/// position/knocked state ever mutates afterwards, through `knock_cone`.
#[derive(Resource, Default)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
}

/// Rotate a vector on the xz plane by `yaw` (counter-clockwise about +Y).
pub fn rotate_xz(v: Vec2, yaw: f32) -> Vec2 {
    let (sin, cos) = yaw.sin_cos();
    Vec2::new(v.x * cos + v.y * sin, -v.x * sin + v.y * cos)
}

impl ObstacleField {
    pub fn add_cone(&mut self, x: f32, z: f32, radius: f32) {
        self.obstacles.push(Obstacle {
            position: Vec2::new(x, z),
            kind: ObstacleKind::Cone {
                radius,
                knocked: false,
            },
        });
    }

    pub fn add_rock(&mut self, x: f32, z: f32, radius: f32) {
        self.obstacles.push(Obstacle {
            position: Vec2::new(x, z),
            kind: ObstacleKind::Rock { radius },
        });
    }

    pub fn add_wall(&mut self, x: f32, z: f32, width: f32, depth: f32, yaw: f32) {
        self.obstacles.push(Obstacle {
            position: Vec2::new(x, z),
            kind: ObstacleKind::Wall { width, depth, yaw },
        });
    }

    pub fn add_ramp(&mut self, x: f32, z: f32, width: f32, length: f32, height: f32, yaw: f32) {
        self.obstacles.push(Obstacle {
            position: Vec2::new(x, z),
            kind: ObstacleKind::Ramp {
                width,
                length,
                height,
                yaw,
            },
        });
    }

    /// Relocate a struck cone outside the arena and mark it inert. Subsequent
    /// collision queries miss it on the distance check alone.
    pub fn knock_cone(&mut self, index: usize) {
        if let Some(obstacle) = self.obstacles.get_mut(index) {
            if let ObstacleKind::Cone { knocked, .. } = &mut obstacle.kind {
                obstacle.position = Vec2::splat(KNOCKED_CONE_PARK);
                *knocked = true;
            }
        }
    }

    /// Ramp surface elevation at a world point, 0 if no ramp claims it.
    ///
    /// Each ramp rises linearly from 0 at its near edge to full height at the
    /// far edge, with a margin around the footprint for smooth entry and exit.
    /// Ramps are assumed non-overlapping, so the first match wins.
    pub fn ramp_height_at(&self, x: f32, z: f32) -> f32 {
        for obstacle in &self.obstacles {
            let ObstacleKind::Ramp {
                width,
                length,
                height,
                yaw,
            } = obstacle.kind
            else {
                continue;
            };

            let local = rotate_xz(Vec2::new(x, z) - obstacle.position, -yaw);
            let half_width = width / 2.0 + RAMP_FIELD_MARGIN;
            if local.x.abs() <= half_width
                && local.y >= -RAMP_FIELD_MARGIN
                && local.y <= length + RAMP_FIELD_MARGIN
            {
                return height * (local.y / length).clamp(0.0, 1.0);
            }
        }
        0.0
    }
}
