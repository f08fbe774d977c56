use bevy::prelude::*;

use crate::game_logic::{BASE_CLEARANCE, START_HEADING, START_X, START_Z};

#[derive(Component)]
pub struct Car;

#[derive(Component)]
pub struct PlayerControlled;

/// Car position in world units: x/z is the driving plane, y is height.
/// Kept separate from the render Transform, which works in screen space.
#[derive(Component, Clone, Copy, Deref, DerefMut)]
pub struct CarPosition(pub Vec3);

impl CarPosition {
    pub fn start_pose() -> Self {
        Self(Vec3::new(START_X, BASE_CLEARANCE, START_Z))
    }
}

/// Yaw in radians, 0 aligned with +Z.
#[derive(Component, Clone)]
pub struct Heading {
    pub angle: f32,
}

impl Heading {
    pub fn new(angle: f32) -> Self {
        Self { angle }
    }

    pub fn start_pose() -> Self {
        Self::new(START_HEADING)
    }

    /// Forward direction on the xz plane.
    pub fn forward_vector(&self) -> Vec2 {
        Vec2::new(self.angle.sin(), self.angle.cos())
    }
}

/// Everything the integrator tracks besides position and heading.
#[derive(Component, Clone)]
pub struct CarMotion {
    /// Signed forward speed; negative while reversing.
    pub speed: f32,
    pub vertical_velocity: f32,
    pub airborne: bool,
    /// Previous tick's ramp height sample, the edge trigger for launch detection.
    pub last_ramp_height: f32,
    /// Display-only wheel steering angle, smoothed independently of heading.
    pub steer_display: f32,
    /// Display-only wheel spin angle.
    pub wheel_spin: f32,
}

impl Default for CarMotion {
    fn default() -> Self {
        Self {
            speed: 0.0,
            vertical_velocity: 0.0,
            airborne: false,
            last_ramp_height: 0.0,
            steer_display: 0.0,
            wheel_spin: 0.0,
        }
    }
}

/// Control snapshot sampled once at the start of each tick.
#[derive(Resource, Clone, Default)]
pub struct DriveInput {
    pub accelerate: bool,
    pub brake: bool,
    pub left: bool,
    pub right: bool,
}

impl DriveInput {
    /// Steering as -1 (right), 0, or 1 (left).
    pub fn steer(&self) -> f32 {
        let mut steer = 0.0;
        if self.left {
            steer += 1.0;
        }
        if self.right {
            steer -= 1.0;
        }
        steer
    }
}

/// Links an obstacle's sprite back to its registry slot, so rendering can
/// follow cone knocks without the registry holding a handle to the visual.
#[derive(Component)]
pub struct ObstacleId(pub usize);
