use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::fmt;
use std::fs::File;
use std::io::BufReader;

use crate::game_logic::{ObstacleField, ObstacleKind, TRACK_RADIUS};

/// Obstacle placements for a track, as stored in a JSON layout file.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TrackLayout {
    #[serde(default)]
    pub cones: Vec<ConeDef>,
    #[serde(default)]
    pub rocks: Vec<RockDef>,
    #[serde(default)]
    pub walls: Vec<WallDef>,
    #[serde(default)]
    pub ramps: Vec<RampDef>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ConeDef {
    pub x: f32,
    pub z: f32,
    pub radius: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RockDef {
    pub x: f32,
    pub z: f32,
    pub radius: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WallDef {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
    pub yaw: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RampDef {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub length: f32,
    pub height: f32,
    pub yaw: f32,
}

#[derive(Debug)]
pub enum TrackError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Geometry(String),
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::Io(e) => write!(f, "failed to read track file: {e}"),
            TrackError::Parse(e) => write!(f, "failed to parse track file: {e}"),
            TrackError::Geometry(msg) => write!(f, "bad track geometry: {msg}"),
        }
    }
}

impl std::error::Error for TrackError {}

impl From<std::io::Error> for TrackError {
    fn from(e: std::io::Error) -> Self {
        TrackError::Io(e)
    }
}

impl From<serde_json::Error> for TrackError {
    fn from(e: serde_json::Error) -> Self {
        TrackError::Parse(e)
    }
}

impl TrackLayout {
    /// Reject degenerate geometry before it reaches the collision engine.
    pub fn validate(&self) -> Result<(), TrackError> {
        for cone in &self.cones {
            if cone.radius <= 0.0 {
                return Err(TrackError::Geometry(format!(
                    "cone at ({}, {}) has non-positive radius",
                    cone.x, cone.z
                )));
            }
        }
        for rock in &self.rocks {
            if rock.radius <= 0.0 {
                return Err(TrackError::Geometry(format!(
                    "rock at ({}, {}) has non-positive radius",
                    rock.x, rock.z
                )));
            }
        }
        for wall in &self.walls {
            if wall.width <= 0.0 || wall.depth <= 0.0 {
                return Err(TrackError::Geometry(format!(
                    "wall at ({}, {}) has non-positive extent",
                    wall.x, wall.z
                )));
            }
        }
        for ramp in &self.ramps {
            if ramp.width <= 0.0 || ramp.length <= 0.0 || ramp.height < 0.0 {
                return Err(TrackError::Geometry(format!(
                    "ramp at ({}, {}) has bad dimensions",
                    ramp.x, ramp.z
                )));
            }
        }
        Ok(())
    }

    pub fn into_field(self) -> ObstacleField {
        let mut field = ObstacleField::default();
        // Registration order doubles as collision priority, so keep a fixed
        // kind order: ramps, rocks, walls, cones
        for r in &self.ramps {
            field.add_ramp(r.x, r.z, r.width, r.length, r.height, r.yaw);
        }
        for r in &self.rocks {
            field.add_rock(r.x, r.z, r.radius);
        }
        for w in &self.walls {
            field.add_wall(w.x, w.z, w.width, w.depth, w.yaw);
        }
        for c in &self.cones {
            field.add_cone(c.x, c.z, c.radius);
        }
        field
    }
}

pub fn load_track_from_file(filename: &str) -> Result<ObstacleField, TrackError> {
    let fd = File::open(filename)?;
    let layout: TrackLayout = serde_json::from_reader(BufReader::new(fd))?;
    layout.validate()?;
    Ok(layout.into_field())
}

/// The built-in circuit: a ring road bounded by wall segments inside and out,
/// three ramps spaced around the lap, cone chicanes and a rock scatter on
/// the racing line.
pub fn build_track() -> ObstacleField {
    let mut layout = TrackLayout::default();

    // Outer and inner boundary rings, approximated by straight wall segments.
    // A wall's width axis must run tangent to the circle, so its yaw is the
    // tangent direction at that angle.
    ring_of_walls(&mut layout, TRACK_RADIUS + 24.0, 24);
    ring_of_walls(&mut layout, TRACK_RADIUS - 24.0, 16);

    // Ramps sit on the centerline, slope aligned with the direction of
    // travel, away from the finish line at angle 0
    for theta in [0.3 * TAU, 0.55 * TAU, 0.8 * TAU] {
        let (x, z) = circuit_point(TRACK_RADIUS, theta);
        layout.ramps.push(RampDef {
            x,
            z,
            width: 10.0,
            length: 12.0,
            height: 3.0,
            yaw: travel_direction(theta),
        });
    }

    // Cone chicanes: short arcs of cones alternating inside/outside the line
    for (start, offset) in [(0.12 * TAU, 6.0), (0.4 * TAU, -6.0), (0.68 * TAU, 6.0)] {
        for i in 0..4 {
            let theta = start + i as f32 * 0.01 * TAU;
            let (x, z) = circuit_point(TRACK_RADIUS + offset, theta);
            layout.cones.push(ConeDef { x, z, radius: 0.8 });
        }
    }

    // Rocks near the road edges
    for (theta, offset) in [
        (0.2 * TAU, 12.0),
        (0.47 * TAU, -11.0),
        (0.62 * TAU, 13.0),
        (0.9 * TAU, -12.0),
    ] {
        let (x, z) = circuit_point(TRACK_RADIUS + offset, theta);
        layout.rocks.push(RockDef { x, z, radius: 1.5 });
    }

    layout.into_field()
}

/// Point on the circuit at angle `theta`, measured from the finish line.
fn circuit_point(radius: f32, theta: f32) -> (f32, f32) {
    (radius * theta.sin(), radius * theta.cos())
}

/// Heading of a car lapping the circuit as it passes angle `theta`. The start
/// pose drives towards -X at theta = 0, which works out to theta - pi/2.
fn travel_direction(theta: f32) -> f32 {
    theta - std::f32::consts::FRAC_PI_2
}

fn ring_of_walls(layout: &mut TrackLayout, radius: f32, segments: usize) {
    let segment_width = TAU * radius / segments as f32;
    for i in 0..segments {
        let theta = (i as f32 + 0.5) * TAU / segments as f32;
        let (x, z) = circuit_point(radius, theta);
        layout.walls.push(WallDef {
            x,
            z,
            width: segment_width,
            depth: 1.0,
            yaw: travel_direction(theta),
        });
    }
}

/*
    rendering the obstacle field as flat colored sprites (top-down view:
    world x -> screen x, world z -> screen y)
*/
pub fn spawn_track(mut commands: Commands, field: Res<ObstacleField>) {
    for (index, obstacle) in field.obstacles.iter().enumerate() {
        let (color, size, yaw) = match obstacle.kind {
            ObstacleKind::Cone { radius, .. } => (
                Color::srgb(1.0, 0.5, 0.0),
                Vec2::splat(radius * 2.0),
                0.0,
            ),
            ObstacleKind::Rock { radius } => {
                (Color::srgb(0.45, 0.42, 0.4), Vec2::splat(radius * 2.0), 0.0)
            }
            ObstacleKind::Wall { width, depth, yaw } => (
                Color::srgb(0.6, 0.1, 0.1),
                Vec2::new(width, depth),
                yaw,
            ),
            ObstacleKind::Ramp {
                width,
                length,
                yaw,
                ..
            } => (
                Color::srgb(0.25, 0.5, 0.9),
                Vec2::new(width, length),
                yaw,
            ),
        };

        commands.spawn((
            crate::game_logic::ObstacleId(index),
            Sprite::from_color(color, size),
            Transform {
                translation: Vec3::new(obstacle.position.x, obstacle.position.y, 10.0),
                rotation: Quat::from_rotation_z(-yaw),
                ..default()
            },
        ));
    }
}

/// Follow cone knocks: the registry owns the state, this just hides the
/// sprite once its cone is gone.
pub fn sync_cone_visuals(
    field: Res<ObstacleField>,
    mut sprites: Query<(&crate::game_logic::ObstacleId, &mut Visibility)>,
) {
    if !field.is_changed() {
        return;
    }
    for (id, mut visibility) in sprites.iter_mut() {
        if let Some(obstacle) = field.obstacles.get(id.0) {
            if matches!(obstacle.kind, ObstacleKind::Cone { knocked: true, .. }) {
                *visibility = Visibility::Hidden;
            }
        }
    }
}
