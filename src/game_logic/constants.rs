// Physics timing
pub const MAX_TICK_DT: f32 = 0.05; // clamp frame hitches so integration stays sane

// Car dimensions
pub const CAR_WIDTH: f32 = 2.0;
pub const CAR_LENGTH: f32 = 4.0;
pub const BASE_CLEARANCE: f32 = 0.5;

// Longitudinal control
pub const MAX_SPEED: f32 = 30.0;
pub const REVERSE_MAX_SPEED: f32 = 10.0;
pub const ACCEL_RATE: f32 = 18.0;
pub const BRAKE_RATE: f32 = 28.0;
pub const REVERSE_ACCEL_RATE: f32 = 12.0;
pub const BRAKE_CROSSOVER: f32 = 0.5; // below this, braking flows into reverse
pub const DRAG_FACTOR: f32 = 0.985;
pub const STOP_EPSILON: f32 = 0.05;

// Steering
pub const TURNING_RATE: f32 = 2.2;
pub const TURN_FALLOFF: f32 = 0.5; // turn rate loss at full speed
pub const MIN_TURN_SPEED: f32 = 0.5;
pub const MAX_STEER_ANGLE: f32 = 0.45; // display-only wheel angle
pub const STEER_SMOOTHING: f32 = 10.0;
pub const WHEEL_RADIUS: f32 = 0.45;

// Collision response
pub const CRASH_SPEED: f32 = 15.0; // strictly above this, rocks and ramp backs wreck the car
pub const ROCK_BOUNCE: f32 = 0.3;
pub const ROCK_PUSH: f32 = 0.5;
pub const RAMP_BACK_BOUNCE: f32 = 0.5;
pub const RAMP_BACK_PUSH: f32 = 1.0;
pub const RAMP_BACK_MARGIN: f32 = 1.5;
pub const RAMP_BACK_MAX_HEIGHT: f32 = 1.5; // already-elevated cars clear the back edge
pub const WALL_BOUNCE: f32 = 0.3;
pub const WALL_PUSH: f32 = 0.5;
pub const CONE_DRAG: f32 = 0.98;
pub const KNOCKED_CONE_PARK: f32 = 1000.0; // where knocked cones get relocated
pub const DEGENERATE_DISTANCE: f32 = 1e-4;

// Ramps and jumping
pub const RAMP_FIELD_MARGIN: f32 = 1.0;
pub const RAMP_EDGE_EPS: f32 = 0.1;
pub const LAUNCH_MIN_SPEED: f32 = 10.0;
pub const LAUNCH_LIFT: f32 = 0.3; // vertical velocity per unit of forward speed
pub const GRAVITY: f32 = 30.0;

// Arena
pub const ARENA_HALF: f32 = 95.0;

// Track geometry
pub const TRACK_RADIUS: f32 = 65.0;
pub const ROAD_HALF_WIDTH: f32 = 20.0;
pub const FINISH_BAND_MIN: f32 = TRACK_RADIUS - ROAD_HALF_WIDTH;
pub const FINISH_BAND_MAX: f32 = TRACK_RADIUS + ROAD_HALF_WIDTH;
pub const FINISH_LATCH_CLEAR: f32 = 5.0; // how far past the line clears the latch

// Start pose: on the finish line, driving towards -X
pub const START_X: f32 = 4.0;
pub const START_Z: f32 = TRACK_RADIUS;
pub const START_HEADING: f32 = -std::f32::consts::FRAC_PI_2;

// Scoring
pub const LAP_BONUS: u32 = 100;
pub const MIN_JUMP_MS: f64 = 200.0;
pub const JUMP_POINTS_PER_100MS: u32 = 10;
