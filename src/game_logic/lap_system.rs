use bevy::prelude::*;

use crate::game_logic::{
    FINISH_BAND_MAX, FINISH_BAND_MIN, FINISH_LATCH_CLEAR, JUMP_POINTS_PER_100MS, LAP_BONUS,
    MIN_JUMP_MS,
};

/// Lap counter, lap clock, score and jump timing for the session. Owned by
/// the driving core, read-only from the HUD. Everything is in-memory; nothing
/// survives the process.
#[derive(Resource)]
pub struct RaceStats {
    lap: u32,
    lap_times_ms: Vec<u32>,
    best_lap_ms: Option<u32>,
    lap_start_ms: f64,
    /// Set while the car sits on the finish line, so one crossing counts once.
    crossed_line: bool,
    prev_x: f32,
    score: u32,
    jump_in_progress: bool,
    jump_start_ms: f64,
    last_jump_points: Option<u32>,
    broken: bool,
}

impl RaceStats {
    pub fn new(now_ms: f64) -> Self {
        Self {
            lap: 0,
            lap_times_ms: Vec::new(),
            best_lap_ms: None,
            lap_start_ms: now_ms,
            crossed_line: false,
            prev_x: f32::NAN,
            score: 0,
            jump_in_progress: false,
            jump_start_ms: 0.0,
            last_jump_points: None,
            broken: false,
        }
    }

    /// Back to session defaults, with the lap clock restarted at `now_ms`.
    pub fn reset(&mut self, now_ms: f64) {
        *self = Self::new(now_ms);
    }

    /// Finish-line detection, fed the car's (x, z) every tick.
    ///
    /// A lap counts when the car crosses x = 0 from positive x inside the
    /// finish z-band. The crossed-line latch stops a car lingering on the
    /// line from counting twice; it clears once the car is clear of the line.
    pub fn record_position(&mut self, x: f32, z: f32, now_ms: f64) {
        let in_band = z >= FINISH_BAND_MIN && z <= FINISH_BAND_MAX;
        let prev_x = self.prev_x;
        self.prev_x = x;

        if in_band && !self.crossed_line && prev_x > 0.0 && x <= 0.0 {
            self.crossed_line = true;
            let lap_ms = (now_ms - self.lap_start_ms).max(0.0).round() as u32;
            self.lap += 1;
            self.lap_times_ms.push(lap_ms);
            if self.best_lap_ms.is_none_or(|best| lap_ms < best) {
                self.best_lap_ms = Some(lap_ms);
            }
            self.score += LAP_BONUS;
            self.lap_start_ms = now_ms;
            info!("Lap {} complete in {} ms", self.lap, lap_ms);
        }

        if !in_band || x.abs() > FINISH_LATCH_CLEAR {
            self.crossed_line = false;
        }
    }

    /// Start the jump clock. Idempotent while a jump is in progress.
    pub fn start_jump(&mut self, now_ms: f64) {
        if !self.jump_in_progress {
            self.jump_in_progress = true;
            self.jump_start_ms = now_ms;
        }
    }

    /// Close the jump interval and return the points awarded. Hops shorter
    /// than the minimum air time score nothing.
    pub fn end_jump(&mut self, now_ms: f64) -> u32 {
        if !self.jump_in_progress {
            return 0;
        }
        self.jump_in_progress = false;

        let air_ms = now_ms - self.jump_start_ms;
        if air_ms < MIN_JUMP_MS {
            return 0;
        }

        let points = (air_ms / 100.0).floor() as u32 * JUMP_POINTS_PER_100MS;
        self.score += points;
        self.last_jump_points = Some(points);
        points
    }

    /// One-shot read of the latest jump award; cleared once taken.
    pub fn take_jump_points(&mut self) -> Option<u32> {
        self.last_jump_points.take()
    }

    pub fn mark_broken(&mut self) {
        self.broken = true;
    }

    pub fn repair(&mut self) {
        self.broken = false;
    }

    pub fn broken(&self) -> bool {
        self.broken
    }

    pub fn lap(&self) -> u32 {
        self.lap
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_lap_ms(&self) -> Option<u32> {
        self.best_lap_ms
    }

    pub fn lap_times_ms(&self) -> &[u32] {
        &self.lap_times_ms
    }

    pub fn current_lap_elapsed_ms(&self, now_ms: f64) -> u32 {
        (now_ms - self.lap_start_ms).max(0.0).round() as u32
    }

    pub fn jump_in_progress(&self) -> bool {
        self.jump_in_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::TRACK_RADIUS;

    #[test]
    fn test_crossing_finish_line_counts_a_lap() {
        let mut stats = RaceStats::new(0.0);

        stats.record_position(3.0, TRACK_RADIUS, 0.0);
        stats.record_position(-1.0, TRACK_RADIUS, 42_000.0);

        assert_eq!(stats.lap(), 1);
        assert_eq!(stats.score(), LAP_BONUS);
        assert_eq!(stats.lap_times_ms(), &[42_000]);
        assert_eq!(stats.best_lap_ms(), Some(42_000));
        // Lap clock restarted at the crossing
        assert_eq!(stats.current_lap_elapsed_ms(42_500.0), 500);
    }

    #[test]
    fn test_lingering_on_line_counts_once() {
        let mut stats = RaceStats::new(0.0);

        stats.record_position(2.0, TRACK_RADIUS, 0.0);
        stats.record_position(-0.5, TRACK_RADIUS, 30_000.0);
        // Car wobbles back and forth right on the line
        stats.record_position(0.5, TRACK_RADIUS, 30_100.0);
        stats.record_position(-0.5, TRACK_RADIUS, 30_200.0);

        assert_eq!(stats.lap(), 1);
    }

    #[test]
    fn test_latch_clears_past_the_line() {
        let mut stats = RaceStats::new(0.0);

        stats.record_position(2.0, TRACK_RADIUS, 0.0);
        stats.record_position(-1.0, TRACK_RADIUS, 30_000.0);
        // Drive well past, around, and back over
        stats.record_position(-20.0, TRACK_RADIUS, 31_000.0);
        stats.record_position(2.0, TRACK_RADIUS, 59_000.0);
        stats.record_position(-1.0, TRACK_RADIUS, 60_000.0);

        assert_eq!(stats.lap(), 2);
        assert_eq!(stats.lap_times_ms(), &[30_000, 30_000]);
    }

    #[test]
    fn test_crossing_outside_band_ignored() {
        let mut stats = RaceStats::new(0.0);

        // Same x sweep, but cutting across the infield
        stats.record_position(2.0, 10.0, 0.0);
        stats.record_position(-1.0, 10.0, 5_000.0);

        assert_eq!(stats.lap(), 0);
        assert_eq!(stats.score(), 0);
    }

    #[test]
    fn test_wrong_direction_crossing_ignored() {
        let mut stats = RaceStats::new(0.0);

        stats.record_position(-2.0, TRACK_RADIUS, 0.0);
        stats.record_position(1.0, TRACK_RADIUS, 5_000.0);

        assert_eq!(stats.lap(), 0);
    }

    #[test]
    fn test_best_lap_tracks_minimum() {
        let mut stats = RaceStats::new(0.0);

        stats.record_position(2.0, TRACK_RADIUS, 0.0);
        stats.record_position(-1.0, TRACK_RADIUS, 40_000.0); // lap 1: 40s
        stats.record_position(-20.0, TRACK_RADIUS, 41_000.0);
        stats.record_position(2.0, TRACK_RADIUS, 74_000.0);
        stats.record_position(-1.0, TRACK_RADIUS, 75_000.0); // lap 2: 35s
        stats.record_position(-20.0, TRACK_RADIUS, 76_000.0);
        stats.record_position(2.0, TRACK_RADIUS, 114_000.0);
        stats.record_position(-1.0, TRACK_RADIUS, 115_000.0); // lap 3: 40s

        assert_eq!(stats.lap(), 3);
        assert_eq!(stats.best_lap_ms(), Some(35_000));
    }

    #[test]
    fn test_short_hop_scores_nothing() {
        let mut stats = RaceStats::new(0.0);

        stats.start_jump(1_000.0);
        assert_eq!(stats.end_jump(1_199.0), 0);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.take_jump_points(), None);
    }

    #[test]
    fn test_jump_points_floor_per_100ms() {
        let mut stats = RaceStats::new(0.0);

        stats.start_jump(1_000.0);
        assert_eq!(stats.end_jump(1_250.0), 20);
        assert_eq!(stats.score(), 20);
    }

    #[test]
    fn test_start_jump_idempotent_while_airborne() {
        let mut stats = RaceStats::new(0.0);

        stats.start_jump(1_000.0);
        stats.start_jump(1_300.0); // must not restart the clock
        assert_eq!(stats.end_jump(1_500.0), 50);
    }

    #[test]
    fn test_end_jump_without_start_is_a_no_op() {
        let mut stats = RaceStats::new(0.0);
        assert_eq!(stats.end_jump(5_000.0), 0);
    }

    #[test]
    fn test_jump_points_read_once() {
        let mut stats = RaceStats::new(0.0);

        stats.start_jump(0.0);
        stats.end_jump(400.0);

        assert_eq!(stats.take_jump_points(), Some(40));
        assert_eq!(stats.take_jump_points(), None);
    }

    #[test]
    fn test_broken_and_repair() {
        let mut stats = RaceStats::new(0.0);

        stats.mark_broken();
        assert!(stats.broken());
        stats.repair();
        assert!(!stats.broken());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut stats = RaceStats::new(0.0);
        stats.record_position(2.0, TRACK_RADIUS, 0.0);
        stats.record_position(-1.0, TRACK_RADIUS, 30_000.0);
        stats.mark_broken();

        stats.reset(100_000.0);

        assert_eq!(stats.lap(), 0);
        assert_eq!(stats.score(), 0);
        assert!(!stats.broken());
        assert_eq!(stats.current_lap_elapsed_ms(100_250.0), 250);
    }
}
