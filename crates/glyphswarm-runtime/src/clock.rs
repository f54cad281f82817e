//! Frame clock with a clamped delta

use std::time::Instant;

/// Largest delta handed to the simulation after a stall
pub const MAX_FRAME_DELTA: f64 = 0.25;

/// Tracks elapsed time between frames
pub struct FrameClock {
    /// Sum of clamped deltas in seconds
    pub total_time: f64,
    /// Clamped time since last frame in seconds
    pub delta_time: f64,
    /// Unclamped wall time since the first tick, for frame-rate measurement
    pub wall_time: f64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            wall_time: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock from the wall clock. Call once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }
        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed);
    }

    /// Advance by an explicit amount of wall time
    pub fn advance(&mut self, elapsed: f64) {
        self.first_tick = false;
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        self.wall_time += elapsed;
        self.delta_time = elapsed.min(MAX_FRAME_DELTA);
        self.total_time += self.delta_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::new();
        clock.tick();
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.total_time, 0.0);
    }

    #[test]
    fn test_advance_accumulates() {
        let mut clock = FrameClock::new();
        clock.advance(1.0 / 60.0);
        clock.advance(1.0 / 60.0);
        assert!((clock.delta_time - 1.0 / 60.0).abs() < 1e-12);
        assert!((clock.total_time - 2.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(3.0);
        assert_eq!(clock.delta_time, MAX_FRAME_DELTA);
        assert_eq!(clock.total_time, MAX_FRAME_DELTA);
        assert_eq!(clock.wall_time, 3.0);
    }

    #[test]
    fn test_bad_elapsed_is_zero() {
        let mut clock = FrameClock::new();
        clock.advance(-1.0);
        assert_eq!(clock.delta_time, 0.0);
        clock.advance(f64::NAN);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.wall_time, 0.0);
    }
}
