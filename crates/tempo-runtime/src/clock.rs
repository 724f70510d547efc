//! Time sources for phase runs

use std::time::Instant;

/// Supplies the time values a runner snapshots at the start of a phase run.
///
/// Fixed-timestep phases read `fixed_time`/`fixed_delta_time`, every other
/// phase reads `time`/`delta_time`.
pub trait TimeSource {
    /// Elapsed variable-rate time in seconds
    fn time(&self) -> f64;
    /// Duration of the current frame in seconds
    fn delta_time(&self) -> f32;
    /// Elapsed fixed-rate time in seconds
    fn fixed_time(&self) -> f64;
    /// Fixed timestep interval in seconds
    fn fixed_delta_time(&self) -> f32;
}

/// Tracks game time and provides a fixed-timestep accumulator
pub struct GameClock {
    /// Total elapsed game time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Fixed timestep interval (default: 1/50 second)
    pub fixed_timestep: f64,
    /// Time of the most recently started fixed step
    pub fixed_time: f64,
    /// Upper bound on a single frame's delta
    pub max_frame_time: f64,
    /// Accumulated time for fixed-step consumption
    accumulator: f64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 50.0,
            fixed_time: 0.0,
            max_frame_time: 0.25,
            accumulator: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl GameClock {
    /// Create a new game clock with default 50Hz fixed timestep
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a game clock with a custom fixed timestep
    pub fn with_fixed_timestep(hz: f64) -> Self {
        Self {
            fixed_timestep: 1.0 / hz,
            ..Self::default()
        }
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

    /// Advance the clock by an explicit frame duration
    pub fn advance(&mut self, dt: f64) {
        // Clamp to avoid spiral of death
        self.delta_time = dt.max(0.0).min(self.max_frame_time);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Returns true if there's enough accumulated time for a fixed update step
    pub fn should_fixed_update(&self) -> bool {
        self.accumulator >= self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator and move fixed time forward
    pub fn consume_fixed_step(&mut self) {
        self.accumulator -= self.fixed_timestep;
        self.fixed_time += self.fixed_timestep;
    }

    /// Discard whole fixed steps still pending, keeping the partial remainder
    pub fn drop_fixed_backlog(&mut self) {
        self.accumulator %= self.fixed_timestep;
    }

    /// Get the interpolation alpha for rendering between fixed steps
    pub fn interpolation_alpha(&self) -> f64 {
        self.accumulator / self.fixed_timestep
    }
}

impl TimeSource for GameClock {
    fn time(&self) -> f64 {
        self.total_time
    }

    fn delta_time(&self) -> f32 {
        self.delta_time as f32
    }

    fn fixed_time(&self) -> f64 {
        self.fixed_time
    }

    fn fixed_delta_time(&self) -> f32 {
        self.fixed_timestep as f32
    }
}

/// Time source whose values are set directly by the host
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ManualTime {
    pub time: f64,
    pub delta_time: f32,
    pub fixed_time: f64,
    pub fixed_delta_time: f32,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixed_delta(fixed_delta_time: f32) -> Self {
        Self {
            fixed_delta_time,
            ..Self::default()
        }
    }

    /// Move variable time forward by one frame of `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.delta_time = dt;
        self.time += f64::from(dt);
    }

    /// Move fixed time forward by one fixed step
    pub fn advance_fixed(&mut self) {
        self.fixed_time += f64::from(self.fixed_delta_time);
    }
}

impl TimeSource for ManualTime {
    fn time(&self) -> f64 {
        self.time
    }

    fn delta_time(&self) -> f32 {
        self.delta_time
    }

    fn fixed_time(&self) -> f64 {
        self.fixed_time
    }

    fn fixed_delta_time(&self) -> f32 {
        self.fixed_delta_time
    }
}
