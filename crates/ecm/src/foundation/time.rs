//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
///
/// Deltas are reported in seconds as `f64`, matching the `dt` the entity
/// manager forwards.
pub struct Timer {
    last_frame: Instant,
    delta_time: f64,
    total_time: f64,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Measure the wall-clock time since the previous tick (call once per frame)
    pub fn tick(&mut self) -> f64 {
        let elapsed = self.lap();
        self.advance(elapsed);
        elapsed
    }

    /// Read and reset the wall clock without recording a frame
    ///
    /// Pair with [`advance`](Self::advance) when the recorded delta differs
    /// from the measured one (clamping, for instance).
    pub fn lap(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        elapsed
    }

    /// Record a frame of a caller-chosen length without reading the clock
    pub fn advance(&mut self, delta_time: f64) {
        self.delta_time = delta_time;
        self.total_time += delta_time;
        self.frame_count += 1;
    }

    /// Get the time of the last frame in seconds
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Get the total simulated time
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f64 {
        if self.total_time > 0.0 {
            self.frame_count as f64 / self.total_time
        } else {
            0.0
        }
    }
}
