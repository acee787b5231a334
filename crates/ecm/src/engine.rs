//! Frame driver
//!
//! Calls `update(dt)` then `render()` on a [`Scene`] once per frame. Timestep
//! policy (fixed or measured, clamped or not) comes from
//! [`SimulationConfig`]; the entity manager itself accepts any `dt`.

use log::{info, trace};

use crate::core::config::SimulationConfig;
use crate::foundation::time::Timer;
use crate::scene::Scene;

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Delta forwarded to the scene
    pub dt: f64,
    /// Entity count before the update pass
    pub entities_before: usize,
    /// Entity count after the reap
    pub entities_after: usize,
}

impl FrameReport {
    /// Entities reaped this frame
    pub fn reaped(&self) -> usize {
        self.entities_before.saturating_sub(self.entities_after)
    }
}

/// Totals for a [`FrameLoop::run`] call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    /// Frames stepped
    pub frames: u64,
    /// Sum of forwarded deltas
    pub simulated_time: f64,
    /// Entities reaped across all frames
    pub entities_reaped: usize,
    /// Entities left in the scene
    pub entities_remaining: usize,
}

/// Drives a scene frame by frame
pub struct FrameLoop {
    config: SimulationConfig,
    timer: Timer,
}

impl FrameLoop {
    /// Create a driver with the given configuration
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            timer: Timer::new(),
        }
    }

    /// Driver configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Frame timer
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Run one frame with an explicit delta (clamped per the configuration)
    pub fn step(&mut self, scene: &mut Scene, dt: f64) -> FrameReport {
        let dt = self.config.clamp_dt(dt);
        self.timer.advance(dt);
        self.frame(scene, dt)
    }

    /// Run frames until the frame limit is hit, or, without a limit, until
    /// the scene has no entities left
    pub fn run(&mut self, scene: &mut Scene) -> RunSummary {
        info!(
            "Running scene '{}' ({} entities, limit {:?})",
            scene.name(),
            scene.entities().len(),
            self.config.frame_limit
        );

        let mut summary = RunSummary::default();
        loop {
            let keep_going = match self.config.frame_limit {
                Some(limit) => summary.frames < limit,
                None => !scene.entities().is_empty(),
            };
            if !keep_going {
                break;
            }

            let dt = match self.config.fixed_dt {
                Some(dt) => dt,
                None => self.timer.lap(),
            };
            let report = self.step(scene, dt);

            summary.frames += 1;
            summary.simulated_time += report.dt;
            summary.entities_reaped += report.reaped();
        }
        summary.entities_remaining = scene.entities().len();

        info!(
            "Scene '{}' stopped after {} frames ({:.3}s simulated, {} reaped, {} remaining)",
            scene.name(),
            summary.frames,
            summary.simulated_time,
            summary.entities_reaped,
            summary.entities_remaining
        );
        summary
    }

    fn frame(&self, scene: &mut Scene, dt: f64) -> FrameReport {
        let entities_before = scene.entities().len();
        scene.update(dt);
        scene.render();

        let report = FrameReport {
            frame: self.timer.frame_count(),
            dt,
            entities_before,
            entities_after: scene.entities().len(),
        };
        trace!("{report:?}");
        report
    }
}
