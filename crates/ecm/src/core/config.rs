//! # Simulation Configuration
//!
//! Settings for the frame driver and the ambient services around the entity
//! manager. The manager itself has no tunables: it forwards whatever `dt`
//! it is given.
//!
//! Supports TOML and RON through the [`Config`] trait.

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// # Simulation Configuration
///
/// Frame timing policy and logging defaults for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Default log filter, used when `RUST_LOG` is unset
    pub log_level: String,
    /// Fixed timestep in seconds; `None` measures wall-clock time per frame
    pub fixed_dt: Option<f64>,
    /// Upper bound applied by the driver to each frame delta
    pub max_frame_dt: Option<f64>,
    /// Number of frames the driver runs before stopping; `None` runs until
    /// the scene is empty
    pub frame_limit: Option<u64>,
}

impl SimulationConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            fixed_dt: Some(1.0 / 60.0),
            max_frame_dt: Some(0.25),
            frame_limit: None,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Use a fixed timestep
    pub fn with_fixed_dt(mut self, dt: f64) -> Self {
        self.fixed_dt = Some(dt);
        self
    }

    /// Measure real elapsed time instead of a fixed timestep
    pub fn with_measured_dt(mut self) -> Self {
        self.fixed_dt = None;
        self
    }

    /// Clamp frame deltas to `max`
    pub fn with_max_frame_dt(mut self, max: f64) -> Self {
        self.max_frame_dt = Some(max);
        self
    }

    /// Stop after `frames` frames
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!("Unknown log level: {}", self.log_level)));
        }

        if let Some(dt) = self.fixed_dt {
            if !dt.is_finite() || dt <= 0.0 {
                return Err(ConfigError::Invalid(format!("Fixed timestep must be positive, got {dt}")));
            }
        }

        if let Some(max) = self.max_frame_dt {
            if !max.is_finite() || max <= 0.0 {
                return Err(ConfigError::Invalid(format!("Max frame delta must be positive, got {max}")));
            }
        }

        Ok(())
    }

    /// Apply the clamp policy to a frame delta
    pub fn clamp_dt(&self, dt: f64) -> f64 {
        match self.max_frame_dt {
            Some(max) if dt > max => max,
            _ => dt,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for SimulationConfig {}
