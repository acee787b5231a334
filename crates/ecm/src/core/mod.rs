//! # Core Module
//!
//! Shared configuration for the simulation loop, plus re-exports of the
//! modules most callers reach for.
//!
//! ## Organization
//!
//! - **Config**: Simulation configuration (logging, frame timing)
//! - **Foundation**: Low-level utilities (math, keys, time, logging)
//! - **ECS**: Entity/component ownership and lifecycle

pub mod config;

pub use crate::foundation;
pub use crate::ecs;

pub use config::{SimulationConfig, Config, ConfigError};
