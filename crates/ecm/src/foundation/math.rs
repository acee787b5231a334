//! Math utilities and types
//!
//! Entities only need an opaque 2D position and a scalar rotation; the
//! helpers here are for components that want to move them around.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Unit vector pointing along `degrees`, measured counter-clockwise from +X
    pub fn heading(degrees: f32) -> Vec2 {
        let radians = deg_to_rad(degrees);
        Vec2::new(radians.cos(), radians.sin())
    }
}
